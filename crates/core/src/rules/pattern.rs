//! Label pattern handling: series selection and alias extraction.
//!
//! Patterns are authored in the dashboard's regex dialect, which allows
//! lookaround and backreferences. Plain patterns compile with `regex`;
//! the rest go through `fancy_regex`.

use regex::Regex;

/// A compiled label pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    Regex(Regex),
    Fancy(fancy_regex::Regex),
}

impl Pattern {
    /// Compile `pattern`, reaching for the backtracking engine only when
    /// the pattern needs it.
    pub fn compile(pattern: &str) -> Result<Self, fancy_regex::Error> {
        match Regex::new(pattern) {
            Ok(re) => Ok(Pattern::Regex(re)),
            Err(_) => fancy_regex::Regex::new(pattern).map(Pattern::Fancy),
        }
    }

    /// Unanchored search. A backtracking run that hits its limit counts as
    /// no match.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(text),
            Pattern::Fancy(re) => re.is_match(text).unwrap_or(false),
        }
    }

    /// First capture group, if the pattern matches and the group took part.
    pub fn first_group<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            Pattern::Regex(re) => re.captures(text)?.get(1).map(|m| m.as_str()),
            Pattern::Fancy(re) => re.captures(text).ok()??.get(1).map(|m| m.as_str()),
        }
    }
}

/// Compiled series selector for one rule.
///
/// Matching is an unanchored regex search, so `"cpu"` selects both
/// `"cpu"` and `"node1.cpu.user"`. A pattern that does not compile degrades
/// to a literal substring test instead of failing the whole rule.
#[derive(Debug, Clone)]
pub enum SeriesMatcher {
    Pattern(Pattern),
    Literal(String),
}

impl SeriesMatcher {
    pub fn new(pattern: &str) -> Self {
        match Pattern::compile(pattern) {
            Ok(compiled) => SeriesMatcher::Pattern(compiled),
            Err(e) => {
                tracing::warn!(
                    pattern,
                    error = %e,
                    "Invalid series pattern, matching it as literal text",
                );
                SeriesMatcher::Literal(pattern.to_string())
            }
        }
    }

    pub fn is_match(&self, label: &str) -> bool {
        match self {
            SeriesMatcher::Pattern(compiled) => compiled.is_match(label),
            SeriesMatcher::Literal(text) => label.contains(text.as_str()),
        }
    }
}

/// Display name for a sample under an alias pattern.
///
/// Uses the first capture group when the alias compiles, matches the label
/// and the group captured something; otherwise the alias text itself.
pub fn resolve_alias<'a>(alias: &'a str, label: &'a str) -> &'a str {
    Pattern::compile(alias)
        .ok()
        .and_then(|compiled| compiled.first_group(label))
        .filter(|name| !name.is_empty())
        .unwrap_or(alias)
}
