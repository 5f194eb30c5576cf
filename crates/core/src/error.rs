use crate::severity::Severity;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate rule order {order}")]
    DuplicateRuleOrder { order: i32 },

    #[error("Invalid pattern '{pattern}' in rule {order}: {source}")]
    InvalidPattern {
        order: i32,
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("Unknown severity '{name}' in rule {order}; expected one of {}", Severity::names())]
    UnknownSeverity { order: i32, name: String },
}
