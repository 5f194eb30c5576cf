//! End-to-end checks of the evaluation engine through its public API:
//! status, lines, colors and advisories computed from the same inputs.

use std::cell::RefCell;

use status_overview_core::{
    build_lines, evaluate, report_duplicate_labels, resolve_color, Advisory, AdvisorySink,
    BlinkTracker, ComparisonOperator, CustomThreshold, DisplayMode, LogicExpression, MetricSample,
    NumberMode, Palette, PanelState, Rule, Severity, SeverityThresholds, ShowMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cpu_rule(reverse: bool) -> Rule {
    let mut rule = Rule::new(
        0,
        "cpu",
        DisplayMode::Number(NumberMode {
            thresholds: SeverityThresholds::new()
                .with(Severity::Warning, "80")
                .with(Severity::Critical, "90"),
            reverse_comparison: reverse,
            ..Default::default()
        }),
    );
    rule.show_name = true;
    rule.show_value = true;
    rule
}

fn show_ge(value: &str) -> Rule {
    let mut rule = Rule::new(
        1,
        "queue",
        DisplayMode::Show(ShowMode {
            logic: Some(LogicExpression {
                operator: ComparisonOperator::Ge,
                value: value.to_string(),
            }),
        }),
    );
    rule.show_name = true;
    rule.show_value = true;
    rule
}

#[derive(Default)]
struct Recorder(RefCell<Vec<Advisory>>);

impl AdvisorySink for Recorder {
    fn publish(&self, advisory: Advisory) {
        self.0.borrow_mut().push(advisory);
    }
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

/// A value above both thresholds resolves to the more severe one.
#[test]
fn cpu_above_critical_is_critical() {
    let samples = vec![MetricSample::new("cpu", 95.0)];
    let status = evaluate(&samples, &[cpu_rule(false)]);
    assert_eq!(status.state.state_name(), "critical-state");
}

/// Reversed comparison: 5 is at or below both thresholds, critical wins.
#[test]
fn reversed_low_value_is_critical() {
    let samples = vec![MetricSample::new("cpu", 5.0)];
    let status = evaluate(&samples, &[cpu_rule(true)]);
    assert_eq!(status.state.state_name(), "critical-state");
}

/// Show-mode logic suppresses 50 and emits 150 for `ge 100`.
#[test]
fn show_logic_example() {
    let rule = show_ge("100");
    let quiet = build_lines(&[MetricSample::new("queue", 50.0)], std::slice::from_ref(&rule));
    assert!(quiet.is_empty());

    let lines = build_lines(&[MetricSample::new("queue", 150.0)], &[rule]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "queue: 150");
}

/// Alias capture group and literal fallback.
#[test]
fn alias_example() {
    let mut rule = Rule::new(0, "db", DisplayMode::Show(ShowMode::default()));
    rule.show_name = true;
    rule.alias = Some(r"^(\w+)-prod$".to_string());

    let lines = build_lines(
        &[MetricSample::new("db-prod", 1.0), MetricSample::new("db-staging", 1.0)],
        &[rule],
    );
    assert_eq!(lines[0].text, "db");
    assert_eq!(lines[1].text, r"^(\w+)-prod$");
}

/// Two samples labelled `latency` raise exactly one advisory.
#[test]
fn duplicate_label_example() {
    let recorder = Recorder::default();
    let samples = vec![
        MetricSample::new("latency", 10.0),
        MetricSample::new("latency", 12.0),
    ];
    assert_eq!(report_duplicate_labels(&samples, &recorder), 1);
    assert_eq!(recorder.0.borrow().len(), 1);

    // Advisories do not change the evaluation.
    assert!(evaluate(&samples, &[]).is_ok());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A rule that selects no sample leaves the result unchanged.
#[test]
fn non_matching_rule_is_neutral() {
    let samples = vec![MetricSample::new("cpu", 85.0)];
    let base = evaluate(&samples, &[cpu_rule(false)]);

    let mut extra = cpu_rule(false);
    extra.order = 9;
    extra.series_match = "^nothing$".into();
    let with_extra = evaluate(&samples, &[cpu_rule(false), extra]);

    assert_eq!(base, with_extra);
}

/// The worst rank wins regardless of which rule reached it first.
#[test]
fn worst_rank_is_order_independent() {
    let a = Rule::new(
        0,
        "a",
        DisplayMode::Number(NumberMode {
            thresholds: SeverityThresholds::new().with(Severity::Average, "0"),
            ..Default::default()
        }),
    );
    let b = Rule::new(
        1,
        "b",
        DisplayMode::Number(NumberMode {
            thresholds: SeverityThresholds::new().with(Severity::Warning, "0"),
            ..Default::default()
        }),
    );
    let samples = vec![MetricSample::new("a", 1.0), MetricSample::new("b", 1.0)];

    let status = evaluate(&samples, &[a, b]);
    assert_eq!(status.state, PanelState::Alert(Severity::Average));
}

/// Equal ranks from custom thresholds keep the first-evaluated color.
#[test]
fn first_custom_color_wins_on_tie() {
    let custom = |order: i32, pattern: &str, color: &str| {
        Rule::new(
            order,
            pattern,
            DisplayMode::Number(NumberMode {
                custom_thresholds: vec![CustomThreshold::new(Severity::Average, "0", color)],
                use_custom_thresholds: true,
                ..Default::default()
            }),
        )
    };
    let samples = vec![MetricSample::new("a", 1.0), MetricSample::new("b", 1.0)];
    let status = evaluate(&samples, &[custom(0, "a", "#first"), custom(1, "b", "#second")]);

    let colors = resolve_color(&status, &Palette::default());
    assert_eq!(colors.background, "#first");
}

/// Palette colors are used when no custom color was captured.
#[test]
fn palette_color_for_plain_severity() {
    let palette = Palette::default();
    let status = evaluate(&[MetricSample::new("cpu", 85.0)], &[cpu_rule(false)]);
    assert_eq!(resolve_color(&status, &palette).background, palette.warning);
}

/// Lines are a pure function of their inputs.
#[test]
fn lines_are_idempotent() {
    let samples = vec![MetricSample::new("cpu", 85.0), MetricSample::new("queue", 200.0)];
    let rules = vec![cpu_rule(false), show_ge("100")];
    assert_eq!(build_lines(&samples, &rules), build_lines(&samples, &rules));
}

/// A full pass over a realistic rule set loaded from editor JSON.
#[test]
fn editor_json_rule_set() {
    let rules: Vec<Rule> = serde_json::from_str(
        r##"[
            {"order": 0, "seriesMatch": "^cpu", "displayMode": "number",
             "numberThreshold": {"warning": "70", "high": "90", "showOnlyOnThreshold": false},
             "showName": true, "showValue": true, "description": "CPU load"},
            {"order": 1, "seriesMatch": "status", "displayMode": "string",
             "stringThreshold": {"disaster": "DOWN"}, "showName": true, "showValue": true,
             "showOnlyOnThreshold": true},
            {"order": 2, "seriesMatch": "mem", "displayMode": "number",
             "useCustomThresholds": true,
             "customThresholds": [{"name": "minor", "value": "50", "color": "#0af", "order": 0}],
             "showValue": true, "useCustomFormatting": true, "unitFormat": "percent", "decimals": 1}
        ]"##,
    )
    .expect("rules should deserialize");

    let samples = vec![
        MetricSample::new("cpu0", 75.0).with_formatted("75%"),
        MetricSample::new("status", "UP"),
        MetricSample::new("mem", 60.27),
    ];

    let status = evaluate(&samples, &rules);
    assert_eq!(status.state, PanelState::Alert(Severity::Warning));
    assert_eq!(status.custom_color, None);

    let lines = build_lines(&samples, &rules);
    let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["cpu0: 75%", "60.3%"]);
    assert_eq!(lines[0].tooltip, "CPU load");
}

/// The tracker reports worsening once per transition.
#[test]
fn blink_follows_evaluation() {
    let mut tracker = BlinkTracker::new();
    let rules = vec![cpu_rule(false)];

    let calm = evaluate(&[MetricSample::new("cpu", 10.0)], &rules);
    assert!(!tracker.observe(1, calm.state));

    let hot = evaluate(&[MetricSample::new("cpu", 99.0)], &rules);
    assert!(tracker.observe(1, hot.state));
    assert!(!tracker.observe(1, hot.state));
}
