//! State classification against the `states` threshold table.
//!
//! `"states": { "warning": 30, "critical": 15 }` names style classes keyed by
//! numeric cutoffs. Classification sorts the cutoffs, picks the first one the
//! value satisfies and clears every other configured class.

use tracing::debug;
use waybutton_rs_core::{ConfigView, RenderSink};

/// Config key holding the threshold table.
pub const STATES_KEY: &str = "states";

/// One configured state and its cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateThreshold<'a> {
    pub name: &'a str,
    pub threshold: u64,
}

impl StateThreshold<'_> {
    /// Whether `value` satisfies this cutoff in the given direction.
    #[must_use]
    pub fn matches(&self, value: u8, lesser: bool) -> bool {
        let value = u64::from(value);
        if lesser {
            value <= self.threshold
        } else {
            value >= self.threshold
        }
    }
}

/// Outcome of a classification: the winning state and the states to clear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification<'a> {
    winner: Option<&'a str>,
    cleared: Vec<&'a str>,
}

impl<'a> Classification<'a> {
    #[must_use]
    pub const fn winner(&self) -> Option<&'a str> {
        self.winner
    }

    /// Every configured state except the winner, in evaluation order.
    #[must_use]
    pub fn cleared(&self) -> &[&'a str] {
        &self.cleared
    }

    /// Mirror the classification onto a sink's tags.
    pub fn apply<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for name in &self.cleared {
            sink.remove_tag(name);
        }
        if let Some(winner) = self.winner {
            sink.add_tag(winner);
        }
    }
}

/// Classifies values against a module's `states` table.
///
/// Thresholds are re-read on every call, so the result depends only on the
/// table and the arguments.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use waybutton_rs_button::StateClassifier;
/// use waybutton_rs_core::ConfigView;
///
/// let config = json!({ "states": { "warning": 80, "critical": 40 } });
/// let states = StateClassifier::from_config(ConfigView::new(&config));
///
/// let result = states.classify(50, true).unwrap();
/// assert_eq!(result.winner(), Some("warning"));
/// assert_eq!(result.cleared(), ["critical"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StateClassifier<'a> {
    table: ConfigView<'a>,
}

impl<'a> StateClassifier<'a> {
    #[must_use]
    pub fn from_config(config: ConfigView<'a>) -> Self {
        Self {
            table: config.get(STATES_KEY),
        }
    }

    /// Whether the module has a threshold table at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.table.is_object()
    }

    /// Unsigned thresholds sorted in evaluation order.
    ///
    /// Ascending when `lesser`, descending otherwise. The sort is stable, so
    /// equal cutoffs keep the config's sorted key order.
    #[must_use]
    pub fn thresholds(&self, lesser: bool) -> Vec<StateThreshold<'a>> {
        let mut states: Vec<StateThreshold<'a>> = self
            .table
            .entries()
            .filter_map(|(name, value)| {
                value
                    .as_uint()
                    .map(|threshold| StateThreshold { name, threshold })
            })
            .collect();

        if lesser {
            states.sort_by(|a, b| a.threshold.cmp(&b.threshold));
        } else {
            states.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        }
        states
    }

    /// Classify `value` without touching any tags.
    ///
    /// Returns `None` when no `states` table is configured.
    #[must_use]
    pub fn classify(&self, value: u8, lesser: bool) -> Option<Classification<'a>> {
        if !self.is_configured() {
            return None;
        }

        let mut result = Classification::default();
        for state in self.thresholds(lesser) {
            if result.winner.is_none() && state.matches(value, lesser) {
                result.winner = Some(state.name);
            } else {
                result.cleared.push(state.name);
            }
        }
        Some(result)
    }

    /// Classify `value`, update the sink's tags and return the winning state.
    ///
    /// Returns an empty string when nothing matches or no table exists; in
    /// the latter case the sink is left alone.
    pub fn apply<S: RenderSink + ?Sized>(&self, value: u8, lesser: bool, sink: &mut S) -> &'a str {
        let Some(result) = self.classify(value, lesser) else {
            return "";
        };
        result.apply(sink);
        debug!(value, lesser, state = ?result.winner(), "classified state");
        result.winner().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use waybutton_rs_core::WaybarOutput;

    fn classifier(config: &Value) -> StateClassifier<'_> {
        StateClassifier::from_config(ConfigView::new(config))
    }

    #[test]
    fn test_no_table_means_no_mutation() {
        let config = json!({ "states": [10, 20] });
        let states = classifier(&config);
        assert!(!states.is_configured());
        assert_eq!(states.classify(50, false), None);

        let mut output = WaybarOutput::default().with_class("warning");
        assert_eq!(states.apply(50, false, &mut output), "");
        assert_eq!(output.class, vec!["warning".to_owned()]);
    }

    #[test]
    fn test_lesser_picks_smallest_satisfied_threshold() {
        let config = json!({ "states": { "warning": 80, "critical": 40 } });
        let states = classifier(&config);

        let mut output = WaybarOutput::default().with_class("critical");
        assert_eq!(states.apply(50, true, &mut output), "warning");
        assert!(output.has_class("warning"));
        assert!(!output.has_class("critical"));

        assert_eq!(states.apply(30, true, &mut output), "critical");
        assert!(output.has_class("critical"));
        assert!(!output.has_class("warning"));

        assert_eq!(states.apply(90, true, &mut output), "");
        assert!(output.class.is_empty());
    }

    #[test]
    fn test_greater_picks_largest_satisfied_threshold() {
        let config = json!({ "states": { "warning": 80, "critical": 40 } });
        let states = classifier(&config);

        let result = states.classify(90, false).unwrap();
        assert_eq!(result.winner(), Some("warning"));
        assert_eq!(result.cleared(), ["critical"]);

        let result = states.classify(50, false).unwrap();
        assert_eq!(result.winner(), Some("critical"));
        assert_eq!(result.cleared(), ["warning"]);

        let result = states.classify(10, false).unwrap();
        assert_eq!(result.winner(), None);
        assert_eq!(result.cleared(), ["warning", "critical"]);
    }

    #[test]
    fn test_ties_follow_sorted_key_order() {
        let config = json!({ "states": { "zeta": 50, "alpha": 50, "low": 10 } });
        let states = classifier(&config);

        let names: Vec<&str> = states.thresholds(false).iter().map(|s| s.name).collect();
        assert_eq!(names, ["alpha", "zeta", "low"]);
        let names: Vec<&str> = states.thresholds(true).iter().map(|s| s.name).collect();
        assert_eq!(names, ["low", "alpha", "zeta"]);

        let result = states.classify(60, false).unwrap();
        assert_eq!(result.winner(), Some("alpha"));
        assert_eq!(result.cleared(), ["zeta", "low"]);

        let config: serde_json::Value =
            serde_json::from_str(r#"{ "states": { "zeta": 50, "alpha": 50 } }"#).unwrap();
        let result = classifier(&config).classify(60, false).unwrap();
        assert_eq!(result.winner(), Some("alpha"));
        assert_eq!(result.cleared(), ["zeta"]);
    }

    #[test]
    fn test_non_unsigned_thresholds_are_ignored() {
        let config = json!({
            "states": { "good": 95, "odd": "high", "neg": -5, "half": 12.5, "whole": 30.0 }
        });
        let states = classifier(&config);

        let names: Vec<&str> = states.thresholds(false).iter().map(|s| s.name).collect();
        assert_eq!(names, ["good", "whole"]);

        let mut output = WaybarOutput::default().with_class("odd");
        assert_eq!(states.apply(40, false, &mut output), "whole");
        // Unparsed entries are not part of the table, so their tags stay.
        assert!(output.has_class("odd"));
    }

    #[test]
    fn test_thresholds_above_value_range() {
        let config = json!({ "states": { "never": 300, "always": 0 } });
        let states = classifier(&config);
        assert_eq!(states.classify(255, false).unwrap().winner(), Some("always"));
        assert_eq!(states.classify(255, true).unwrap().winner(), Some("never"));
    }

    #[test]
    fn test_repeated_classification_is_idempotent() {
        let config = json!({ "states": { "warning": 30, "critical": 15 } });
        let states = classifier(&config);

        let mut once = WaybarOutput::default();
        let first = states.apply(20, true, &mut once);

        let mut twice = once.clone();
        let second = states.apply(20, true, &mut twice);

        assert_eq!(first, second);
        assert_eq!(once, twice);
        assert_eq!(twice.class, vec!["warning".to_owned()]);
    }

    #[test]
    fn test_empty_table() {
        let config = json!({ "states": {} });
        let states = classifier(&config);
        let result = states.classify(10, false).unwrap();
        assert_eq!(result, Classification::default());
    }
}
