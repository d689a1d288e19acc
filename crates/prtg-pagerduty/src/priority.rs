//! PRTG priority to `PagerDuty` severity translation.

use crate::pagerduty::EventSeverity;

/// Result of translating a PRTG priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTranslation {
    /// Lowest priority: no event is sent at all
    Suppress,
    /// Send the event with this severity
    Severity(EventSeverity),
}

/// Map a PRTG priority (`*` to `*****`) to a severity.
///
/// Matching is exact and case-sensitive. A single star suppresses the event;
/// anything unrecognised, including an empty string, is critical.
#[must_use]
pub fn translate_priority(priority: &str) -> PriorityTranslation {
    match priority {
        "*" => PriorityTranslation::Suppress,
        "**" => PriorityTranslation::Severity(EventSeverity::Info),
        "***" => PriorityTranslation::Severity(EventSeverity::Warning),
        "****" => PriorityTranslation::Severity(EventSeverity::Error),
        _ => PriorityTranslation::Severity(EventSeverity::Critical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_star_suppresses() {
        assert_eq!(translate_priority("*"), PriorityTranslation::Suppress);
    }

    #[test]
    fn test_star_mapping() {
        assert_eq!(
            translate_priority("**"),
            PriorityTranslation::Severity(EventSeverity::Info)
        );
        assert_eq!(
            translate_priority("***"),
            PriorityTranslation::Severity(EventSeverity::Warning)
        );
        assert_eq!(
            translate_priority("****"),
            PriorityTranslation::Severity(EventSeverity::Error)
        );
        assert_eq!(
            translate_priority("*****"),
            PriorityTranslation::Severity(EventSeverity::Critical)
        );
    }

    #[test]
    fn test_unknown_priority_is_critical() {
        for priority in ["", "priority", " ***", "***\n", "high"] {
            assert_eq!(
                translate_priority(priority),
                PriorityTranslation::Severity(EventSeverity::Critical),
                "{priority:?}"
            );
        }
    }
}
