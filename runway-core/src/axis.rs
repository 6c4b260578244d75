//! Time axis of an export: the header labels after the label column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Formats seen in balance and monthly exports. Month-only labels are
/// pinned to the first of the month.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d %b %Y", "%b %d, %Y"];
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%b %Y", "%B %Y", "%m/%Y"];

/// Ordered time labels, kept exactly as they appear in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeAxis {
    labels: Vec<String>,
}

impl TimeAxis {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Column index of a label (first occurrence)
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn last(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Whether every label parses as a date
    pub fn is_dated(&self) -> bool {
        self.labels.iter().all(|l| parse_axis_date(l).is_some())
    }

    /// Whether every label parses as a date and the dates never go backwards.
    ///
    /// Labels that do not parse make the answer `false`; callers use this only
    /// to warn, the axis itself is never reordered.
    pub fn is_chronological(&self) -> bool {
        let mut prev: Option<NaiveDate> = None;
        for label in &self.labels {
            let Some(date) = parse_axis_date(label) else {
                return false;
            };
            if prev.is_some_and(|p| date < p) {
                return false;
            }
            prev = Some(date);
        }
        true
    }
}

/// Parse a header label such as `2024-01-31`, `01/31/2024` or `Jan 2024`.
pub fn parse_axis_date(label: &str) -> Option<NaiveDate> {
    let s = label.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            // chrono needs a day to build a date; month labels get the 1st
            let padded = format!("01 {s}");
            MONTH_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&padded, &format!("%d {fmt}")).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(labels: &[&str]) -> TimeAxis {
        TimeAxis::new(labels.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_axis_date_formats() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_axis_date("2024-01-31"), Some(jan31));
        assert_eq!(parse_axis_date("01/31/2024"), Some(jan31));
        assert_eq!(
            parse_axis_date("Mar 2025"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(
            parse_axis_date("2025-03"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(parse_axis_date("Average"), None);
    }

    #[test]
    fn test_is_chronological() {
        assert!(axis(&["2024-01-31", "2024-02-29", "2024-03-31"]).is_chronological());
        assert!(!axis(&["2024-03-31", "2024-01-31"]).is_chronological());
        assert!(!axis(&["Jan 2024", "Total"]).is_chronological());
        assert!(axis(&[]).is_chronological());
        assert!(axis(&["Jan 2024", "Feb 2024"]).is_dated());
        assert!(!axis(&["Jan 2024", "Average"]).is_dated());
    }

    #[test]
    fn test_position_and_last() {
        let a = axis(&["Jan 2024", "Feb 2024"]);
        assert_eq!(a.position("Feb 2024"), Some(1));
        assert_eq!(a.position("Mar 2024"), None);
        assert_eq!(a.last(), Some("Feb 2024"));
    }
}
