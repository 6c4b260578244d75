//! Record types shared by the parser, the aggregator and the scenario engine

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

/// Leading numeric prefix, the way spreadsheet exports are read loosely:
/// `"12.5abc"` is 12.5, `"$5"` is not a number at all.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Coerce an export cell into an amount.
///
/// Thousands separators (`,`) are removed and the longest numeric prefix is
/// parsed. Blank or non-numeric text is 0, never an error.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "");
    NUMERIC_PREFIX
        .find(cleaned.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// One data row of a net-worth export after its label has been split.
///
/// `values` is aligned to the table's time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    /// Full label as it appeared in the export
    pub label: String,
    /// Second `" - "` segment of the label
    pub category: String,
    /// Remaining segments, or the full label when there are none
    pub display_name: String,
    pub values: Vec<f64>,
}

impl LabeledRow {
    /// Value in the final time column (0 for a row with no columns)
    pub fn latest(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// A single account's latest balance, kept separate from the category sums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub category: String,
    pub display_name: String,
    pub label: String,
    pub latest: f64,
}

impl AccountEntry {
    pub fn from_row(row: &LabeledRow) -> Self {
        Self {
            category: row.category.clone(),
            display_name: row.display_name.clone(),
            label: row.label.clone(),
            latest: row.latest(),
        }
    }

    /// Returns true if the account currently carries a debt
    pub fn is_debt(&self) -> bool {
        self.latest < 0.0
    }

    /// Exports mark closed accounts by prefixing the label with `(Closed`
    pub fn is_closed(&self) -> bool {
        self.label.starts_with("(Closed")
    }
}

/// A recurring monthly income source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub id: u32,
    pub name: String,
    /// Monthly amount; text that is not numeric is read as 0
    #[serde(deserialize_with = "coerce_amount")]
    pub amount: f64,
}

impl IncomeStream {
    pub fn new(id: u32, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }

    /// Build a stream from user-entered text such as `"1,500"` or `""`
    pub fn from_text(id: u32, name: impl Into<String>, amount: &str) -> Self {
        Self::new(id, name, parse_amount(amount))
    }
}

/// Deserialize an amount given as a number or as text; non-numeric text and
/// non-finite numbers read as 0.
pub fn coerce_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountInput {
        Number(f64),
        Text(String),
    }

    Ok(match AmountInput::deserialize(deserializer)? {
        AmountInput::Number(n) if n.is_finite() => n,
        AmountInput::Number(_) => 0.0,
        AmountInput::Text(s) => parse_amount(&s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_thousands_separator() {
        assert_eq!(parse_amount("1,234.50"), 1234.5);
        assert_eq!(parse_amount("-12,000"), -12000.0);
        assert_eq!(parse_amount("  42 "), 42.0);
    }

    #[test]
    fn test_parse_amount_degrades_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("$5"), 0.0);
        assert_eq!(parse_amount("(300)"), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
    }

    #[test]
    fn test_parse_amount_reads_numeric_prefix() {
        assert_eq!(parse_amount("12.5abc"), 12.5);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("1e3"), 1000.0);
    }

    #[test]
    fn test_account_entry_flags() {
        let row = LabeledRow {
            label: "(Closed) Bob - Credit Card - Amex - Gold".into(),
            category: "Credit Card".into(),
            display_name: "Amex - Gold".into(),
            values: vec![-100.0, -250.0],
        };
        let entry = AccountEntry::from_row(&row);
        assert_eq!(entry.latest, -250.0);
        assert!(entry.is_debt());
        assert!(entry.is_closed());
    }

    #[test]
    fn test_income_stream_amount_from_text_or_number() {
        let s: IncomeStream =
            serde_json::from_str(r#"{"id":1,"name":"Salary","amount":"3,000"}"#).unwrap();
        assert_eq!(s.amount, 3000.0);

        let s: IncomeStream =
            serde_json::from_str(r#"{"id":2,"name":"Side","amount":"oops"}"#).unwrap();
        assert_eq!(s.amount, 0.0);

        let s: IncomeStream =
            serde_json::from_str(r#"{"id":3,"name":"Rent","amount":850.5}"#).unwrap();
        assert_eq!(s.amount, 850.5);

        assert_eq!(IncomeStream::from_text(4, "Gig", "").amount, 0.0);
    }
}
