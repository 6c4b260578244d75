//! Category aggregation: per-category series, sign classification and the
//! net-worth roll-up per time label.

use crate::axis::TimeAxis;
use crate::records::{AccountEntry, LabeledRow};
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Sign class of a category, fixed once per dataset from its mean value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "negative")]
    Negative,
}

impl Classification {
    /// A mean of exactly 0 counts as positive.
    pub fn from_mean(mean: f64) -> Self {
        if mean < 0.0 {
            Classification::Negative
        } else {
            Classification::Positive
        }
    }
}

/// Summed values per category, aligned to the time axis.
///
/// Lookups for a category or label that is not present yield 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    axis: TimeAxis,
    columns: BTreeMap<String, Vec<f64>>,
}

impl CategorySeries {
    pub fn new(axis: TimeAxis) -> Self {
        Self {
            axis,
            columns: BTreeMap::new(),
        }
    }

    /// Add a row's values into its category (additive merge)
    pub fn accumulate(&mut self, category: &str, values: &[f64]) {
        let width = self.axis.len();
        let column = self
            .columns
            .entry(category.to_string())
            .or_insert_with(|| vec![0.0; width]);
        for (slot, value) in column.iter_mut().zip(values) {
            *slot += value;
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Category keys in lexicographic order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn values(&self, category: &str) -> &[f64] {
        self.columns.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn value_at(&self, category: &str, index: usize) -> f64 {
        self.values(category).get(index).copied().unwrap_or(0.0)
    }

    pub fn value(&self, category: &str, label: &str) -> f64 {
        self.axis
            .position(label)
            .map(|i| self.value_at(category, i))
            .unwrap_or(0.0)
    }

    /// Arithmetic mean across every time label (0 for an empty axis)
    pub fn mean(&self, category: &str) -> f64 {
        if self.axis.is_empty() {
            return 0.0;
        }
        self.values(category).iter().sum::<f64>() / self.axis.len() as f64
    }

    pub fn classify(&self, category: &str) -> Classification {
        Classification::from_mean(self.mean(category))
    }
}

/// Category keys split by sign class, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPartition {
    pub all: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl CategoryPartition {
    pub fn from_series(series: &CategorySeries) -> Self {
        let mut partition = Self::default();
        for category in series.categories() {
            let class = series.classify(category);
            debug!(category, mean = series.mean(category), ?class, "classified category");
            match class {
                Classification::Positive => partition.positive.push(category.to_string()),
                Classification::Negative => partition.negative.push(category.to_string()),
            }
            partition.all.push(category.to_string());
        }
        // BTreeMap keys are already ordered; keep the contract explicit.
        partition.all.sort();
        partition.positive.sort();
        partition.negative.sort();
        partition
    }

    pub fn classification(&self, category: &str) -> Option<Classification> {
        if self.negative.iter().any(|c| c == category) {
            Some(Classification::Negative)
        } else if self.positive.iter().any(|c| c == category) {
            Some(Classification::Positive)
        } else {
            None
        }
    }
}

/// Every category's value at one time label plus their sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub label: String,
    pub values: BTreeMap<String, f64>,
    pub total: f64,
}

impl AggregatePoint {
    pub fn value(&self, category: &str) -> f64 {
        self.values.get(category).copied().unwrap_or(0.0)
    }

    /// Roll-up restricted to the given categories
    pub fn filtered_total<S: AsRef<str>>(&self, selected: &[S]) -> f64 {
        selected.iter().map(|c| self.value(c.as_ref())).sum()
    }
}

/// Everything the net-worth views consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthReport {
    pub status: Status,
    pub series: CategorySeries,
    pub categories: CategoryPartition,
    pub points: Vec<AggregatePoint>,
    /// Accounts per category, in source row order
    pub accounts: BTreeMap<String, Vec<AccountEntry>>,
}

impl NetWorthReport {
    /// A report with nothing in it, for inputs that could not be parsed
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            series: CategorySeries::default(),
            categories: CategoryPartition::default(),
            points: Vec::new(),
            accounts: BTreeMap::new(),
        }
    }

    pub fn latest_point(&self) -> Option<&AggregatePoint> {
        self.points.last()
    }

    /// Each category's value at the final time label
    pub fn latest_by_category(&self) -> BTreeMap<String, f64> {
        match self.latest_point() {
            Some(point) => point.values.clone(),
            None => BTreeMap::new(),
        }
    }

    /// Latest roll-up over a category selection (0 when there are no points)
    pub fn latest_filtered_total<S: AsRef<str>>(&self, selected: &[S]) -> f64 {
        self.latest_point()
            .map(|p| p.filtered_total(selected))
            .unwrap_or(0.0)
    }

    pub fn accounts_in(&self, category: &str) -> &[AccountEntry] {
        self.accounts.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Groups parsed rows by category and rolls them up per time label
pub struct CategoryAggregator;

impl CategoryAggregator {
    pub fn aggregate(axis: &TimeAxis, rows: &[LabeledRow]) -> NetWorthReport {
        let mut series = CategorySeries::new(axis.clone());
        let mut accounts: BTreeMap<String, Vec<AccountEntry>> = BTreeMap::new();

        for row in rows {
            series.accumulate(&row.category, &row.values);
            accounts
                .entry(row.category.clone())
                .or_default()
                .push(AccountEntry::from_row(row));
        }

        let categories = CategoryPartition::from_series(&series);
        let points = Self::roll_up(&series);

        info!(
            rows = rows.len(),
            categories = categories.all.len(),
            negative = categories.negative.len(),
            points = points.len(),
            "aggregated net worth"
        );

        NetWorthReport {
            status: Status::Complete,
            series,
            categories,
            points,
            accounts,
        }
    }

    /// One point per time label, in header order
    fn roll_up(series: &CategorySeries) -> Vec<AggregatePoint> {
        series
            .axis()
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let values: BTreeMap<String, f64> = series
                    .categories()
                    .map(|c| (c.to_string(), series.value_at(c, i)))
                    .collect();
                let total = values.values().sum();
                AggregatePoint {
                    label: label.clone(),
                    values,
                    total,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(labels: &[&str]) -> TimeAxis {
        TimeAxis::new(labels.iter().map(|s| s.to_string()).collect())
    }

    fn row(label: &str, category: &str, values: &[f64]) -> LabeledRow {
        LabeledRow {
            label: label.to_string(),
            category: category.to_string(),
            display_name: label.to_string(),
            values: values.to_vec(),
        }
    }

    fn sample() -> (TimeAxis, Vec<LabeledRow>) {
        (
            axis(&["2024-01", "2024-02", "2024-03"]),
            vec![
                row("A - Savings - Chase", "Savings", &[100.0, 200.0, 300.0]),
                row("B - Savings - Ally", "Savings", &[50.0, 50.0, 50.0]),
                row("A - Credit Card - Amex", "Credit Card", &[-40.0, 10.0, -90.0]),
                row("A - Brokerage - Vanguard", "Brokerage", &[1000.0, 0.0, 0.0]),
            ],
        )
    }

    #[test]
    fn test_values_are_summed_per_category() {
        let (axis, rows) = sample();
        let report = CategoryAggregator::aggregate(&axis, &rows);
        assert_eq!(report.series.values("Savings"), &[150.0, 250.0, 350.0]);
        assert_eq!(report.series.value("Savings", "2024-02"), 250.0);
        assert_eq!(report.series.value("Missing", "2024-02"), 0.0);
        assert_eq!(report.series.value("Savings", "2099-01"), 0.0);
    }

    #[test]
    fn test_classification_uses_mean_not_latest() {
        let (axis, rows) = sample();
        let report = CategoryAggregator::aggregate(&axis, &rows);
        // Credit Card is positive in Feb but negative on average
        assert_eq!(report.categories.negative, vec!["Credit Card"]);
        assert_eq!(report.categories.positive, vec!["Brokerage", "Savings"]);
        assert_eq!(report.categories.all, vec!["Brokerage", "Credit Card", "Savings"]);
        assert_eq!(
            report.categories.classification("Credit Card"),
            Some(Classification::Negative)
        );
    }

    #[test]
    fn test_zero_mean_is_positive() {
        let report = CategoryAggregator::aggregate(
            &axis(&["a", "b"]),
            &[row("x - Wash - y", "Wash", &[-10.0, 10.0])],
        );
        assert_eq!(report.categories.positive, vec!["Wash"]);
        assert!(report.categories.negative.is_empty());
    }

    #[test]
    fn test_roll_up_conserves_category_sums() {
        let (axis, rows) = sample();
        let report = CategoryAggregator::aggregate(&axis, &rows);
        assert_eq!(report.points.len(), 3);
        for (i, point) in report.points.iter().enumerate() {
            let expected: f64 = report
                .series
                .categories()
                .map(|c| report.series.value_at(c, i))
                .sum();
            assert!((point.total - expected).abs() < 1e-9);
        }
        assert_eq!(report.points[0].label, "2024-01");
        assert_eq!(report.points[0].total, 1110.0);
        assert_eq!(report.points[2].total, 260.0);
    }

    #[test]
    fn test_accounts_keep_latest_row_value() {
        let (axis, rows) = sample();
        let report = CategoryAggregator::aggregate(&axis, &rows);
        let savings = report.accounts_in("Savings");
        assert_eq!(savings.len(), 2);
        assert_eq!(savings[0].latest, 300.0);
        assert_eq!(savings[1].latest, 50.0);
        assert!(report.accounts_in("Credit Card")[0].is_debt());
    }

    #[test]
    fn test_filtered_and_latest_totals() {
        let (axis, rows) = sample();
        let report = CategoryAggregator::aggregate(&axis, &rows);
        assert_eq!(report.latest_filtered_total(&["Savings", "Credit Card"]), 260.0);
        assert_eq!(report.latest_filtered_total::<&str>(&[]), 0.0);
        assert_eq!(report.latest_by_category().get("Brokerage"), Some(&0.0));
    }

    #[test]
    fn test_empty_input_yields_empty_structures() {
        let report = CategoryAggregator::aggregate(&TimeAxis::default(), &[]);
        assert!(report.series.is_empty());
        assert!(report.points.is_empty());
        assert!(report.categories.all.is_empty());
        assert!(report.accounts.is_empty());
        assert_eq!(report.latest_filtered_total(&["x"]), 0.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let (axis, rows) = sample();
        let a = serde_json::to_string(&CategoryAggregator::aggregate(&axis, &rows)).unwrap();
        let b = serde_json::to_string(&CategoryAggregator::aggregate(&axis, &rows)).unwrap();
        assert_eq!(a, b);
    }
}
