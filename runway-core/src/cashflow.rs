//! Monthly net cash flow and summary statistics

use crate::axis::TimeAxis;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub month: String,
    pub income: f64,
    pub total_expenses: f64,
    /// income − expenses
    pub net: f64,
}

impl MonthlyFlow {
    pub fn is_positive(&self) -> bool {
        self.net >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub months: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_net: f64,
    pub average_income: f64,
    pub average_expenses: f64,
    pub average_net: f64,
    /// Months with net ≥ 0
    pub positive_months: usize,
    pub negative_months: usize,
}

impl CashFlowSummary {
    /// Returns `None` for an empty month list.
    pub fn from_flows(flows: &[MonthlyFlow]) -> Option<Self> {
        if flows.is_empty() {
            return None;
        }
        let months = flows.len();
        let total_income: f64 = flows.iter().map(|f| f.income).sum();
        let total_expenses: f64 = flows.iter().map(|f| f.total_expenses).sum();
        let total_net: f64 = flows.iter().map(|f| f.net).sum();
        let positive_months = flows.iter().filter(|f| f.is_positive()).count();

        Some(Self {
            months,
            total_income,
            total_expenses,
            total_net,
            average_income: total_income / months as f64,
            average_expenses: total_expenses / months as f64,
            average_net: total_net / months as f64,
            positive_months,
            negative_months: months - positive_months,
        })
    }

    /// Share of months with a non-negative net, in 0.0..=1.0
    pub fn positive_share(&self) -> f64 {
        self.positive_months as f64 / self.months as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
    pub status: Status,
    pub flows: Vec<MonthlyFlow>,
    pub summary: Option<CashFlowSummary>,
}

impl CashFlowReport {
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            flows: Vec::new(),
            summary: None,
        }
    }

    /// Build per-month flows from the two total rows.
    ///
    /// Both slices are aligned to `axis`; a missing cell reads as 0.
    pub fn compute(axis: &TimeAxis, income: &[f64], expenses: &[f64]) -> Self {
        let flows: Vec<MonthlyFlow> = axis
            .labels()
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let income = income.get(i).copied().unwrap_or(0.0);
                let total_expenses = expenses.get(i).copied().unwrap_or(0.0);
                MonthlyFlow {
                    month: month.clone(),
                    income,
                    total_expenses,
                    net: income - total_expenses,
                }
            })
            .collect();

        let summary = CashFlowSummary::from_flows(&flows);
        let status = if summary.is_some() {
            Status::Complete
        } else {
            Status::Empty
        };
        info!(months = flows.len(), ?status, "computed cash flow");

        Self {
            status,
            flows,
            summary,
        }
    }
}
