//! Emergency-fund runway under every combination of lost income streams.
//!
//! Bit `j` of a scenario mask means stream `j` (in caller order) is lost.
//! Enumeration covers masks `0..2^n`, so cost is O(2^n · n); the stream
//! count is capped at [`MAX_INCOME_STREAMS`].

use crate::records::IncomeStream;
use crate::status::Status;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

/// 2^20 scenarios is the most we are willing to enumerate synchronously.
pub const MAX_INCOME_STREAMS: usize = 20;

pub const BASELINE_NAME: &str = "All Income Active";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("{count} income streams would need 2^{count} scenarios (limit is {max})")]
    TooManyStreams { count: usize, max: usize },
}

/// Months of runway: finite, or never depleted.
///
/// `Unbounded` orders after every `Finite` value.
#[derive(Debug, Clone, Copy)]
pub enum Runway {
    Finite(f64),
    Unbounded,
}

impl Runway {
    pub fn months(&self) -> Option<f64> {
        match self {
            Runway::Finite(m) => Some(*m),
            Runway::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Runway::Unbounded)
    }

    pub fn band(&self) -> RunwayBand {
        match self {
            Runway::Unbounded => RunwayBand::Unbounded,
            Runway::Finite(m) if *m < 6.0 => RunwayBand::Critical,
            Runway::Finite(m) if *m < 12.0 => RunwayBand::Warning,
            Runway::Finite(_) => RunwayBand::Good,
        }
    }
}

impl Ord for Runway {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Runway::Finite(a), Runway::Finite(b)) => a.total_cmp(b),
            (Runway::Finite(_), Runway::Unbounded) => Ordering::Less,
            (Runway::Unbounded, Runway::Finite(_)) => Ordering::Greater,
            (Runway::Unbounded, Runway::Unbounded) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Runway {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Runway {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Runway {}

impl Serialize for Runway {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Runway::Finite(m) => serializer.serialize_f64(*m),
            Runway::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// How urgent a runway is, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunwayBand {
    /// Under 6 months
    #[serde(rename = "critical")]
    Critical,
    /// Under 12 months
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "unbounded")]
    Unbounded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    /// Bit `j` set when stream `j` is lost
    pub mask: u64,
    pub lost: Vec<IncomeStream>,
    pub active_income: f64,
    pub monthly_expenses: f64,
    pub net_monthly: f64,
    pub months_remaining: Runway,
}

impl ScenarioResult {
    pub fn is_baseline(&self) -> bool {
        self.lost.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSet {
    pub status: Status,
    /// Ascending by months remaining, unbounded last
    pub scenarios: Vec<ScenarioResult>,
}

impl ScenarioSet {
    pub fn baseline(&self) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.is_baseline())
    }

    /// The scenario that runs out soonest
    pub fn worst(&self) -> Option<&ScenarioResult> {
        self.scenarios.first()
    }
}

pub struct ScenarioEnumerator;

impl ScenarioEnumerator {
    pub fn enumerate(
        fund_total: f64,
        streams: &[IncomeStream],
        monthly_expenses: f64,
    ) -> Result<ScenarioSet, ScenarioError> {
        let n = streams.len();
        let finite = fund_total.is_finite()
            && monthly_expenses.is_finite()
            && streams.iter().all(|s| s.amount.is_finite());
        if n == 0 || monthly_expenses == 0.0 || !finite {
            debug!(
                streams = n,
                monthly_expenses,
                fund_total,
                "no runway projection without finite income and expenses"
            );
            return Ok(ScenarioSet {
                status: Status::Degenerate,
                scenarios: Vec::new(),
            });
        }
        if n > MAX_INCOME_STREAMS {
            return Err(ScenarioError::TooManyStreams {
                count: n,
                max: MAX_INCOME_STREAMS,
            });
        }

        let mut scenarios: Vec<ScenarioResult> = (0..1u64 << n)
            .map(|mask| Self::scenario(mask, fund_total, streams, monthly_expenses))
            .collect();

        // Stable sort keeps enumeration order among equal runways.
        scenarios.sort_by(|a, b| a.months_remaining.cmp(&b.months_remaining));

        info!(
            streams = n,
            scenarios = scenarios.len(),
            fund_total,
            monthly_expenses,
            "enumerated income-loss scenarios"
        );

        Ok(ScenarioSet {
            status: Status::Complete,
            scenarios,
        })
    }

    fn scenario(
        mask: u64,
        fund_total: f64,
        streams: &[IncomeStream],
        monthly_expenses: f64,
    ) -> ScenarioResult {
        let (lost, active): (Vec<_>, Vec<_>) = streams
            .iter()
            .enumerate()
            .partition(|&(j, _)| mask & (1u64 << j) != 0);

        let lost: Vec<IncomeStream> = lost.into_iter().map(|(_, s)| s.clone()).collect();
        let active_income: f64 = active.iter().map(|(_, s)| s.amount).sum();
        let net_monthly = active_income - monthly_expenses;

        let months_remaining = if net_monthly >= 0.0 {
            Runway::Unbounded
        } else {
            Runway::Finite(fund_total / net_monthly.abs())
        };

        ScenarioResult {
            name: scenario_name(&lost),
            mask,
            lost,
            active_income,
            monthly_expenses,
            net_monthly,
            months_remaining,
        }
    }
}

fn scenario_name(lost: &[IncomeStream]) -> String {
    if lost.is_empty() {
        return BASELINE_NAME.to_string();
    }
    let names: Vec<&str> = lost.iter().map(|s| s.name.as_str()).collect();
    format!("Lost: {}", names.join(", "))
}
