//! runway-core: category aggregation, cash-flow statistics and the
//! income-loss runway engine. Everything here is pure and synchronous.

pub mod aggregate;
pub mod axis;
pub mod cashflow;
pub mod records;
pub mod scenarios;
pub mod status;

pub use aggregate::{
    AggregatePoint, CategoryAggregator, CategoryPartition, CategorySeries, Classification,
    NetWorthReport,
};
pub use axis::{TimeAxis, parse_axis_date};
pub use cashflow::{CashFlowReport, CashFlowSummary, MonthlyFlow};
pub use records::{AccountEntry, IncomeStream, LabeledRow, coerce_amount, parse_amount};
pub use scenarios::{
    BASELINE_NAME, MAX_INCOME_STREAMS, Runway, RunwayBand, ScenarioEnumerator, ScenarioError,
    ScenarioResult, ScenarioSet,
};
pub use status::Status;
