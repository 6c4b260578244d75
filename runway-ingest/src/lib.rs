//! runway-ingest: CSV table loading and parsers for the net-worth and
//! income/expense export shapes.

pub mod parsers;
pub mod table;

pub use parsers::{CashFlowTable, NetWorthTable, parse_cash_flow_table, parse_net_worth_table};
pub use table::{RawTable, read_table};

use runway_core::{CashFlowReport, CategoryAggregator, NetWorthReport, Status};

/// Parse and aggregate a net-worth export in one step.
pub fn net_worth_report(table: &RawTable) -> NetWorthReport {
    let parsed = parse_net_worth_table(table);
    if !parsed.status.is_complete() {
        return NetWorthReport::with_status(parsed.status);
    }
    CategoryAggregator::aggregate(&parsed.axis, &parsed.rows)
}

/// Parse an income/expense export and compute monthly net flow.
pub fn cash_flow_report(table: &RawTable) -> CashFlowReport {
    let parsed = parse_cash_flow_table(table);
    match parsed.status {
        Status::Complete => CashFlowReport::compute(&parsed.axis, &parsed.income, &parsed.expenses),
        status => CashFlowReport::with_status(status),
    }
}
