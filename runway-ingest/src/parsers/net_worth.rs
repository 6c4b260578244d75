//! Net-worth (balances over time) export parser
//!
//! Expected layout:
//!   Account,2024-01-31,2024-02-29,...
//!   Alice - Savings - Chase - Checking,"1,200.00",1350.10,...
//!   Net Worth,...               <- precomputed total, skipped

use runway_core::{LabeledRow, Status, TimeAxis, parse_amount};
use tracing::{debug, info, warn};

use crate::table::RawTable;

/// Label of the precomputed total row some exports append
pub const NET_WORTH_SENTINEL: &str = "Net Worth";

/// Separator between owner, category and account name in a row label
pub const LABEL_DELIMITER: &str = " - ";

#[derive(Debug, Clone, PartialEq)]
pub struct NetWorthTable {
    pub status: Status,
    pub axis: TimeAxis,
    pub rows: Vec<LabeledRow>,
}

/// Split `"Owner - Category - Name..."` into (category, display name).
///
/// Returns `None` when the label has no delimiter. The display name falls
/// back to the whole label when only owner and category are present.
pub fn split_label(label: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = label.split(LABEL_DELIMITER).collect();
    if parts.len() < 2 {
        return None;
    }
    let category = parts[1].trim().to_string();
    let name = parts[2..].join(LABEL_DELIMITER);
    let name = name.trim();
    let display_name = if name.is_empty() { label } else { name };
    Some((category, display_name.to_string()))
}

/// Parse a net-worth export into labeled rows aligned to its date header.
pub fn parse_net_worth_table(table: &RawTable) -> NetWorthTable {
    let Some((header, data)) = table.split_header() else {
        debug!(rows = table.len(), "net-worth table has no data rows");
        return NetWorthTable {
            status: Status::Empty,
            axis: TimeAxis::default(),
            rows: Vec::new(),
        };
    };

    let axis = TimeAxis::new(header[1..].to_vec());
    if axis.is_dated() && !axis.is_chronological() {
        warn!("net-worth header dates are not in ascending order; keeping column order");
    }

    let mut rows = Vec::new();
    for (i, cells) in data.iter().enumerate() {
        let label = cells.first().map(String::as_str).unwrap_or("");

        if label.trim().is_empty() || label == NET_WORTH_SENTINEL {
            debug!(row = i + 1, label, "skipping blank or total row");
            continue;
        }
        if cells.len() != header.len() {
            debug!(
                row = i + 1,
                cells = cells.len(),
                expected = header.len(),
                "skipping ragged row"
            );
            continue;
        }
        let Some((category, display_name)) = split_label(label) else {
            debug!(row = i + 1, label, "skipping row without a category");
            continue;
        };

        rows.push(LabeledRow {
            label: label.to_string(),
            category,
            display_name,
            values: cells[1..].iter().map(|c| parse_amount(c)).collect(),
        });
    }

    info!(
        columns = axis.len(),
        rows = rows.len(),
        skipped = data.len() - rows.len(),
        "parsed net-worth export"
    );

    NetWorthTable {
        status: Status::Complete,
        axis,
        rows,
    }
}
