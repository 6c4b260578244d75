//! Monthly income/expense export parser
//!
//! Expected layout (last two columns are summaries, not months):
//!   Category,Jan 2024,Feb 2024,...,Average,Total
//!   Total Income,"5,000.00",...
//!   Total Expenses,"4,200.00",...

use runway_core::{Status, TimeAxis, parse_amount};
use tracing::{debug, info, warn};

use crate::table::RawTable;

pub const TOTAL_INCOME_LABEL: &str = "Total Income";
pub const TOTAL_EXPENSES_LABEL: &str = "Total Expenses";

/// Trailing header columns that are not months (average, total)
const SUMMARY_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowTable {
    pub status: Status,
    pub axis: TimeAxis,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
}

impl CashFlowTable {
    fn with_status(status: Status, axis: TimeAxis) -> Self {
        Self {
            status,
            axis,
            income: Vec::new(),
            expenses: Vec::new(),
        }
    }
}

/// Extract the month axis and the two total rows.
///
/// A header with no month columns gives `Empty`. Missing either total row
/// gives `Incomplete` with no values.
pub fn parse_cash_flow_table(table: &RawTable) -> CashFlowTable {
    let Some((header, data)) = table.split_header() else {
        debug!(rows = table.len(), "cash-flow table has no data rows");
        return CashFlowTable::with_status(Status::Empty, TimeAxis::default());
    };

    let month_end = header.len().saturating_sub(SUMMARY_COLUMNS).max(1);
    let axis = TimeAxis::new(header[1..month_end].to_vec());
    if axis.is_empty() {
        debug!(columns = header.len(), "cash-flow header has no month columns");
        return CashFlowTable::with_status(Status::Empty, axis);
    }

    let total_row = |wanted: &str| -> Option<Vec<f64>> {
        data.iter()
            .filter(|cells| cells.len() == header.len())
            .find(|cells| cells.first().map(|c| c.trim()) == Some(wanted))
            .map(|cells| cells[1..month_end].iter().map(|c| parse_amount(c)).collect())
    };

    let (Some(income), Some(expenses)) =
        (total_row(TOTAL_INCOME_LABEL), total_row(TOTAL_EXPENSES_LABEL))
    else {
        warn!(
            "cash-flow export needs both '{TOTAL_INCOME_LABEL}' and '{TOTAL_EXPENSES_LABEL}' rows"
        );
        return CashFlowTable::with_status(Status::Incomplete, axis);
    };

    info!(months = axis.len(), "parsed cash-flow export");

    CashFlowTable {
        status: Status::Complete,
        axis,
        income,
        expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv_str(csv).unwrap()
    }

    #[test]
    fn test_summary_columns_excluded() {
        let t = table(
            "Category,Jan 2024,Feb 2024,Average,Total\n\
             Salary,5000,5000,5000,10000\n\
             Total Income,\"5,000\",\"5,500\",5250,10500\n\
             Total Expenses,4200,6000,5100,10200\n",
        );
        let parsed = parse_cash_flow_table(&t);
        assert_eq!(parsed.status, Status::Complete);
        assert_eq!(parsed.axis.labels(), &["Jan 2024", "Feb 2024"]);
        assert_eq!(parsed.income, vec![5000.0, 5500.0]);
        assert_eq!(parsed.expenses, vec![4200.0, 6000.0]);
    }

    #[test]
    fn test_missing_total_row_is_incomplete() {
        let t = table("Category,Jan,Average,Total\nTotal Income,1,1,1\n");
        let parsed = parse_cash_flow_table(&t);
        assert_eq!(parsed.status, Status::Incomplete);
        assert!(parsed.income.is_empty());
        assert!(parsed.expenses.is_empty());
    }

    #[test]
    fn test_header_only_is_empty() {
        let parsed = parse_cash_flow_table(&table("Category,Jan,Average,Total\n"));
        assert_eq!(parsed.status, Status::Empty);
    }

    #[test]
    fn test_narrow_header_has_no_months() {
        let t = table("Category,Total\nTotal Income,1\nTotal Expenses,2\n");
        let parsed = parse_cash_flow_table(&t);
        assert_eq!(parsed.status, Status::Empty);
        assert!(parsed.axis.is_empty());
        assert!(parsed.income.is_empty());
    }

    #[test]
    fn test_header_without_cells_is_empty() {
        let t = RawTable::new(vec![vec![], vec!["Total Income".into()]]);
        let parsed = parse_cash_flow_table(&t);
        assert_eq!(parsed.status, Status::Empty);
        assert!(parsed.axis.is_empty());
    }
}
