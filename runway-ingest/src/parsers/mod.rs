pub mod cash_flow;
pub mod net_worth;

pub use cash_flow::{CashFlowTable, parse_cash_flow_table};
pub use net_worth::{NetWorthTable, parse_net_worth_table, split_label};
