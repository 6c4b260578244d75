//! runway-finance: emergency-fund account selection, income settings and
//! the runway report built on top of them.

pub mod income;
pub mod runway;
pub mod selection;

pub use income::IncomeSettings;
pub use runway::RunwayReport;
pub use selection::{AccountKey, AccountSelection};
