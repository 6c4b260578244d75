//! Emergency-fund runway: selected balances against income-loss scenarios

use runway_core::{AccountEntry, ScenarioEnumerator, ScenarioError, ScenarioSet};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::income::IncomeSettings;
use crate::selection::AccountSelection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayReport {
    pub fund_total: f64,
    pub total_monthly_income: f64,
    pub monthly_expenses: f64,
    pub net_monthly: f64,
    #[serde(flatten)]
    pub scenarios: ScenarioSet,
}

impl RunwayReport {
    /// Sum the selected accounts and project every income-loss scenario.
    pub fn build(
        accounts: &BTreeMap<String, Vec<AccountEntry>>,
        selection: &AccountSelection,
        income: &IncomeSettings,
    ) -> Result<Self, ScenarioError> {
        let fund_total = selection.fund_total(accounts);
        Self::from_fund_total(fund_total, income)
    }

    pub fn from_fund_total(
        fund_total: f64,
        income: &IncomeSettings,
    ) -> Result<Self, ScenarioError> {
        let scenarios =
            ScenarioEnumerator::enumerate(fund_total, &income.streams, income.monthly_expenses)?;
        Ok(Self {
            fund_total,
            total_monthly_income: income.total_monthly_income(),
            monthly_expenses: income.monthly_expenses,
            net_monthly: income.net_monthly(),
            scenarios,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AccountKey;
    use runway_core::{IncomeStream, Status};

    fn accounts() -> BTreeMap<String, Vec<AccountEntry>> {
        let mut map = BTreeMap::new();
        map.insert(
            "Savings".to_string(),
            vec![
                AccountEntry {
                    category: "Savings".into(),
                    display_name: "HYSA".into(),
                    label: "Me - Savings - HYSA".into(),
                    latest: 12000.0,
                },
                AccountEntry {
                    category: "Savings".into(),
                    display_name: "Checking".into(),
                    label: "Me - Savings - Checking".into(),
                    latest: 500.0,
                },
            ],
        );
        map
    }

    fn income() -> IncomeSettings {
        IncomeSettings {
            streams: vec![IncomeStream::new(1, "A", 3000.0), IncomeStream::new(2, "B", 1000.0)],
            next_id: 3,
            monthly_expenses: 3500.0,
        }
    }

    #[test]
    fn test_build_uses_selected_accounts_only() {
        let selection: AccountSelection = [AccountKey::new("Savings", 0)].into_iter().collect();
        let report = RunwayReport::build(&accounts(), &selection, &income()).unwrap();
        assert_eq!(report.fund_total, 12000.0);
        assert_eq!(report.net_monthly, 500.0);
        assert_eq!(report.scenarios.status, Status::Complete);
        assert_eq!(report.scenarios.scenarios.len(), 4);
        assert_eq!(report.scenarios.worst().unwrap().name, "Lost: A, B");
    }

    #[test]
    fn test_no_expenses_is_degenerate() {
        let mut settings = income();
        settings.monthly_expenses = 0.0;
        let report = RunwayReport::from_fund_total(1000.0, &settings).unwrap();
        assert_eq!(report.scenarios.status, Status::Degenerate);
        assert!(report.scenarios.scenarios.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report = RunwayReport::from_fund_total(12000.0, &income()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "complete");
        assert_eq!(json["scenarios"][3]["months_remaining"], "unbounded");
        assert_eq!(json["scenarios"][1]["months_remaining"], 4.8);
    }
}
