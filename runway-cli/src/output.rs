//! Plain-text rendering of reports for the terminal

use anyhow::Result;
use runway_core::{CashFlowReport, NetWorthReport, Runway, ScenarioResult};
use runway_finance::{AccountKey, AccountSelection, RunwayReport};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct FilteredTotal<'a> {
    label: &'a str,
    total: f64,
}

/// Net-worth JSON: the full report plus totals over the selected categories
#[derive(Debug, Serialize)]
struct NetWorthJson<'a> {
    selected_categories: &'a [String],
    filtered_totals: Vec<FilteredTotal<'a>>,
    #[serde(flatten)]
    report: &'a NetWorthReport,
}

impl<'a> NetWorthJson<'a> {
    fn new(report: &'a NetWorthReport, selected: &'a [String]) -> Self {
        let filtered_totals = report
            .points
            .iter()
            .map(|point| FilteredTotal {
                label: point.label.as_str(),
                total: point.filtered_total(selected),
            })
            .collect();
        Self {
            selected_categories: selected,
            filtered_totals,
            report,
        }
    }
}

pub fn print_net_worth_json(report: &NetWorthReport, selected: &[String]) -> Result<()> {
    print_json(&NetWorthJson::new(report, selected))
}

pub fn print_net_worth(report: &NetWorthReport, selected: &[String]) {
    if !report.status.is_complete() {
        println!("No net-worth data: {}", report.status.describe());
        return;
    }

    println!("# Net worth by category\n");
    for point in &report.points {
        println!("{:<14} {:>14.2}", point.label, point.filtered_total(selected));
    }

    let latest = report.latest_by_category();
    println!("\n## Categories (latest)\n");
    for (heading, keys) in [
        ("Assets", &report.categories.positive),
        ("Debts", &report.categories.negative),
    ] {
        if keys.is_empty() {
            continue;
        }
        println!("{heading}:");
        for category in keys {
            let marker = if selected.contains(category) { "x" } else { " " };
            let value = latest.get(category).copied().unwrap_or(0.0);
            println!("  [{marker}] {:<24} {:>14.2}", category, value);
        }
    }

    println!("\n## Accounts\n");
    for category in &report.categories.all {
        println!("{category}:");
        for (i, account) in report.accounts_in(category).iter().enumerate() {
            let closed = if account.is_closed() { " (closed)" } else { "" };
            println!(
                "  {:<28} {:<36} {:>14.2}{}",
                AccountKey::new(category.as_str(), i).to_string(),
                account.display_name,
                account.latest,
                closed
            );
        }
    }
}

pub fn print_cash_flow(report: &CashFlowReport) {
    let Some(summary) = &report.summary else {
        println!("No cash-flow data: {}", report.status.describe());
        return;
    };

    println!("# Net income & expenses by month\n");
    for flow in &report.flows {
        println!(
            "{:<12} income {:>12.2}  expenses {:>12.2}  net {:>12.2}",
            flow.month, flow.income, flow.total_expenses, flow.net
        );
    }

    println!("\n## Average monthly");
    println!("Income:   {:>12.2}", summary.average_income);
    println!("Expenses: {:>12.2}", summary.average_expenses);
    println!("Net:      {:>12.2}", summary.average_net);

    println!("\n## Total ({} months)", summary.months);
    println!("Income:   {:>12.2}", summary.total_income);
    println!("Expenses: {:>12.2}", summary.total_expenses);
    println!("Net:      {:>12.2}", summary.total_net);

    println!(
        "\nPositive months: {} ({:.0}%)  Negative months: {}",
        summary.positive_months,
        summary.positive_share() * 100.0,
        summary.negative_months
    );
}

pub fn print_runway(report: &RunwayReport, selection: &AccountSelection) {
    println!("# Emergency fund scenarios\n");
    let keys: Vec<String> = selection.keys().map(AccountKey::to_string).collect();
    let accounts = if keys.is_empty() {
        "(none)".to_string()
    } else {
        keys.join(", ")
    };
    println!("Accounts:         {accounts}");
    println!("Emergency funds:  {:.2}", report.fund_total);
    println!("Monthly income:   {:.2}", report.total_monthly_income);
    println!("Monthly expenses: {:.2}", report.monthly_expenses);
    println!("Net monthly:      {:.2}\n", report.net_monthly);

    if report.scenarios.scenarios.is_empty() {
        println!(
            "Enter income and expenses to see scenarios ({}).",
            report.scenarios.status.describe()
        );
        return;
    }
    for scenario in &report.scenarios.scenarios {
        print_scenario(scenario);
    }
}

fn print_scenario(s: &ScenarioResult) {
    let months = match s.months_remaining {
        Runway::Finite(m) => format!("{m:.1}"),
        Runway::Unbounded => "forever".to_string(),
    };
    println!(
        "- {:<40} active {:>10.2}  net {:>10.2}  months {:>8} [{:?}]",
        s.name,
        s.active_income,
        s.net_monthly,
        months,
        s.months_remaining.band()
    );
}
