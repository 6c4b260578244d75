use runway_core::{IncomeStream, Runway, Status};
use runway_finance::{AccountKey, AccountSelection, IncomeSettings, RunwayReport};
use runway_ingest::{RawTable, net_worth_report};

const NET_WORTH_CSV: &str = "\
Account,2024-01-31,2024-02-29
Alice - Savings - Ally - HYSA,\"9,000\",\"10,000\"
Alice - Savings - Chase - Checking,1500,2000
Bob - Credit Card - Amex,-300,-1000
Bob - Brokerage - Fidelity,40000,41000
Net Worth,50200,52000
";

fn settings(streams: &[(&str, f64)], expenses: f64) -> IncomeSettings {
    let mut s = IncomeSettings {
        streams: Vec::new(),
        next_id: 1,
        monthly_expenses: expenses,
    };
    for (name, amount) in streams {
        s.push_stream(*name, *amount);
    }
    s
}

/// End-to-end: export -> accounts -> selection -> scenarios.
#[test]
fn test_runway_from_selected_savings() {
    let report = net_worth_report(&RawTable::from_csv_str(NET_WORTH_CSV).unwrap());

    let mut selection = AccountSelection::new();
    selection.toggle_category("Savings", &report.accounts);
    assert!(selection.is_category_selected("Savings", &report.accounts));

    let income = settings(&[("A", 3000.0), ("B", 1000.0)], 3500.0);
    let runway = RunwayReport::build(&report.accounts, &selection, &income).unwrap();

    assert_eq!(runway.fund_total, 12000.0);
    let names: Vec<&str> = runway.scenarios.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Lost: A, B", "Lost: A", "Lost: B", "All Income Active"]);
    assert_eq!(
        runway.scenarios.scenarios[2].months_remaining,
        Runway::Finite(24.0)
    );
}

/// Selecting a debt account can push the fund negative: immediate insolvency.
#[test]
fn test_debt_selection_gives_negative_runway() {
    let report = net_worth_report(&RawTable::from_csv_str(NET_WORTH_CSV).unwrap());
    let selection: AccountSelection = [AccountKey::new("Credit Card", 0)].into_iter().collect();
    let income = settings(&[("Job", 1000.0)], 2000.0);

    let runway = RunwayReport::build(&report.accounts, &selection, &income).unwrap();
    assert_eq!(runway.fund_total, -1000.0);
    assert!(runway
        .scenarios
        .scenarios
        .iter()
        .all(|s| s.months_remaining.months().is_some_and(|m| m < 0.0)));
}

#[test]
fn test_streams_configured_as_text() {
    let income: IncomeSettings = serde_json::from_str(
        r#"{"streams":[
                {"id":1,"name":"Salary","amount":"4,000"},
                {"id":2,"name":"Bad","amount":"?"}
            ],
            "next_id":3,"monthly_expenses":5000}"#,
    )
    .unwrap();
    assert_eq!(
        income.streams[1],
        IncomeStream::new(2, "Bad", 0.0)
    );

    let runway = RunwayReport::from_fund_total(10000.0, &income).unwrap();
    assert_eq!(runway.scenarios.status, Status::Complete);
    assert_eq!(runway.scenarios.scenarios.len(), 4);
    // losing the zero stream changes nothing: both runways are 10 months
    assert_eq!(runway.scenarios.scenarios[2].months_remaining, Runway::Finite(10.0));
    assert_eq!(runway.scenarios.scenarios[3].months_remaining, Runway::Finite(10.0));
}
