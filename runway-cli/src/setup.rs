use anyhow::{Result, bail};
use runway_core::parse_amount;
use runway_finance::IncomeSettings;
use std::io::{self, Write};

use crate::config::{Config, config_path, load_config, save_config};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn prompt_multiline(label: &str) -> Result<Vec<String>> {
    println!("{} (enter one per line; blank line to finish)", label);
    let mut out = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut s = String::new();
        io::stdin().read_line(&mut s)?;
        let s = s.trim().to_string();
        if s.is_empty() {
            break;
        }
        out.push(s);
    }
    Ok(out)
}

/// Parse `NAME=AMOUNT`. The amount is read loosely (`"1,500"` is 1500,
/// junk is 0); a missing `=` or name is an error.
pub fn parse_income_spec(spec: &str) -> Result<(String, f64)> {
    let Some((name, amount)) = spec.split_once('=') else {
        bail!("income '{spec}' should look like NAME=AMOUNT");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("income '{spec}' has no name");
    }
    Ok((name.to_string(), parse_amount(amount)))
}

/// Interactive setup: income streams and monthly expenses into config.toml.
/// Account selection and categories already in the config are kept.
pub fn run_setup() -> Result<()> {
    println!("Runway setup\n");
    let mut cfg: Config = load_config()?;

    let specs = prompt_multiline("Monthly income streams as NAME=AMOUNT")?;
    let mut income = IncomeSettings {
        streams: Vec::new(),
        next_id: 1,
        monthly_expenses: 0.0,
    };
    for spec in &specs {
        let (name, amount) = parse_income_spec(spec)?;
        income.push_stream(name, amount);
    }
    if income.streams.is_empty() {
        income = IncomeSettings::default();
    }

    income.monthly_expenses = parse_amount(&prompt("Monthly expenses")?);
    cfg.income = income;
    save_config(&cfg)?;

    println!("\nWrote {}", config_path()?.display());
    println!(
        "Income {:.2} / expenses {:.2} / net {:.2} per month",
        cfg.income.total_monthly_income(),
        cfg.income.monthly_expenses,
        cfg.income.net_monthly()
    );

    println!("\nNext recommended steps:");
    println!("- runway net-worth --csv balances.csv        (see account keys per category)");
    println!("- runway scenarios --csv balances.csv --select Savings_0");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_income_spec() {
        assert_eq!(
            parse_income_spec("Salary=3,000").unwrap(),
            ("Salary".to_string(), 3000.0)
        );
        assert_eq!(
            parse_income_spec(" Side gig = abc").unwrap(),
            ("Side gig".to_string(), 0.0)
        );
        assert!(parse_income_spec("Salary").is_err());
        assert!(parse_income_spec("=100").is_err());
    }
}
