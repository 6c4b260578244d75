use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use runway_finance::{AccountKey, AccountSelection, IncomeSettings, RunwayReport};
use runway_ingest::{cash_flow_report, net_worth_report, read_table};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod output;
mod setup;
mod state;

const LONG_VERSION: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("RUNWAY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "runway",
    version,
    long_version = LONG_VERSION,
    about = "Net worth, cash flow and emergency-fund runway from spreadsheet exports"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive setup: income streams and monthly expenses
    Setup,

    /// Per-category balances over time from a net-worth export
    NetWorth {
        /// Balances CSV: Account,date1,date2,...
        #[arg(long)]
        csv: PathBuf,

        /// Only total these categories (repeatable; defaults to config, then all)
        #[arg(long = "category")]
        categories: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Monthly net income from an income/expense export
    CashFlow {
        /// Monthly CSV with "Total Income" and "Total Expenses" rows
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Months of emergency fund under every combination of lost income
    Scenarios {
        /// Balances CSV the emergency-fund accounts come from
        #[arg(long)]
        csv: PathBuf,

        /// Emergency-fund account as Category_index (repeatable; overrides config)
        #[arg(long = "select")]
        select: Vec<String>,

        /// Income stream as NAME=AMOUNT (repeatable; overrides config)
        #[arg(long = "income")]
        income: Vec<String>,

        /// Monthly expenses (overrides config; non-numeric reads as 0)
        #[arg(long, value_parser = parse_expenses)]
        expenses: Option<f64>,

        #[arg(long)]
        json: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.runway/config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > warn
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    match cli.command {
        Command::Setup => setup::run_setup()?,

        Command::NetWorth {
            csv,
            categories,
            json,
        } => net_worth(&csv, categories, json)?,

        Command::CashFlow { csv, json } => {
            let table = load_csv(&csv)?;
            let report = cash_flow_report(&table);
            if json {
                output::print_json(&report)?;
            } else {
                output::print_cash_flow(&report);
            }
        }

        Command::Scenarios {
            csv,
            select,
            income,
            expenses,
            json,
        } => scenarios(&csv, select, income, expenses, json).await?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Read `--expenses` like any other entered amount, so `"3,500"` is 3500 and
/// `NaN` or junk is 0.
fn parse_expenses(raw: &str) -> std::result::Result<f64, String> {
    Ok(runway_core::parse_amount(raw))
}

fn load_csv(path: &Path) -> Result<runway_ingest::RawTable> {
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    read_table(path)
}

fn net_worth(csv: &Path, categories: Vec<String>, json: bool) -> Result<()> {
    let table = load_csv(csv)?;
    let report = net_worth_report(&table);

    let selected = if !categories.is_empty() {
        categories
    } else {
        config::load_config()?
            .categories
            .unwrap_or_else(|| report.categories.all.clone())
    };

    if json {
        output::print_net_worth_json(&report, &selected)
    } else {
        output::print_net_worth(&report, &selected);
        Ok(())
    }
}

async fn scenarios(
    csv: &Path,
    select: Vec<String>,
    income: Vec<String>,
    expenses: Option<f64>,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let table = load_csv(csv)?;
    let report = net_worth_report(&table);

    let selection = if select.is_empty() {
        cfg.selected_accounts
    } else {
        select
            .iter()
            .map(|s| s.parse::<AccountKey>())
            .collect::<Result<AccountSelection>>()?
    };

    let mut settings = if income.is_empty() {
        cfg.income
    } else {
        let mut settings = IncomeSettings {
            streams: Vec::new(),
            next_id: 1,
            monthly_expenses: cfg.income.monthly_expenses,
        };
        for spec in &income {
            let (name, amount) = setup::parse_income_spec(spec)?;
            settings.push_stream(name, amount);
        }
        settings
    };
    if let Some(expenses) = expenses {
        settings.monthly_expenses = expenses;
    }

    info!(
        accounts = selection.keys().count(),
        streams = settings.streams.len(),
        "projecting runway"
    );

    // 2^n scenarios; keep the enumeration off the async runtime
    let accounts = report.accounts;
    let worker_selection = selection.clone();
    let runway = tokio::task::spawn_blocking(move || {
        RunwayReport::build(&accounts, &worker_selection, &settings)
    })
    .await
    .context("scenario worker failed")??;

    if json {
        output::print_json(&runway)
    } else {
        output::print_runway(&runway, &selection);
        Ok(())
    }
}
