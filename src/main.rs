//! payoff-engine CLI
//!
//! Simulate a debt payoff plan from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Simulate a plan; writes payment_schedule.csv next to the input
//! payoff-engine run --input debts.csv
//!
//! # Print the full outcome as JSON
//! payoff-engine run --input debts.csv --format json
//!
//! # Generate a random input file for testing
//! payoff-engine generate --debts 6 --strategy snowball --output debts.csv
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use payoff_engine::core::strategy::Strategy;
use payoff_engine::engine::amortization::{
    AmortizationEngine, SimulationConfig, SimulationStatus, DEFAULT_MAX_MONTHS,
};
use payoff_engine::io::loader::load_input;
use payoff_engine::io::writer::{format_summary, save_schedule, to_json, write_input_csv};
use payoff_engine::simulation::random_portfolio::{
    comfortable_budget, generate_random_portfolio, PortfolioConfig,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

/// Exit code when the budget cannot cover the minimum payments.
const EXIT_INSUFFICIENT_FUNDS: i32 = 2;

#[derive(Parser)]
#[command(name = "payoff-engine", version, about = "Multi-debt payoff simulator (avalanche / snowball)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate paying off the debts in an input file
    Run {
        /// Input CSV: parameters in rows 1-2, debt table from row 3
        #[arg(long)]
        input: PathBuf,
        /// Schedule CSV path (default: payment_schedule.csv beside the input)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Give up after this many months
        #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
        max_months: u32,
    },
    /// Generate a random input file
    Generate {
        #[arg(long, default_value_t = 5)]
        debts: usize,
        /// Monthly budget (default: total minimums plus 50%)
        #[arg(long)]
        budget: Option<Decimal>,
        #[arg(long, default_value_t = Strategy::Avalanche)]
        strategy: Strategy,
        /// Write to file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn cmd_run(input: PathBuf, output: Option<PathBuf>, format: OutputFormat, max_months: u32) {
    let loaded = load_input(&input).unwrap_or_else(|e| {
        eprintln!("Error loading '{}': {}", input.display(), e);
        process::exit(1);
    });
    info!(
        "loaded {} debts from {} ({} strategy)",
        loaded.portfolio.len(),
        input.display(),
        loaded.strategy()
    );

    let engine = AmortizationEngine::new(SimulationConfig { max_months });
    let outcome = engine
        .simulate(&loaded.portfolio, loaded.monthly_budget, loaded.start_date)
        .unwrap_or_else(|e| {
            eprintln!("Simulation failed: {}", e);
            process::exit(1);
        });

    let schedule_path = output.unwrap_or_else(|| input.with_file_name("payment_schedule.csv"));
    save_schedule(&outcome.schedule, &schedule_path).unwrap_or_else(|e| {
        eprintln!("Error writing '{}': {}", schedule_path.display(), e);
        process::exit(1);
    });
    info!("schedule written to {}", schedule_path.display());

    match format {
        OutputFormat::Json => {
            let json = to_json(&outcome).unwrap_or_else(|e| {
                eprintln!("Error serializing outcome: {}", e);
                process::exit(1);
            });
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", format_summary(&outcome)),
    }

    if let SimulationStatus::InsufficientFunds { .. } = outcome.status {
        warn!("budget does not cover the minimum payments");
        process::exit(EXIT_INSUFFICIENT_FUNDS);
    }
}

fn cmd_generate(debts: usize, budget: Option<Decimal>, strategy: Strategy, output: Option<PathBuf>) {
    let config = PortfolioConfig {
        debt_count: debts,
        strategy,
        ..Default::default()
    };
    let portfolio = generate_random_portfolio(&config).unwrap_or_else(|e| {
        eprintln!("Error generating portfolio: {}", e);
        process::exit(1);
    });
    let budget = budget.unwrap_or_else(|| comfortable_budget(&portfolio, Decimal::new(5, 1)));
    let start = chrono::Local::now().date_naive();

    let result = match &output {
        Some(path) => File::create(path)
            .map_err(csv::Error::from)
            .and_then(|file| write_input_csv(&portfolio, budget, start, file)),
        None => write_input_csv(&portfolio, budget, start, io::stdout()),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error writing portfolio: {}", e);
        process::exit(1);
    });

    if let Some(path) = output {
        eprintln!(
            "Generated {} debts ({} strategy, budget {}) → {}",
            portfolio.len(),
            strategy,
            budget,
            path.display()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            input,
            output,
            format,
            max_months,
        } => cmd_run(input, output, format, max_months),
        Command::Generate {
            debts,
            budget,
            strategy,
            output,
        } => cmd_generate(debts, budget, strategy, output),
    }
}
