//! Input file loading.
//!
//! The input is a CSV file with a parameter block on top and a debt table
//! below it:
//!
//! ```text
//! Monthly Payment,Start Date (YYYY-MM),Strategy (Avalanche or Snowball)
//! "$4,000.00",2020-05,Avalanche
//!
//! Name,Principal,Rate,Minimum Payment
//! Car Loan,"$12,900.00",6.5%,$450.00
//! Student Loan 1,"$8,000.00",4.5%,$84.94
//! ```
//!
//! Parameter columns are matched by header prefix. The debt table starts at
//! the first later row whose first cell is `Name`. Numeric cells may carry
//! currency symbols, thousands separators or a percent sign; everything but
//! digits and `.` is stripped before parsing.

use crate::core::debt::{Debt, DebtError};
use crate::core::portfolio::{DebtPortfolio, PortfolioError};
use crate::core::strategy::Strategy;
use chrono::{Local, NaiveDate};
use csv::StringRecord;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const BUDGET_HEADER: &str = "Monthly Payment";
pub const START_DATE_HEADER: &str = "Start Date";
pub const STRATEGY_HEADER: &str = "Strategy";

const NAME_COLUMN: &str = "Name";
const PRINCIPAL_COLUMN: &str = "Principal";
const RATE_COLUMN: &str = "Rate";
const MINIMUM_COLUMN: &str = "Minimum Payment";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parameter block has no '{0}' value")]
    MissingParameter(&'static str),
    #[error("no debt table found (expected a header row starting with 'Name')")]
    MissingDebtTable,
    #[error("debt table has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: String, value: String },
    #[error(transparent)]
    Debt(#[from] DebtError),
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

/// Parsed input, ready to hand to the engine.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub portfolio: DebtPortfolio,
    pub monthly_budget: Decimal,
    pub start_date: NaiveDate,
}

impl LoadedInput {
    pub fn strategy(&self) -> Strategy {
        self.portfolio.strategy()
    }
}

/// Load an input file, defaulting the start date to today.
pub fn load_input(path: &Path) -> Result<LoadedInput, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_input(file, Local::now().date_naive())
}

/// Parse input from any reader. `today` is used when the start date is
/// missing or malformed.
pub fn parse_input<R: Read>(reader: R, today: NaiveDate) -> Result<LoadedInput, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = csv_reader.records().collect::<Result<Vec<StringRecord>, _>>()?;

    let (param_headers, param_values) = match records.as_slice() {
        [headers, values, ..] => (headers, values),
        _ => return Err(LoadError::MissingParameter(BUDGET_HEADER)),
    };

    let budget_raw = param_value(param_headers, param_values, BUDGET_HEADER)
        .ok_or(LoadError::MissingParameter(BUDGET_HEADER))?;
    let monthly_budget = parse_amount(BUDGET_HEADER, budget_raw)?;
    let start_date = parse_start_date(
        param_value(param_headers, param_values, START_DATE_HEADER),
        today,
    );
    let strategy = parse_strategy(param_value(param_headers, param_values, STRATEGY_HEADER));

    let table_start = records
        .iter()
        .skip(2)
        .position(|r| r.get(0).is_some_and(|c| c.eq_ignore_ascii_case(NAME_COLUMN)))
        .map(|i| i + 2)
        .ok_or(LoadError::MissingDebtTable)?;
    let header = &records[table_start];
    let name_col = column(header, NAME_COLUMN)?;
    let principal_col = column(header, PRINCIPAL_COLUMN)?;
    let rate_col = column(header, RATE_COLUMN)?;
    let minimum_col = column(header, MINIMUM_COLUMN)?;

    let mut debts = Vec::new();
    for record in &records[table_start + 1..] {
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cell = |col: usize| record.get(col).unwrap_or("");
        let debt = Debt::new(
            cell(name_col),
            parse_amount(PRINCIPAL_COLUMN, cell(principal_col))?,
            parse_amount(RATE_COLUMN, cell(rate_col))?,
            parse_amount(MINIMUM_COLUMN, cell(minimum_col))?,
        )?;
        debug!("loaded {}", debt);
        debts.push(debt);
    }

    let portfolio = DebtPortfolio::new(strategy, debts)?;
    Ok(LoadedInput {
        portfolio,
        monthly_budget,
        start_date,
    })
}

/// Strip everything but digits and `.` and parse what is left.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, LoadError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| LoadError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Accepts `YYYY-MM` or `YYYY-MM-DD`; anything else falls back to `today`.
pub fn parse_start_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let parsed = raw.and_then(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
            .ok()
    });
    match parsed {
        Some(date) => date,
        None => {
            warn!(
                "invalid or missing start date {:?}, must be YYYY-MM; using {} instead",
                raw.unwrap_or(""),
                today
            );
            today
        }
    }
}

/// `snowball` selects snowball; every other value selects avalanche.
pub fn parse_strategy(raw: Option<&str>) -> Strategy {
    match raw.map(Strategy::from_str) {
        Some(Ok(strategy)) => strategy,
        Some(Err(e)) => {
            warn!("{}; using avalanche", e);
            Strategy::Avalanche
        }
        None => Strategy::Avalanche,
    }
}

fn param_value<'a>(headers: &StringRecord, values: &'a StringRecord, prefix: &str) -> Option<&'a str> {
    headers
        .iter()
        .position(|h| {
            h.trim_start_matches('\u{feff}')
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
        })
        .and_then(|i| values.get(i))
        .filter(|v| !v.is_empty())
}

fn column(header: &StringRecord, name: &'static str) -> Result<usize, LoadError> {
    header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(LoadError::MissingColumn(name))
}
