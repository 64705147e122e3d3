//! Report Renderer
//!
//! Pure formatting of the analysis results into the fixed-layout text
//! summary. No computation happens here besides display arithmetic
//! (percent scaling and the year range of a trailing window).

use chrono::{Datelike, NaiveDate};

use crate::analysis::{ReturnStats, VolatilityResult, WindowExtreme};
use crate::domain::{History, Regime};

/// Width of the `=` and `-` section separators
const SECTION_WIDTH: usize = 60;
/// Width of the rule under each table header
const TABLE_WIDTH: usize = 45;
/// Placeholder for values the history is too short to define
const NOT_AVAILABLE: &str = "n/a";

/// Everything the report shows, borrowed from the run
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Display name for the header, e.g. "NIFTY 50"
    pub instrument: &'a str,
    /// Run date printed in the header
    pub as_of: NaiveDate,
    pub history: &'a History,
    pub volatility: &'a VolatilityResult,
    pub returns: &'a ReturnStats,
    pub regimes: &'a [Regime],
    /// Trailing return window in years (5 for 1260 trading days)
    pub trailing_years: i32,
}

/// Render the full summary; lines are joined with `\n`, no trailing newline
pub fn render_report(input: &ReportInput<'_>) -> String {
    let section = "=".repeat(SECTION_WIDTH);
    let rule = "-".repeat(SECTION_WIDTH);
    let years = input.trailing_years;
    let mut out: Vec<String> = Vec::new();

    out.push(format!(
        "{} ANALYSIS SUMMARY (As of {})",
        input.instrument.to_uppercase(),
        input.as_of.format("%Y-%m-%d")
    ));
    out.push(section.clone());
    out.push(format!("Latest Close: {:.2}", input.history.last().close));
    out.push(format!(
        "Data Range: {} to {}",
        input.history.first().date.format("%Y-%m-%d"),
        input.history.last().date.format("%Y-%m-%d")
    ));
    out.push(rule.clone());

    out.push("VOLATILITY INDEX (0=Bad/High, 1=Good/Low)".to_string());
    out.push(format!(
        "Current Annualized Volatility: {}",
        percent(input.volatility.current)
    ));
    out.push(format!("Volatility Score: {:.2} / 1.00", input.volatility.score));
    out.push(input.volatility.label().description().to_string());
    out.push(rule.clone());

    out.push(format!("{}-YEAR RETURN ANALYSIS (Rolling)", years));
    out.push(format!(
        "Latest {}-Year Return: {}",
        years,
        optional_percent(input.returns.latest)
    ));
    out.push(format!(
        "Average {}-Year Return: {}",
        years,
        optional_percent(input.returns.average)
    ));
    out.push(format!(
        "Best {}-Year Return: {}",
        years,
        extreme(input.returns.best, years)
    ));
    out.push(format!(
        "Worst {}-Year Return: {}",
        years,
        extreme(input.returns.worst, years)
    ));
    out.push(rule.clone());

    out.push("BULL PERIODS".to_string());
    push_table(&mut out, input.regimes.iter().filter(|r| r.kind.is_bull()));
    out.push(rule);

    out.push("BEAR PERIODS".to_string());
    push_table(&mut out, input.regimes.iter().filter(|r| r.kind.is_bear()));

    out.push(section);
    out.join("\n")
}

fn push_table<'r>(out: &mut Vec<String>, regimes: impl Iterator<Item = &'r Regime>) {
    out.push(format!("{:<15} {:<15} {:<10}", "Start Date", "End Date", "Return"));
    out.push("-".repeat(TABLE_WIDTH));
    for regime in regimes {
        out.push(format!(
            "{:<15} {:<15} {:<10}",
            regime.start.format("%Y-%m-%d").to_string(),
            regime.end.format("%Y-%m-%d").to_string(),
            percent(regime.return_pct)
        ));
    }
}

/// Fraction as a percentage with two decimals (0.1234 -> "12.34%")
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), percent)
}

/// Extreme with the calendar-year span of its window, e.g. "120.00% (2003-2008)"
fn extreme(value: Option<WindowExtreme>, years: i32) -> String {
    match value {
        Some(e) => {
            let end_year = e.end_date.year();
            format!("{} ({}-{})", percent(e.value), end_year - years, end_year)
        }
        None => NOT_AVAILABLE.to_string(),
    }
}
