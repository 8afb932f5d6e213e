//! Interactive prompt loop around the projection calculator.

mod format;

use std::io::{BufRead, Write};

use tracing::debug;

use crate::core::{Projection, ProjectionInput, YearBalance, compute_projection};
use crate::error::{Error, Result};
use crate::input::{UncheckedInput, parse_count, parse_real};

pub use format::format_currency;

/// Prompts for the five inputs, validates them, and prints the breakdown.
///
/// Validation failures are returned before the calculator runs.
pub fn run<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<Projection> {
    let input = prompt_inputs(reader, writer)?
        .validate()
        .map_err(Error::InvalidInput)?;
    debug!(?input, "running projection");

    let projection = compute_projection(&input);
    write_breakdown(writer, &projection)?;
    Ok(projection)
}

/// Prints the breakdown for the default inputs without prompting.
pub fn run_example<W: Write>(writer: &mut W) -> Result<Projection> {
    let input = ProjectionInput::default();
    debug!(?input, "running example projection");

    let projection = compute_projection(&input);
    write_breakdown(writer, &projection)?;
    Ok(projection)
}

pub fn prompt_inputs<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<UncheckedInput> {
    let defaults = ProjectionInput::default();

    let initial_capital = ask(
        reader,
        writer,
        &format!("Initial capital (default {}): ", defaults.initial_capital),
    )?;
    let monthly_contribution = ask(
        reader,
        writer,
        &format!(
            "Monthly contribution (default {}): ",
            defaults.monthly_contribution
        ),
    )?;
    let annual_rate = ask(
        reader,
        writer,
        &format!(
            "Annual interest rate in % (default {}): ",
            defaults.annual_rate_percent
        ),
    )?;
    let years = ask(
        reader,
        writer,
        &format!("Time in years (default {}): ", defaults.years),
    )?;
    let compounding_frequency = ask(
        reader,
        writer,
        &format!(
            "Compounding frequency per year (default {}): ",
            defaults.compounding_frequency
        ),
    )?;

    Ok(UncheckedInput {
        initial_capital: parse_real(&initial_capital, defaults.initial_capital),
        monthly_contribution: parse_real(&monthly_contribution, defaults.monthly_contribution),
        annual_rate_percent: parse_real(&annual_rate, defaults.annual_rate_percent),
        years: parse_count(&years, defaults.years),
        compounding_frequency: parse_count(&compounding_frequency, defaults.compounding_frequency),
    })
}

pub fn write_breakdown<W: Write>(writer: &mut W, projection: &[YearBalance]) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Year-by-year breakdown:")?;
    for entry in projection {
        writeln!(
            writer,
            "Year {}: ${}",
            entry.year,
            format_currency(entry.balance)
        )?;
    }
    writer.flush()?;
    Ok(())
}

// End of input reads as an empty answer.
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> Result<String> {
    write!(writer, "{question}")?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(answer)
}
