//! Parsing and validation of raw projection inputs.
//!
//! Both the interactive shell and the HTTP API funnel user values through
//! [`UncheckedInput::validate`] before the calculator runs.

use crate::core::ProjectionInput;
use crate::error::InputField;

/// Values as entered, before validation. `None` means the value did not parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncheckedInput {
    pub initial_capital: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub annual_rate_percent: Option<f64>,
    pub years: Option<i64>,
    pub compounding_frequency: Option<i64>,
}

impl From<ProjectionInput> for UncheckedInput {
    fn from(input: ProjectionInput) -> Self {
        Self {
            initial_capital: Some(input.initial_capital),
            monthly_contribution: Some(input.monthly_contribution),
            annual_rate_percent: Some(input.annual_rate_percent),
            years: Some(input.years.into()),
            compounding_frequency: Some(input.compounding_frequency.into()),
        }
    }
}

impl UncheckedInput {
    /// Checks every field and returns all invalid ones, in prompt order.
    pub fn validate(self) -> Result<ProjectionInput, Vec<InputField>> {
        let initial_capital = finite(self.initial_capital);
        let monthly_contribution = finite(self.monthly_contribution);
        let annual_rate_percent = finite(self.annual_rate_percent);
        let years = positive_count(self.years);
        let compounding_frequency = positive_count(self.compounding_frequency);

        match (
            initial_capital,
            monthly_contribution,
            annual_rate_percent,
            years,
            compounding_frequency,
        ) {
            (
                Some(initial_capital),
                Some(monthly_contribution),
                Some(annual_rate_percent),
                Some(years),
                Some(compounding_frequency),
            ) => Ok(ProjectionInput {
                initial_capital,
                monthly_contribution,
                annual_rate_percent,
                years,
                compounding_frequency,
            }),
            _ => {
                let invalid = [
                    initial_capital.is_none(),
                    monthly_contribution.is_none(),
                    annual_rate_percent.is_none(),
                    years.is_none(),
                    compounding_frequency.is_none(),
                ];
                Err(InputField::ALL
                    .into_iter()
                    .zip(invalid)
                    .filter_map(|(field, bad)| bad.then_some(field))
                    .collect())
            }
        }
    }
}

/// Parses a real-valued answer. Blank answers select `default`.
///
/// Only the leading number is read, so `12abc` is 12 and `1,000` is 1.
/// `Infinity` is recognised and left for validation to reject.
pub fn parse_real(answer: &str, default: f64) -> Option<f64> {
    if answer.trim().is_empty() {
        return Some(default);
    }
    leading_real(answer.trim_start())
}

/// Parses an integer answer. Blank answers select `default`.
///
/// Only the leading digits are read, so `3.5` is 3 and `1e3` is 1.
pub fn parse_count(answer: &str, default: u32) -> Option<i64> {
    if answer.trim().is_empty() {
        return Some(default.into());
    }
    leading_integer(answer.trim_start())
}

fn leading_real(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[sign_len..].starts_with("Infinity") {
        let infinity = if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinity);
    }

    let int_digits = digit_run(bytes, sign_len);
    let mut end = sign_len + int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // An exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = digit_run(bytes, exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    text[..end].parse().ok()
}

fn leading_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = digit_run(bytes, sign_len);
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn positive_count(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}
