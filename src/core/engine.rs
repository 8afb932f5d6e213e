use super::types::{Projection, ProjectionInput, YearBalance};

/// Projects the balance year by year.
///
/// Each year applies `compounding_frequency` steps of
/// `balance * (1 + period_rate) + contribution`. Reported balances are
/// rounded to cents, year 0 excepted; the running balance is never rounded.
///
/// No validation happens here. Non-finite inputs propagate as NaN/Infinity.
pub fn compute_projection(input: &ProjectionInput) -> Projection {
    let period_rate = (input.annual_rate_percent / 100.0) / input.compounding_frequency as f64;
    let mut balance = input.initial_capital;

    let mut result = Vec::with_capacity(input.years as usize + 1);
    result.push(YearBalance {
        year: 0,
        balance: input.initial_capital,
    });

    for year in 1..=input.years {
        for _ in 0..input.compounding_frequency {
            balance = balance * (1.0 + period_rate) + input.monthly_contribution;
        }
        result.push(YearBalance {
            year,
            balance: round_to_cents(balance),
        });
    }

    result
}

/// Rounds to two decimals using the exact binary value, ties away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Exact half-cent ties are multiples of 1/8. Float formatting breaks
    // those to even, so they are resolved here instead.
    let scaled = value * 100.0;
    if (value * 8.0).fract() == 0.0 && (scaled - scaled.trunc()).abs() == 0.5 {
        return scaled.round() / 100.0;
    }

    format!("{value:.2}").parse().unwrap_or(value)
}
