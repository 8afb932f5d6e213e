use std::fmt;

use thiserror::Error;

/// A user-facing input of the projection, in prompt order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputField {
    InitialCapital,
    MonthlyContribution,
    AnnualRate,
    Years,
    CompoundingFrequency,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::InitialCapital,
        InputField::MonthlyContribution,
        InputField::AnnualRate,
        InputField::Years,
        InputField::CompoundingFrequency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InputField::InitialCapital => "Initial capital",
            InputField::MonthlyContribution => "Monthly contribution",
            InputField::AnnualRate => "Annual interest rate",
            InputField::Years => "Time in years",
            InputField::CompoundingFrequency => "Compounding frequency",
        }
    }

    /// Key used by the HTTP API payload.
    pub fn key(self) -> &'static str {
        match self {
            InputField::InitialCapital => "initialCapital",
            InputField::MonthlyContribution => "monthlyContribution",
            InputField::AnnualRate => "annualRate",
            InputField::Years => "years",
            InputField::CompoundingFrequency => "compoundingFrequency",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input for: {}", join_labels(.0))]
    InvalidInput(Vec<InputField>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_labels(fields: &[InputField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}
