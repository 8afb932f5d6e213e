use serde::Serialize;

const DEFAULT_INITIAL_CAPITAL: f64 = 7400.0;
const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 2300.0;
const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 15.0;
const DEFAULT_YEARS: u32 = 20;
const DEFAULT_COMPOUNDING_FREQUENCY: u32 = 12;

/// Inputs to a single projection run.
///
/// `monthly_contribution` is added once per compounding period, so it is
/// only truly monthly when `compounding_frequency` is 12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub initial_capital: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub compounding_frequency: u32,
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            years: DEFAULT_YEARS,
            compounding_frequency: DEFAULT_COMPOUNDING_FREQUENCY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBalance {
    pub year: u32,
    pub balance: f64,
}

pub type Projection = Vec<YearBalance>;
