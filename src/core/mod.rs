mod engine;
mod types;

pub use engine::{compute_projection, round_to_cents};
pub use types::{Projection, ProjectionInput, YearBalance};
