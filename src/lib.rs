//! Year-by-year compound interest projection with periodic contributions.
//!
//! [`core::compute_projection`] is the pure calculator; [`shell`] and [`api`]
//! are thin callers that validate input before invoking it.

pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod shell;
