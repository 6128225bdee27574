//! Loan eligibility simulator: amortization math, affordability and risk heuristics, and the
//! HTTP endpoints that expose them.

pub mod calculations;
pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;

pub use error::AppError;
