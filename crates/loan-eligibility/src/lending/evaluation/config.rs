use serde::{Deserialize, Serialize};

/// Thresholds the eligibility engine applies on top of the risk heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    /// Likelihood (0..=100) at or above which an applicant is eligible.
    pub minimum_approval_likelihood: u8,
    /// Cap on the offered amount as a multiple of monthly income.
    pub income_multiple_cap: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            minimum_approval_likelihood: 50,
            income_multiple_cap: 10.0,
        }
    }
}
