use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::calculations::CalculationError;

use super::catalog::{product_catalog, validation_rules, ProductCatalog, ValidationRuleCatalog};
use super::domain::{EligibilityReport, LoanApplicationSubmission, RateQuote, RateQuoteRequest};
use super::evaluation::{EligibilityEngine, EligibilityPolicy};
use super::rate_limit::{RateLimitDecision, RateLimiter};
use super::validation::{validate_application, validate_rate_request, ValidationErrors};

/// Service composing request validation, the eligibility engine and the client rate limiter.
pub struct LendingService<L> {
    engine: Arc<EligibilityEngine>,
    limiter: Arc<L>,
}

impl<L> LendingService<L>
where
    L: RateLimiter + 'static,
{
    pub fn new(limiter: Arc<L>, policy: EligibilityPolicy) -> Self {
        Self {
            engine: Arc::new(EligibilityEngine::new(policy)),
            limiter,
        }
    }

    /// Validate and price a rate quote request.
    pub fn quote(&self, request: &RateQuoteRequest) -> Result<RateQuote, LendingError> {
        let terms = validate_rate_request(request)?;
        let quote = self.engine.quote(&terms)?;
        debug!(
            loan_type = ?terms.loan_type,
            amount = terms.amount,
            term_months = terms.term_months,
            interest_rate = quote.interest_rate,
            "rate quote computed"
        );
        Ok(quote)
    }

    /// Validate and score a full loan application.
    pub fn check_eligibility(
        &self,
        submission: &LoanApplicationSubmission,
    ) -> Result<EligibilityReport, LendingError> {
        let profile = validate_application(submission)?;
        let report = self.engine.evaluate(&profile)?;
        debug!(
            purpose = ?profile.purpose,
            eligible = report.eligibility_result.is_eligible,
            risk = report.eligibility_result.risk_category.label(),
            affordability = report.affordability_analysis.affordability_score.label(),
            likelihood = report.eligibility_result.approval_likelihood,
            "eligibility evaluated"
        );
        Ok(report)
    }

    pub fn products(&self) -> ProductCatalog {
        product_catalog()
    }

    pub fn validation_rules(&self) -> ValidationRuleCatalog {
        validation_rules()
    }

    /// Count a request from `client` against the rate limit.
    pub fn admit(&self, client: &str, now: DateTime<Utc>) -> RateLimitDecision {
        self.limiter.check(client, now)
    }

    pub fn limiter(&self) -> &L {
        &self.limiter
    }
}

/// Error raised by the lending service.
#[derive(Debug, thiserror::Error)]
pub enum LendingError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}
