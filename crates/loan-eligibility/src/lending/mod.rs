//! Loan products, request validation, eligibility scoring and the HTTP surface over them.

pub mod catalog;
pub mod domain;
pub(crate) mod evaluation;
pub mod rate_limit;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{
    product_catalog, validation_rules, LoanProduct, ProductCatalog, RateRange, ValidationRule,
    ValidationRuleCatalog, PRODUCTS,
};
pub use domain::{
    ApplicantProfile, EligibilityReport, EligibilityResult, EmploymentDetails, EmploymentStatus,
    FinancialInfo, LoanApplicationSubmission, LoanDetails, LoanPurpose, LoanType, PersonalInfo,
    QuoteTerms, RateQuote, RateQuoteRequest, RecommendedLoan,
};
pub use evaluation::{quote_rate, EligibilityEngine, EligibilityPolicy};
pub use rate_limit::{
    RateLimitDecision, RateLimiter, SlidingWindowRateLimiter, UnlimitedRateLimiter,
};
pub use router::lending_router;
pub use service::{LendingError, LendingService};
pub use validation::{
    validate_application, validate_rate_request, ValidationErrors, ValidationIssue,
};
