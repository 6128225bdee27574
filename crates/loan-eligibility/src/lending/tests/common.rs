use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::lending::domain::{
    EmploymentDetails, EmploymentStatus, FinancialInfo, LoanApplicationSubmission, LoanDetails,
    LoanPurpose, PersonalInfo, RateQuoteRequest,
};
use crate::lending::evaluation::{EligibilityEngine, EligibilityPolicy};
use crate::lending::rate_limit::{SlidingWindowRateLimiter, UnlimitedRateLimiter};
use crate::lending::{lending_router, validate_application, ApplicantProfile, LendingService};

pub(super) fn rate_request() -> RateQuoteRequest {
    RateQuoteRequest {
        loan_amount: 100_000.0,
        loan_term: 24.0,
        credit_score: None,
        loan_type: None,
    }
}

pub(super) fn submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        personal_info: PersonalInfo {
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            age: 34.0,
            employment_status: EmploymentStatus::Employed,
            employment_duration: 36.0,
        },
        employment_details: EmploymentDetails {
            employer_name: "Karoo Mining".to_string(),
            job_title: "Process Engineer".to_string(),
            industry: "Mining".to_string(),
        },
        financial_info: FinancialInfo {
            monthly_income: 45_000.0,
            monthly_expenses: 15_000.0,
            existing_debt: 3_000.0,
            credit_score: Some(720.0),
        },
        loan_details: LoanDetails {
            requested_amount: 100_000.0,
            loan_term: 24.0,
            loan_purpose: LoanPurpose::DebtConsolidation,
        },
    }
}

pub(super) fn stretched_submission() -> LoanApplicationSubmission {
    let mut submission = submission();
    submission.personal_info.employment_duration = 8.0;
    submission.financial_info = FinancialInfo {
        monthly_income: 10_000.0,
        monthly_expenses: 2_000.0,
        existing_debt: 4_000.0,
        credit_score: Some(560.0),
    };
    submission
}

pub(super) fn unemployed_submission() -> LoanApplicationSubmission {
    let mut submission = submission();
    submission.personal_info.employment_status = EmploymentStatus::Unemployed;
    submission
}

pub(super) fn profile(submission: &LoanApplicationSubmission) -> ApplicantProfile {
    validate_application(submission).expect("fixture passes validation")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityPolicy::default())
}

pub(super) fn open_service() -> LendingService<UnlimitedRateLimiter> {
    LendingService::new(Arc::new(UnlimitedRateLimiter), EligibilityPolicy::default())
}

pub(super) fn limited_service(per_minute: u32) -> LendingService<SlidingWindowRateLimiter> {
    LendingService::new(
        Arc::new(SlidingWindowRateLimiter::per_minute(per_minute)),
        EligibilityPolicy::default(),
    )
}

pub(super) fn open_router() -> axum::Router {
    lending_router(Arc::new(open_service()))
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializable body"),
        ))
        .expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
