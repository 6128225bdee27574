//! End-to-end scenarios for the loan simulator, driven through the public calculation API, the
//! lending service facade and the HTTP router.

mod common {
    use std::sync::Arc;

    use loan_eligibility::lending::{
        EligibilityPolicy, EmploymentDetails, EmploymentStatus, FinancialInfo, LendingService,
        LoanApplicationSubmission, LoanDetails, LoanPurpose, PersonalInfo,
        SlidingWindowRateLimiter, UnlimitedRateLimiter,
    };

    pub(super) fn submission() -> LoanApplicationSubmission {
        LoanApplicationSubmission {
            personal_info: PersonalInfo {
                first_name: "Pieter".to_string(),
                last_name: "van Wyk".to_string(),
                age: 41.0,
                employment_status: EmploymentStatus::SelfEmployed,
                employment_duration: 60.0,
            },
            employment_details: EmploymentDetails {
                employer_name: "Van Wyk Joinery".to_string(),
                job_title: "Owner".to_string(),
                industry: "Construction".to_string(),
            },
            financial_info: FinancialInfo {
                monthly_income: 38_000.0,
                monthly_expenses: 12_000.0,
                existing_debt: 2_500.0,
                credit_score: Some(680.0),
            },
            loan_details: LoanDetails {
                requested_amount: 150_000.0,
                loan_term: 36.0,
                loan_purpose: LoanPurpose::HomeImprovement,
            },
        }
    }

    pub(super) fn open_service() -> Arc<LendingService<UnlimitedRateLimiter>> {
        Arc::new(LendingService::new(
            Arc::new(UnlimitedRateLimiter),
            EligibilityPolicy::default(),
        ))
    }

    pub(super) fn limited_service(
        per_minute: u32,
    ) -> Arc<LendingService<SlidingWindowRateLimiter>> {
        Arc::new(LendingService::new(
            Arc::new(SlidingWindowRateLimiter::per_minute(per_minute)),
            EligibilityPolicy::default(),
        ))
    }
}

mod calculations {
    use approx::assert_abs_diff_eq;
    use loan_eligibility::calculations::{
        calculate_dti, calculate_monthly_payment, calculate_risk_category,
        calculate_total_interest, format_currency, generate_amortization_schedule,
        parse_currency, CalculationError, LoanParams, RiskCategory, RiskFactors,
    };

    #[test]
    fn reference_loan_matches_published_installment() {
        let params = LoanParams::new(100_000.0, 12.5, 24);
        assert_abs_diff_eq!(
            calculate_monthly_payment(&params).expect("valid"),
            4730.73,
            epsilon = 0.01
        );

        let schedule = generate_amortization_schedule(&params).expect("valid");
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule.last().map(|entry| entry.balance), Some(0.0));
    }

    #[test]
    fn interest_free_loans_cost_nothing() {
        let params = LoanParams::new(100_000.0, 0.0, 12);
        assert_abs_diff_eq!(calculate_monthly_payment(&params).expect("valid"), 8333.33);
        assert_abs_diff_eq!(calculate_total_interest(&params).expect("valid"), 0.0);
    }

    #[test]
    fn negative_principal_is_rejected() {
        assert_eq!(
            calculate_monthly_payment(&LoanParams::new(-100_000.0, 12.5, 24)),
            Err(CalculationError::InvalidParameters)
        );
    }

    #[test]
    fn ratio_and_risk_examples() {
        assert_abs_diff_eq!(calculate_dti(5_000.0, 25_000.0).expect("valid"), 20.0);
        assert_eq!(
            calculate_dti(5_000.0, 0.0),
            Err(CalculationError::NonPositiveIncome)
        );
        assert_eq!(
            calculate_risk_category(RiskFactors {
                dti: 20.0,
                credit_score: Some(750),
                employment_duration: 24,
            }),
            RiskCategory::Low
        );
        assert_eq!(
            calculate_risk_category(RiskFactors {
                dti: 55.0,
                credit_score: Some(500),
                employment_duration: 3,
            }),
            RiskCategory::Critical
        );
    }

    #[test]
    fn formatted_amounts_parse_back() {
        let formatted = format_currency(1_234_567.89);
        assert_eq!(parse_currency(&formatted), Some(1_234_567.89));
    }
}

mod service {
    use super::common::*;
    use loan_eligibility::calculations::RiskCategory;
    use loan_eligibility::lending::{LendingError, LoanType, RateQuoteRequest};

    #[test]
    fn self_employed_applicant_with_fair_credit_is_eligible() {
        let report = open_service()
            .check_eligibility(&submission())
            .expect("evaluation succeeds");

        assert!(report.eligibility_result.is_eligible);
        assert_eq!(report.eligibility_result.risk_category, RiskCategory::Low);
        assert_eq!(report.recommended_loan.recommended_amount, 150_000.0);
        assert_eq!(report.recommended_loan.interest_rate, 11.9);
    }

    #[test]
    fn invalid_quote_surfaces_validation_errors() {
        let result = open_service().quote(&RateQuoteRequest {
            loan_amount: 2_000_000.0,
            loan_term: 100.0,
            credit_score: None,
            loan_type: Some(LoanType::VehicleLoan),
        });

        match result {
            Err(LendingError::Validation(errors)) => assert_eq!(errors.issues.len(), 2),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use loan_eligibility::lending::{lending_router, RateLimiter};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-forwarded-for", "192.0.2.10")
            .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn eligibility_round_trip() {
        let router = lending_router(open_service());
        let body = serde_json::to_value(submission()).expect("serialize submission");

        let response = router
            .oneshot(post("/api/loans/eligibility", &body))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["data"]["eligibilityResult"]["isEligible"], json!(true));
        assert!(payload["data"]["affordabilityAnalysis"]["debtToIncomeRatio"].is_number());
    }

    #[tokio::test]
    async fn vehicle_quote_uses_vehicle_terms() {
        let router = lending_router(open_service());
        let response = router
            .oneshot(post(
                "/api/loans/calculate-rate",
                &json!({
                    "loanAmount": 450000,
                    "loanTerm": 72,
                    "creditScore": 700,
                    "loanType": "vehicle_loan"
                }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["data"]["interestRate"], json!(11.5));
        assert_eq!(
            payload["data"]["paymentSchedule"].as_array().map(Vec::len),
            Some(72)
        );
    }

    #[tokio::test]
    async fn limiter_blocks_repeat_quotes_until_reset() {
        let service = limited_service(2);
        let router = lending_router(service.clone());
        let quote = json!({ "loanAmount": 50000, "loanTerm": 12 });

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(post("/api/loans/calculate-rate", &quote))
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .clone()
            .oneshot(post("/api/loans/calculate-rate", &quote))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .expect("numeric retry-after");
        assert!((1..=60).contains(&retry_after));

        service.limiter().reset_all();
        let response = router
            .oneshot(post("/api/loans/calculate-rate", &quote))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

mod export {
    use loan_eligibility::calculations::{LoanParams, ScheduleExporter};

    #[test]
    fn csv_export_ends_with_summary() {
        let bytes = ScheduleExporter::to_writer(Vec::new(), &LoanParams::new(60_000.0, 12.0, 12))
            .expect("export succeeds");
        let text = String::from_utf8(bytes).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 12 + 1 + 6);
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "Summary");
        assert_eq!(lines[15], "Loan Amount,60000.00");
        assert_eq!(lines[17], "Term (months),12");
    }
}
