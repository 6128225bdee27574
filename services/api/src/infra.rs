use loan_eligibility::calculations::parse_currency;
use loan_eligibility::lending::{EligibilityPolicy, LoanType, SlidingWindowRateLimiter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn default_eligibility_policy() -> EligibilityPolicy {
    EligibilityPolicy::default()
}

/// Periodically drop idle clients so the limiter's map does not grow without bound.
pub(crate) fn spawn_limiter_cleanup(limiter: Arc<SlidingWindowRateLimiter>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            limiter.cleanup_expired(chrono::Utc::now());
            debug!("rate limiter windows pruned");
        }
    });
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    parse_currency(raw)
        .filter(|amount| *amount > 0.0)
        .ok_or_else(|| format!("failed to parse '{raw}' as a positive Rand amount"))
}

pub(crate) fn parse_loan_type(raw: &str) -> Result<LoanType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "personal" | "personal_loan" => Ok(LoanType::PersonalLoan),
        "vehicle" | "vehicle_loan" => Ok(LoanType::VehicleLoan),
        other => Err(format!(
            "unknown loan type '{other}' (expected personal_loan or vehicle_loan)"
        )),
    }
}
