use crate::cli::ServeArgs;
use crate::infra::{default_eligibility_policy, spawn_limiter_cleanup, AppState};
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{LendingService, SlidingWindowRateLimiter, UnlimitedRateLimiter};
use loan_eligibility::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = default_eligibility_policy();
    let routes = if config.rate_limit.enabled {
        let limiter = Arc::new(SlidingWindowRateLimiter::per_minute(
            config.rate_limit.requests_per_minute,
        ));
        spawn_limiter_cleanup(limiter.clone());
        with_loan_routes(Arc::new(LendingService::new(limiter, policy)))
    } else {
        with_loan_routes(Arc::new(LendingService::new(
            Arc::new(UnlimitedRateLimiter),
            policy,
        )))
    };

    let app = routes
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rate_limited = config.rate_limit.enabled,
        requests_per_minute = config.rate_limit.requests_per_minute,
        "loan eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
