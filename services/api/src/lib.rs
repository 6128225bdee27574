mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use loan_eligibility::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
