mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use agentcast::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
