mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use ethos_deliver::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
