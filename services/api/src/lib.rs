mod cli;
mod infra;
mod page;
mod routes;
mod score;
mod server;

use frailty_index::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
