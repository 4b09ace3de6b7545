mod bot;
mod capability;
mod config;
mod data;
mod error;
mod model;
mod pagination;
mod scheduler;
mod service;
mod startup;

use crate::{config::Config, error::AppError, scheduler::activity_checks};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    startup::verify_flag_tables()?;
    let db = startup::connect_to_database(&config).await?;

    let (bot_client, discord_http) = bot::start::init_bot(&config, db.clone()).await?;

    // Start activity check scheduler
    let scheduler_db = db.clone();
    let scheduler_http = discord_http.clone();
    tokio::spawn(async move {
        if let Err(e) = activity_checks::start_scheduler(scheduler_db, scheduler_http).await {
            tracing::error!("Activity check scheduler error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
