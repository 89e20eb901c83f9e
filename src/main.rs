use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use hospital_api::{config::ApiConfig, init_tracing, storage, ApiState};
use hospital_db::seed::Seeder;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Open storage and create the schema if needed
    let repositories = storage::connect(&config.storage).await?;

    // Seed before any traffic arrives
    if config.seed_on_startup {
        Seeder::new(
            repositories.patients.clone(),
            repositories.appointments.clone(),
            config.seed.clone(),
        )
        .run()
        .await?;
    } else {
        info!("Startup seeding disabled");
    }

    // Start API server
    let state = Arc::new(ApiState::new(repositories));
    hospital_api::start_server(config, state).await?;

    Ok(())
}
