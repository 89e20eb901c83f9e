use color_eyre::eyre::Result;
use dotenv::dotenv;
use hospital_api::{
    config::{ApiConfig, StorageBackend},
    init_tracing, storage,
};
use hospital_db::seed::{SeedOutcome, Seeder};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    if config.storage == StorageBackend::Memory {
        warn!("Seeding in-memory storage; the data is discarded on exit");
    }

    let repositories = storage::connect(&config.storage).await?;
    let outcome = Seeder::new(repositories.patients, repositories.appointments, config.seed)
        .run()
        .await?;

    match outcome {
        SeedOutcome::Skipped { existing_patients } => {
            info!("Store already holds {} patients, nothing to do", existing_patients)
        }
        SeedOutcome::Seeded {
            patients,
            appointments,
        } => info!("Seeded {} patients and {} appointments", patients, appointments),
    }

    Ok(())
}
