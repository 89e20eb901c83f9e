use std::sync::Arc;

use eyre::Result;
use hospital_db::{
    create_pool,
    memory::{InMemoryAppointmentRepository, InMemoryPatientRepository},
    repositories::{
        AppointmentRepository, PatientRepository, PgAppointmentRepository, PgPatientRepository,
    },
    schema::initialize_database,
};
use tracing::info;

use crate::config::StorageBackend;

/// The repository pair every service is built from.
#[derive(Clone)]
pub struct Repositories {
    pub patients: Arc<dyn PatientRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            patients: Arc::new(InMemoryPatientRepository::new()),
            appointments: Arc::new(InMemoryAppointmentRepository::new()),
        }
    }
}

/// Opens the configured backend, creating the Postgres schema if needed.
pub async fn connect(storage: &StorageBackend) -> Result<Repositories> {
    match storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            info!("Connecting to database...");
            let db_pool = create_pool(database_url, *max_connections).await?;
            initialize_database(&db_pool).await?;

            Ok(Repositories {
                patients: Arc::new(PgPatientRepository::new(db_pool.clone())),
                appointments: Arc::new(PgAppointmentRepository::new(db_pool)),
            })
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Repositories::in_memory())
        }
    }
}
