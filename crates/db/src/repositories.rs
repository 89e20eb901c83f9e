//! Storage interfaces, one per entity.
//!
//! Services depend on these traits only; `PgPatientRepository` and
//! `PgAppointmentRepository` back them with Postgres, and the
//! [`memory`](crate::memory) module backs them with process memory.

pub mod appointment;
pub mod patient;

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{DbAppointment, DbPatient, NewAppointment, NewPatient};

pub use appointment::PgAppointmentRepository;
pub use patient::PgPatientRepository;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn count(&self) -> Result<i64>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbPatient>>;

    /// Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> Result<Option<DbPatient>>;

    /// Fetches every patient whose id is in `ids` with a single read.
    /// Unknown ids are ignored; no ordering is guaranteed.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbPatient>>;

    async fn find_all_ids(&self) -> Result<Vec<Uuid>>;

    async fn create(&self, patient: NewPatient) -> Result<DbPatient>;

    /// Persists `patients` as one write and returns the number of rows stored.
    async fn insert_batch(&self, patients: Vec<NewPatient>) -> Result<u64>;

    /// Returns `false` when no row matched.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn count(&self) -> Result<i64>;

    async fn find_all(&self) -> Result<Vec<DbAppointment>>;

    /// Persists `appointments` as one write and returns the number of rows stored.
    async fn insert_batch(&self, appointments: Vec<NewAppointment>) -> Result<u64>;
}
