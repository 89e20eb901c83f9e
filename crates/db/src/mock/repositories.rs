use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbPatient, NewAppointment, NewPatient};
use crate::repositories::{AppointmentRepository, PatientRepository};

// Mock repositories for testing
mock! {
    pub PatientRepo {}

    #[async_trait]
    impl PatientRepository for PatientRepo {
        async fn count(&self) -> eyre::Result<i64>;

        async fn find_by_id(&self, id: Uuid) -> eyre::Result<Option<DbPatient>>;

        async fn find_by_email(&self, email: &str) -> eyre::Result<Option<DbPatient>>;

        async fn find_by_ids(&self, ids: &[Uuid]) -> eyre::Result<Vec<DbPatient>>;

        async fn find_all_ids(&self) -> eyre::Result<Vec<Uuid>>;

        async fn create(&self, patient: NewPatient) -> eyre::Result<DbPatient>;

        async fn insert_batch(&self, patients: Vec<NewPatient>) -> eyre::Result<u64>;

        async fn delete_by_id(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentRepository for AppointmentRepo {
        async fn count(&self) -> eyre::Result<i64>;

        async fn find_all(&self) -> eyre::Result<Vec<DbAppointment>>;

        async fn insert_batch(&self, appointments: Vec<NewAppointment>) -> eyre::Result<u64>;
    }
}
