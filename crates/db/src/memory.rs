//! Process-local storage backend.
//!
//! Used when `STORAGE_BACKEND=memory` and by tests that need real state
//! without a database. Enforces the same unique-email rule as the
//! Postgres schema.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use eyre::{bail, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbPatient, NewAppointment, NewPatient};
use crate::repositories::{AppointmentRepository, PatientRepository};

#[derive(Default)]
pub struct InMemoryPatientRepository {
    store: RwLock<PatientStore>,
}

/// Rows keyed by id plus an email → id index, updated together.
#[derive(Default)]
struct PatientStore {
    rows: HashMap<Uuid, DbPatient>,
    by_email: HashMap<String, Uuid>,
}

impl PatientStore {
    fn insert(&mut self, patient: NewPatient) -> DbPatient {
        let row = DbPatient {
            id: Uuid::new_v4(),
            first_name: patient.first_name,
            last_name: patient.last_name,
            email: patient.email,
        };
        self.by_email.insert(row.email.clone(), row.id);
        self.rows.insert(row.id, row.clone());
        row
    }
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn count(&self) -> Result<i64> {
        Ok(self.store.read().await.rows.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbPatient>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<DbPatient>> {
        let store = self.store.read().await;
        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.rows.get(id))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbPatient>> {
        let store = self.store.read().await;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| store.rows.get(id).cloned())
            .collect())
    }

    async fn find_all_ids(&self) -> Result<Vec<Uuid>> {
        Ok(self.store.read().await.rows.keys().copied().collect())
    }

    async fn create(&self, patient: NewPatient) -> Result<DbPatient> {
        let mut store = self.store.write().await;
        if store.by_email.contains_key(&patient.email) {
            bail!("duplicate key value violates unique constraint on patients.email");
        }

        Ok(store.insert(patient))
    }

    async fn insert_batch(&self, batch: Vec<NewPatient>) -> Result<u64> {
        let mut store = self.store.write().await;

        // All-or-nothing, like a single INSERT statement.
        let mut seen = HashSet::new();
        for patient in &batch {
            if store.by_email.contains_key(&patient.email) || !seen.insert(patient.email.as_str()) {
                bail!("duplicate key value violates unique constraint on patients.email");
            }
        }

        let inserted = batch.len() as u64;
        for patient in batch {
            store.insert(patient);
        }
        Ok(inserted)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut store = self.store.write().await;
        match store.rows.remove(&id) {
            Some(row) => {
                store.by_email.remove(&row.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: RwLock<Vec<DbAppointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn count(&self) -> Result<i64> {
        Ok(self.appointments.read().await.len() as i64)
    }

    async fn find_all(&self) -> Result<Vec<DbAppointment>> {
        Ok(self.appointments.read().await.clone())
    }

    async fn insert_batch(&self, batch: Vec<NewAppointment>) -> Result<u64> {
        let inserted = batch.len() as u64;
        let mut appointments = self.appointments.write().await;
        appointments.extend(batch.into_iter().map(|appointment| DbAppointment {
            id: Uuid::new_v4(),
            patient_id: appointment.patient_id,
            appointment_time: appointment.appointment_time,
            notes: appointment.notes,
        }));
        Ok(inserted)
    }
}
