use std::collections::HashMap;
use std::sync::Arc;

use hospital_core::{
    errors::{HospitalError, HospitalResult},
    models::patient::{CreatePatientRequest, Patient},
};
use hospital_db::{models::NewPatient, repositories::PatientRepository};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct PatientService {
    repository: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self { repository }
    }

    pub async fn count(&self) -> HospitalResult<i64> {
        Ok(self.repository.count().await?)
    }

    pub async fn find_by_email(&self, email: &str) -> HospitalResult<Patient> {
        match self.repository.find_by_email(email).await? {
            Some(patient) => Ok(patient.into()),
            None => {
                error!("Patient not found with email {}", email);
                Err(HospitalError::NotFound(format!(
                    "Patient not found with email: {}",
                    email
                )))
            }
        }
    }

    /// Malformed ids are indistinguishable from unknown ones.
    pub async fn find_by_id(&self, id: &str) -> HospitalResult<Patient> {
        let not_found = || {
            error!("Patient not found with id {}", id);
            HospitalError::NotFound("Patient not found".to_string())
        };

        let uuid = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;
        self.repository
            .find_by_id(uuid)
            .await?
            .map(Patient::from)
            .ok_or_else(not_found)
    }

    pub async fn create(&self, request: CreatePatientRequest) -> HospitalResult<Patient> {
        request.validate()?;

        let patient = self
            .repository
            .create(NewPatient {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
            })
            .await?;

        info!("Registered patient {}", patient.id);
        Ok(patient.into())
    }

    pub async fn delete_by_id(&self, id: &str) -> HospitalResult<()> {
        let patient = self.find_by_id(id).await?;
        self.delete(patient).await
    }

    pub async fn delete_by_email(&self, email: &str) -> HospitalResult<()> {
        let patient = self.find_by_email(email).await?;
        self.delete(patient).await
    }

    async fn delete(&self, patient: Patient) -> HospitalResult<()> {
        if !self.repository.delete_by_id(patient.id).await? {
            // Removed by someone else between the lookup and the delete.
            return Err(HospitalError::NotFound("Patient not found".to_string()));
        }
        info!("Deleted patient {}", patient.id);
        Ok(())
    }

    /// Loads every patient in `ids` with one repository read.
    ///
    /// Duplicate ids collapse into a single entry and unknown ids are simply
    /// absent from the map.
    pub async fn find_all_by_ids_map(&self, ids: &[Uuid]) -> HospitalResult<HashMap<Uuid, Patient>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let patients = self.repository.find_by_ids(ids).await?;
        Ok(patients
            .into_iter()
            .map(|patient| (patient.id, Patient::from(patient)))
            .collect())
    }
}
