//! # Appointment Reporting
//!
//! Builds the appointment report without issuing one patient query per
//! appointment:
//!
//! 1. Read every appointment in one query
//! 2. Collect the distinct patient ids they reference
//! 3. Read all of those patients in one batched query
//! 4. Join in memory through an id → patient map
//!
//! The storage round trips are therefore fixed at two, however many
//! appointments exist.

use std::collections::HashSet;
use std::sync::Arc;

use hospital_core::{
    errors::HospitalResult,
    models::appointment::{Appointment, AppointmentResponse},
};
use hospital_db::repositories::AppointmentRepository;
use tracing::{debug, warn};
use uuid::Uuid;

use super::PatientService;

/// Display name used when an appointment's patient no longer exists.
pub const UNKNOWN_PATIENT: &str = "Unknown patient";

#[derive(Clone)]
pub struct AppointmentService {
    repository: Arc<dyn AppointmentRepository>,
    patients: PatientService,
}

impl AppointmentService {
    pub fn new(repository: Arc<dyn AppointmentRepository>, patients: PatientService) -> Self {
        Self {
            repository,
            patients,
        }
    }

    pub async fn count(&self) -> HospitalResult<i64> {
        Ok(self.repository.count().await?)
    }

    /// Lists every appointment with its patient's full name, in storage order.
    pub async fn list_with_details(&self) -> HospitalResult<Vec<AppointmentResponse>> {
        let appointments: Vec<Appointment> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(Appointment::from)
            .collect();

        let patient_ids: Vec<Uuid> = appointments
            .iter()
            .map(|appointment| appointment.patient_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        debug!(
            "Resolving {} distinct patients for {} appointments",
            patient_ids.len(),
            appointments.len()
        );

        let patients = self.patients.find_all_by_ids_map(&patient_ids).await?;

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let patient_full_name = match patients.get(&appointment.patient_id) {
                    Some(patient) => patient.full_name(),
                    None => {
                        warn!(
                            "Appointment {} references missing patient {}",
                            appointment.id, appointment.patient_id
                        );
                        UNKNOWN_PATIENT.to_string()
                    }
                };

                AppointmentResponse {
                    id: appointment.id,
                    patient_full_name,
                    start_time: appointment.appointment_time,
                    notes: appointment.notes,
                }
            })
            .collect())
    }
}
