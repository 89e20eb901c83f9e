//! Bulk synthetic data for load testing.
//!
//! The seeder fills an empty store with fake patients and appointments.
//! Writes go out in fixed-size batches, each one an independent statement,
//! so no single transaction has to hold the whole data set.
//!
//! ## Environment Variables
//!
//! - `SEED_PATIENT_COUNT`: patients to generate (default: 100000)
//! - `SEED_APPOINTMENT_COUNT`: appointments to generate (default: 50000)
//! - `SEED_BATCH_SIZE`: rows per write (default: 1000)

use std::env;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use eyre::{bail, Result, WrapErr};
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NewAppointment, NewPatient};
use crate::repositories::{AppointmentRepository, PatientRepository};

pub const DEFAULT_PATIENT_COUNT: usize = 100_000;
pub const DEFAULT_APPOINTMENT_COUNT: usize = 50_000;
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

const EMAIL_DOMAIN: &str = "hospital.com";
const NOTE_WORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub patient_count: usize,
    pub appointment_count: usize,
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            patient_count: DEFAULT_PATIENT_COUNT,
            appointment_count: DEFAULT_APPOINTMENT_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SeedConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            patient_count: env_count("SEED_PATIENT_COUNT", DEFAULT_PATIENT_COUNT)?,
            appointment_count: env_count("SEED_APPOINTMENT_COUNT", DEFAULT_APPOINTMENT_COUNT)?,
            batch_size: env_count("SEED_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
        };

        if config.batch_size == 0 {
            bail!("SEED_BATCH_SIZE must be at least 1");
        }

        Ok(config)
    }
}

fn env_count(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The patient store already had rows; nothing was written.
    Skipped { existing_patients: i64 },
    Seeded { patients: u64, appointments: u64 },
}

pub struct Seeder {
    patients: Arc<dyn PatientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    config: SeedConfig,
    rng: StdRng,
}

impl Seeder {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        config: SeedConfig,
    ) -> Self {
        Self {
            patients,
            appointments,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes the generated names, notes and patient picks reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub async fn run(&mut self) -> Result<SeedOutcome> {
        let existing_patients = self.patients.count().await?;
        if existing_patients > 0 {
            info!("Database already seeded. Skipping...");
            return Ok(SeedOutcome::Skipped { existing_patients });
        }

        let patients = self.seed_patients().await?;
        let appointments = self.seed_appointments().await?;

        let stored_appointments = self.appointments.count().await?;
        info!(
            "System baseline established. {} patients, {} appointments ({} stored).",
            patients, appointments, stored_appointments
        );
        Ok(SeedOutcome::Seeded {
            patients,
            appointments,
        })
    }

    async fn seed_patients(&mut self) -> Result<u64> {
        let SeedConfig {
            patient_count,
            batch_size,
            ..
        } = self.config;
        info!(
            "Generating {} patients in batches of {}...",
            patient_count, batch_size
        );

        let mut inserted = 0;
        let mut remaining = patient_count;
        while remaining > 0 {
            let size = remaining.min(batch_size);
            let batch: Vec<NewPatient> = (0..size).map(|_| fake_patient(&mut self.rng)).collect();
            inserted += self
                .patients
                .insert_batch(batch)
                .await
                .wrap_err("Failed to insert patient batch")?;
            remaining -= size;
            info!("Saved {} patients...", inserted);
        }

        Ok(inserted)
    }

    async fn seed_appointments(&mut self) -> Result<u64> {
        info!("Fetching patient IDs for appointment generation...");
        let patient_ids = self.patients.find_all_ids().await?;
        if patient_ids.is_empty() {
            warn!("No patients available, skipping appointment generation");
            return Ok(0);
        }

        let SeedConfig {
            appointment_count,
            batch_size,
            ..
        } = self.config;
        info!("Generating {} appointments...", appointment_count);

        let now = Utc::now();
        let mut inserted = 0;
        let mut remaining = appointment_count;
        while remaining > 0 {
            let size = remaining.min(batch_size);
            let batch: Vec<NewAppointment> = (0..size)
                .filter_map(|_| fake_appointment(&mut self.rng, &patient_ids, now))
                .collect();
            inserted += self
                .appointments
                .insert_batch(batch)
                .await
                .wrap_err("Failed to insert appointment batch")?;
            remaining -= size;
            info!("Saved {} appointments...", inserted);
        }

        Ok(inserted)
    }
}

fn fake_patient<R: Rng>(rng: &mut R) -> NewPatient {
    NewPatient {
        first_name: FirstName().fake_with_rng(rng),
        last_name: LastName().fake_with_rng(rng),
        // Random v4 ids keep seeded emails unique without a lookup.
        email: format!("{}@{}", Uuid::new_v4(), EMAIL_DOMAIN),
    }
}

fn fake_appointment<R: Rng>(
    rng: &mut R,
    patient_ids: &[Uuid],
    now: DateTime<Utc>,
) -> Option<NewAppointment> {
    let patient_id = *patient_ids.choose(rng)?;
    let days_ahead = rng.gen_range(1..=30);

    Some(NewAppointment {
        patient_id,
        appointment_time: now + Duration::days(days_ahead),
        notes: Sentence(NOTE_WORDS..NOTE_WORDS + 1).fake_with_rng(rng),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fake_appointment_is_between_one_and_thirty_days_out() {
        let mut rng = StdRng::seed_from_u64(7);
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let now = Utc::now();

        for _ in 0..200 {
            let appointment = fake_appointment(&mut rng, &ids, now).unwrap();
            let days = (appointment.appointment_time - now).num_days();
            assert!((1..=30).contains(&days), "{} days out", days);
            assert!(ids.contains(&appointment.patient_id));
            assert!(!appointment.notes.is_empty());
        }
    }

    #[test]
    fn fake_appointment_needs_a_patient() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(fake_appointment(&mut rng, &[], Utc::now()), None);
    }

    #[test]
    fn fake_patients_get_distinct_emails() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = fake_patient(&mut rng);
        let b = fake_patient(&mut rng);

        assert_ne!(a.email, b.email);
        assert!(a.email.ends_with("@hospital.com"));
        assert!(!a.first_name.is_empty());
        assert!(!a.last_name.is_empty());
    }

    #[test]
    fn default_config_matches_baseline() {
        assert_eq!(
            SeedConfig::default(),
            SeedConfig {
                patient_count: 100_000,
                appointment_count: 50_000,
                batch_size: 1_000,
            }
        );
    }
}
