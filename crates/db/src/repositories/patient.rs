use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use super::PatientRepository;
use crate::models::{DbPatient, NewPatient};
use crate::DbPool;

pub struct PgPatientRepository {
    pool: DbPool,
}

impl PgPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbPatient>> {
        let patient = sqlx::query_as::<_, DbPatient>(
            r#"
            SELECT id, first_name, last_name, email
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(patient)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<DbPatient>> {
        let patient = sqlx::query_as::<_, DbPatient>(
            r#"
            SELECT id, first_name, last_name, email
            FROM patients
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(patient)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbPatient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Fetching {} patients in one query", ids.len());

        let patients = sqlx::query_as::<_, DbPatient>(
            r#"
            SELECT id, first_name, last_name, email
            FROM patients
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    async fn find_all_ids(&self) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM patients")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn create(&self, patient: NewPatient) -> Result<DbPatient> {
        let id = Uuid::new_v4();

        let created = sqlx::query_as::<_, DbPatient>(
            r#"
            INSERT INTO patients (id, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(id)
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.email)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Patient created: id={}", id);
        Ok(created)
    }

    async fn insert_batch(&self, patients: Vec<NewPatient>) -> Result<u64> {
        if patients.is_empty() {
            return Ok(0);
        }

        let mut ids = Vec::with_capacity(patients.len());
        let mut first_names = Vec::with_capacity(patients.len());
        let mut last_names = Vec::with_capacity(patients.len());
        let mut emails = Vec::with_capacity(patients.len());
        for patient in patients {
            ids.push(Uuid::new_v4());
            first_names.push(patient.first_name);
            last_names.push(patient.last_name);
            emails.push(patient.email);
        }

        // One statement per batch, committed on its own.
        let result = sqlx::query(
            r#"
            INSERT INTO patients (id, first_name, last_name, email)
            SELECT * FROM UNNEST($1::uuid[], $2::varchar[], $3::varchar[], $4::varchar[])
            "#,
        )
        .bind(ids)
        .bind(first_names)
        .bind(last_names)
        .bind(emails)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
