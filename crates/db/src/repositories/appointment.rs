use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use super::AppointmentRepository;
use crate::models::{DbAppointment, NewAppointment};
use crate::DbPool;

pub struct PgAppointmentRepository {
    pool: DbPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_all(&self) -> Result<Vec<DbAppointment>> {
        let appointments = sqlx::query_as::<_, DbAppointment>(
            r#"
            SELECT id, patient_id, appointment_time, notes
            FROM appointments
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    async fn insert_batch(&self, appointments: Vec<NewAppointment>) -> Result<u64> {
        if appointments.is_empty() {
            return Ok(0);
        }

        let mut ids = Vec::with_capacity(appointments.len());
        let mut patient_ids = Vec::with_capacity(appointments.len());
        let mut times = Vec::with_capacity(appointments.len());
        let mut notes = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            ids.push(Uuid::new_v4());
            patient_ids.push(appointment.patient_id);
            times.push(appointment.appointment_time);
            notes.push(appointment.notes);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO appointments (id, patient_id, appointment_time, notes)
            SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::timestamptz[], $4::text[])
            "#,
        )
        .bind(ids)
        .bind(patient_ids)
        .bind(times)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
