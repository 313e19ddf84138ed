use sqlx::PgPool;

use crate::dto::registration::NewRegistration;
use crate::error::{Result, StorageError};
use crate::models::{Registration, RegistrationRow};

const REGISTRATION_COLUMNS: &str = r#"
    registration_id, reg_id, student_name, father_name, occupation, address,
    phone, email, age_group, selected_events, aadhaar_url, dob_url,
    registration_fee, events_fee, total_amount, payment_status,
    payment_txn_token, payment_upi_link, payment_qr_url, payment_utr,
    attended, attended_at, verified_by, created_at, updated_at
"#;

pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every registration, newest first
    pub async fn list_newest_first(&self) -> Result<Vec<Registration>> {
        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY created_at DESC, reg_id DESC"
        );

        let rows = sqlx::query_as::<_, RegistrationRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    /// Find a registration by its public registration ID
    pub async fn find_by_reg_id(&self, reg_id: &str) -> Result<Registration> {
        let sql = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE reg_id = $1");

        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(reg_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Insert a new registration in the `pending` state.
    ///
    /// This is a plain INSERT: a clashing `reg_id` is reported as a
    /// constraint violation and never overwrites an existing record.
    pub async fn create(&self, req: &NewRegistration) -> Result<Registration> {
        let sql = format!(
            r#"
            INSERT INTO registrations (
                reg_id, student_name, father_name, occupation, address, phone, email,
                age_group, selected_events, aadhaar_url, dob_url,
                registration_fee, events_fee, total_amount, payment_status,
                payment_txn_token, payment_upi_link, payment_qr_url, payment_utr, attended
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    'pending', $15, $16, $17, NULL, FALSE)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(&req.reg_id)
            .bind(&req.student_name)
            .bind(&req.father_name)
            .bind(&req.occupation)
            .bind(&req.address)
            .bind(&req.phone)
            .bind(&req.email)
            .bind(&req.age_group)
            .bind(&req.selected_events)
            .bind(&req.attachments.aadhaar_url)
            .bind(&req.attachments.dob_url)
            .bind(req.registration_fee)
            .bind(req.events_fee)
            .bind(req.total_amount)
            .bind(&req.payment_ref.txn_token)
            .bind(&req.payment_ref.upi_link)
            .bind(&req.payment_ref.qr_url)
            .fetch_one(self.pool)
            .await
            .map_err(StorageError::from);

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if e.is_unique_violation() => Err(StorageError::ConstraintViolation(format!(
                "Registration ID '{}' already exists",
                req.reg_id
            ))),
            Err(e) => Err(e),
        }
    }
}
