use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    AwaitingVerification,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::AwaitingVerification => "awaiting_verification",
            Self::Failed => "failed",
        }
    }

    /// Whether the payment still needs to be reconciled by an administrator
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::AwaitingVerification)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference URLs of the uploaded proof documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attachments {
    pub aadhaar_url: String,
    pub dob_url: String,
}

/// Payment link handed to the registrant, plus the UTR once reconciled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentRef {
    pub txn_token: String,
    pub upi_link: String,
    pub qr_url: String,
    pub utr: Option<String>,
}

/// A persisted registration record.
///
/// Invariant: `total_amount == registration_fee + events_fee`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub reg_id: String,
    pub student_name: String,
    pub father_name: String,
    pub occupation: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub age_group: String,
    pub selected_events: Vec<String>,
    pub attachments: Attachments,
    pub registration_fee: i32,
    pub events_fee: i32,
    pub total_amount: i32,
    pub payment_status: PaymentStatus,
    pub payment_ref: PaymentRef,
    pub attended: bool,
    pub attended_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row shape of the `registrations` table
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationRow {
    pub registration_id: Uuid,
    pub reg_id: String,
    pub student_name: String,
    pub father_name: String,
    pub occupation: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub age_group: String,
    pub selected_events: Vec<String>,
    pub aadhaar_url: String,
    pub dob_url: String,
    pub registration_fee: i32,
    pub events_fee: i32,
    pub total_amount: i32,
    pub payment_status: PaymentStatus,
    pub payment_txn_token: String,
    pub payment_upi_link: String,
    pub payment_qr_url: String,
    pub payment_utr: Option<String>,
    pub attended: bool,
    pub attended_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            registration_id: row.registration_id,
            reg_id: row.reg_id,
            student_name: row.student_name,
            father_name: row.father_name,
            occupation: row.occupation,
            address: row.address,
            phone: row.phone,
            email: row.email,
            age_group: row.age_group,
            selected_events: row.selected_events,
            attachments: Attachments {
                aadhaar_url: row.aadhaar_url,
                dob_url: row.dob_url,
            },
            registration_fee: row.registration_fee,
            events_fee: row.events_fee,
            total_amount: row.total_amount,
            payment_status: row.payment_status,
            payment_ref: PaymentRef {
                txn_token: row.payment_txn_token,
                upi_link: row.payment_upi_link,
                qr_url: row.payment_qr_url,
                utr: row.payment_utr,
            },
            attended: row.attended,
            attended_at: row.attended_at,
            verified_by: row.verified_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
