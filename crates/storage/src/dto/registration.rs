use serde::{Deserialize, Serialize};

use crate::models::{Attachments, PaymentRef};

/// Everything needed to create a registration in one write.
///
/// Payment status, attendance and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
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
    pub payment_ref: PaymentRef,
}
