use std::fmt;

use crate::wizard::RegistrationDraft;

pub const RECEIPT_TITLE: &str = "VIVEKANANDHA SWIMMING POOL JUNIOR SWIM FEST";
const RULE: &str = "=====================================";

/// Plain-text receipt for a submitted registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub reg_id: String,
    pub student_name: String,
    pub father_name: String,
    pub age_group: String,
    pub phone: String,
    pub email: Option<String>,
    pub event_count: usize,
    pub total_amount: i32,
}

impl Receipt {
    /// `None` until the draft has been persisted
    pub fn from_draft(draft: &RegistrationDraft) -> Option<Self> {
        let reg_id = draft.reg_id.clone()?;
        let fees = draft.fees?;

        Some(Self {
            reg_id,
            student_name: draft.details.student_name.clone(),
            father_name: draft.details.father_name.clone(),
            age_group: draft.details.age_group.clone(),
            phone: draft.details.phone.clone(),
            email: draft.details.email.clone(),
            event_count: draft.selected_events.len(),
            total_amount: fees.registration_fee + fees.events_fee,
        })
    }

    pub fn filename(&self) -> String {
        format!("receipt-{}.txt", self.reg_id)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let email = self.email.as_deref().unwrap_or("N/A");

        writeln!(f, "{}", RECEIPT_TITLE)?;
        writeln!(f, "Registration Receipt")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;
        writeln!(f, "Registration ID: {}", self.reg_id)?;
        writeln!(f, "Student Name: {}", self.student_name)?;
        writeln!(f, "Father's Name: {}", self.father_name)?;
        writeln!(f, "Age Group: {}", self.age_group)?;
        writeln!(f, "Contact: {}", self.phone)?;
        writeln!(f, "Email: {}", email)?;
        writeln!(f)?;
        writeln!(f, "Events Selected: {}", self.event_count)?;
        writeln!(f, "Total Amount: ₹{}", self.total_amount)?;
        writeln!(f)?;
        writeln!(f, "Payment Status: Awaiting Verification")?;
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Please keep this receipt for reference")
    }
}
