use serde::{Deserialize, Serialize};
use storage::models::PaymentRef;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{
    validate_address, validate_age_group, validate_father_name, validate_phone,
    validate_student_name,
};
use crate::catalog::AgeGroup;
use crate::fees::FeeBreakdown;
use crate::upload::DocumentSlot;

/// Participant fields as entered on the first step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParticipantDetails {
    #[validate(custom(function = "validate_student_name"))]
    pub student_name: String,

    #[validate(custom(function = "validate_father_name"))]
    pub father_name: String,

    pub occupation: Option<String>,

    #[validate(custom(function = "validate_address"))]
    pub address: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_age_group"))]
    pub age_group: String,
}

impl ParticipantDetails {
    pub fn age_group_band(&self) -> Option<AgeGroup> {
        self.age_group.parse().ok()
    }
}

/// Partial update of the participant fields.
///
/// `None` leaves a field untouched; an empty string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DraftUpdate {
    pub student_name: Option<String>,
    pub father_name: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub age_group: Option<String>,
}

/// The in-progress registration carried across wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationDraft {
    #[serde(flatten)]
    pub details: ParticipantDetails,
    pub selected_events: Vec<String>,
    pub aadhaar_url: Option<String>,
    pub dob_url: Option<String>,
    pub reg_id: Option<String>,
    pub fees: Option<FeeBreakdown>,
    pub payment_ref: Option<PaymentRef>,
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl RegistrationDraft {
    /// Apply a partial update, returning the new draft.
    ///
    /// Changing the age group drops the current event selection, since
    /// selected events must belong to the chosen band.
    pub fn apply(mut self, update: DraftUpdate) -> Self {
        if let Some(student_name) = update.student_name {
            self.details.student_name = student_name;
        }
        if let Some(father_name) = update.father_name {
            self.details.father_name = father_name;
        }
        if let Some(occupation) = update.occupation {
            self.details.occupation = non_blank(occupation);
        }
        if let Some(address) = update.address {
            self.details.address = address;
        }
        if let Some(phone) = update.phone {
            self.details.phone = phone;
        }
        if let Some(email) = update.email {
            self.details.email = non_blank(email);
        }
        if let Some(age_group) = update.age_group {
            if age_group != self.details.age_group {
                self.selected_events.clear();
            }
            self.details.age_group = age_group;
        }

        self
    }

    pub fn with_selection(mut self, selected_events: Vec<String>) -> Self {
        self.selected_events = selected_events;
        self
    }

    pub fn with_document(mut self, slot: DocumentSlot, url: String) -> Self {
        match slot {
            DocumentSlot::Aadhaar => self.aadhaar_url = Some(url),
            DocumentSlot::DateOfBirth => self.dob_url = Some(url),
        }
        self
    }

    pub fn document_url(&self, slot: DocumentSlot) -> Option<&str> {
        match slot {
            DocumentSlot::Aadhaar => self.aadhaar_url.as_deref(),
            DocumentSlot::DateOfBirth => self.dob_url.as_deref(),
        }
    }

    pub fn has_all_documents(&self) -> bool {
        DocumentSlot::ALL
            .iter()
            .all(|slot| self.document_url(*slot).is_some())
    }

    pub fn age_group(&self) -> Option<AgeGroup> {
        self.details.age_group_band()
    }

    /// A draft becomes submitted once its registration has been persisted
    pub fn is_submitted(&self) -> bool {
        self.reg_id.is_some()
    }
}
