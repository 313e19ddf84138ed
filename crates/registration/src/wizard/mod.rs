mod draft;
pub mod validation;

pub use draft::{DraftUpdate, ParticipantDetails, RegistrationDraft};

use serde::{Deserialize, Serialize};
use storage::dto::NewRegistration;
use storage::models::{Attachments, PaymentRef};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::catalog::{Event, EventCatalog};
use crate::error::{Result, UploadError, WizardError};
use crate::fees::fee_for_selection;
use crate::payment::{PaymentConfig, generate_registration_id, qr_code_url, upi_link};
use crate::receipt::Receipt;
use crate::store::RegistrationStore;
use crate::upload::DocumentSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ParticipantDetails,
    EventSelection,
    DocumentUpload,
    Payment,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::ParticipantDetails,
        Step::EventSelection,
        Step::DocumentUpload,
        Step::Payment,
        Step::Confirmation,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::ParticipantDetails => 0,
            Self::EventSelection => 1,
            Self::DocumentUpload => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ParticipantDetails => "Participant Details",
            Self::EventSelection => "Select Events",
            Self::DocumentUpload => "Upload Documents",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }

    pub fn next(&self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Which document slots have an upload in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadProgress {
    pub aadhaar: bool,
    pub dob: bool,
}

impl UploadProgress {
    fn slot_mut(&mut self, slot: DocumentSlot) -> &mut bool {
        match slot {
            DocumentSlot::Aadhaar => &mut self.aadhaar,
            DocumentSlot::DateOfBirth => &mut self.dob,
        }
    }

    /// First slot with an upload still running, if any
    pub fn in_flight(&self) -> Option<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .find(|slot| self.is_uploading(*slot))
    }

    pub fn is_uploading(&self, slot: DocumentSlot) -> bool {
        match slot {
            DocumentSlot::Aadhaar => self.aadhaar,
            DocumentSlot::DateOfBirth => self.dob,
        }
    }
}

/// Controller owning one draft and its position in the five-step flow.
///
/// Every mutation goes through here. Forward moves run the current step's
/// checks first; backward moves never do.
#[derive(Debug, Clone)]
pub struct Wizard {
    catalog: EventCatalog,
    step: Step,
    draft: RegistrationDraft,
    uploading: UploadProgress,
}

impl Wizard {
    pub fn new(catalog: EventCatalog) -> Self {
        Self {
            catalog,
            step: Step::ParticipantDetails,
            draft: RegistrationDraft::default(),
            uploading: UploadProgress::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn uploads(&self) -> UploadProgress {
        self.uploading
    }

    pub fn progress_percent(&self) -> u8 {
        ((self.step.index() + 1) * 100 / Step::ALL.len()) as u8
    }

    fn require_step(&self, expected: Step) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep { current: self.step })
        }
    }

    fn require_editable(&self) -> Result<()> {
        if self.draft.is_submitted() {
            Err(WizardError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    pub fn update(&mut self, update: DraftUpdate) -> Result<&RegistrationDraft> {
        self.require_editable()?;
        self.require_step(Step::ParticipantDetails)?;

        self.draft = std::mem::take(&mut self.draft).apply(update);
        Ok(&self.draft)
    }

    /// Events the current age band may choose from, empty when no band is set
    pub fn available_events(&self) -> Vec<&'static Event> {
        self.draft
            .age_group()
            .map(|group| self.catalog.events_for_age_group(group))
            .unwrap_or_default()
    }

    /// Add `event_id` to the selection, or remove it if already selected.
    ///
    /// Removal always succeeds. Adding past the per-person maximum fails and
    /// leaves the selection unchanged.
    pub fn toggle_event(&mut self, event_id: &str) -> Result<&[String]> {
        self.require_editable()?;
        self.require_step(Step::EventSelection)?;

        if let Some(pos) = self
            .draft
            .selected_events
            .iter()
            .position(|id| id == event_id)
        {
            self.draft.selected_events.remove(pos);
            return Ok(&self.draft.selected_events);
        }

        let group = self.draft.age_group().ok_or(WizardError::AgeGroupMissing)?;
        let event = self
            .catalog
            .find(event_id)
            .ok_or_else(|| WizardError::UnknownEvent(event_id.to_string()))?;

        if event.age_group != group {
            return Err(WizardError::IneligibleEvent {
                event_id: event_id.to_string(),
                age_group: group.to_string(),
            });
        }

        let max = self.catalog.max_events_per_person();
        if self.draft.selected_events.len() >= max {
            return Err(WizardError::Capacity { max });
        }

        self.draft.selected_events.push(event.id.to_string());
        Ok(&self.draft.selected_events)
    }

    fn validate_selection(&self) -> Result<()> {
        if self.draft.selected_events.is_empty() {
            return Err(WizardError::NoEventsSelected);
        }

        let group = self.draft.age_group().ok_or(WizardError::AgeGroupMissing)?;
        for event in self.catalog.events_by_ids(&self.draft.selected_events)? {
            if event.age_group != group {
                return Err(WizardError::IneligibleEvent {
                    event_id: event.id.to_string(),
                    age_group: group.to_string(),
                });
            }
        }

        let max = self.catalog.max_events_per_person();
        if self.draft.selected_events.len() > max {
            return Err(WizardError::Capacity { max });
        }

        Ok(())
    }

    /// Validate the current step and move forward one step
    pub fn next(&mut self) -> Result<Step> {
        match self.step {
            Step::ParticipantDetails => self.draft.details.validate()?,
            Step::EventSelection => self.validate_selection()?,
            Step::DocumentUpload => {
                if let Some(slot) = self.uploading.in_flight() {
                    return Err(WizardError::UploadInProgress(slot));
                }
                if !self.draft.has_all_documents() {
                    return Err(WizardError::DocumentsMissing);
                }
            }
            Step::Payment => {
                if self.draft.payment_ref.is_none() {
                    return Err(WizardError::PaymentNotInitiated);
                }
            }
            Step::Confirmation => {
                return Err(WizardError::WrongStep {
                    current: self.step,
                });
            }
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<Step> {
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.step = previous;
        Ok(self.step)
    }

    /// Mark `slot` as uploading. Only one upload per slot may be in flight.
    pub fn begin_upload(&mut self, slot: DocumentSlot) -> Result<()> {
        self.require_editable()?;
        self.require_step(Step::DocumentUpload)?;

        let flag = self.uploading.slot_mut(slot);
        if *flag {
            return Err(WizardError::UploadInProgress(slot));
        }
        *flag = true;
        Ok(())
    }

    /// Record the outcome of an upload started with [`Wizard::begin_upload`].
    ///
    /// A failed upload leaves the draft untouched and is returned as the error.
    pub fn finish_upload(
        &mut self,
        slot: DocumentSlot,
        result: std::result::Result<String, UploadError>,
    ) -> Result<&RegistrationDraft> {
        *self.uploading.slot_mut(slot) = false;

        let url = result?;
        self.require_editable()?;

        self.draft = std::mem::take(&mut self.draft).with_document(slot, url);
        Ok(&self.draft)
    }

    /// Persist the registration and build its payment link.
    ///
    /// The record is written once; calling again after success returns the
    /// same payment reference. A failed write leaves the draft exactly as it
    /// was so the whole initiation can be retried.
    pub async fn initiate_payment<S: RegistrationStore + ?Sized>(
        &mut self,
        store: &S,
        config: &PaymentConfig,
    ) -> Result<PaymentRef> {
        self.require_step(Step::Payment)?;

        if let Some(existing) = &self.draft.payment_ref {
            return Ok(existing.clone());
        }

        let details = &self.draft.details;
        let age_group = self.draft.age_group().ok_or(WizardError::AgeGroupMissing)?;
        let (Some(aadhaar_url), Some(dob_url)) = (&self.draft.aadhaar_url, &self.draft.dob_url)
        else {
            return Err(WizardError::DocumentsMissing);
        };

        let fees = fee_for_selection(&self.draft.selected_events, &self.catalog)?;
        let reg_id = generate_registration_id();
        let link = upi_link(config, fees.total_amount, &reg_id)?;
        let qr_url = qr_code_url(config, &link)?;

        let payment_ref = PaymentRef {
            txn_token: reg_id.clone(),
            upi_link: link,
            qr_url,
            utr: None,
        };

        let new_registration = NewRegistration {
            reg_id: reg_id.clone(),
            student_name: details.student_name.trim().to_string(),
            father_name: details.father_name.trim().to_string(),
            occupation: details.occupation.clone(),
            address: details.address.trim().to_string(),
            phone: details.phone.clone(),
            email: details.email.clone(),
            age_group: age_group.to_string(),
            selected_events: self.draft.selected_events.clone(),
            attachments: Attachments {
                aadhaar_url: aadhaar_url.clone(),
                dob_url: dob_url.clone(),
            },
            registration_fee: fees.registration_fee,
            events_fee: fees.events_fee,
            total_amount: fees.total_amount,
            payment_ref: payment_ref.clone(),
        };

        store.create(&new_registration).await?;

        info!(
            "Registration {} created for {} ({} events, total {})",
            reg_id,
            new_registration.student_name,
            new_registration.selected_events.len(),
            fees.total_amount
        );

        self.draft.reg_id = Some(reg_id);
        self.draft.fees = Some(fees);
        self.draft.payment_ref = Some(payment_ref.clone());

        Ok(payment_ref)
    }

    /// User-asserted completion. Payment status is not checked; the record
    /// stays pending until reconciled by an administrator.
    pub fn confirm_payment(&mut self) -> Result<Step> {
        self.require_step(Step::Payment)?;
        self.next()
    }

    pub fn receipt(&self) -> Result<Receipt> {
        self.require_step(Step::Confirmation)?;
        Receipt::from_draft(&self.draft).ok_or(WizardError::PaymentNotInitiated)
    }
}
