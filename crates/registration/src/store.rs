use chrono::Utc;
use storage::{
    Database,
    dto::registration::NewRegistration,
    error::{Result, StorageError},
    models::{PaymentStatus, Registration},
    repository::registration::RegistrationRepository,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Where registration records are persisted.
///
/// `create` is a single atomic insert; `list_newest_first` orders by
/// creation time, newest first.
#[async_trait::async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn create(&self, registration: &NewRegistration) -> Result<Registration>;

    async fn list_newest_first(&self) -> Result<Vec<Registration>>;

    async fn find_by_reg_id(&self, reg_id: &str) -> Result<Registration>;
}

#[async_trait::async_trait]
impl RegistrationStore for Database {
    async fn create(&self, registration: &NewRegistration) -> Result<Registration> {
        let repo = RegistrationRepository::new(self.pool());
        repo.create(registration).await
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>> {
        let repo = RegistrationRepository::new(self.pool());
        repo.list_newest_first().await
    }

    async fn find_by_reg_id(&self, reg_id: &str) -> Result<Registration> {
        let repo = RegistrationRepository::new(self.pool());
        repo.find_by_reg_id(reg_id).await
    }
}

/// Process-local store, used by tests and local runs without PostgreSQL
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    records: RwLock<Vec<Registration>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn create(&self, registration: &NewRegistration) -> Result<Registration> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.reg_id == registration.reg_id) {
            return Err(StorageError::ConstraintViolation(format!(
                "Registration ID '{}' already exists",
                registration.reg_id
            )));
        }

        let now = Utc::now();
        let record = Registration {
            registration_id: Uuid::new_v4(),
            reg_id: registration.reg_id.clone(),
            student_name: registration.student_name.clone(),
            father_name: registration.father_name.clone(),
            occupation: registration.occupation.clone(),
            address: registration.address.clone(),
            phone: registration.phone.clone(),
            email: registration.email.clone(),
            age_group: registration.age_group.clone(),
            selected_events: registration.selected_events.clone(),
            attachments: registration.attachments.clone(),
            registration_fee: registration.registration_fee,
            events_fee: registration.events_fee,
            total_amount: registration.total_amount,
            payment_status: PaymentStatus::Pending,
            payment_ref: registration.payment_ref.clone(),
            attended: false,
            attended_at: None,
            verified_by: None,
            created_at: now,
            updated_at: now,
        };

        records.push(record.clone());
        Ok(record)
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>> {
        let records = self.records.read().await;
        let mut sorted: Vec<Registration> = records.iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order for equal timestamps
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sorted)
    }

    async fn find_by_reg_id(&self, reg_id: &str) -> Result<Registration> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.reg_id == reg_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}
