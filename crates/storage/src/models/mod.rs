mod admin;
mod registration;

pub use admin::{Admin, AdminRole, AuditLog, AuditTargetType};
pub use registration::{Attachments, PaymentRef, PaymentStatus, Registration, RegistrationRow};
