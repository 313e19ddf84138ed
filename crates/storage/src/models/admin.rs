use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Moderation schema. Nothing reads or writes these yet.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub admin_id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "audit_target_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditTargetType {
    Registration,
    Payment,
    Attendance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub audit_log_id: Uuid,
    pub admin_id: Uuid,
    pub action: String,
    pub target_id: String,
    pub target_type: AuditTargetType,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_names_match_schema() {
        assert_eq!(serde_json::to_string(&AdminRole::SuperAdmin).unwrap(), "\"super_admin\"");
        assert_eq!(
            serde_json::to_string(&AuditTargetType::Attendance).unwrap(),
            "\"attendance\""
        );
    }
}
