use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

#[derive(Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct AdminSession {
    pub started_at: DateTime<Utc>,
}

/// Signed-in admin sessions keyed by bearer token
#[derive(Clone, Default)]
pub struct AdminSessions {
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let session = AdminSession {
            started_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    pub async fn is_active(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(token)
    }

    /// End the session, returning it if it was active
    pub async fn end(&self, token: &str) -> Option<AdminSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token)
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::warn!("Admin request without bearer token");
        return Err(WebError::Unauthorized);
    };

    if !state.admin_sessions.is_active(&token).await {
        tracing::warn!("Invalid admin session attempt");
        return Err(WebError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_keys_trimmed_and_blank_skipped() {
        let keys = ApiKeys::from_comma_separated(" alpha, ,beta ,");
        assert_eq!(keys.len(), 2);
        assert!(keys.is_valid("alpha"));
        assert!(keys.is_valid("beta"));
        assert!(!keys.is_valid(""));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let sessions = AdminSessions::new();
        let token = sessions.create().await;

        assert!(sessions.is_active(&token).await);
        let ended = sessions.end(&token).await.unwrap();
        assert!(ended.started_at <= Utc::now());
        assert!(!sessions.is_active(&token).await);
        assert!(sessions.end(&token).await.is_none());
    }
}
