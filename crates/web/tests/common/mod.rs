use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use registration::{
    DocumentFile, InMemoryRegistrationStore, MediaHost, PaymentConfig, RegistrationStore,
    UploadError,
};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storage::dto::NewRegistration;
use storage::error::StorageError;
use storage::models::Registration;
use tower::ServiceExt;
use web::middleware::auth::ApiKeys;
use web::{AppState, build_router};

pub const API_KEY: &str = "test-admin-key";
pub const BOUNDARY: &str = "swimfest-test-boundary";

/// Media host that hands out predictable URLs, or fails when told to
#[derive(Default)]
pub struct StubMediaHost {
    pub fail: bool,
    uploads: AtomicUsize,
}

#[allow(dead_code)]
impl StubMediaHost {
    pub fn failing() -> Self {
        Self {
            fail: true,
            uploads: AtomicUsize::new(0),
        }
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MediaHost for StubMediaHost {
    async fn upload(&self, file: DocumentFile) -> Result<String, UploadError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UploadError::Rejected {
                status: 500,
                body: "host unavailable".to_string(),
            });
        }
        Ok(format!("https://media.test/{}/{}", n, file.file_name))
    }
}

/// Store whose every call fails, as when the database is unreachable
pub struct UnavailableStore;

#[async_trait::async_trait]
impl RegistrationStore for UnavailableStore {
    async fn create(&self, _: &NewRegistration) -> storage::error::Result<Registration> {
        Err(StorageError::ConstraintViolation("store unavailable".to_string()))
    }

    async fn list_newest_first(&self) -> storage::error::Result<Vec<Registration>> {
        Err(StorageError::ConstraintViolation("store unavailable".to_string()))
    }

    async fn find_by_reg_id(&self, _: &str) -> storage::error::Result<Registration> {
        Err(StorageError::ConstraintViolation("store unavailable".to_string()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryRegistrationStore>,
    #[allow(dead_code)]
    pub media: Arc<StubMediaHost>,
}

#[allow(dead_code)]
pub fn setup_router_with_store(store: Arc<dyn RegistrationStore>) -> Router {
    build_router(AppState::new(
        store,
        Arc::new(StubMediaHost::default()),
        PaymentConfig::new("swimfest@upi", "Swim Fest"),
        ApiKeys::from_comma_separated(API_KEY),
    ))
}

pub fn setup_app() -> TestApp {
    setup_app_with_media(StubMediaHost::default())
}

#[allow(dead_code)]
pub fn setup_app_with_media(media: StubMediaHost) -> TestApp {
    let store = Arc::new(InMemoryRegistrationStore::new());
    let media = Arc::new(media);
    let state = AppState::new(
        store.clone(),
        media.clone(),
        PaymentConfig::new("swimfest@upi", "Swim Fest"),
        ApiKeys::from_comma_separated(API_KEY),
    );

    TestApp {
        router: build_router(state),
        store,
        media,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router failed");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    json: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match json {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("invalid request");

    send(router, request).await
}

#[allow(dead_code)]
pub fn multipart_body(file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

#[allow(dead_code)]
pub async fn upload(
    router: &Router,
    wizard_id: &str,
    slot: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/wizards/{}/documents/{}", wizard_id, slot))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(file_name, content_type, bytes)))
        .expect("invalid request");

    send(router, request).await
}

/// Drive a new wizard through details, one or two events and both uploads,
/// leaving it on the payment step. Returns the wizard id.
#[allow(dead_code)]
pub async fn wizard_at_payment(router: &Router, events: &[&str]) -> String {
    let started = call(router, Method::POST, "/api/wizards", None, None).await;
    assert_eq!(started.status, StatusCode::CREATED);
    let id = started.json()["id"].as_str().unwrap().to_string();

    let details = serde_json::json!({
        "student_name": "Asha",
        "father_name": "Ravi",
        "address": "1 Pool Road",
        "phone": "919-133-5557",
        "age_group": "U-8"
    });
    let updated = call(
        router,
        Method::PATCH,
        &format!("/api/wizards/{}/details", id),
        Some(details),
        None,
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let next = call(router, Method::POST, &format!("/api/wizards/{}/next", id), None, None).await;
    assert_eq!(next.status, StatusCode::OK);

    for event in events {
        let toggled = call(
            router,
            Method::POST,
            &format!("/api/wizards/{}/events/{}", id, event),
            None,
            None,
        )
        .await;
        assert_eq!(toggled.status, StatusCode::OK);
    }

    let next = call(router, Method::POST, &format!("/api/wizards/{}/next", id), None, None).await;
    assert_eq!(next.status, StatusCode::OK);

    for slot in ["aadhaar", "dob"] {
        let uploaded = upload(router, &id, slot, "proof.pdf", "application/pdf", b"%PDF-1.4").await;
        assert_eq!(uploaded.status, StatusCode::OK);
    }

    let next = call(router, Method::POST, &format!("/api/wizards/{}/next", id), None, None).await;
    assert_eq!(next.status, StatusCode::OK);
    assert_eq!(next.json()["step"], "payment");

    id
}

#[allow(dead_code)]
pub async fn admin_token(router: &Router) -> String {
    let response = call(
        router,
        Method::POST,
        "/api/admin/session",
        Some(serde_json::json!({ "api_key": API_KEY })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["token"].as_str().unwrap().to_string()
}
