mod common;

use axum::http::{Method, StatusCode, header};
use common::{
    UnavailableStore, admin_token, call, setup_app, setup_router_with_store, wizard_at_payment,
};
use std::sync::Arc;

async fn register(app: &common::TestApp, events: &[&str]) -> String {
    let id = wizard_at_payment(&app.router, events).await;
    let payment = call(&app.router, Method::POST, &format!("/api/wizards/{}/payment", id), None, None).await;
    assert_eq!(payment.status, StatusCode::OK);
    payment.json()["reg_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = setup_app();

    let anonymous = call(&app.router, Method::GET, "/api/admin/registrations", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let bogus = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations",
        None,
        Some("not-a-session"),
    )
    .await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_rejects_unknown_key() {
    let app = setup_app();
    let response = call(
        &app.router,
        Method::POST,
        "/api/admin/session",
        Some(serde_json::json!({ "api_key": "wrong" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let app = setup_app();
    let token = admin_token(&app.router).await;

    let signed_out = call(&app.router, Method::DELETE, "/api/admin/session", None, Some(&token)).await;
    assert_eq!(signed_out.status, StatusCode::NO_CONTENT);

    let after = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_filters_and_summary() {
    let app = setup_app();
    let first = register(&app, &["U8_KB"]).await;
    let second = register(&app, &["U8_KB", "U8_FS_G"]).await;
    let token = admin_token(&app.router).await;

    let all = call(&app.router, Method::GET, "/api/admin/registrations", None, Some(&token)).await;
    assert_eq!(all.status, StatusCode::OK);
    let body = all.json();
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["pending"], 2);
    assert_eq!(body["summary"]["paid"], 0);
    assert!(body["notice"].is_null());

    let rows = body["registrations"].as_array().unwrap();
    assert_eq!(rows[0]["reg_id"], second.as_str());
    assert_eq!(rows[1]["reg_id"], first.as_str());

    let paid = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations?status=paid&search=9133",
        None,
        Some(&token),
    )
    .await;
    let body = paid.json();
    assert!(body["registrations"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["total"], 2);

    let search = call(
        &app.router,
        Method::GET,
        &format!("/api/admin/registrations?search={}", first.to_lowercase()),
        None,
        Some(&token),
    )
    .await;
    let rows = search.json()["registrations"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["reg_id"], first.as_str());
}

#[tokio::test]
async fn test_registration_detail() {
    let app = setup_app();
    let reg_id = register(&app, &["U8_KB"]).await;
    let token = admin_token(&app.router).await;

    let found = call(
        &app.router,
        Method::GET,
        &format!("/api/admin/registrations/{}", reg_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json()["student_name"], "Asha");
    let aadhaar_url = found.json()["attachments"]["aadhaar_url"].clone();
    assert!(aadhaar_url.as_str().unwrap().starts_with("https://media.test/"));

    let missing = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations/SWIM-MISSING",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_csv() {
    let app = setup_app();
    let reg_id = register(&app, &["U8_KB", "U8_FS_B"]).await;
    let token = admin_token(&app.router).await;

    let export = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations/export",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(export.status, StatusCode::OK);

    let content_type = export.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = export.headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("registrations-"));
    assert!(disposition.ends_with(".csv\""));

    let csv = export.text();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Registration ID,Student Name,Father Name"));
    assert!(lines[1].starts_with(&format!("\"{}\",\"Asha\",\"Ravi\"", reg_id)));
    assert!(lines[1].contains("\"U8_KB; U8_FS_B\",\"300\",\"pending\",\"No\""));

    let empty = call(
        &app.router,
        Method::GET,
        "/api/admin/registrations/export?status=attended",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(empty.text().lines().count(), 1);
}

#[tokio::test]
async fn test_store_failure_shows_notice_and_blocks_export() {
    let router = setup_router_with_store(Arc::new(UnavailableStore));
    let token = admin_token(&router).await;

    let dashboard = call(&router, Method::GET, "/api/admin/registrations", None, Some(&token)).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    let body = dashboard.json();
    assert_eq!(body["notice"], "Failed to load registrations");
    assert!(body["registrations"].as_array().unwrap().is_empty());

    let export = call(
        &router,
        Method::GET,
        "/api/admin/registrations/export",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(export.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(export.headers.get(header::CONTENT_DISPOSITION).is_none());
    assert_eq!(export.json()["error"], "Failed to load registrations");
}
