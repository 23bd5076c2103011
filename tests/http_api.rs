//! HTTP API integration tests
//!
//! These tests drive the full router in-process with `tower::ServiceExt`,
//! without binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use campaign_template_service::config::Settings;
use campaign_template_service::server::{create_app, AppState};

fn app_with(settings: Settings) -> Router {
    create_app(AppState::new(settings).unwrap())
}

fn app() -> Router {
    app_with(Settings::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn custom_template(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Spring promo",
        "layout": "custom",
        "sections": [
            {"type": "header", "content": "Hi {{contact_name}}"},
            {"type": "body", "content": "<p>{{company_name}} deserves better travel.</p>"},
            {"type": "cta", "content": "Talk to us"},
            {"type": "footer", "content": "SOAR-AI"}
        ],
        "subject_line": "{{company_name}}: spring offer",
        "cta_link": "https://example.com/talk",
        "company_id": "acme"
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["templates"]["active"], 3);
    assert_eq!(body["screens"]["total"], 7);
}

#[tokio::test]
async fn test_template_crud() {
    let app = app();

    let (status, created) =
        send(&app, "POST", "/api/v1/templates", Some(custom_template("promo"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "promo");
    assert_eq!(created["variables"], json!(["company_name", "contact_name"]));

    let (status, _) = send(&app, "POST", "/api/v1/templates", Some(custom_template("promo"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, fetched) = send(&app, "GET", "/api/v1/templates/promo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Spring promo");

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/v1/templates/promo",
        Some(json!({"name": "Summer promo", "subject_line": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Summer promo");
    assert!(updated.get("subject_line").is_none());

    let (status, listed) = send(&app, "GET", "/api/v1/templates?company_id=acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 4);

    let (status, _) = send(&app, "DELETE", "/api/v1/templates/promo", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/v1/templates/promo", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "TEMPLATE_NOT_FOUND");
}

#[tokio::test]
async fn test_create_rejects_template_without_body() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/templates",
        Some(json!({
            "name": "Broken",
            "layout": "custom",
            "sections": [{"type": "header", "content": "h"}, {"type": "footer", "content": "f"}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TEMPLATE");
    assert_eq!(
        body["error"]["details"],
        json!(["Custom template must have a body section"])
    );
}

#[tokio::test]
async fn test_custom_document_and_fragment_templates() {
    let app = app();

    for (id, content) in [
        ("full-html", "<!DOCTYPE html><html><body>Dear {{contact_name}}</body></html>"),
        ("body-only", "<p>Dear {{contact_name}}</p>"),
    ] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/templates",
            Some(json!({"id": id, "name": "Plain", "layout": "custom", "content": content})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{} rejected: {}", id, body);
    }

    let render = json!({"variables": {"contact_name": "Sam"}});
    let (_, rendered) =
        send(&app, "POST", "/api/v1/templates/full-html/render", Some(render.clone())).await;
    assert_eq!(
        rendered["html_body"],
        "<!DOCTYPE html><html><body>Dear {{contact_name}}</body></html>"
    );

    let (_, rendered) =
        send(&app, "POST", "/api/v1/templates/body-only/render", Some(render)).await;
    assert!(rendered["html_body"].as_str().unwrap().contains("<p>Dear Sam</p>"));

    let (_, preview) =
        send(&app, "POST", "/api/v1/templates/full-html/preview", Some(json!({}))).await;
    assert!(preview["content"].as_str().unwrap().contains("Dear John Smith"));
}

#[tokio::test]
async fn test_deleted_template_id_can_be_recreated() {
    let app = app();
    send(&app, "POST", "/api/v1/templates", Some(custom_template("promo"))).await;
    send(&app, "DELETE", "/api/v1/templates/promo", None).await;

    let (status, _) =
        send(&app, "POST", "/api/v1/templates", Some(custom_template("promo"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_standard_template_with_numeric_field() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/templates",
        Some(json!({
            "id": "numeric",
            "name": "Numbers",
            "layout": "standard",
            "content": {"main_heading": "Hello", "year": 2024}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, rendered) =
        send(&app, "POST", "/api/v1/templates/numeric/render", Some(json!({}))).await;
    let html = rendered["html_body"].as_str().unwrap();
    assert!(html.contains(r#"<h1 class="h1">Hello</h1>"#));
    assert!(html.contains("&copy; 2024."));
    assert!(!html.contains(r#""year":2024"#));
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let app = app();
    let padding = "x".repeat(2 * 1024 * 1024);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/templates/validate",
        Some(json!({"name": padding, "layout": "standard"})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_validate_endpoint_reports_all_errors() {
    let app = app();
    let (status, report) = send(
        &app,
        "POST",
        "/api/v1/templates/validate",
        Some(json!({"name": "", "layout": "custom", "sections": []})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["is_valid"], false);
    let errors = report["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("Template name is required")));
    assert!(errors.contains(&json!("Custom template must have at least one section")));
}

#[tokio::test]
async fn test_render_and_preview() {
    let app = app();
    send(&app, "POST", "/api/v1/templates", Some(custom_template("promo"))).await;

    let (status, rendered) = send(
        &app,
        "POST",
        "/api/v1/templates/promo/render",
        Some(json!({"variables": {"contact_name": "Sam", "company_name": "Acme Corp"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rendered["subject_line"], "Acme Corp: spring offer");
    let html = rendered["html_body"].as_str().unwrap();
    assert!(html.contains("Hi Sam"));
    assert!(html.contains(r#"href="https://example.com/talk""#));

    let (status, preview) = send(
        &app,
        "POST",
        "/api/v1/templates/promo/preview",
        Some(json!({"sample_data": {"contact_name": "Pat"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["success"], true);
    assert_eq!(preview["subject"], "Acme Corporation: spring offer");
    assert!(preview["content"].as_str().unwrap().contains("Hi Pat"));
    assert_eq!(preview["sample_data"]["contact_name"], "Pat");
}

#[tokio::test]
async fn test_duplicate() {
    let app = app();
    let (status, copy) = send(
        &app,
        "POST",
        "/api/v1/templates/corporate-welcome/duplicate",
        Some(json!({"created_by": "alice"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["name"], "Corporate Welcome Template (Copy)");
    assert_eq!(copy["is_global"], false);
    assert_ne!(copy["id"], "corporate-welcome");
}

#[tokio::test]
async fn test_variable_catalog() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/templates/variables", None).await;

    assert_eq!(status, StatusCode::OK);
    let variables = body["available_variables"].as_array().unwrap();
    assert_eq!(variables.len(), 14);
    assert_eq!(variables[0]["name"], "company_name");
}

#[tokio::test]
async fn test_render_standard_returns_html() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/render/standard")
        .header("content-type", "application/json")
        .body(Body::from(json!({"main_heading": "Hello Acme", "year": 2030}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Hello Acme"));
    assert!(html.contains("123 Business Ave, City, State 12345"));
    assert!(html.contains("&copy; 2030."));
}

#[tokio::test]
async fn test_screen_settings() {
    let app = app();

    let (status, snapshot) = send(&app, "GET", "/api/v1/settings/screens", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["enabled_count"], 7);

    let (status, snapshot) = send(
        &app,
        "PUT",
        "/api/v1/settings/screens/convoy",
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["visibility"]["convoy"], false);
    assert_eq!(snapshot["enabled_count"], 6);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/settings/screens/dashboard",
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SCREEN_LOCKED");

    let (_, snapshot) = send(
        &app,
        "POST",
        "/api/v1/settings/screens/bulk",
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(snapshot["enabled_count"], 2);

    let (_, snapshot) = send(&app, "POST", "/api/v1/settings/screens/reset", None).await;
    assert_eq!(snapshot["enabled_count"], 7);
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let mut settings = Settings::default();
    settings.api.key = Some("secret".to_string());
    let app = app_with(settings);

    let (status, body) = send(&app, "GET", "/api/v1/templates", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/v1/templates")
        .header("X-API-Key", "secret")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
