//! Router tests over in-memory stores
//!
//! Every request goes through the full middleware stack.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use site_cache::{MemoryCounterStore, RateLimiter};
use site_common::{AppConfig, JwtService};
use site_core::{DeliveryReport, NoopNotifier, Service};
use site_service::dto::CreateAdminRequest;
use site_service::testing::{memory_context, MemoryStores, RecordingNotifier, TEST_JWT_SECRET};
use site_service::{AuthService, ServiceContextBuilder};
use site_web::templates::Templates;
use site_web::{create_app, AppState};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "yarko2024city";
const FORM: &str = "application/x-www-form-urlencoded";

fn config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("SECRET_KEY", TEST_JWT_SECRET),
        ("DATABASE_URL", "postgres://localhost/unused"),
        ("ALLOWED_HOSTS", "*"),
        ("LOG_TO_FILE", "false"),
        ("MEDIA_ROOT", "target/test-media"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert((*k).to_string(), (*v).to_string());
    }
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn app_with(overrides: &[(&str, &str)]) -> (Router, MemoryStores) {
    let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
    let limiter = RateLimiter::new(Arc::new(MemoryCounterStore::new()));
    let state = AppState::new(ctx, config(overrides), Templates::new().unwrap(), limiter);
    (create_app(state), stores)
}

fn app() -> (Router, MemoryStores) {
    app_with(&[])
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, "localhost")
        .body(Body::empty())
        .unwrap()
}

fn contact_post(body: &str, ajax: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/contacts/send/")
        .header(header::HOST, "localhost")
        .header(header::CONTENT_TYPE, FORM);
    if ajax {
        builder = builder.header("x-requested-with", "XMLHttpRequest");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

async fn login(app: &Router, stores: &MemoryStores) -> String {
    // A second context over the app's stores
    let ctx = ServiceContextBuilder::new()
        .repositories(stores.repositories())
        .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 900, 604_800)))
        .build()
        .unwrap();
    AuthService::new(&ctx)
        .create_admin(CreateAdminRequest {
            username: "manager".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/api/auth/login",
            None,
            &json!({ "username": "manager", "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ============================================================================
// Public pages
// ============================================================================

#[tokio::test]
async fn test_home_renders_with_security_headers() {
    let (app, _) = app();
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers["x-response-time"].to_str().unwrap().ends_with('s'));

    let html = body_text(response).await;
    assert!(html.contains("Яркий Город"));
}

#[tokio::test]
async fn test_service_detail_and_missing_slug() {
    let (app, stores) = app();
    stores.catalog.services.lock().push(Service::new(
        "Световые вывески".to_string(),
        "svetovye-vyveski".to_string(),
        "Изготовление и монтаж".to_string(),
    ));

    let response = app
        .clone()
        .oneshot(get("/services/catalog/svetovye-vyveski/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Световые вывески"));
    assert!(html.contains("Заявка на услугу: Световые вывески"));

    let response = app.oneshot(get("/services/catalog/missing/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Страница не найдена"));
}

#[tokio::test]
async fn test_unknown_path_is_html_404() {
    let (app, _) = app();
    let response = app.oneshot(get("/no-such-page/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn test_robots_and_sitemap() {
    let (app, _) = app();

    let response = app.clone().oneshot(get("/robots.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let robots = body_text(response).await;
    assert!(robots.contains("Disallow: /admin/"));
    assert!(robots.contains("Sitemap: http://localhost/sitemap.xml"));

    let response = app.oneshot(get("/sitemap.xml")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<loc>http://localhost/</loc>"));
}

#[tokio::test]
async fn test_health_probes() {
    let (app, _) = app();
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = app.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
async fn test_ajax_contact_success() {
    let (notifier, mut notices) = RecordingNotifier::new(DeliveryReport {
        delivered: 1,
        failed: 0,
    });
    let (ctx, stores) = memory_context(Arc::new(notifier));
    let limiter = RateLimiter::new(Arc::new(MemoryCounterStore::new()));
    let state = AppState::new(ctx, config(&[]), Templates::new().unwrap(), limiter);
    let app = create_app(state);

    let body = "name=Ivan&phone=%2B7+%28914%29+123-45-67&message=Need+a+sign&privacy_policy=on";
    let response = app.oneshot(contact_post(body, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].as_str().unwrap().starts_with("Спасибо"));

    let rows = stores.contacts.rows.lock().clone();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_read);

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.name, "Ivan");
}

#[tokio::test]
async fn test_ajax_contact_without_consent() {
    let (app, stores) = app();
    let body = "name=Ivan&phone=%2B79141234567&message=Hi";
    let response = app.oneshot(contact_post(body, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("политикой"));
    assert!(stores.contacts.rows.lock().is_empty());
}

#[tokio::test]
async fn test_plain_form_without_consent_redirects_home() {
    let (app, stores) = app();
    let body = "name=Ivan&phone=%2B79141234567&message=Hi";
    let response = app.oneshot(contact_post(body, false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(stores.contacts.rows.lock().is_empty());
}

#[tokio::test]
async fn test_ajax_contact_field_errors() {
    let (app, stores) = app();
    let body = "name=Ivan&phone=12345&message=&privacy_policy=on";
    let response = app.oneshot(contact_post(body, true)).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["errors"]["phone"].is_string());
    assert!(json["errors"]["message"].is_string());
    assert!(stores.contacts.rows.lock().is_empty());
}

#[tokio::test]
async fn test_plain_form_errors_render_the_form() {
    let (app, _) = app();
    let body = "name=Ivan&phone=12345&message=Hi&privacy_policy=on";
    let response = app.oneshot(contact_post(body, false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Проверьте правильность заполнения полей"));
    assert!(html.contains("value=\"Ivan\""));
}

#[tokio::test]
async fn test_callback_needs_no_message() {
    let (app, stores) = app();
    let body = "name=Ivan&phone=89141234567&is_callback=true&privacy_policy=on";
    let response = app.oneshot(contact_post(body, true)).await.unwrap();

    assert_eq!(body_json(response).await["success"], true);
    assert_eq!(stores.contacts.rows.lock().len(), 1);
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_contact_rate_limit() {
    let (app, _) = app_with(&[("CONTACT_RATE_LIMIT_REQUESTS", "2")]);
    let body = "name=Ivan&phone=%2B79141234567&message=Hi";

    for _ in 0..2 {
        let response = app.clone().oneshot(contact_post(body, true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(contact_post(body, true)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    // Pages have their own budget
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_suspicious_query_logged_by_default() {
    let (app, _) = app();
    let response = app.oneshot(get("/?q=%3Cscript%3E")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_suspicious_query_blocked_when_enabled() {
    let (app, _) = app_with(&[("SUSPICIOUS_BLOCK", "true")]);
    let response = app.clone().oneshot(get("/?q=%3Cscript%3E")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = "name=Ivan&phone=%2B79141234567&message=1+UNION+SELECT+password&privacy_policy=on";
    let response = app.oneshot(contact_post(body, true)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disallowed_host() {
    let (app, _) = app_with(&[("ALLOWED_HOSTS", "yarkiy-gorod.ru")]);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Admin API
// ============================================================================

#[tokio::test]
async fn test_admin_requires_token() {
    let (app, _) = app();
    let response = app.oneshot(get("/admin/api/contacts")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key("content-security-policy"));
    let json = body_json(response).await;
    assert!(json["error"]["code"].is_string());
}

#[tokio::test]
async fn test_admin_unknown_route_is_json() {
    let (app, _) = app();
    let response = app.oneshot(get("/admin/api/nothing-here")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].is_object());
}

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let (app, stores) = app();
    login(&app, &stores).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/admin/api/auth/login",
            None,
            &json!({ "username": "manager", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_category_crud() {
    let (app, stores) = app();
    let token = login(&app, &stores).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/api/categories",
            Some(&token),
            &json!({ "name": "Наружная реклама" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["slug"], "naruzhnaia-reklama");
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/admin/api/categories",
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/admin/api/categories/{id}"),
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/admin/api/categories/{id}"),
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_contact_inbox() {
    let (app, stores) = app();
    let token = login(&app, &stores).await;

    let body = "name=Ivan&phone=%2B79141234567&message=Hi&privacy_policy=on";
    let response = app.clone().oneshot(contact_post(body, true)).await.unwrap();
    assert_eq!(body_json(response).await["success"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/admin/api/contacts/unread-count",
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["unread"], 1);

    let id = stores.contacts.rows.lock()[0].id;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/api/contacts/bulk",
            Some(&token),
            &json!({ "ids": [id], "action": "mark_read" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            "/admin/api/contacts/unread-count",
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["unread"], 0);
}

#[tokio::test]
async fn test_admin_invalid_id() {
    let (app, stores) = app();
    let token = login(&app, &stores).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/admin/api/services/not-a-uuid",
            Some(&token),
            &json!(null),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
