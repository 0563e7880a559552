//! End-to-end tests over a running server
//!
//! These tests require:
//! - Running PostgreSQL instance (`DATABASE_URL`)
//! - Optionally Redis (`REDIS_URL`) for shared rate-limit counters
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    admin_token, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Public Pages
// ============================================================================

#[tokio::test]
async fn test_public_pages_render() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    for path in ["/", "/about/", "/privacy/", "/services/catalog/", "/portfolio/"] {
        let response = server.get(path).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        let html = response.text().await.unwrap();
        assert!(html.contains("</html>"), "{path}");
    }
}

#[tokio::test]
async fn test_missing_service_is_404_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/services/catalog/no-such-service/").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Страница не найдена"));
}

#[tokio::test]
async fn test_sitemap_and_robots() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/sitemap.xml").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("<urlset"));

    let response = server.get("/robots.txt").await.unwrap();
    assert!(response.text().await.unwrap().contains("Disallow: /admin/"));
}

// ============================================================================
// Contact Form Tests
// ============================================================================

#[tokio::test]
async fn test_contact_submission_reaches_inbox() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let form = ContactForm::valid();

    let response = server.post_form("/contacts/send/", &form, true).await.unwrap();
    let reply: ContactReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.success);
    assert!(reply.message.is_some());

    let token = admin_token(&server).await.unwrap();
    let response = server
        .get_auth(&format!("/admin/api/contacts?search={}", form.name), &token)
        .await
        .unwrap();
    let page: Paginated<ContactMessage> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, "new");
    assert!(!page.data[0].is_read);
}

#[tokio::test]
async fn test_contact_without_consent_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .post_form("/contacts/send/", &ContactForm::without_consent(), true)
        .await
        .unwrap();
    let reply: ContactReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!reply.success);
    assert!(reply.error.is_some());

    let response = server
        .post_form("/contacts/send/", &ContactForm::without_consent(), false)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_contact_invalid_phone() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let form = ContactForm {
        phone: "12345".to_string(),
        ..ContactForm::valid()
    };
    let response = server.post_form("/contacts/send/", &form, true).await.unwrap();
    let reply: ContactReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!reply.success);
    assert!(reply.errors.unwrap()["phone"].is_string());
}

#[tokio::test]
async fn test_callback_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .post_form("/contacts/send/", &ContactForm::callback(), true)
        .await
        .unwrap();
    let reply: ContactReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.success);
}

// ============================================================================
// Admin API Tests
// ============================================================================

#[tokio::test]
async fn test_admin_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/admin/api/contacts").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let token = admin_token(&server).await.unwrap();

    let response = server.get_auth("/admin/api/auth/me", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A refresh token is not accepted as an access token
    let response = server
        .post("/admin/api/auth/refresh", &json!({ "refresh_token": token }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_service_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let token = admin_token(&server).await.unwrap();
    let name = format!("Объёмные буквы {}", unique_suffix());

    let response = server
        .post_auth(
            "/admin/api/services",
            &token,
            &json!({ "name": name, "description": "Фасадные вывески", "price_from": "15000" }),
        )
        .await
        .unwrap();
    let created: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    let slug = created["slug"].as_str().unwrap().to_string();

    let response = server.get(&format!("/services/catalog/{slug}/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains(&name));

    // Deactivated services disappear from the public site
    let response = server
        .put_auth(
            &format!("/admin/api/services/{id}"),
            &token,
            &json!({ "name": name, "slug": slug, "description": "Фасадные вывески", "is_active": false }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/services/catalog/{slug}/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server
        .delete_auth(&format!("/admin/api/services/{id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_contact_status_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let form = ContactForm::valid();
    server.post_form("/contacts/send/", &form, true).await.unwrap();

    let token = admin_token(&server).await.unwrap();
    let response = server
        .get_auth(&format!("/admin/api/contacts?search={}", form.name), &token)
        .await
        .unwrap();
    let page: Paginated<ContactMessage> = assert_json(response, StatusCode::OK).await.unwrap();
    let id = &page.data[0].id;

    let response = server
        .patch_auth(
            &format!("/admin/api/contacts/{id}"),
            &token,
            &json!({ "status": "in_progress", "is_read": true }),
        )
        .await
        .unwrap();
    let updated: ContactMessage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "in_progress");
    assert!(updated.is_read);
}
