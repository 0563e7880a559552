//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use site_service::dto::CreateAdminRequest;
use site_service::AuthService;

use crate::helpers::{assert_json, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

pub const ADMIN_PASSWORD: &str = "yarko2024city";

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst) * 1_000_000 + u64::from(std::process::id())
}

/// Contact form as the site posts it
#[derive(Debug, Clone, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_callback: Option<String>,
}

impl ContactForm {
    pub fn valid() -> Self {
        Self {
            name: format!("Тест {}", unique_suffix()),
            phone: "+7 (914) 123-45-67".to_string(),
            message: "Нужна световая вывеска".to_string(),
            privacy_policy: Some("on".to_string()),
            is_callback: None,
        }
    }

    pub fn without_consent() -> Self {
        Self {
            privacy_policy: None,
            ..Self::valid()
        }
    }

    pub fn callback() -> Self {
        Self {
            message: String::new(),
            is_callback: Some("true".to_string()),
            ..Self::valid()
        }
    }
}

/// JSON answer to an AJAX form post
#[derive(Debug, Deserialize)]
pub struct ContactReply {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub status: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
}

/// Create a fresh admin account and log in as it
pub async fn admin_token(server: &TestServer) -> Result<String> {
    let username = format!("admin{}", unique_suffix());
    AuthService::new(server.state.service_context())
        .create_admin(CreateAdminRequest {
            username: username.clone(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .await?;

    let response = server
        .post(
            "/admin/api/auth/login",
            &LoginRequest {
                username,
                password: ADMIN_PASSWORD.to_string(),
            },
        )
        .await?;
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;
    Ok(auth.access_token)
}
