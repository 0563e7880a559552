//! A live server on a random port plus a client that keeps redirects visible

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use site_common::AppConfig;
use site_db::run_migrations;
use site_web::{create_app, create_app_state};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: site_web::AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        if let Some(pool) = state.pool() {
            run_migrations(pool, None).await?;
        }
        let app = create_app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    /// Urlencoded POST; `ajax` adds the `X-Requested-With` header page script sends
    pub async fn post_form<T: Serialize>(&self, path: &str, form: &T, ajax: bool) -> Result<Response> {
        let mut request = self.request(Method::POST, path, None).form(form);
        if ajax {
            request = request.header("X-Requested-With", "XMLHttpRequest");
        }
        Ok(request.send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, Some(token)).json(body).send().await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::PATCH, path, Some(token)).json(body).send().await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::PUT, path, Some(token)).json(body).send().await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(token)).send().await?)
    }
}

/// Create a test configuration
///
/// Hosts are unrestricted and the contact limit is raised so tests sharing a
/// Redis do not throttle each other.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_lookup(|key| match key {
        "ALLOWED_HOSTS" => Some("*".to_string()),
        "CONTACT_RATE_LIMIT_REQUESTS" | "RATE_LIMIT_REQUESTS" => Some("10000".to_string()),
        "TELEGRAM_BOT_TOKEN" => None,
        "LOG_TO_FILE" => Some("false".to_string()),
        "DEBUG" => std::env::var(key).ok().or_else(|| Some("true".to_string())),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Database-backed tests are skipped without `DATABASE_URL`
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Fails with the body text attached so a wrong status is readable in CI
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<Response> {
    let status = response.status();
    if status != expected {
        let body = response.text().await?;
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(response)
}

pub async fn assert_json<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Result<T> {
    Ok(assert_status(response, expected).await?.json().await?)
}
