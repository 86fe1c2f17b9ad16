//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting bearer tokens and
//! making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use review_api::{create_app, create_app_state, run_server};
use review_common::{AppConfig, JwtService};
use review_core::Snowflake;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Signing key shared by the test server and the token minter
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new in-memory test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            run_server(app, listener).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Mint an access token for `user_id`
    pub fn token_for(&self, user_id: i64) -> String {
        self.jwt
            .issue_access_token(Snowflake(user_id))
            .expect("token signing")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(&self, builder: RequestBuilder, user_id: i64) -> RequestBuilder {
        builder.bearer_auth(self.token_for(user_id))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request as `user_id`
    pub async fn get_as(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(self.authed(self.client.get(self.url(path)), user_id).send().await?)
    }

    /// Make an unauthenticated POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request as `user_id`
    pub async fn post_as<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(self
            .authed(self.client.post(self.url(path)), user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request as `user_id`
    pub async fn patch_as<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(self
            .authed(self.client.patch(self.url(path)), user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request without a body as `user_id`
    pub async fn put_as(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(self.authed(self.client.put(self.url(path)), user_id).send().await?)
    }

    /// Make a DELETE request as `user_id`
    pub async fn delete_as(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(self
            .authed(self.client.delete(self.url(path)), user_id)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for an in-memory server; `overrides` replace defaults.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let defaults = [
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "0"),
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("WRITE_CONFLICT_RETRIES", "10"),
    ];

    AppConfig::from_lookup(|key| {
        overrides
            .iter()
            .chain(defaults.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorBody = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
