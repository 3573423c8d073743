use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::auth::dto::{LoginResponse, MessageResponse, VerifyResponse};

/// Every call is bounded by this transport timeout so a gate pass always
/// resolves.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced to the view layer. Transport failures and application
/// rejections carry distinct, human-readable messages; nothing retries
/// automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Session expired. Please login again.")]
    SessionExpired,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("An error occurred. Please try again.")]
    Storage(anyhow::Error),
}

/// Thin wrapper over the auth endpoints.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        // A 401 here is a credentials problem, not an expired session.
        Self::parse(response, false).await
    }

    pub async fn verify(&self, token: &str) -> Result<VerifyResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/auth/verify", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(response, true).await
    }

    pub async fn logout(&self, token: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/logout", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(response, true).await
    }

    async fn parse<T: DeserializeOwned>(
        response: Response,
        authenticated: bool,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        if authenticated && status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::SessionExpired);
        }
        let message = response
            .json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| "An error occurred. Please try again.".to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
