//! Client binding to the server's registration action.
//!
//! DESIGN
//! ======
//! Pages depend on the [`RegisterAction`] trait rather than on HTTP, so the
//! registration page can be driven by the real [`ApiClient`] or by a test
//! double.
//!
//! ERROR HANDLING
//! ==============
//! A reply body the action produced (`{message, user}` or `{error}`) is a
//! normal `Ok` result whatever the HTTP status. Only transport failures and
//! bodies that are not a recognizable reply surface as [`ActionFault`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{RegisterReply, RegistrationInput};

pub const REGISTER_PATH: &str = "/api/register";
pub const HEALTH_PATH: &str = "/healthz";

/// Faults raised while calling the action, as opposed to replies it returned.
#[derive(Debug, thiserror::Error)]
pub enum ActionFault {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success status whose body is not an action reply.
    #[error("unexpected response status {status}")]
    Status { status: u16, body: String },

    /// Success status whose body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// The registration action as seen from a page.
#[async_trait::async_trait]
pub trait RegisterAction: Send + Sync {
    /// Submit one registration and return the action's reply.
    async fn register(&self, input: RegistrationInput) -> Result<RegisterReply, ActionFault>;
}

/// HTTP client for the registration server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Check that the server answers `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Returns a fault if the request fails or the status is not a success.
    pub async fn health(&self) -> Result<(), ActionFault> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| ActionFault::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ActionFault::Status { status: status.as_u16(), body });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RegisterAction for ApiClient {
    async fn register(&self, input: RegistrationInput) -> Result<RegisterReply, ActionFault> {
        let response = self
            .http
            .post(self.endpoint(REGISTER_PATH))
            .json(&input)
            .send()
            .await
            .map_err(|e| ActionFault::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ActionFault::Request(e.to_string()))?;

        parse_register_reply(status, &body)
    }
}

fn parse_register_reply(status: u16, body: &str) -> Result<RegisterReply, ActionFault> {
    match serde_json::from_str::<RegisterReply>(body) {
        Ok(reply) => Ok(reply),
        Err(e) if (200..300).contains(&status) => Err(ActionFault::Decode(e.to_string())),
        Err(_) => Err(ActionFault::Status { status, body: body.to_owned() }),
    }
}
