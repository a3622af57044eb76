//! Supabase admin + REST client.
//!
//! Thin HTTP wrapper over `/auth/v1/admin/users` and `/rest/v1/{table}`,
//! authenticated with the service-role key. Pure parsing lives in free
//! functions for testability.

use std::time::Duration;

use client::net::types::{Identity, ProfileDetails};
use serde_json::Value;

use super::IdentityBackend;
use super::types::{BackendError, NewIdentity};
use crate::config::BackendConfig;

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const REST_PATH: &str = "/rest/v1";

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    profile_table: String,
}

impl SupabaseClient {
    /// Build a client from typed backend config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
            profile_table: config.profile_table.clone(),
        })
    }

    fn admin_users_url(&self) -> String {
        format!("{}{ADMIN_USERS_PATH}", self.base_url)
    }

    fn table_url(&self) -> String {
        format!("{}{REST_PATH}/{}", self.base_url, self.profile_table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Send `request` and return the body text of a success response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = self
            .authed(request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(BackendError::Api { status: status.as_u16(), message: error_message(status.as_u16(), &text) });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl IdentityBackend for SupabaseClient {
    async fn create_identity(&self, request: &NewIdentity) -> Result<Identity, BackendError> {
        let text = self
            .send(self.http.post(self.admin_users_url()).json(request))
            .await?;
        parse_identity(&text)
    }

    async fn insert_profile(&self, profile: &ProfileDetails) -> Result<Vec<ProfileDetails>, BackendError> {
        let text = self
            .send(
                self.http
                    .post(self.table_url())
                    .header("Prefer", "return=representation")
                    .json(profile),
            )
            .await?;
        Ok(echoed_rows(&text))
    }

    async fn delete_identity(&self, id: &str) -> Result<(), BackendError> {
        let url = format!("{}/{id}", self.admin_users_url());
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse an identity from a create-user response.
///
/// Accepts the bare user object as well as a `{ "user": ... }` envelope.
/// A null user yields an identity without an id.
fn parse_identity(body: &str) -> Result<Identity, BackendError> {
    let value: Value = serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    let user = match value {
        Value::Null => return Ok(Identity::default()),
        Value::Object(mut map) if matches!(map.get("user"), Some(Value::Object(_) | Value::Null)) => {
            map.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    };
    if user.is_null() {
        return Ok(Identity::default());
    }
    serde_json::from_value(user).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Parse the rows echoed by an insert with `return=representation`.
/// An empty body (minimal return) is zero rows.
fn parse_rows(body: &str) -> Result<Vec<ProfileDetails>, BackendError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Rows echoed by an insert that already succeeded. An echo that does not
/// decode (a column typed differently than expected, say) counts as no echo;
/// the row itself is written.
fn echoed_rows(body: &str) -> Vec<ProfileDetails> {
    parse_rows(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "inserted profile echo undecodable; ignoring");
        Vec::new()
    })
}

/// Pull the human-readable message out of an auth or REST error body.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("HTTP {status}") } else { trimmed.to_owned() }
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
