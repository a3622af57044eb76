//! Backend configuration parsed from environment variables.

use crate::services::registration::OrphanPolicy;

pub const DEFAULT_PROFILE_TABLE: &str = "users";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub service_key: String,
    pub profile_table: String,
    pub orphan_policy: OrphanPolicy,
    pub timeouts: Timeouts,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .field("profile_table", &self.profile_table)
            .field("orphan_policy", &self.orphan_policy)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl BackendConfig {
    /// Build typed backend config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_SERVICE_ROLE_KEY`
    ///
    /// Optional:
    /// - `SIGNUP_PROFILE_TABLE`: default `users`
    /// - `SIGNUP_ORPHAN_POLICY`: `delete` (default) or `keep`
    /// - `SIGNUP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SIGNUP_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BackendConfig::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`BackendConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&lookup, "SUPABASE_URL")?.trim_end_matches('/').to_owned();
        let service_key = required(&lookup, "SUPABASE_SERVICE_ROLE_KEY")?;
        let profile_table = lookup("SIGNUP_PROFILE_TABLE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_TABLE.to_owned());

        let orphan_policy = match lookup("SIGNUP_ORPHAN_POLICY") {
            None => OrphanPolicy::default(),
            Some(raw) => raw
                .parse::<OrphanPolicy>()
                .map_err(|_| ConfigError::Invalid { var: "SIGNUP_ORPHAN_POLICY", value: raw })?,
        };

        let timeouts = Timeouts {
            request_secs: parse_u64(&lookup, "SIGNUP_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "SIGNUP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { base_url, service_key, profile_table, orphan_policy, timeouts })
    }
}

/// Listen port from `PORT`, defaulting to 3000.
///
/// # Errors
///
/// Returns an error if `PORT` is set but not a valid port number.
pub fn port_from_env() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Err(_) => Ok(DEFAULT_PORT),
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw }),
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
