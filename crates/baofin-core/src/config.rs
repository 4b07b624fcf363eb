use std::env;
use std::fmt::{Debug, Formatter};

use crate::providers::FixtureProvider;
use crate::{ReportDate, ValidationError};

pub const DEFAULT_USER_ID: &str = "anonymous";
pub const DEFAULT_PASSWORD: &str = "123456";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Provider login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.password.is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID, DEFAULT_PASSWORD)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub credentials: Credentials,
    /// Publication cut-off for the offline provider.
    pub as_of: ReportDate,
    pub log_filter: String,
}

impl ProviderConfig {
    pub fn fixture_provider(&self) -> FixtureProvider {
        FixtureProvider::new(self.credentials.clone(), self.as_of)
    }
}

/// Builder for [`ProviderConfig`].
///
/// # Environment Variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `BAOFIN_USER_ID` | `anonymous` | Provider user id |
/// | `BAOFIN_PASSWORD` | `123456` | Provider password |
/// | `BAOFIN_AS_OF` | today (UTC) | Latest publication date served offline |
/// | `BAOFIN_LOG` | `warn` | Default log filter |
///
/// Explicit `with_*` calls made after loading the environment win.
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    user_id: Option<String>,
    password: Option<String>,
    as_of: Option<ReportDate>,
    log_filter: Option<String>,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let as_of = non_empty("BAOFIN_AS_OF")
            .map(|value| ReportDate::parse_field("BAOFIN_AS_OF", value.trim()))
            .transpose()?;

        Ok(Self {
            user_id: non_empty("BAOFIN_USER_ID"),
            password: non_empty("BAOFIN_PASSWORD"),
            as_of,
            log_filter: non_empty("BAOFIN_LOG"),
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.user_id = Some(credentials.user_id);
        self.password = Some(credentials.password);
        self
    }

    pub fn with_as_of(mut self, as_of: ReportDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn build(self) -> ProviderConfig {
        ProviderConfig {
            credentials: Credentials::new(
                self.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_owned()),
                self.password.unwrap_or_else(|| DEFAULT_PASSWORD.to_owned()),
            ),
            as_of: self.as_of.unwrap_or_else(ReportDate::today),
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ProviderConfigBuilder::from_lookup(lookup(&[]))
            .expect("empty env is valid")
            .build();
        assert_eq!(config.credentials, Credentials::default());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn reads_and_overrides_environment() {
        let as_of = ReportDate::parse("2020-12-31").expect("valid date");
        let config = ProviderConfigBuilder::from_lookup(lookup(&[
            ("BAOFIN_USER_ID", "alice"),
            ("BAOFIN_PASSWORD", "secret"),
            ("BAOFIN_AS_OF", "2024-03-31"),
            ("BAOFIN_LOG", "debug"),
        ]))
        .expect("valid env")
        .with_as_of(as_of)
        .build();

        assert_eq!(config.credentials.user_id, "alice");
        assert_eq!(config.credentials.password, "secret");
        assert_eq!(config.as_of, as_of);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ProviderConfigBuilder::from_lookup(lookup(&[("BAOFIN_USER_ID", "  ")]))
            .expect("valid env")
            .build();
        assert_eq!(config.credentials.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn rejects_malformed_as_of() {
        let err = ProviderConfigBuilder::from_lookup(lookup(&[("BAOFIN_AS_OF", "31/03/2024")]))
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvalidDate { field: "BAOFIN_AS_OF", .. }
        ));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
