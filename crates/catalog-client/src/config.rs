//! Connection configuration and builder pattern.

use crate::error::{ClientError, Result};
use std::fmt;
use std::time::Duration;

/// Configuration for a catalog connection.
///
/// # Security
///
/// The `Debug` implementation masks the password so it never ends up in
/// logs. The value is shown as `"***REDACTED***"` in debug output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog service (e.g., "https://edc.example.com:9085")
    pub catalog_service: String,
    /// Optional security domain, prefixed to the user name for login
    pub security_domain: Option<String>,
    /// Optional user name for HTTP Basic authentication
    pub user_name: Option<String>,
    /// Optional password for HTTP Basic authentication
    pub password: Option<String>,
    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
    /// Maximum number of retries for transient failures (default: 3)
    pub max_retries: u32,
    /// Initial retry delay for exponential backoff (default: 100ms)
    pub retry_initial_delay: Duration,
    /// Maximum retry delay (default: 10 seconds)
    pub retry_max_delay: Duration,
    /// Whether to verify TLS certificates (default: true)
    pub tls_verify: bool,
    /// User-Agent header value
    pub user_agent: String,
    /// Report search matches at info level instead of debug
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_service: "http://localhost:9085".to_string(),
            security_domain: None,
            user_name: None,
            password: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_initial_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_secs(10),
            tls_verify: true,
            user_agent: format!("edc-catalog-client/{}", env!("CARGO_PKG_VERSION")),
            verbose: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("catalog_service", &self.catalog_service)
            .field("security_domain", &self.security_domain)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "***REDACTED***"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_initial_delay", &self.retry_initial_delay)
            .field("retry_max_delay", &self.retry_max_delay)
            .field("tls_verify", &self.tls_verify)
            .field("user_agent", &self.user_agent)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder(catalog_service: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(catalog_service)
    }

    /// Minimum allowed timeout value.
    pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.catalog_service.trim_end_matches('/')
    }

    /// Login principal for Basic authentication.
    ///
    /// The catalog expects `domain\user` when the account lives in a
    /// non-native security domain.
    pub fn principal(&self) -> Option<String> {
        let user = self.user_name.as_deref()?;
        Some(match self.security_domain.as_deref() {
            Some(domain) if !domain.is_empty() => format!("{}\\{}", domain, user),
            _ => user.to_string(),
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.catalog_service.is_empty() {
            return Err(ClientError::Config(
                "catalog_service cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.catalog_service)
            .map_err(|e| ClientError::Config(format!("Invalid catalog_service: {}", e)))?;

        if self.password.is_some() && self.user_name.is_none() {
            return Err(ClientError::Config(
                "password requires a user_name".to_string(),
            ));
        }

        if self.retry_initial_delay > self.retry_max_delay {
            return Err(ClientError::Config(format!(
                "retry_initial_delay ({:?}) must be <= retry_max_delay ({:?})",
                self.retry_initial_delay, self.retry_max_delay
            )));
        }

        if self.timeout < Self::MIN_TIMEOUT {
            return Err(ClientError::Config(format!(
                "timeout ({:?}) must be >= {:?}",
                self.timeout,
                Self::MIN_TIMEOUT
            )));
        }

        Ok(())
    }
}

/// Builder for connection configuration.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder for the given catalog service URL.
    pub fn new(catalog_service: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                catalog_service: catalog_service.into(),
                ..Default::default()
            },
        }
    }

    /// Set the user name and password for Basic authentication.
    pub fn credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config.user_name = Some(user_name.into());
        self.config.password = Some(password.into());
        self
    }

    /// Set the security domain the user belongs to.
    pub fn security_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.security_domain = Some(domain.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the initial retry delay for exponential backoff.
    pub fn retry_initial_delay(mut self, delay: Duration) -> Self {
        self.config.retry_initial_delay = delay;
        self
    }

    /// Set the maximum retry delay.
    pub fn retry_max_delay(mut self, delay: Duration) -> Self {
        self.config.retry_max_delay = delay;
        self
    }

    /// Set whether to verify TLS certificates.
    pub fn tls_verify(mut self, verify: bool) -> Self {
        self.config.tls_verify = verify;
        self
    }

    /// Set a custom User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Report search matches at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.catalog_service, "http://localhost:9085");
        assert!(config.user_name.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert!(config.tls_verify);
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("https://edc.example.com:9085")
            .credentials("svc_lineage", "hunter2")
            .security_domain("CORP")
            .timeout(Duration::from_secs(60))
            .max_retries(5)
            .verbose(true)
            .build()
            .unwrap();

        assert_eq!(config.catalog_service, "https://edc.example.com:9085");
        assert_eq!(config.user_name, Some("svc_lineage".to_string()));
        assert_eq!(config.security_domain, Some("CORP".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 5);
        assert!(config.verbose);
    }

    #[test]
    fn test_principal_with_domain() {
        let config = ClientConfig::builder("https://edc.example.com")
            .credentials("jdoe", "pw")
            .security_domain("CORP")
            .build()
            .unwrap();
        assert_eq!(config.principal(), Some("CORP\\jdoe".to_string()));
    }

    #[test]
    fn test_principal_without_domain() {
        let config = ClientConfig::builder("https://edc.example.com")
            .credentials("Administrator", "pw")
            .security_domain("")
            .build()
            .unwrap();
        assert_eq!(config.principal(), Some("Administrator".to_string()));

        let anonymous = ClientConfig::builder("https://edc.example.com").build().unwrap();
        assert_eq!(anonymous.principal(), None);
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = ClientConfig::builder("https://edc.example.com:9085/")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "https://edc.example.com:9085");
    }

    #[test]
    fn test_invalid_url() {
        let result = ClientConfig::builder("not a valid url").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_url() {
        let result = ClientConfig::builder("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_password_without_user_rejected() {
        let mut config = ClientConfig::default();
        config.password = Some("orphan".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user_name"));
    }

    #[test]
    fn test_password_masked_in_debug() {
        let config = ClientConfig::builder("https://edc.example.com")
            .credentials("jdoe", "super_secret_password_123")
            .build()
            .unwrap();

        let debug_output = format!("{:?}", config);

        assert!(
            !debug_output.contains("super_secret"),
            "password fragments should not appear in debug output"
        );
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("jdoe"));
    }

    #[test]
    fn test_retry_delay_validation_invalid() {
        let result = ClientConfig::builder("http://localhost:9085")
            .retry_initial_delay(Duration::from_secs(10))
            .retry_max_delay(Duration::from_secs(1))
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("retry_initial_delay"));
    }

    #[test]
    fn test_timeout_too_small() {
        let result = ClientConfig::builder("http://localhost:9085")
            .timeout(Duration::from_millis(50))
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_timeout_at_minimum() {
        let result = ClientConfig::builder("http://localhost:9085")
            .timeout(ClientConfig::MIN_TIMEOUT)
            .build();

        assert!(result.is_ok());
    }
}
