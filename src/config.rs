// Client configuration.
// Credentials are validated once at construction; everything else has defaults.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Result, SecretServerError};

/// Service endpoint used when no explicit URL is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://localhost:8443/secretserver";

/// Login credentials for the secret server.
///
/// Username, password, and organization code are required; the domain is
/// only meaningful for directory-backed accounts and defaults to empty.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub organization_code: String,
    pub domain: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        organization_code: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            organization_code: organization_code.into(),
            domain: String::new(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Reject credentials with any required field missing.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(SecretServerError::Configuration("username"));
        }
        if self.password.is_empty() {
            return Err(SecretServerError::Configuration("password"));
        }
        if self.organization_code.is_empty() {
            return Err(SecretServerError::Configuration("organization_code"));
        }
        Ok(())
    }
}

/// Construction parameters for [`crate::SecretService`].
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub service_url: String,
    pub cache_path: PathBuf,
    pub debug_logging: bool,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            cache_path: default_cache_path(),
            debug_logging: false,
        }
    }

    /// Read configuration from `SECRETSERVER_*` environment variables.
    ///
    /// `SECRETSERVER_USERNAME`, `SECRETSERVER_PASSWORD`, and
    /// `SECRETSERVER_ORG` are required; `SECRETSERVER_DOMAIN`,
    /// `SECRETSERVER_URL`, `SECRETSERVER_CACHE_PATH`, and
    /// `SECRETSERVER_DEBUG` are optional.
    pub fn from_env() -> Result<Self> {
        let username = env::var("SECRETSERVER_USERNAME")
            .map_err(|_| SecretServerError::Configuration("username"))?;
        let password = env::var("SECRETSERVER_PASSWORD")
            .map_err(|_| SecretServerError::Configuration("password"))?;
        let org = env::var("SECRETSERVER_ORG")
            .map_err(|_| SecretServerError::Configuration("organization_code"))?;

        let mut credentials = Credentials::new(username, password, org);
        if let Ok(domain) = env::var("SECRETSERVER_DOMAIN") {
            credentials = credentials.with_domain(domain);
        }

        let mut config = Self::new(credentials);
        if let Ok(url) = env::var("SECRETSERVER_URL") {
            config.service_url = url;
        }
        if let Ok(path) = env::var("SECRETSERVER_CACHE_PATH") {
            config.cache_path = PathBuf::from(path);
        }
        if let Ok(debug) = env::var("SECRETSERVER_DEBUG") {
            config.debug_logging = matches!(debug.as_str(), "1" | "true" | "yes");
        }
        config.credentials.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    #[must_use]
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    #[must_use]
    pub fn with_debug_logging(mut self, debug: bool) -> Self {
        self.debug_logging = debug;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()
    }
}

/// Default cache location: the OS per-user cache directory, or the shared
/// temp directory when no home is available.
pub fn default_cache_path() -> PathBuf {
    ProjectDirs::from("", "", "secretserver")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join("secretserver"))
}
