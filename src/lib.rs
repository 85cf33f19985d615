//! Client library for fetching named secrets from a remote Secret Server.
//!
//! Retrieval runs through a tiered pipeline: a short-term on-disk cache
//! absorbs repeated lookups, the server is the source of truth, and a
//! long-term on-disk cache serves stale records when the server is
//! unreachable. Authentication tokens are acquired lazily, persisted to the
//! short-term cache, and re-validated with the server before use.
//!
//! ```no_run
//! use secretserver::{Config, Credentials, SecretService};
//!
//! # fn main() -> secretserver::Result<()> {
//! let config = Config::new(Credentials::new("alice", "s3cret", "ORG-1"))
//!     .with_service_url("https://vault.example.com/secretserver");
//! let mut service = SecretService::new(config)?;
//!
//! let record = service.get_secret("db-password")?;
//! let password = record.get("Password");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
mod logging;
pub mod record;
pub mod remote;
pub mod service;
pub mod token;

pub use config::{Config, Credentials, DEFAULT_SERVICE_URL};
pub use error::{Result, SecretServerError};
pub use record::{SecretId, SecretRecord};
pub use service::SecretService;
