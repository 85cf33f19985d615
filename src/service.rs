// Secret retrieval orchestration.
// Short-term cache, then the server, then the long-term cache; the first
// source with an answer wins.

use tracing::{debug, info};

use crate::cache::TieredCache;
use crate::config::Config;
use crate::error::{Result, SecretServerError};
use crate::logging;
use crate::record::{SecretId, SecretRecord};
use crate::remote::{HttpSecretServer, RemoteSecretClient, SecretServerApi};
use crate::token::TokenManager;

/// Base name for the on-disk cache regions.
pub const CACHE_BASE_NAME: &str = "secretserver";

/// Entry point of the crate: fetches secrets through the tiered pipeline.
pub struct SecretService {
    client: RemoteSecretClient,
    tokens: TokenManager,
    cache: TieredCache,
}

impl SecretService {
    /// Build a service talking HTTP to the configured server.
    pub fn new(config: Config) -> Result<Self> {
        let api = HttpSecretServer::new(&config.service_url)?;
        Self::with_api(config, Box::new(api))
    }

    /// Build a service over any transport implementing the server contract.
    pub fn with_api(config: Config, api: Box<dyn SecretServerApi>) -> Result<Self> {
        config.validate()?;
        logging::init(config.debug_logging);

        Ok(Self {
            client: RemoteSecretClient::new(api),
            tokens: TokenManager::new(config.credentials),
            cache: TieredCache::new(CACHE_BASE_NAME, &config.cache_path),
        })
    }

    /// Retrieve a secret by id.
    ///
    /// Sources are consulted in strict order: the short-term cache, the
    /// server itself (a success is written through both cache tiers), and
    /// finally the long-term cache as a stale-but-available fallback. Only
    /// when all three come up empty does this fail, with
    /// [`SecretServerError::SecretNotFound`].
    pub fn get_secret(&mut self, secret_id: impl Into<SecretId>) -> Result<SecretRecord> {
        let secret_id = secret_id.into();

        if let Some(record) = self
            .cache
            .short_term()
            .get::<SecretRecord>(secret_id.as_str())
        {
            debug!(secret_id = %secret_id, "served from short-term cache");
            return Ok(record);
        }

        if let Some(record) = self.fetch_remote(&secret_id)? {
            self.cache.store_both(secret_id.as_str(), &record);
            debug!(secret_id = %secret_id, "served from secret server");
            return Ok(record);
        }

        if let Some(record) = self
            .cache
            .long_term()
            .get::<SecretRecord>(secret_id.as_str())
        {
            info!(secret_id = %secret_id, "server unavailable, served stale from long-term cache");
            return Ok(record);
        }

        Err(SecretServerError::SecretNotFound(secret_id.to_string()))
    }

    /// Remove all cached entries, both tiers.
    pub fn clear_cache(&self) {
        self.cache.short_term().clear();
        self.cache.long_term().clear();
    }

    fn fetch_remote(&mut self, secret_id: &SecretId) -> Result<Option<SecretRecord>> {
        let token = self
            .tokens
            .token(self.client.api(), self.cache.short_term())?;
        Ok(self.client.fetch_secret(&token, secret_id))
    }
}
