// Authentication token management.
// Holds the current token, persists it to the short-term cache, and
// re-authenticates when the server stops honoring it.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::cache::CacheRegion;
use crate::config::Credentials;
use crate::error::{Result, SecretServerError};
use crate::remote::SecretServerApi;

/// Authentication gets this many attempts before the retrieval fails.
pub const MAX_AUTH_ATTEMPTS: usize = 3;

/// Cache key for the persisted token in the short-term region.
pub const TOKEN_CACHE_KEY: &str = "token";

/// A token validated this recently is reused without asking the server
/// again. Token lifetime itself is not locally knowable.
const VALIDITY_RECENCY_WINDOW: Duration = Duration::from_secs(60);

/// Lazily-acquired auth token with remote validity confirmation.
pub struct TokenManager {
    credentials: Credentials,
    token: Option<String>,
    validated_at: Option<Instant>,
}

impl TokenManager {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
            validated_at: None,
        }
    }

    /// Return a token the server currently honors, authenticating if needed.
    ///
    /// A token found in memory or in the short-term cache is confirmed with
    /// the server before use, unless it was already confirmed within the
    /// recency window. Any doubt leads to re-authentication; exhausting
    /// those attempts is fatal to the current retrieval.
    pub fn token(&mut self, api: &dyn SecretServerApi, cache: &CacheRegion) -> Result<String> {
        if self.token.is_none() {
            self.token = cache.get::<String>(TOKEN_CACHE_KEY);
            if self.token.is_some() {
                debug!("loaded token from cache");
            }
        }

        if let Some(token) = self.token.clone() {
            if self.recently_validated() {
                return Ok(token);
            }
            match api.check_token_valid(&token) {
                Ok(true) => {
                    self.validated_at = Some(Instant::now());
                    return Ok(token);
                }
                Ok(false) => debug!("server rejected held token"),
                Err(err) => warn!(%err, "token validity check failed"),
            }
        }

        self.token = None;
        self.validated_at = None;
        self.authenticate(api, cache)
    }

    fn recently_validated(&self) -> bool {
        self.validated_at
            .is_some_and(|at| at.elapsed() < VALIDITY_RECENCY_WINDOW)
    }

    fn authenticate(&mut self, api: &dyn SecretServerApi, cache: &CacheRegion) -> Result<String> {
        for attempt in 1..=MAX_AUTH_ATTEMPTS {
            match api.authenticate(&self.credentials) {
                Ok(token) => {
                    info!("authenticated with secret server");
                    cache.put(TOKEN_CACHE_KEY, &token);
                    self.token = Some(token.clone());
                    self.validated_at = Some(Instant::now());
                    return Ok(token);
                }
                Err(err) => warn!(attempt, %err, "authentication attempt failed"),
            }
        }
        Err(SecretServerError::Authentication {
            attempts: MAX_AUTH_ATTEMPTS,
        })
    }
}
