// Secret assembly over the remote contract.
// Turns the server's item list into a field map, resolving file attachments
// with a bounded retry.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::error::{Result, SecretServerError};
use crate::record::{SecretId, SecretRecord};

use super::api::SecretServerApi;

/// File downloads get this many attempts before the whole secret assembly
/// is abandoned.
pub const MAX_FILE_ATTEMPTS: usize = 3;

/// Service message for a file item with no stored attachment. Distinct from
/// real failures: the field exists and is legitimately empty.
const FILE_NOT_FOUND_MESSAGE: &str = "attachment not found";

/// Client for the two per-secret remote operations.
pub struct RemoteSecretClient {
    api: Box<dyn SecretServerApi>,
}

impl RemoteSecretClient {
    pub fn new(api: Box<dyn SecretServerApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn SecretServerApi {
        self.api.as_ref()
    }

    /// Fetch and assemble one secret. Every failure mode collapses to
    /// `None` so the caller's fallback chain can keep going.
    pub fn fetch_secret(&self, token: &str, secret_id: &SecretId) -> Option<SecretRecord> {
        match self.try_fetch_secret(token, secret_id) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(secret_id = %secret_id, %err, "remote fetch failed");
                None
            }
        }
    }

    fn try_fetch_secret(&self, token: &str, secret_id: &SecretId) -> Result<SecretRecord> {
        let response = self.api.get_secret(token, secret_id)?;
        if let Some(message) = response.error {
            return Err(SecretServerError::Remote(message));
        }

        let mut record = SecretRecord::new();
        for item in response.items {
            let Some(name) = item.display_name else {
                debug!(secret_id = %secret_id, item_id = item.id, "skipping item without display name");
                continue;
            };
            let content = if item.is_file {
                Some(self.fetch_file(token, secret_id, item.id)?)
            } else {
                item.value
            };
            match content {
                Some(content) => record.insert(name, content),
                None => {
                    debug!(secret_id = %secret_id, item_id = item.id, "skipping item without content");
                }
            }
        }
        Ok(record)
    }

    /// Download and decode one file attachment. A missing attachment is
    /// empty content, not an error; anything else consumes one of
    /// [`MAX_FILE_ATTEMPTS`] tries.
    pub fn fetch_file(&self, token: &str, secret_id: &SecretId, item_id: i64) -> Result<String> {
        for attempt in 1..=MAX_FILE_ATTEMPTS {
            match self.try_fetch_file(token, secret_id, item_id) {
                Ok(content) => return Ok(content),
                Err(err) => {
                    warn!(secret_id = %secret_id, item_id, attempt, %err, "file download attempt failed");
                }
            }
        }
        Err(SecretServerError::FileRetrieval {
            item_id,
            attempts: MAX_FILE_ATTEMPTS,
        })
    }

    fn try_fetch_file(&self, token: &str, secret_id: &SecretId, item_id: i64) -> Result<String> {
        let response = self.api.download_file(token, secret_id, item_id)?;
        if let Some(message) = response.error {
            if message.eq_ignore_ascii_case(FILE_NOT_FOUND_MESSAGE) {
                return Ok(String::new());
            }
            return Err(SecretServerError::Remote(message));
        }

        let payload = response.base64_payload.unwrap_or_default();
        let bytes = STANDARD.decode(payload.as_bytes())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
