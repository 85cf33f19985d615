// The remote service contract.
// Four operations, fixed by the server; transports and test doubles plug in
// behind this trait.

use crate::config::Credentials;
use crate::error::Result;
use crate::record::SecretId;

use super::types::{FileDownloadResponse, SecretResponse};

/// The fixed contract of the remote secret server.
///
/// `authenticate` and `check_token_valid` surface service-level failures as
/// errors; `get_secret` and `download_file` hand back the raw response body
/// so the caller can interpret its `error` field, which is policy, not
/// transport.
pub trait SecretServerApi {
    /// Exchange credentials for an opaque auth token.
    fn authenticate(&self, credentials: &Credentials) -> Result<String>;

    /// Ask the server whether a token is still valid.
    fn check_token_valid(&self, token: &str) -> Result<bool>;

    /// Fetch the item list for one secret.
    fn get_secret(&self, token: &str, secret_id: &SecretId) -> Result<SecretResponse>;

    /// Download one file attachment, base64-encoded.
    fn download_file(
        &self,
        token: &str,
        secret_id: &SecretId,
        item_id: i64,
    ) -> Result<FileDownloadResponse>;
}
