// Blocking HTTP transport for the secret server contract.
// Handles client construction, request dispatch, and status mapping.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::Credentials;
use crate::error::{Result, SecretServerError};
use crate::record::SecretId;

use super::api::SecretServerApi;
use super::types::{
    AuthRequest, AuthResponse, FileDownloadResponse, SecretResponse, TokenCheckRequest,
    TokenCheckResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`SecretServerApi`] over JSON bodies.
pub struct HttpSecretServer {
    client: Client,
    base_url: String,
}

impl HttpSecretServer {
    /// Create a transport against the given service URL.
    pub fn new(service_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("secretserver-client"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SecretServerError::Http)?;

        Ok(Self {
            client,
            base_url: service_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Check response status and convert errors. Service-level errors ride
    /// inside 200 bodies and are not handled here.
    fn check_response(response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(SecretServerError::Remote(
                "unauthorized: invalid or expired token".to_string(),
            )),
            status => {
                let body = response.text().unwrap_or_default();
                Err(SecretServerError::Remote(format!("HTTP {status}: {body}")))
            }
        }
    }
}

impl SecretServerApi for HttpSecretServer {
    fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        let body = AuthRequest {
            username: &credentials.username,
            password: &credentials.password,
            organization: &credentials.organization_code,
            domain: &credentials.domain,
        };
        let response = self
            .client
            .post(self.url("api/authenticate"))
            .json(&body)
            .send()?;
        let auth: AuthResponse = Self::check_response(response)?.json()?;

        if let Some(message) = auth.error {
            return Err(SecretServerError::Remote(message));
        }
        auth.token.ok_or_else(|| {
            SecretServerError::Remote("authentication response carried no token".to_string())
        })
    }

    fn check_token_valid(&self, token: &str) -> Result<bool> {
        let response = self
            .client
            .post(self.url("api/token/validate"))
            .json(&TokenCheckRequest { token })
            .send()?;
        let check: TokenCheckResponse = Self::check_response(response)?.json()?;

        if let Some(message) = check.error {
            return Err(SecretServerError::Remote(message));
        }
        Ok(check.valid)
    }

    fn get_secret(&self, token: &str, secret_id: &SecretId) -> Result<SecretResponse> {
        let response = self
            .client
            .get(self.url(&format!("api/secrets/{secret_id}")))
            .bearer_auth(token)
            .send()?;
        Ok(Self::check_response(response)?.json()?)
    }

    fn download_file(
        &self,
        token: &str,
        secret_id: &SecretId,
        item_id: i64,
    ) -> Result<FileDownloadResponse> {
        let response = self
            .client
            .get(self.url(&format!("api/secrets/{secret_id}/files/{item_id}")))
            .bearer_auth(token)
            .send()?;
        Ok(Self::check_response(response)?.json()?)
    }
}
