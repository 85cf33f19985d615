// Secret server wire types.
// Defines structs for the four remote operations' JSON bodies.

use serde::{Deserialize, Serialize};

/// Request body for the authenticate operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub organization: &'a str,
    pub domain: &'a str,
}

/// Response from the authenticate operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for the token validity check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCheckRequest<'a> {
    pub token: &'a str,
}

/// Response from the token validity check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCheckResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from the get-secret operation.
///
/// A service-level failure rides the `error` field of an otherwise
/// well-formed body; `items` is then empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretResponse {
    #[serde(default)]
    pub items: Vec<SecretItem>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One field or file attachment within a secret.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretItem {
    pub id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_file: bool,
    #[serde(default)]
    pub value: Option<String>,
}

/// Response from the download-file operation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDownloadResponse {
    #[serde(default)]
    pub base64_payload: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
