// Remote secret server access.
// The contract trait, its wire types, the blocking HTTP transport, and the
// client that assembles secrets from item lists.

pub mod api;
pub mod client;
pub mod http;
pub mod types;

pub use api::SecretServerApi;
pub use client::{MAX_FILE_ATTEMPTS, RemoteSecretClient};
pub use http::HttpSecretServer;
