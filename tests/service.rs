// End-to-end tests for the retrieval pipeline: cache tiers, token reuse,
// remote failures, and the fallback chain, against a scripted server double.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tempfile::TempDir;

use secretserver::cache::{CacheRegion, LONG_TERM_TTL, SHORT_TERM_TTL};
use secretserver::config::{Config, Credentials};
use secretserver::error::{Result, SecretServerError};
use secretserver::record::{SecretId, SecretRecord};
use secretserver::remote::SecretServerApi;
use secretserver::remote::types::{FileDownloadResponse, SecretItem, SecretResponse};
use secretserver::service::{CACHE_BASE_NAME, SecretService};

/// Scripted state shared between a test and the service under test.
#[derive(Default)]
struct ApiState {
    auth_calls: Cell<usize>,
    check_calls: Cell<usize>,
    secret_calls: Cell<usize>,
    download_calls: Cell<usize>,
    auth_always_fails: Cell<bool>,
    secret_error: RefCell<Option<String>>,
    items: RefCell<Vec<SecretItem>>,
    file_payload: RefCell<Option<String>>,
    file_always_fails: Cell<bool>,
}

struct MockApi(Rc<ApiState>);

impl SecretServerApi for MockApi {
    fn authenticate(&self, _credentials: &Credentials) -> Result<String> {
        self.0.auth_calls.set(self.0.auth_calls.get() + 1);
        if self.0.auth_always_fails.get() {
            return Err(SecretServerError::Remote("login refused".to_string()));
        }
        Ok("session-token".to_string())
    }

    fn check_token_valid(&self, token: &str) -> Result<bool> {
        self.0.check_calls.set(self.0.check_calls.get() + 1);
        Ok(token == "session-token")
    }

    fn get_secret(&self, _token: &str, _secret_id: &SecretId) -> Result<SecretResponse> {
        self.0.secret_calls.set(self.0.secret_calls.get() + 1);
        Ok(SecretResponse {
            items: self.0.items.borrow().clone(),
            error: self.0.secret_error.borrow().clone(),
        })
    }

    fn download_file(
        &self,
        _token: &str,
        _secret_id: &SecretId,
        _item_id: i64,
    ) -> Result<FileDownloadResponse> {
        self.0.download_calls.set(self.0.download_calls.get() + 1);
        if self.0.file_always_fails.get() {
            return Err(SecretServerError::Remote("connection reset".to_string()));
        }
        Ok(FileDownloadResponse {
            base64_payload: self.0.file_payload.borrow().clone(),
            error: None,
        })
    }
}

fn inline_item(id: i64, name: &str, value: &str) -> SecretItem {
    SecretItem {
        id,
        display_name: Some(name.to_string()),
        is_file: false,
        value: Some(value.to_string()),
    }
}

fn file_item(id: i64, name: &str) -> SecretItem {
    SecretItem {
        id,
        display_name: Some(name.to_string()),
        is_file: true,
        value: None,
    }
}

fn password_items() -> Vec<SecretItem> {
    vec![
        inline_item(1, "Username", "svc-account"),
        inline_item(2, "Password", "hunter2"),
    ]
}

struct Harness {
    service: SecretService,
    api: Rc<ApiState>,
    cache_dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let cache_dir = TempDir::new().unwrap();
        let api = Rc::new(ApiState::default());
        api.items.replace(password_items());

        let config = Config::new(Credentials::new("alice", "s3cret", "ORG-1"))
            .with_cache_path(cache_dir.path());
        let service = SecretService::with_api(config, Box::new(MockApi(api.clone()))).unwrap();

        Self {
            service,
            api,
            cache_dir,
        }
    }

    fn short_term(&self) -> CacheRegion {
        CacheRegion::new(CACHE_BASE_NAME, self.cache_dir.path(), SHORT_TERM_TTL)
    }

    fn long_term(&self) -> CacheRegion {
        CacheRegion::new(
            format!("{CACHE_BASE_NAME}-long-term"),
            self.cache_dir.path(),
            LONG_TERM_TTL,
        )
    }

    fn stale_record(&self) -> SecretRecord {
        let record: SecretRecord = [("Password".to_string(), "old-hunter2".to_string())]
            .into_iter()
            .collect();
        self.long_term().put("77", &record);
        record
    }
}

#[test]
fn short_term_hit_skips_the_network() {
    let mut h = Harness::new();

    let first = h.service.get_secret("77").unwrap();
    assert_eq!(h.api.secret_calls.get(), 1);

    // Server gone: the short-term entry must answer by itself.
    h.api.secret_error.replace(Some("service down".to_string()));
    let second = h.service.get_secret("77").unwrap();
    assert_eq!(second, first);
    assert_eq!(h.api.secret_calls.get(), 1);
}

#[test]
fn remote_success_writes_through_both_tiers() {
    let mut h = Harness::new();

    let record = h.service.get_secret("77").unwrap();
    assert_eq!(record.get("Username"), Some("svc-account"));
    assert_eq!(record.get("Password"), Some("hunter2"));

    assert_eq!(h.short_term().get::<SecretRecord>("77"), Some(record.clone()));
    assert_eq!(h.long_term().get::<SecretRecord>("77"), Some(record));
}

#[test]
fn remote_failure_falls_back_to_long_term() {
    let mut h = Harness::new();
    let stale = h.stale_record();
    h.api.secret_error.replace(Some("service down".to_string()));

    let record = h.service.get_secret("77").unwrap();
    assert_eq!(record, stale);
    // The stale record must not be promoted into the short-term tier.
    assert_eq!(h.short_term().get::<SecretRecord>("77"), None);
}

#[test]
fn exhausted_file_retries_fall_back_to_long_term() {
    let mut h = Harness::new();
    let stale = h.stale_record();
    h.api
        .items
        .replace(vec![file_item(9, "Key file"), inline_item(1, "Username", "svc")]);
    h.api.file_always_fails.set(true);

    let record = h.service.get_secret("77").unwrap();
    assert_eq!(record, stale);
    assert_eq!(h.api.download_calls.get(), 3);
}

#[test]
fn all_sources_failing_is_not_found() {
    let mut h = Harness::new();
    h.api.secret_error.replace(Some("service down".to_string()));

    let err = h.service.get_secret("77").unwrap_err();
    assert!(matches!(err, SecretServerError::SecretNotFound(id) if id == "77"));

    // No record entered either tier.
    assert_eq!(h.short_term().get::<SecretRecord>("77"), None);
    assert_eq!(h.long_term().get::<SecretRecord>("77"), None);
}

#[test]
fn consecutive_calls_authenticate_once() {
    let mut h = Harness::new();

    h.service.get_secret("77").unwrap();
    h.service.get_secret("78").unwrap();
    assert_eq!(h.api.auth_calls.get(), 1);
}

#[test]
fn cached_token_survives_a_new_instance() {
    let mut h = Harness::new();
    h.service.get_secret("77").unwrap();
    assert_eq!(h.api.auth_calls.get(), 1);

    // A fresh instance sharing the cache path finds the token on disk and
    // only needs the server to confirm it.
    let api = Rc::new(ApiState::default());
    api.items.replace(password_items());
    let config = Config::new(Credentials::new("alice", "s3cret", "ORG-1"))
        .with_cache_path(h.cache_dir.path());
    let mut service = SecretService::with_api(config, Box::new(MockApi(api.clone()))).unwrap();

    service.get_secret("99").unwrap();
    assert_eq!(api.auth_calls.get(), 0);
    assert_eq!(api.check_calls.get(), 1);
}

#[test]
fn auth_exhaustion_surfaces_as_authentication_error() {
    let mut h = Harness::new();
    h.api.auth_always_fails.set(true);
    h.stale_record();

    let err = h.service.get_secret("77").unwrap_err();
    assert!(matches!(
        err,
        SecretServerError::Authentication { attempts: 3 }
    ));
    assert_eq!(h.api.auth_calls.get(), 3);
}

#[test]
fn file_fields_are_decoded_into_the_record() {
    let mut h = Harness::new();
    h.api.items.replace(vec![
        file_item(9, "Key file"),
        inline_item(1, "Username", "svc"),
    ]);
    h.api
        .file_payload
        .replace(Some(STANDARD.encode("-----BEGIN KEY-----")));

    let record = h.service.get_secret("77").unwrap();
    assert_eq!(record.get("Key file"), Some("-----BEGIN KEY-----"));
    assert_eq!(record.get("Username"), Some("svc"));
}

#[test]
fn clear_cache_forces_a_remote_fetch() {
    let mut h = Harness::new();

    h.service.get_secret("77").unwrap();
    h.service.clear_cache();
    h.service.get_secret("77").unwrap();
    assert_eq!(h.api.secret_calls.get(), 2);
}
