//! Shared fixtures for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use keywarden::licensing;
use keywarden::models::{License, Plan};
use keywarden::store::LicenseStore;

/// A store backed by a file in a fresh temp directory. Keep the
/// `TempDir` alive for the duration of the test.
pub fn temp_store() -> (TempDir, LicenseStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = LicenseStore::open(store_path(&dir)).expect("open empty store");
    (dir, store)
}

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("licenses.json")
}

pub fn issue_test_license(store: &LicenseStore, email: &str, plan: Plan) -> License {
    licensing::issue(store, email, plan, "TEST").expect("issue test license")
}

/// A license with an arbitrary seat limit, inserted directly. Used when
/// a test needs a limit no plan maps to.
pub fn seed_license(store: &LicenseStore, key: &str, max_activations: u32) -> License {
    let license = License::new(key.to_string(), "owner@example.com".to_string(), max_activations, 0);
    store.upsert(license.clone()).expect("seed license");
    license
}
