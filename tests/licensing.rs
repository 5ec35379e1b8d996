//! Core licensing flow tests - issuance, validation, seat management,
//! revocation.

use keywarden::error::AppError;
use keywarden::licensing;
use keywarden::models::Plan;

mod common;
use common::*;

#[test]
fn issue_then_validate_round_trip() {
    let (_dir, store) = temp_store();

    let license = issue_test_license(&store, "owner@example.com", Plan::Pro);
    let validation = licensing::validate(&store, &license.key).unwrap();

    assert_eq!(validation.license.email, "owner@example.com");
    assert_eq!(validation.max_devices(), 5);
    assert_eq!(validation.active_devices(), 0);
}

#[test]
fn validate_empty_key_skips_the_store() {
    let (_dir, store) = temp_store();

    let err = licensing::validate(&store, "").unwrap_err();
    match err {
        AppError::Validation(message) => assert_eq!(message, "key required"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn validate_unknown_key() {
    let (_dir, store) = temp_store();

    let err = licensing::validate(&store, "TEST-NO-SUCH-KEY").unwrap_err();
    match err {
        AppError::NotFound(message) => assert_eq!(message, "key not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn activate_consumes_one_seat() {
    let (_dir, store) = temp_store();
    let license = issue_test_license(&store, "owner@example.com", Plan::Personal);

    let activation =
        licensing::activate(&store, &license.key, "macbook-air", Some("MacBook Air")).unwrap();
    assert!(activation.newly_activated);
    assert_eq!(activation.active_devices, 1);
    assert_eq!(activation.max_devices, 2);

    let validation = licensing::validate(&store, &license.key).unwrap();
    assert_eq!(validation.active_devices(), 1);
}

#[test]
fn reactivating_a_device_never_consumes_a_second_seat() {
    let (_dir, store) = temp_store();
    let license = seed_license(&store, "TEST-ONESEAT", 1);

    let first = licensing::activate(&store, &license.key, "mac-mini", None).unwrap();
    assert_eq!(first.active_devices, 1);
    assert!(first.newly_activated);

    let second = licensing::activate(&store, &license.key, "mac-mini", None).unwrap();
    assert_eq!(second.active_devices, 1);
    assert!(!second.newly_activated);
}

#[test]
fn activate_unknown_key() {
    let (_dir, store) = temp_store();

    let err = licensing::activate(&store, "TEST-GHOST", "mac-mini", None).unwrap_err();
    match err {
        AppError::NotFound(message) => assert_eq!(message, "invalid license key"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn activate_requires_key_and_device_id() {
    let (_dir, store) = temp_store();

    assert!(matches!(
        licensing::activate(&store, "", "mac-mini", None),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        licensing::activate(&store, "TEST-KEY", "", None),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn seat_exhaustion_and_recovery() {
    let (_dir, store) = temp_store();
    // personal plan: 2 seats
    let license = issue_test_license(&store, "owner@example.com", Plan::Personal);

    let a = licensing::activate(&store, &license.key, "device-a", None).unwrap();
    assert_eq!(a.active_devices, 1);
    let b = licensing::activate(&store, &license.key, "device-b", None).unwrap();
    assert_eq!(b.active_devices, 2);

    let err = licensing::activate(&store, &license.key, "device-c", None).unwrap_err();
    match err {
        AppError::LimitExceeded {
            active_devices,
            max_devices,
        } => {
            assert_eq!(active_devices, 2);
            assert_eq!(max_devices, 2);
            assert_eq!(err.to_string(), "activation limit reached");
        }
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let released = licensing::deactivate(&store, &license.key, "device-a").unwrap();
    assert!(released.removed);

    let c = licensing::activate(&store, &license.key, "device-c", None).unwrap();
    assert_eq!(c.active_devices, 2);

    // Seat invariant held throughout.
    let validation = licensing::validate(&store, &license.key).unwrap();
    assert!(validation.active_devices() <= validation.max_devices());
}

#[test]
fn deactivate_unknown_device_is_a_noop_success() {
    let (_dir, store) = temp_store();
    let license = issue_test_license(&store, "owner@example.com", Plan::Personal);
    licensing::activate(&store, &license.key, "device-a", None).unwrap();

    let outcome = licensing::deactivate(&store, &license.key, "never-activated").unwrap();
    assert!(!outcome.removed);

    let validation = licensing::validate(&store, &license.key).unwrap();
    assert_eq!(validation.active_devices(), 1);
}

#[test]
fn deactivate_unknown_license_is_a_noop_success() {
    let (_dir, store) = temp_store();

    let outcome = licensing::deactivate(&store, "TEST-GONE", "device-a").unwrap();
    assert!(!outcome.removed);
}

#[test]
fn revoked_license_fails_validate_and_activate() {
    let (_dir, store) = temp_store();
    let license = issue_test_license(&store, "owner@example.com", Plan::Personal);
    licensing::activate(&store, &license.key, "device-a", None).unwrap();

    let revoked = licensing::revoke(&store, &license.key).unwrap();
    assert!(revoked.is_revoked());
    // Revocation destroys the bound seats too.
    assert_eq!(revoked.active_devices(), 0);

    assert!(matches!(
        licensing::validate(&store, &license.key),
        Err(AppError::Revoked)
    ));
    assert!(matches!(
        licensing::activate(&store, &license.key, "device-b", None),
        Err(AppError::Revoked)
    ));
}

#[test]
fn revoke_unknown_key() {
    let (_dir, store) = temp_store();

    assert!(matches!(
        licensing::revoke(&store, "TEST-GHOST"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn issue_requires_email() {
    let (_dir, store) = temp_store();

    assert!(matches!(
        licensing::issue(&store, "", Plan::Personal, "TEST"),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn issued_keys_are_unique_and_prefixed() {
    let (_dir, store) = temp_store();

    let mut keys = std::collections::HashSet::new();
    for i in 0..50 {
        let license = issue_test_license(&store, &format!("owner{i}@example.com"), Plan::Team);
        assert!(license.key.starts_with("TEST-"));
        assert!(keys.insert(license.key));
    }
    assert_eq!(store.all().unwrap().len(), 50);
}
