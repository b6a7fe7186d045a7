use keyholder_core::storage::{KeyFilter, KeyStore, SqliteStore};
use keyholder_core::{KeyService, KeyUpdate, KeyholderError, ValidationError};
use secrecy::ExposeSecret;

fn service() -> KeyService<SqliteStore> {
    KeyService::new(SqliteStore::open_in_memory().expect("open should succeed"))
}

#[test]
fn test_create_decrypt_flow() {
    let mut keys = service();
    keys.create("github", "ghp_token", "correct horse")
        .expect("create should succeed");

    let secret = keys
        .decrypt("github", "correct horse")
        .expect("decrypt should succeed");
    assert_eq!(secret.expose_secret(), "ghp_token");

    let record = keys.store().get_key("github").unwrap().unwrap();
    assert!(!record
        .sealed
        .windows(b"ghp_token".len())
        .any(|window| window == b"ghp_token"));
}

#[test]
fn test_create_validates_and_rejects_duplicates() {
    let mut keys = service();

    let err = keys.create("", "secret", "pass").expect_err("empty label");
    assert!(matches!(err, KeyholderError::Validation(_)));
    let err = keys.create("api", "", "pass").expect_err("empty secret");
    assert!(matches!(err, KeyholderError::Validation(_)));
    let err = keys
        .create("api", "secret", &"p".repeat(129))
        .expect_err("long passphrase");
    assert!(matches!(err, KeyholderError::Validation(_)));

    keys.create("api", "secret", "pass").expect("create should succeed");
    let err = keys
        .create("api", "other", "pass")
        .expect_err("duplicate label");
    assert!(matches!(err, KeyholderError::AlreadyExists(_)));
}

#[test]
fn test_wrong_passphrase_is_authentication() {
    let mut keys = service();
    keys.create("api", "secret", "right").unwrap();

    let err = keys.decrypt("api", "wrong").expect_err("wrong passphrase");
    assert!(err.is_authentication());
    assert_eq!(err.to_string(), "Invalid passphrase or corrupted data");
}

#[test]
fn test_missing_label_is_not_found() {
    let mut keys = service();

    assert!(matches!(
        keys.decrypt("nope", "pass"),
        Err(KeyholderError::NotFound(_))
    ));
    assert!(matches!(keys.delete("nope"), Err(KeyholderError::NotFound(_))));
    assert!(matches!(
        keys.update("nope", KeyUpdate::new().rename("other")),
        Err(KeyholderError::NotFound(_))
    ));
}

#[test]
fn test_update_reseals_with_new_passphrase() {
    let mut keys = service();
    keys.create("api", "v1", "old-pass").unwrap();
    let before = keys.store().get_key("api").unwrap().unwrap();

    keys.update("api", KeyUpdate::new().reseal("v2", "new-pass"))
        .expect("update should succeed");

    let after = keys.store().get_key("api").unwrap().unwrap();
    assert_ne!(before.sealed[1..17], after.sealed[1..17], "salt must be fresh");
    assert!(keys.decrypt("api", "old-pass").unwrap_err().is_authentication());
    assert_eq!(keys.decrypt("api", "new-pass").unwrap().expose_secret(), "v2");
}

#[test]
fn test_update_rename_keeps_value() {
    let mut keys = service();
    keys.create("old", "value", "pass").unwrap();
    keys.create("taken", "value", "pass").unwrap();

    let err = keys
        .update("old", KeyUpdate::new().rename("taken"))
        .expect_err("rename collision");
    assert!(matches!(err, KeyholderError::AlreadyExists(_)));

    let summary = keys
        .update("old", KeyUpdate::new().rename("new"))
        .expect("rename should succeed");
    assert_eq!(summary.label, "new");
    assert_eq!(keys.decrypt("new", "pass").unwrap().expose_secret(), "value");
}

#[test]
fn test_update_requires_secret_and_passphrase_together() {
    let mut keys = service();
    keys.create("api", "value", "pass").unwrap();

    let update = KeyUpdate {
        passphrase: Some("pass"),
        ..KeyUpdate::default()
    };
    let err = keys.update("api", update).expect_err("partial reseal");
    assert!(matches!(
        err,
        KeyholderError::Validation(ValidationError::Incomplete(_, _))
    ));
}

#[test]
fn test_list_and_delete() {
    let mut keys = service();
    keys.create("one", "1", "pass").unwrap();
    keys.create("two", "2", "pass").unwrap();

    keys.delete("one").expect("delete should succeed");
    let listed: Vec<_> = keys
        .list(&KeyFilter::new())
        .unwrap()
        .into_iter()
        .map(|summary| summary.label)
        .collect();
    assert_eq!(listed, vec!["two"]);
}
