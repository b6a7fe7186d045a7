use keyholder_core::admin::{
    provision_admin, remove_admin, verify_admin, Provisioned, Removed, ADMIN_USERNAME,
};
use keyholder_core::storage::{SqliteStore, UserStore};
use keyholder_core::KeyholderError;

#[test]
fn test_provisioning_is_idempotent() {
    let mut store = SqliteStore::open_in_memory().expect("open should succeed");

    assert_eq!(
        provision_admin(&mut store, "s3cret").expect("provision should succeed"),
        Provisioned::Created
    );
    let first = store.get_user(ADMIN_USERNAME).unwrap().expect("admin exists");
    assert!(first.is_admin);
    assert_ne!(first.password_hash, "s3cret");

    assert_eq!(
        provision_admin(&mut store, "different").expect("second run should succeed"),
        Provisioned::AlreadyExists
    );
    let second = store.get_user(ADMIN_USERNAME).unwrap().unwrap();
    assert_eq!(first.password_hash, second.password_hash);
    assert!(verify_admin(&store, "s3cret").unwrap());
}

#[test]
fn test_blank_password_rejected() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    for password in ["", "   ", "\t\n"] {
        let err = provision_admin(&mut store, password).expect_err("blank password");
        assert!(matches!(err, KeyholderError::Validation(_)));
    }
    assert!(store.get_user(ADMIN_USERNAME).unwrap().is_none());
}

#[test]
fn test_verify_admin() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert!(matches!(
        verify_admin(&store, "anything"),
        Err(KeyholderError::NotFound(_))
    ));

    provision_admin(&mut store, "s3cret").unwrap();
    assert!(verify_admin(&store, "s3cret").unwrap());
    assert!(!verify_admin(&store, "wrong").unwrap());
}

#[test]
fn test_remove_admin() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(remove_admin(&mut store).unwrap(), Removed::Missing);

    provision_admin(&mut store, "s3cret").unwrap();
    assert_eq!(remove_admin(&mut store).unwrap(), Removed::Deleted);
    assert_eq!(remove_admin(&mut store).unwrap(), Removed::Missing);
    assert_eq!(
        provision_admin(&mut store, "again").unwrap(),
        Provisioned::Created
    );
}

#[test]
fn test_password_whitespace_is_trimmed() {
    let mut store = SqliteStore::open_in_memory().expect("open should succeed");
    provision_admin(&mut store, "s3cret \n").expect("provision should succeed");

    assert!(verify_admin(&store, "s3cret").expect("verify should succeed"));
    assert!(verify_admin(&store, "  s3cret").expect("verify should succeed"));
    assert!(!verify_admin(&store, "s3 cret").expect("verify should succeed"));
}
