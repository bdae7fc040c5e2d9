use crate::base::error::HostsError;
use std::io;

#[test]
fn test_read_error_display() {
    let err = HostsError::read("/etc/hosts", io::Error::new(io::ErrorKind::NotFound, "gone"));
    let display = err.to_string();

    assert!(display.contains("failed to read hosts file"));
    assert!(display.contains("/etc/hosts"));
    assert!(display.contains("gone"));
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
}

#[test]
fn test_stat_error_source() {
    use std::error::Error;

    let err = HostsError::stat(
        "/tmp/hosts",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(err.source().is_some());
    assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
}

#[test]
fn test_error_is_clone() {
    let err = HostsError::NameNotResolved {
        domain: "missing.local".to_string(),
    };
    let cloned = err.clone();

    assert_eq!(cloned.to_string(), "Name not resolved: missing.local");
    assert_eq!(cloned.io_kind(), None);
}
