//! Tests for the core error taxonomy

use core_kernel::{CoreError, PortError};

#[test]
fn test_core_error_constructors() {
    let e = CoreError::validation("service type required");
    assert!(matches!(e, CoreError::Validation(_)));
    assert!(e.to_string().contains("service type required"));

    let e = CoreError::invalid_state("rejected is terminal");
    assert!(matches!(e, CoreError::InvalidStateTransition(_)));

    let e = CoreError::not_found("demand DEM-1");
    assert!(matches!(e, CoreError::NotFound(_)));
}

#[test]
fn test_port_error_validation_field() {
    let e = PortError::validation_field("must not be empty", "beneficiary_name");
    match e {
        PortError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("beneficiary_name"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn test_port_error_classification() {
    assert!(PortError::connection("refused").is_transient());
    assert!(PortError::ServiceUnavailable { service: "blob-store".into() }.is_transient());
    assert!(!PortError::internal("boom").is_transient());
    assert!(!PortError::Conflict { message: "duplicate".into() }.is_transient());

    assert!(PortError::not_found("Profile", "USR-1").is_not_found());
    assert!(!PortError::internal("boom").is_not_found());
}
