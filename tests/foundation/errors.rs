//! Integration tests for Error types
//!
//! Tests error construction, display, and error kinds.

use typeweave_foundation::{Error, ErrorKind, SemanticLimit, Value};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_validation_renders_path() {
    let err = Error::validation(
        "Num",
        Value::from("a"),
        vec!["Line".to_string(), "from".to_string(), "x".to_string()],
    );
    let msg = format!("{err}");
    assert!(msg.contains("Line/from/x"));
    assert!(msg.contains("expected Num"));
}

#[test]
fn error_dispatch() {
    let err = Error::dispatch("StrOrNum", Value::Bool(true));
    assert!(matches!(err.kind, ErrorKind::Dispatch { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("StrOrNum"));
    assert!(msg.contains("true"));
}

#[test]
fn error_update() {
    let err = Error::update("unknown command $explode");
    assert_eq!(format!("{err}"), "update failed: unknown command $explode");
}

#[test]
fn error_registry_frozen() {
    let err = Error::registry_frozen("update commands");
    assert!(matches!(err.kind, ErrorKind::RegistryFrozen(_)));
    assert!(format!("{err}").contains("update commands"));
}

#[test]
fn error_method_not_found() {
    let err = Error::method_not_found("Point", "norm");
    let msg = format!("{err}");
    assert!(msg.contains("Point"));
    assert!(msg.contains("\"norm\""));
}

#[test]
fn error_limit_exceeded() {
    let err = Error::limit_exceeded(SemanticLimit::MaxUpdateDepth { limit: 3 });
    assert_eq!(
        format!("{err}"),
        "limit exceeded: max update depth (3) exceeded"
    );
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&Error::assertion("x"));
}
