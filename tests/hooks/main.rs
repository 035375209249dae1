//! Integration tests for the failure hook and engine configuration
//!
//! Every test here changes process-wide state, so they take a shared lock
//! and restore the defaults before releasing it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use typeweave_core::update::patch;
use typeweave_core::{
    EngineConfig, Recovery, assert, builtins, config, configure, get_type_name, list, record,
    reset_failure_hook, set_failure_hook, update,
};
use typeweave_foundation::{ErrorKind, Value};

static GLOBAL: Mutex<()> = Mutex::new(());

struct Restore<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl Drop for Restore<'_> {
    fn drop(&mut self) {
        let _ = reset_failure_hook();
        configure(EngineConfig::default());
    }
}

fn exclusive() -> Restore<'static> {
    Restore {
        _guard: GLOBAL.lock().unwrap_or_else(PoisonError::into_inner),
    }
}

// =============================================================================
// Failure Hook
// =============================================================================

#[test]
fn fallback_substitutes_failed_values() {
    let _restore = exclusive();
    set_failure_hook(|err| match err.kind {
        ErrorKind::Validation { .. } => Recovery::Fallback(Value::Int(0)),
        _ => Recovery::Raise,
    })
    .unwrap();

    let nums = list(builtins::number(), None);
    let raw = Value::from(vec![Value::Int(1), Value::from("x"), Value::Int(3)]);
    let built = nums.construct(&raw).unwrap();
    assert_eq!(
        built,
        Value::from(vec![Value::Int(1), Value::Int(0), Value::Int(3)])
    );
}

#[test]
fn fallback_is_ignored_when_building_types() {
    let _restore = exclusive();
    set_failure_hook(|_| Recovery::Fallback(Value::Nil)).unwrap();

    let err = record(
        [("x", builtins::number()), ("x", builtins::number())],
        None,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Conflict { .. }));
}

#[test]
fn hook_sees_each_failure_once() {
    let _restore = exclusive();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    set_failure_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Recovery::Raise
    })
    .unwrap();

    let point = record([("x", builtins::number())], Some("Point")).unwrap();
    let shapes = list(point.as_type().clone(), None);
    let raw = Value::from(vec![Value::from_pairs([("x", "deep")])]);
    assert!(shapes.construct(&raw).is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    assert!(assert(false, "checked").is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn reset_restores_raising() {
    let _restore = exclusive();
    set_failure_hook(|_| Recovery::Fallback(Value::Nil)).unwrap();
    assert!(builtins::number().construct(&Value::from("a")).is_ok());
    reset_failure_hook().unwrap();
    assert!(builtins::number().construct(&Value::from("a")).is_err());
}

#[test]
fn update_walk_failures_ignore_fallbacks() {
    let _restore = exclusive();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    set_failure_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Recovery::Fallback(Value::Nil)
    })
    .unwrap();

    let unknown = Value::from_pairs([("$explode", Value::Nil)]);
    let err = update(&Value::Int(1), &unknown).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Update { .. }));

    let mismatch = patch::push([1]);
    let err = update(&Value::Int(1), &mismatch).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Update { .. }));

    let malformed = update(&Value::Int(1), &Value::Int(2)).unwrap_err();
    assert!(matches!(malformed.kind, ErrorKind::Update { .. }));
    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn update_depth_follows_config() {
    let _restore = exclusive();
    configure(EngineConfig::default().with_max_update_depth(2));
    assert_eq!(config().max_update_depth, 2);

    let value = Value::from_pairs([("a", Value::from_pairs([("b", 1)]))]);
    let shallow = patch::at("a", patch::merge(Value::from_pairs([("c", 2)])));
    assert!(update(&value, &shallow).is_ok());

    let deep = patch::at("a", patch::at("b", patch::set(2)));
    let err = update(&value, &deep).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

#[test]
fn name_inference_can_be_disabled() {
    let _restore = exclusive();
    let nums = list(builtins::number(), None);
    assert_eq!(get_type_name(&nums), "Array<Num>");
    configure(EngineConfig::quiet().with_infer_names(false));
    assert_eq!(get_type_name(&nums), "list");
    assert_eq!(get_type_name(&builtins::number()), "Num");
}
