//! The failure-reporting hook.
//!
//! Every failure the engine detects passes through [`fail`] or [`raise`]
//! exactly once. The installed [`FailureHook`] sees the error and decides
//! whether it is raised to the caller or replaced by a fallback value.

use std::sync::Arc;

use log::{debug, info};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use typeweave_foundation::{Error, Result, Value};

use crate::config::config;
use crate::registry::ensure_mutable;

/// What to do with a reported failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Return the error to the caller.
    Raise,
    /// Substitute this value for the one that failed to construct.
    ///
    /// Ignored by operations that build types rather than values.
    Fallback(Value),
}

/// Process-wide failure hook.
pub type FailureHook = Arc<dyn Fn(&Error) -> Recovery + Send + Sync>;

static HOOK: Lazy<RwLock<Option<FailureHook>>> = Lazy::new(|| RwLock::new(None));

/// Installs `hook`, replacing the previous one.
///
/// # Errors
///
/// Fails with `RegistryFrozen` after [`freeze`](crate::freeze).
pub fn set_failure_hook<F>(hook: F) -> Result<()>
where
    F: Fn(&Error) -> Recovery + Send + Sync + 'static,
{
    ensure_mutable("failure hook")?;
    *HOOK.write() = Some(Arc::new(hook));
    info!("failure hook installed");
    Ok(())
}

/// Restores the default hook, which raises every failure.
///
/// # Errors
///
/// Fails with `RegistryFrozen` after [`freeze`](crate::freeze).
pub fn reset_failure_hook() -> Result<()> {
    ensure_mutable("failure hook")?;
    *HOOK.write() = None;
    info!("failure hook reset");
    Ok(())
}

fn report(err: &Error) -> Recovery {
    if config().log_failures {
        debug!("type failure: {err}");
    }
    // Clone out of the lock so a hook may itself construct values.
    let hook = HOOK.read().clone();
    match hook {
        Some(hook) => hook(err),
        None => Recovery::Raise,
    }
}

/// Reports a failure where a value was being constructed.
pub(crate) fn fail(err: Error) -> Result<Value> {
    match report(&err) {
        Recovery::Raise => Err(err),
        Recovery::Fallback(value) => Ok(value),
    }
}

/// Reports a failure where no value can stand in for the result.
pub(crate) fn raise(err: Error) -> Error {
    let _ = report(&err);
    err
}
