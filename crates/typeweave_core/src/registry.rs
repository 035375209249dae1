//! Freezing of the process-wide registries.
//!
//! The update-command table and the failure hook may be changed freely until
//! [`freeze`] is called. After that every mutation fails with
//! [`ErrorKind::RegistryFrozen`](typeweave_foundation::ErrorKind::RegistryFrozen).

use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use typeweave_foundation::{Error, Result};

static FROZEN: AtomicBool = AtomicBool::new(false);

/// Makes the command table and the failure hook immutable for the rest of
/// the process.
pub fn freeze() {
    if !FROZEN.swap(true, Ordering::SeqCst) {
        info!("registries frozen");
    }
}

/// Returns true once [`freeze`] has been called.
#[must_use]
pub fn is_frozen() -> bool {
    FROZEN.load(Ordering::SeqCst)
}

pub(crate) fn ensure_mutable(registry: &str) -> Result<()> {
    if is_frozen() {
        return Err(Error::registry_frozen(registry));
    }
    Ok(())
}
