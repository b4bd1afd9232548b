// nmimgr/src/nmi/infrastructure/di/mod.rs

//! # Dependency Injection - Global Access and Initialization
//!
//! Holds the classifier the host's NMI hooks dispatch to, and the portable
//! platform implementation.
//!
//! The classifier is installed before any class is attached and removed
//! after every class is detached, so the interrupt path only ever reads it.
//! The read is non-blocking: an NMI that finds the slot being written treats
//! the event as unmanaged instead of spinning in NMI context.

pub mod container;
pub mod traits;

use crate::nmi::ds::{Disposition, EventCode, LoadError, NmiClass, NmiFrame};
use crate::nmi::infrastructure::classifier::Classifier;
use crate::{nmi_notice, NAME};
use spin::RwLock;
use traits::NmiPlatform;

/// The classifier of the currently loaded module, if any.
static ACTIVE: RwLock<Option<Classifier<'static>>> = RwLock::new(None);

/// Makes `classifier` the target of [`nmi_entry`].
pub(crate) fn install(classifier: Classifier<'static>) -> Result<(), LoadError> {
    let mut active = ACTIVE.write();
    if active.is_some() {
        return Err(LoadError::AlreadyLoaded);
    }
    *active = Some(classifier);
    Ok(())
}

/// Removes the installed classifier.
pub(crate) fn uninstall() -> Option<Classifier<'static>> {
    ACTIVE.write().take()
}

/// Checks whether a classifier is installed.
pub fn is_loaded() -> bool {
    ACTIVE.read().is_some()
}

/// The entry point registered with the host for every claimed class.
///
/// Must only be called by the host's NMI dispatch. Codes in the panic set
/// do not return.
pub fn nmi_entry(class: NmiClass, code: EventCode, frame: &NmiFrame) -> Disposition {
    match ACTIVE.try_read() {
        Some(active) => match active.as_ref() {
            Some(classifier) => classifier.classify(class, code, frame),
            None => Disposition::Continue,
        },
        None => Disposition::Continue,
    }
}

/// Platform for hosts whose panic handler already captures a crash dump.
///
/// The dump is a log line with the interrupted frame and the halt is a Rust
/// panic, which hands control to the embedding kernel's panic handler.
pub struct KernelPanic;

impl NmiPlatform for KernelPanic {
    fn dump_context(&self, frame: &NmiFrame) {
        nmi_notice!("{}", frame);
    }

    fn halt(&self, reason: &str) -> ! {
        panic!("{}: {}", NAME, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "nmimgr: Hit explicit panic")]
    fn kernel_panic_halts_by_panicking() {
        KernelPanic.halt("Hit explicit panic");
    }

    #[test]
    fn kernel_panic_dump_returns() {
        KernelPanic.dump_context(&NmiFrame::on_cpu(1));
    }
}
