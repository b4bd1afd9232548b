// nmimgr/src/nmi/ds/handler.rs

//! # Handler Definitions
//!
//! The entry-point signature handed to the host and the handles that track
//! each successful registration.

use super::frame::NmiFrame;
use super::types::{Disposition, EventCode, NmiClass};

/// The function signature the host calls for every NMI delivered on a
/// registered class.
///
/// Returns [`Disposition::Suppressed`] or [`Disposition::Continue`]; a halt
/// never returns.
pub type NmiHandlerFn = fn(NmiClass, EventCode, &NmiFrame) -> Disposition;

/// Where in the host's per-class handler list a handler is inserted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HandlerPriority {
    /// Run before every other handler of the class.
    First,
    /// Run after the handlers already registered.
    Last,
}

/// Proof that a handler is attached to one interrupt class.
///
/// Handles are created only by the registration manager after the host
/// accepted a registration and are consumed when the class is detached, so
/// a handle can be released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationHandle {
    class: NmiClass,
    name: &'static str,
}

impl RegistrationHandle {
    pub(crate) fn new(class: NmiClass, name: &'static str) -> Self {
        Self { class, name }
    }

    pub fn class(&self) -> NmiClass {
        self.class
    }

    /// The name the handler was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
