// nmimgr/src/nmi/infrastructure/di/traits.rs

//! # Host Capability Traits
//!
//! The two seams between nmimgr and the kernel embedding it. A registrar
//! connects the entry point to the host's NMI classes; a platform provides
//! the diagnostic dump and the unrecoverable stop.

use crate::nmi::ds::{AttachError, HandlerPriority, NmiClass, NmiFrame, NmiHandlerFn};

/// Interface to the host's NMI registration mechanism.
///
/// Hosts differ in how NMI handlers are hooked (a single notifier chain on
/// older kernels, per-class handler lists on newer ones); each strategy is
/// one implementation of this trait. The registration manager's
/// all-or-nothing contract holds for all of them.
pub trait NmiRegistrar {
    /// The classes to claim, in attach order.
    fn classes(&self) -> &'static [NmiClass];

    /// Associates `handler` with `class` under `name`.
    fn register(
        &mut self,
        class: NmiClass,
        handler: NmiHandlerFn,
        priority: HandlerPriority,
        name: &'static str,
    ) -> Result<(), AttachError>;

    /// Releases the association made by a successful `register`.
    fn unregister(&mut self, class: NmiClass, name: &'static str);
}

impl<R: NmiRegistrar + ?Sized> NmiRegistrar for &mut R {
    fn classes(&self) -> &'static [NmiClass] {
        (**self).classes()
    }

    fn register(
        &mut self,
        class: NmiClass,
        handler: NmiHandlerFn,
        priority: HandlerPriority,
        name: &'static str,
    ) -> Result<(), AttachError> {
        (**self).register(class, handler, priority, name)
    }

    fn unregister(&mut self, class: NmiClass, name: &'static str) {
        (**self).unregister(class, name)
    }
}

/// Interface to the host primitives the classifier needs on the interrupt
/// path. Both methods run in NMI context: they must not block or allocate.
pub trait NmiPlatform: Send + Sync {
    /// Emits a diagnostic snapshot (stack trace, registers) of `frame`.
    fn dump_context(&self, frame: &NmiFrame);

    /// Stops the whole system so a crash-capture mechanism can take over.
    fn halt(&self, reason: &str) -> !;
}
