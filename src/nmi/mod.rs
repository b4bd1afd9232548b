// nmimgr/src/nmi/mod.rs

//! # NMI Classification and Dispatch Subsystem
//!
//! Parses the four event lists into a category table, classifies every
//! delivered NMI against it, and manages the host registrations that
//! connect the classifier to the live NMI stream.

mod api;
pub(crate) mod collections;
pub(crate) mod ds;
pub(crate) mod infrastructure;

pub use self::api::*;

pub use self::ds::{
    Category, Decision, Disposition, EventCode, NmiClass, NmiFrame,      // Core types
    AttachError, LoadError, ParseError,                                  // Errors
    HandlerPriority, NmiHandlerFn, RegistrationHandle,                   // Registration
    EVENT_CODE_COUNT, HANDLER_CLASSES, MAX_CLASSES, NOTIFIER_CLASSES,
};

pub use self::collections::{EventSet, EVENT_SET_CAPACITY};

pub use self::infrastructure::classifier::{CategoryTable, Classifier};
pub use self::infrastructure::di::container::NmiModule;
pub use self::infrastructure::di::traits::{NmiPlatform, NmiRegistrar};
pub use self::infrastructure::di::{is_loaded, nmi_entry, KernelPanic};
pub use self::infrastructure::parser::parse_event_list;
pub use self::infrastructure::registration::RegistrationManager;

#[cfg(target_arch = "riscv64")]
pub use self::infrastructure::low_level::SbiPlatform;
