// nmimgr/src/nmi/ds/mod.rs

//! # NMI Data Structures Module
//!
//! Defines the core data structures of the NMI management subsystem: reason
//! codes, interrupt classes, categories, frames, errors and registration
//! handles. Nothing in this module allocates.

pub mod types;
pub mod frame;
pub mod error;
pub mod handler;

pub use self::types::{
    Category, Decision, Disposition, EventCode, NmiClass,
    EVENT_CODE_COUNT, HANDLER_CLASSES, MAX_CLASSES, NOTIFIER_CLASSES,
};

pub use self::frame::NmiFrame;

pub use self::error::{AttachError, LoadError, ParseError};

pub use self::handler::{HandlerPriority, NmiHandlerFn, RegistrationHandle};
