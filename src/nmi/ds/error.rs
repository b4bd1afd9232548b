// nmimgr/src/nmi/ds/error.rs

//! # Error Types
//!
//! Errors surfaced while parsing event lists, claiming interrupt classes and
//! loading the module. None of them allocate, so they can be built and
//! reported before any heap exists.

use super::types::{Category, NmiClass};
use core::fmt;

/// A range-list string could not be turned into an event set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token starting at byte `offset` is neither a number nor a range.
    InvalidToken { offset: usize },
    /// A value lies outside `0..=255`.
    OutOfRange { value: u32 },
    /// A range whose start is greater than its end.
    ReversedRange { start: u32, end: u32 },
    /// More distinct values than an event set can hold.
    CapacityExceeded,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { offset } => write!(f, "invalid token at offset {}", offset),
            Self::OutOfRange { value } => write!(f, "value {} is not an 8-bit event code", value),
            Self::ReversedRange { start, end } => write!(f, "reversed range {}-{}", start, end),
            Self::CapacityExceeded => write!(f, "too many distinct event codes"),
        }
    }
}

/// The host refused to associate nmimgr with an interrupt class.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// The class is already claimed by another consumer.
    Busy(NmiClass),
    /// The host does not know this class.
    InvalidClass(NmiClass),
    /// `attach_all` was called while handles are still held.
    AlreadyAttached,
    /// The registrar exposes more classes than a manager can hold.
    TooManyClasses,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy(class) => write!(f, "{} is already claimed", class),
            Self::InvalidClass(class) => write!(f, "{} is not a valid class", class),
            Self::AlreadyAttached => write!(f, "handlers are already attached"),
            Self::TooManyClasses => write!(f, "registrar exposes too many classes"),
        }
    }
}

/// Module load failed; nothing is left installed or attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Another instance is currently loaded.
    AlreadyLoaded,
    /// A parameter was invalid and the load policy says to abort.
    InvalidParam(Category, ParseError),
    /// Interrupt classes could not all be claimed.
    Attach(AttachError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLoaded => write!(f, "already loaded"),
            Self::InvalidParam(category, err) => write!(f, "invalid {}: {}", category, err),
            Self::Attach(err) => write!(f, "attach failed: {}", err),
        }
    }
}

impl From<AttachError> for LoadError {
    fn from(err: AttachError) -> Self {
        Self::Attach(err)
    }
}
