// nmimgr/src/lib.rs

//! # nmimgr
//!
//! Remaps NMI reason codes to dispositions. Benign recurring NMIs can be
//! ignored or dropped instead of tripping the host's "unknown NMI" policy,
//! chosen codes can produce a diagnostic dump, and vendor codes can force a
//! deterministic stop so a crash-dump pipeline captures the system state.
//!
//! The embedding kernel supplies the configuration strings, an
//! [`NmiRegistrar`] for its NMI hooks and an [`NmiPlatform`] for dumps and
//! halts, then calls [`NmiModule::load`] at start and drops the module at
//! stop.

#![cfg_attr(not(test), no_std)]

#[doc(hidden)]
pub use log as __log;

pub mod console;
pub mod nmi;
pub mod selftest;
pub mod util;

pub use nmi::*;

/// Name used for host registrations and in the halt message.
pub const NAME: &str = "nmimgr";

/// Crate version, reported when the module is loaded.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
