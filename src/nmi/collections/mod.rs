// nmimgr/src/nmi/collections/mod.rs

//! # NMI Collections Module
//!
//! Fixed-capacity containers used on the interrupt path.

pub mod event_set;

pub use self::event_set::{EventSet, EVENT_SET_CAPACITY};
