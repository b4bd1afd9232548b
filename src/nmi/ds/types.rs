// nmimgr/src/nmi/ds/types.rs

//! # NMI Type Definitions
//!
//! Reason codes, host interrupt classes, routing categories and the
//! dispositions a classification can end in.

use core::fmt;

/// The 8-bit reason code reported by the hardware for one NMI.
///
/// Values are vendor-defined and opaque to this crate; they are only ever
/// compared for exact equality.
pub type EventCode = u8;

/// Number of distinct event codes.
pub const EVENT_CODE_COUNT: usize = 256;

/// Host-defined groups of NMI sources that can be registered against
/// independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NmiClass {
    /// CPU-local sources (watchdogs, IPIs). Never claimed by nmimgr.
    Local = 0,
    /// NMIs no other handler recognised.
    Unknown = 1,
    /// System error line asserted by the chipset.
    Serr = 2,
    /// I/O channel check.
    IoCheck = 3,
}

impl NmiClass {
    /// Short host-facing name of the class.
    pub const fn name(&self) -> &'static str {
        match self {
            NmiClass::Local => "NMI_LOCAL",
            NmiClass::Unknown => "NMI_UNKNOWN",
            NmiClass::Serr => "NMI_SERR",
            NmiClass::IoCheck => "NMI_IO_CHECK",
        }
    }
}

impl fmt::Display for NmiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classes claimed by a host that exposes a single notifier chain for every
/// NMI, in attach order.
pub const NOTIFIER_CLASSES: &[NmiClass] = &[NmiClass::Unknown];

/// Classes claimed by a host with per-class NMI handler lists, in attach
/// order.
pub const HANDLER_CLASSES: &[NmiClass] = &[NmiClass::Unknown, NmiClass::Serr, NmiClass::IoCheck];

/// Upper bound on the number of classes a registrar may expose.
pub const MAX_CLASSES: usize = 4;

/// The four configurable routing buckets.
///
/// The declaration order is the evaluation order used by the classifier and
/// is not configurable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
    Ignore = 0,
    Debug = 1,
    Drop = 2,
    Panic = 3,
}

impl Category {
    pub const COUNT: usize = 4;

    /// All categories in evaluation order.
    pub const ALL: [Category; Category::COUNT] =
        [Category::Ignore, Category::Debug, Category::Drop, Category::Panic];

    /// Categories that decide where an event goes. `Debug` is an overlay and
    /// is not part of this list.
    pub const ROUTING: [Category; 3] = [Category::Ignore, Category::Drop, Category::Panic];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Name of the parameter that configures this category.
    pub const fn param_name(&self) -> &'static str {
        match self {
            Category::Ignore => "events_ignore",
            Category::Debug => "events_debug",
            Category::Drop => "events_drop",
            Category::Panic => "events_panic",
        }
    }

    /// Looks a category up by its parameter name.
    pub fn from_param_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.param_name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Outcome of classifying one event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The event is consumed and must not be offered to other consumers.
    Suppressed,
    /// The event is not ours; the host should offer it to other consumers.
    Continue,
    /// The host must stop. A dispatcher never hands this value back to the
    /// host: producing it means calling [`NmiPlatform::halt`], which does not
    /// return.
    ///
    /// [`NmiPlatform::halt`]: crate::nmi::NmiPlatform::halt
    Halt,
}

impl Disposition {
    /// Whether the host should consider the NMI handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, Disposition::Suppressed)
    }
}

/// Pure classification result: where the event goes and whether a
/// diagnostic dump is due on the way.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Decision {
    pub disposition: Disposition,
    /// The routing category that matched, if any.
    pub category: Option<Category>,
    /// Whether the code is in the debug set. Always false for ignored codes.
    pub dump: bool,
}

impl Decision {
    /// Ignored events produce no output at all.
    pub fn is_silent(&self) -> bool {
        self.category == Some(Category::Ignore)
    }
}
