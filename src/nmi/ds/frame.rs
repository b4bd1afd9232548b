// nmimgr/src/nmi/ds/frame.rs

//! # NMI Frame
//!
//! The execution-context snapshot the host hands over with every NMI.

use core::fmt;

/// Register state of the interrupted context, as captured by the host's NMI
/// entry code.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NmiFrame {
    /// Index of the processor that took the NMI.
    pub cpu: usize,
    /// Instruction pointer of the interrupted context.
    pub ip: usize,
    /// Stack pointer of the interrupted context.
    pub sp: usize,
    /// Status/flags register of the interrupted context.
    pub flags: usize,
}

impl NmiFrame {
    /// Creates a new, zero-initialized `NmiFrame`.
    pub const fn new() -> Self {
        Self {
            cpu: 0,
            ip: 0,
            sp: 0,
            flags: 0,
        }
    }

    pub const fn on_cpu(cpu: usize) -> Self {
        Self {
            cpu,
            ip: 0,
            sp: 0,
            flags: 0,
        }
    }
}

impl fmt::Display for NmiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU: {} IP: {:#018x} SP: {:#018x} FLAGS: {:#010x}",
            self.cpu, self.ip, self.sp, self.flags
        )
    }
}
