// nmimgr/src/util/sbi/api.rs

//! SBI calls used by the RISC-V platform: the legacy console for log output
//! and the system reset extension for the halt path.

use core::fmt;
use sbi_rt::legacy;

/// SBI call result.
pub type SbiResult = Result<usize, SbiError>;

/// SBI error codes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SbiError {
    Failed = -1,
    NotSupported = -2,
    InvalidParam = -3,
    Denied = -4,
    InvalidAddress = -5,
    AlreadyAvailable = -6,
    AlreadyStarted = -7,
    AlreadyStopped = -8,
}

pub mod extension_ids {
    pub const SRST: usize = 0x53525354; // "SRST"
}

/// Console output over the legacy SBI console.
pub mod console {
    use super::*;

    pub fn putchar(ch: char) {
        legacy::console_putchar(ch as usize);
    }

    pub fn puts(s: &str) {
        for ch in s.chars() {
            putchar(ch);
        }
    }
}

/// A `fmt::Write` sink for [`ConsoleLogger`](crate::console::ConsoleLogger).
///
/// Each character is a separate SBI call, so output from several harts may
/// interleave but is never lost.
pub struct SbiConsole;

impl fmt::Write for SbiConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        console::puts(s);
        Ok(())
    }
}

/// System reset extension.
pub mod system_reset {
    use super::*;

    pub const RESET_TYPE_SHUTDOWN: usize = 0;
    pub const RESET_TYPE_COLD_REBOOT: usize = 1;

    pub const RESET_REASON_NO_REASON: usize = 0;
    pub const RESET_REASON_SYSTEM_FAILURE: usize = 1;

    /// Resets the system, falling back to the legacy shutdown call if the
    /// SRST extension is missing.
    pub fn system_reset(reset_type: usize, reset_reason: usize) -> ! {
        let _ = sbi_call(extension_ids::SRST, 0, [reset_type, reset_reason, 0, 0, 0, 0]);
        legacy::shutdown();
    }
}

pub mod system {
    use super::*;

    /// Stops the machine and reports a system failure to the firmware.
    pub fn fail() -> ! {
        system_reset::system_reset(
            system_reset::RESET_TYPE_SHUTDOWN,
            system_reset::RESET_REASON_SYSTEM_FAILURE,
        );
    }
}

/// Raw SBI call.
pub fn sbi_call(eid: usize, fid: usize, args: [usize; 6]) -> SbiResult {
    let error: usize;
    let value: usize;

    unsafe {
        core::arch::asm!(
            "ecall",
            in("a7") eid,
            in("a6") fid,
            inlateout("a0") args[0] => error,
            inlateout("a1") args[1] => value,
            in("a2") args[2],
            in("a3") args[3],
            in("a4") args[4],
            in("a5") args[5],
        );
    }

    match error as isize {
        0 => Ok(value),
        -2 => Err(SbiError::NotSupported),
        -3 => Err(SbiError::InvalidParam),
        -4 => Err(SbiError::Denied),
        -5 => Err(SbiError::InvalidAddress),
        -6 => Err(SbiError::AlreadyAvailable),
        -7 => Err(SbiError::AlreadyStarted),
        -8 => Err(SbiError::AlreadyStopped),
        _ => Err(SbiError::Failed),
    }
}
