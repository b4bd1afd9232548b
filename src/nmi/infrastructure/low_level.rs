// nmimgr/src/nmi/infrastructure/low_level.rs

//! # RISC-V Platform
//!
//! `NmiPlatform` for S-mode kernels running on an SBI firmware. The dump
//! adds the supervisor trap CSRs to the frame the host supplied; the halt
//! asks the firmware for a shutdown with reason "system failure", which
//! firmware-side crash capture can key on.

use crate::nmi::ds::NmiFrame;
use crate::nmi::infrastructure::di::traits::NmiPlatform;
use crate::util::sbi;
use crate::{nmi_emerg, nmi_notice, NAME};
use riscv::register::{scause, sepc, stval};

pub struct SbiPlatform;

impl NmiPlatform for SbiPlatform {
    fn dump_context(&self, frame: &NmiFrame) {
        nmi_notice!("{}", frame);
        nmi_notice!(
            "SEPC: {:#018x} SCAUSE: {:#018x} STVAL: {:#018x}",
            sepc::read(),
            scause::read().bits(),
            stval::read()
        );
    }

    fn halt(&self, reason: &str) -> ! {
        nmi_emerg!("{}: {}, resetting", NAME, reason);
        sbi::system::fail()
    }
}
