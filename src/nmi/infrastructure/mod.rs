// nmimgr/src/nmi/infrastructure/mod.rs

//! # NMI Infrastructure Module
//!
//! The parser, the classifier, the registration manager, the host
//! capability traits with the global dispatch point, and the RISC-V
//! platform binding.

pub mod classifier;
pub mod di;
pub mod parser;
pub mod registration;

#[cfg(target_arch = "riscv64")]
pub mod low_level;
