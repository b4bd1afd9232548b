// nmimgr/src/util/mod.rs

#[cfg(target_arch = "riscv64")]
pub mod sbi;
