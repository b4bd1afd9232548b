// nmimgr/src/util/sbi/mod.rs

mod api;

pub use self::api::*;
