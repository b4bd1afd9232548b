// nmimgr/src/console.rs

//! # Console Logging
//!
//! Severity macros used throughout the crate and a `log::Log` backend that
//! writes to any `core::fmt::Write` console.
//!
//! Kernel severities map onto `log` levels as follows: info is `Debug`,
//! notice is `Info`, warning is `Warn`, error is `Error`. Emergencies are
//! `Error` records on the [`EMERG_TARGET`] target so they can be filtered
//! apart from ordinary errors.

use core::fmt::Write;
use core::sync::atomic::{AtomicUsize, Ordering};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// Target of every record emitted by this crate, emergencies excepted.
pub const LOG_TARGET: &str = "nmimgr";

/// Target of the emergency line written right before a halt.
pub const EMERG_TARGET: &str = "nmimgr::emerg";

/// Informational output (parameter echo).
#[macro_export]
macro_rules! nmi_info {
    ($($arg:tt)*) => {
        $crate::__log::debug!(target: $crate::console::LOG_TARGET, $($arg)*)
    };
}

/// Normal but significant events.
#[macro_export]
macro_rules! nmi_notice {
    ($($arg:tt)*) => {
        $crate::__log::info!(target: $crate::console::LOG_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! nmi_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!(target: $crate::console::LOG_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! nmi_err {
    ($($arg:tt)*) => {
        $crate::__log::error!(target: $crate::console::LOG_TARGET, $($arg)*)
    };
}

/// The system is about to stop.
#[macro_export]
macro_rules! nmi_emerg {
    ($($arg:tt)*) => {
        $crate::__log::error!(target: $crate::console::EMERG_TARGET, $($arg)*)
    };
}

/// A logger writing `[LEVEL] target message` lines to a console.
///
/// Records are logged from NMI context, which may interrupt a holder of the
/// console lock on the same hart. The logger therefore never waits for the
/// lock: a record that finds it taken is dropped and counted, and the count
/// is reported with the next record that gets through.
pub struct ConsoleLogger<W> {
    level: LevelFilter,
    writer: Mutex<W>,
    dropped: AtomicUsize,
}

impl<W: Write + Send + 'static> ConsoleLogger<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            level: LevelFilter::Info,
            writer: Mutex::new(writer),
            dropped: AtomicUsize::new(0),
        }
    }

    pub const fn with_max_level(writer: W, level: LevelFilter) -> Self {
        Self {
            level,
            writer: Mutex::new(writer),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Installs this logger as the global `log` backend.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }

    /// Number of records lost to lock contention and not yet reported.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<W: Write + Send> Log for ConsoleLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut writer = match self.writer.try_lock() {
            Some(writer) => writer,
            None => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            let _ = write!(writer, "[WARN] {} {} log records dropped\n", LOG_TARGET, dropped);
        }

        let target = if !record.target().is_empty() {
            record.target()
        } else {
            record.module_path().unwrap_or_default()
        };
        let _ = write!(writer, "[{}] {} {}\n", record.level(), target, record.args());
    }

    fn flush(&self) {}
}
