// nmimgr/src/selftest/capture.rs

//! Per-thread capture of `log` records for unit tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

#[derive(Debug, Clone)]
pub struct Line {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static LINES: RefCell<Vec<Line>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = Line {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        LINES.with(|lines| lines.borrow_mut().push(line));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Installs the capturing logger once per process and clears this thread's
/// buffer.
pub fn start() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("another logger is installed");
        log::set_max_level(LevelFilter::Trace);
    });
    LINES.with(|lines| lines.borrow_mut().clear());
}

/// Drains the lines logged on this thread since the last call.
pub fn take() -> Vec<Line> {
    LINES.with(|lines| lines.borrow_mut().drain(..).collect())
}
