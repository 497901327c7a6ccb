//! Log capture for asserting on emitted size lines
//!
//! Installs a process-wide logger once and keeps records per thread, so tests
//! running in parallel only see their own lines. Only info records from the
//! reporter are kept.

#![allow(dead_code)]

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

/// Log target of the size line
pub const REPORTER_TARGET: &str = "cookie_size::reporter";

thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Info && record.target() == REPORTER_TARGET {
            LINES.with(|l| l.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its result with the size lines it logged
pub fn captured<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER)
            .expect("capture logger must be the only logger in this test binary");
        log::set_max_level(LevelFilter::Info);
    });
    LINES.with(|l| l.borrow_mut().clear());
    let out = f();
    (out, LINES.with(|l| l.take()))
}
