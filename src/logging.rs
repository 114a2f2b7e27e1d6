//! `log` backend that writes to the browser console.
//!
//! Reducers and executors log through the `log` macros; in native unit tests
//! no logger is installed and the calls are no-ops, so nothing ever reaches
//! the wasm-only `console.*` imports there.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        let value = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::log_1(&value),
        }
    }

    fn flush(&self) {}
}

/// Level baked in at build time. `LOG_LEVEL` wins when set, otherwise debug
/// builds log everything down to `debug`.
pub fn configured_level() -> LevelFilter {
    parse_level(option_env!("LOG_LEVEL")).unwrap_or(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })
}

fn parse_level(raw: Option<&str>) -> Option<LevelFilter> {
    raw.and_then(|s| s.trim().parse::<LevelFilter>().ok())
}

/// Install the console logger. Calling it twice is harmless.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(configured_level());
    }
}
