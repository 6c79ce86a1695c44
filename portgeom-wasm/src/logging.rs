use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) { return; }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&msg),
            Level::Warn => console::warn_1(&msg),
            Level::Info => console::info_1(&msg),
            Level::Debug => console::debug_1(&msg),
            Level::Trace => console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Route `log` records to the browser console. Level names as in `log` ("warn", "debug", ...); default info.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    let filter = level.and_then(|s| s.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info);
    // a second call only changes the level
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}
