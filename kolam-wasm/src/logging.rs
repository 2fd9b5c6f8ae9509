use wasm_bindgen::prelude::*;
use web_sys::console;

static LOGGER: WasmLog = WasmLog;

/// Forwards `log` records to the browser console with a colored level tag.
#[derive(Default)]
pub struct WasmLog;

impl log::Log for WasmLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let (out, name, color): (fn(&JsValue, &JsValue), &str, &str) = match record.level() {
            log::Level::Trace => (console::log_2, "trace", "color:plum"),
            log::Level::Debug => (console::log_2, "debug", "color:cyan"),
            log::Level::Info => (console::info_2, "info", "color:mediumseagreen"),
            log::Level::Warn => (console::warn_2, "warn", "color:goldenrod"),
            log::Level::Error => (console::error_2, "error", "color:red"),
        };
        let msg = format!("%c{}\t{}", name, record.args());
        out(&JsValue::from_str(&msg), &JsValue::from_str(color));
    }

    fn flush(&self) {}
}

pub(crate) fn level_filter(level: Option<String>) -> log::LevelFilter {
    match level.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("off") => log::LevelFilter::Off,
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// Install the console logger (once) and set the level; unknown or missing
/// levels mean `info`. Returns false if another logger was already set.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(level_filter(level));
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level_filter(Some("TRACE".into())), log::LevelFilter::Trace);
        assert_eq!(level_filter(Some("warn".into())), log::LevelFilter::Warn);
        assert_eq!(level_filter(Some("loud".into())), log::LevelFilter::Info);
        assert_eq!(level_filter(None), log::LevelFilter::Info);
    }
}
