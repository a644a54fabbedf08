//! Browser console plumbing: panic hook and a `log` sink.
//!
//! Both are installed once per page and only on wasm32; native test
//! builds keep the default panic output and no logger.

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg.into()),
            log::Level::Warn => web_sys::console::warn_1(&msg.into()),
            log::Level::Info => web_sys::console::info_1(&msg.into()),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg.into()),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

pub(crate) fn setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("FP WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(log::LevelFilter::Info);
            }
        });
    }
}
