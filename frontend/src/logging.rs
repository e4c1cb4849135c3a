//! Route `tracing` events to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use wasm_bindgen::JsValue;

use crate::config;

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_new(config::LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));

    // The wasm target has no system clock, so events are not timestamped.
    let console_log = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter);

    if tracing_subscriber::registry()
        .with(filter)
        .with(console_log)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging was already initialised");
    }
}

/// Creates one [ConsoleWriter] per event, remembering the event's level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers a formatted event and hands it to `console.*` when dropped.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }

        let message = JsValue::from_str(text);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            Level::DEBUG => web_sys::console::debug_1(&message),
            _ => web_sys::console::log_1(&message),
        }
    }
}
