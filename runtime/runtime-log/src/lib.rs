//! # Debug Logging Backend
//!
//! [`log`] facade backend for protection domains. Records are formatted
//! through [`core::fmt`] straight into a [`DebugSink`], with no allocation
//! and no buffering, so the facade works in components that have neither a
//! heap nor a console, only the kernel's debug-output service.
//!
//! Components register a `static` logger during `init`:
//!
//! ```rust,ignore
//! static LOGGER: DebugLogger = DebugLogger::new(LevelFilter::Info, &KERNEL_DEBUG);
//!
//! fn init(&mut self) {
//!     let _ = LOGGER.init();
//!     log::info!("started");
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use core::fmt::{self, Write};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Destination for formatted log text.
///
/// Production images forward the text to the kernel debug-output
/// service; tests capture it in a buffer. Implementations receive the
/// text in `&str` chunks as the formatter produces them and must not
/// assume one call per record.
pub trait DebugSink: Sync {
    fn write(&self, text: &str);
}

/// [`Log`] implementation writing `[LEVEL] target: message` lines to a
/// [`DebugSink`].
pub struct DebugLogger {
    max_level: LevelFilter,
    sink: &'static dyn DebugSink,
}

impl DebugLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter, sink: &'static dyn DebugSink) -> Self {
        Self { max_level, sink }
    }

    /// Registers this logger with the `log` facade. Call once during
    /// early init, from a `static`.
    ///
    /// # Errors
    ///
    /// Fails if a logger is already registered.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

/// Adapter turning a [`DebugSink`] into a [`fmt::Write`] target.
struct SinkWriter<'a> {
    sink: &'a dyn DebugSink,
}

impl fmt::Write for SinkWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.write(s);
        Ok(())
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut out = SinkWriter { sink: self.sink };
        // a formatting failure has nowhere to go; drop the record
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        // debug output is unbuffered
    }
}
