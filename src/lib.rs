//! # mtlog-console
//! Process-wide console log writer with timestamped, tagged and colored severity levels.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! mtlog-console = "0.1.0"
//! ```
//!
//! ```rust
//! use mtlog_console::{log_info, log_simple, log_warning};
//!
//! mtlog_console::init_console();
//! log_simple!("raw line, no decoration");
//! log_info!("value=", 42);
//! // prints "<date> <time>:  [WARNING]: src/main.rs:<line>::<function>: low disk"
//! log_warning!("low ", "disk");
//! ```
//!
//! ## Redirecting levels
//! Every level writes to stdout by default. Each level can be rebound on its own,
//! to a console stream, a file, any writer or a sink.
//! Escape codes are only emitted on destinations flagged as consoles.
//!
//! ```rust
//! use mtlog_console::{Output, Severity, logger_config};
//!
//! let path = std::env::temp_dir().join("mtlog_console_doc.log");
//! std::fs::remove_file(&path).ok();
//! let logger = logger_config()
//!     .with_stderr() // warnings and errors to stderr
//!     .with_output(Severity::Result, Output::file(&path).expect("Unable to open log file"))
//!     .build();
//! logger.log(Severity::Result, ["answer=", "42"]);
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with(" [RESULT]:  answer=42\n"));
//! ```
//!
//! ## Multi-threaded logging
//! Lines are written under a single lock, so concurrent lines never interleave.
//!
//! ```rust
//! use std::sync::Arc;
//! use mtlog_console::{ConsoleLogger, Severity, log_info};
//!
//! let logger = Arc::new(ConsoleLogger::new());
//! let handles: Vec<_> = (0..5).map(|i| {
//!     let logger = Arc::clone(&logger);
//!     std::thread::spawn(move || {
//!         log_info!(logger: logger, "Hello, world from thread ", i, "!");
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## `log` facade
//! ```rust
//! let _logger = mtlog_console::logger_config()
//!     .with_level(log::LevelFilter::Debug)
//!     .init_global();
//! log::info!("Hello, world!");
//! log::debug!("debug records are written as results");
//! ```

mod console;
mod format;
mod logger;
mod macros;
mod output;
mod severity;

use std::path::Path;

use log::LevelFilter;

pub use console::init_console;
pub use format::CallSite;
pub use logger::{ConsoleLogger, instance};
pub use output::Output;
pub use severity::Severity;

/// Builder for configuring the writer.
pub struct ConfigBuilder {
    outputs: [Option<Output>; Severity::COUNT],
    no_color: bool,
    log_level: LevelFilter,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            outputs: Default::default(),
            no_color: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl ConfigBuilder {
    fn into_outputs(self) -> [Output; Severity::COUNT] {
        let no_color = self.no_color;
        self.outputs.map(|output| {
            let output = output.unwrap_or_default();
            if no_color {
                output.with_color(false)
            } else {
                output
            }
        })
    }

    /// Sets the destination of one level.
    pub fn with_output(mut self, severity: Severity, output: Output) -> Self {
        self.outputs[severity.index()] = Some(output);
        self
    }
    /// Sends warnings and errors to stderr.
    pub fn with_stderr(self) -> Self {
        self.with_output(Severity::Warning, Output::stderr())
            .with_output(Severity::Error, Output::stderr())
    }
    /// Sends every level to a log file.
    /// The file is created if it does not exist and appended to if it does.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, std::io::Error> {
        let file = output::open_append(path)?;
        for output in &mut self.outputs {
            *output = Some(Output::writer(file.try_clone()?));
        }
        Ok(self)
    }
    /// Maybe sends every level to a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => self.with_log_file(path),
            None => Ok(self),
        }
    }
    /// Never emit escape codes, even on consoles.
    pub fn no_color(self) -> Self {
        Self {
            no_color: true,
            ..self
        }
    }
    /// Sets the maximum level of records accepted from the `log` facade.
    pub fn with_level(self, log_level: LevelFilter) -> Self {
        Self { log_level, ..self }
    }
    /// Builds a standalone writer, to be passed around explicitly.
    pub fn build(self) -> ConsoleLogger {
        let log_level = self.log_level;
        let logger = ConsoleLogger::with_outputs(self.into_outputs());
        logger.set_level(log_level);
        logger
    }
    /// Applies the configuration to the process-wide writer and registers it
    /// as the `log` backend. Calling it again reconfigures the same writer.
    pub fn init_global(self) -> &'static ConsoleLogger {
        let log_level = self.log_level;
        let logger = instance();
        logger.replace_outputs(self.into_outputs());
        logger.set_level(log_level);
        log::set_logger(&logger::GLOBAL_LOGGER).ok();
        log::set_max_level(log_level);
        logger
    }
}

/// Returns a default ConfigBuilder for configuring the writer.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
