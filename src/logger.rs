use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

use crate::{
    format::{self, CallSite},
    output::Output,
    severity::Severity,
};

/// Process-wide writer, created with default destinations on first access.
static INSTANCE: LazyLock<ConsoleLogger> = LazyLock::new(ConsoleLogger::new);

/// Returns the process-wide writer.
pub fn instance() -> &'static ConsoleLogger {
    &INSTANCE
}

/// Timestamping, color-coding console writer.
///
/// One mutex guards the destination table, so every line is written whole and
/// lines from different threads and levels never interleave. The lock is held
/// while a destination's `write` runs: logging from inside a destination
/// deadlocks.
pub struct ConsoleLogger {
    outputs: Mutex<[Output; Severity::COUNT]>,
    /// Threshold for records coming through the `log` facade.
    level: RwLock<LevelFilter>,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Every level writes to standard output.
    pub fn new() -> Self {
        Self::with_outputs(std::array::from_fn(|_| Output::stdout()))
    }

    /// Destinations indexed by `Severity::index`.
    pub fn with_outputs(outputs: [Output; Severity::COUNT]) -> Self {
        Self {
            outputs: Mutex::new(outputs),
            level: RwLock::new(LevelFilter::Info),
        }
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn lock(&self) -> MutexGuard<'_, [Output; Severity::COUNT]> {
        self.outputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebinds the destination of one level. Other levels keep theirs.
    pub fn set_output(&self, severity: Severity, output: Output) {
        self.lock()[severity.index()] = output;
    }

    /// Replaces every destination at once.
    pub(crate) fn replace_outputs(&self, outputs: [Output; Severity::COUNT]) {
        *self.lock() = outputs;
    }

    /// Writes the concatenation of `fragments`, no separator inserted.
    pub fn log<I, S>(&self, severity: Severity, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_log(severity, fragments).ok();
    }

    pub fn try_log<I, S>(&self, severity: Severity, fragments: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write(Some(severity), None, &concat(fragments))
    }

    /// Like `log`, with the call site written ahead of the message.
    pub fn log_at<I, S>(&self, severity: Severity, site: &CallSite<'_>, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_log_at(severity, site, fragments).ok();
    }

    pub fn try_log_at<I, S>(
        &self,
        severity: Severity,
        site: &CallSite<'_>,
        fragments: I,
    ) -> std::io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write(Some(severity), Some(site), &concat(fragments))
    }

    /// Logs at a raw ordinal. Ordinals outside the severity set are tagged
    /// ` [UNKNOWN]: `, never colored, and go to the `Info` destination.
    pub fn log_ordinal<I, S>(&self, ordinal: usize, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_log_ordinal(ordinal, fragments).ok();
    }

    pub fn try_log_ordinal<I, S>(&self, ordinal: usize, fragments: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write(Severity::from_index(ordinal), None, &concat(fragments))
    }

    fn write(
        &self,
        severity: Option<Severity>,
        site: Option<&CallSite<'_>>,
        message: &str,
    ) -> std::io::Result<()> {
        let mut outputs = self.lock();
        let output = &mut outputs[severity.unwrap_or(Severity::Info).index()];
        let colorize = output.is_console();
        let out = output.stream();
        if severity == Some(Severity::Simple) {
            writeln!(out, "{message}")?;
            return out.flush();
        }
        let line = format::line(severity, site, message, Local::now(), colorize);
        out.write_all(line.as_bytes())?;
        out.flush()?;
        writeln!(out)?;
        out.flush()
    }

    /// Flushes every destination.
    pub fn flush_all(&self) -> std::io::Result<()> {
        for output in self.lock().iter_mut() {
            output.stream().flush()?;
        }
        Ok(())
    }
}

fn concat<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments.into_iter().fold(String::new(), |mut message, fragment| {
        message.push_str(fragment.as_ref());
        message
    })
}

impl ConsoleLogger {
    /// Whether a `log` facade record at `level` passes the threshold.
    pub fn enabled(&self, level: log::Level) -> bool {
        level <= self.level()
    }

    /// Writes a `log` facade record. Warnings and errors that carry a file
    /// get a call site, with the module path as the function column.
    pub fn log_record(&self, record: &Record) {
        if !self.enabled(record.level()) {
            return;
        }
        let severity = Severity::from(record.level());
        let message = record.args().to_string();
        match (severity, record.file()) {
            (Severity::Warning | Severity::Error, Some(file)) => {
                let site = CallSite {
                    file,
                    line: record.line().unwrap_or_default(),
                    function: record.module_path().unwrap_or(record.target()),
                };
                self.log_at(severity, &site, [message]);
            }
            _ => self.log(severity, [message]),
        }
    }
}

/// `log` backend forwarding to the process-wide writer.
///
/// `ConsoleLogger` must not implement `Log`: the `Arc<T: Log>` impl would
/// shadow `ConsoleLogger::log` on `Arc<ConsoleLogger>`.
pub(crate) struct GlobalLogger;

pub(crate) static GLOBAL_LOGGER: GlobalLogger = GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        instance().enabled(metadata.level())
    }

    fn log(&self, record: &Record) {
        instance().log_record(record);
    }

    fn flush(&self) {
        instance().flush_all().ok();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use chrono::NaiveDateTime;

    use super::*;
    use crate::output::test_utils::SharedBuffer;

    fn logger_into(buffer: &SharedBuffer, is_console: bool) -> ConsoleLogger {
        ConsoleLogger::with_outputs(std::array::from_fn(|_| {
            Output::new(buffer.clone(), is_console)
        }))
    }

    #[test]
    fn test_simple_is_raw_on_every_destination() {
        for is_console in [true, false] {
            let buffer = SharedBuffer::default();
            let logger = logger_into(&buffer, is_console);
            logger.log(Severity::Simple, ["raw"]);
            logger.log(Severity::Simple, ["a", "b", "", "c"]);
            logger.log(Severity::Simple, Vec::<String>::new());
            assert_eq!(buffer.contents(), "raw\nabc\n\n");
        }
    }

    #[test]
    fn test_info_on_console() {
        let buffer = SharedBuffer::default();
        let logger = logger_into(&buffer, true);
        logger.log(Severity::Info, ["value=".to_string(), 42.to_string()]);
        let contents = buffer.contents();
        assert!(contents.starts_with("\x1b[32m"));
        assert!(contents.ends_with(" [INFO]:    \x1b[0mvalue=42\n"));
        assert_eq!(
            contents.len(),
            "\x1b[32m2024-01-02 03:04:05:  [INFO]:    \x1b[0mvalue=42\n".len()
        );
    }

    #[test]
    fn test_no_escapes_off_console() {
        let buffer = SharedBuffer::default();
        let logger = logger_into(&buffer, false);
        for severity in Severity::ALL {
            logger.log(severity, ["message"]);
        }
        let site = CallSite {
            file: "src/lib.rs",
            line: 1,
            function: "f",
        };
        logger.log_at(Severity::Error, &site, ["boom"]);
        logger.log_ordinal(99, ["?"]);
        let contents = buffer.contents();
        assert!(!contents.contains('\x1b'));
        assert_eq!(contents.lines().count(), Severity::COUNT + 2);
        assert!(contents.contains(" [ERROR]:   src/lib.rs:1::f: boom\n"));
    }

    #[test]
    fn test_timestamp_matches_wall_clock() {
        let buffer = SharedBuffer::default();
        let logger = logger_into(&buffer, false);
        let before = Local::now().naive_local();
        logger.log(Severity::Warning, ["now"]);
        let after = Local::now().naive_local();
        let contents = buffer.contents();
        let (stamp, rest) = contents.split_once(":  [WARNING]: ").unwrap();
        assert_eq!(rest, "now\n");
        let stamp = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(stamp >= before - chrono::Duration::seconds(1));
        assert!(stamp <= after + chrono::Duration::seconds(1));
    }

    #[test]
    fn test_unknown_ordinal() {
        let buffer = SharedBuffer::default();
        let others = SharedBuffer::default();
        let logger = logger_into(&others, true);
        logger.set_output(Severity::Info, Output::new(buffer.clone(), true));
        logger.log_ordinal(Severity::COUNT, ["what"]);
        let contents = buffer.contents();
        assert!(contents.ends_with(":  [UNKNOWN]: what\n"), "{contents:?}");
        assert!(!contents.contains('\x1b'));
        assert!(others.contents().is_empty());

        logger.log_ordinal(Severity::Error.index(), ["known"]);
        assert!(others.contents().starts_with("\x1b[31m"));
    }

    #[test]
    fn test_set_output_only_affects_one_level() {
        let shared = SharedBuffer::default();
        let errors = SharedBuffer::default();
        let logger = logger_into(&shared, false);
        logger.set_output(Severity::Error, Output::writer(errors.clone()));
        logger.log(Severity::Error, ["e"]);
        logger.log(Severity::Warning, ["w"]);
        logger.log(Severity::Simple, ["s"]);
        assert!(errors.contents().ends_with(" [ERROR]:   e\n"));
        assert_eq!(errors.contents().lines().count(), 1);
        let shared = shared.contents();
        assert!(shared.contains(" [WARNING]: w\n"));
        assert!(shared.ends_with("\ns\n"));
        assert!(!shared.contains("[ERROR]"));
    }

    #[test]
    fn test_concurrent_lines_do_not_interleave() {
        let buffer = SharedBuffer::default();
        let logger = Arc::new(logger_into(&buffer, true));
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    let payload = format!("thread {i} ").repeat(50);
                    logger.log(Severity::Result, ["<", payload.as_str(), ">"]);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let contents = buffer.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 16);
        for line in lines {
            let (_, body) = line.split_once("\x1b[0m<").unwrap();
            let body = body.strip_suffix('>').unwrap();
            let first = body.split(' ').take(2).collect::<Vec<_>>().join(" ");
            assert_eq!(body, format!("{first} ").repeat(50));
        }
    }

    #[test]
    fn test_log_facade_records() {
        let buffer = SharedBuffer::default();
        let logger = logger_into(&buffer, false);
        logger.log_record(
            &Record::builder()
                .level(log::Level::Error)
                .args(format_args!("disk {} full", 3))
                .file(Some("src/disk.rs"))
                .line(Some(7))
                .module_path(Some("app::disk"))
                .build(),
        );
        logger.log_record(
            &Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log_record(
            &Record::builder()
                .level(log::Level::Info)
                .args(format_args!("started"))
                .file(Some("src/main.rs"))
                .build(),
        );
        let contents = buffer.contents();
        assert!(contents.contains(" [ERROR]:   src/disk.rs:7::app::disk: disk 3 full\n"));
        assert!(contents.contains(" [INFO]:    started\n"));
        assert!(!contents.contains("hidden"));

        logger.set_level(LevelFilter::Debug);
        logger.log_record(
            &Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("shown"))
                .build(),
        );
        assert!(buffer.contents().ends_with(" [RESULT]:  shown\n"));
    }

    #[test]
    fn test_log_through_arc_clones() {
        let buffer = SharedBuffer::default();
        let logger = Arc::new(logger_into(&buffer, false));
        let clone = Arc::clone(&logger);
        clone.log(Severity::Info, ["from ", "clone"]);
        logger.log_at(
            Severity::Warning,
            &CallSite {
                file: "src/worker.rs",
                line: 3,
                function: "worker::run",
            },
            ["from arc"],
        );
        let contents = buffer.contents();
        assert!(contents.contains(" [INFO]:    from clone\n"));
        assert!(contents.ends_with(" [WARNING]: src/worker.rs:3::worker::run: from arc\n"));
    }

    #[test]
    fn test_global_logger_is_enabled_by_instance_level() {
        assert_eq!(
            GLOBAL_LOGGER.enabled(&Metadata::builder().level(log::Level::Trace).build()),
            instance().enabled(log::Level::Trace)
        );
    }

    #[test]
    fn test_instance_is_shared() {
        assert!(std::ptr::eq(instance(), instance()));
    }
}
