//! Rate-limited, file-rotating logger.
//!
//! [`RateLimitedLogger`] writes every admitted line to two sinks: a console
//! sink (stderr by default, ANSI colored) and a per-run log file. An exact
//! message repeated within the suppression interval is dropped silently.
//!
//! Lines are formatted by `tracing-subscriber` `fmt` layers behind a private
//! [`Dispatch`], so the logger works the same whether or not the process has
//! a global subscriber installed.
//!
//! # Concurrency
//!
//! One mutex guards the suppression map, the level, the updated-files set and
//! both sink writes for the duration of a single call. Concurrent callers are
//! safe; their writes are serialized.
//!
//! # Example
//!
//! ```no_run
//! use gitspace_plugin_sdk::logger::RateLimitedLogger;
//!
//! let logger = RateLimitedLogger::new("hello-world")?;
//! logger.info("plugin starting", &[("version", &"1.0.0")]);
//! logger.info("plugin starting", &[]); // suppressed: same text within 5s
//! # Ok::<(), gitspace_plugin_sdk::LoggerError>(())
//! ```

mod file;
mod summary;
mod suppression;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{dispatcher, Dispatch, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;

pub use file::{create_log_file, log_file_name};
pub use summary::render_log_summary;
pub use suppression::{SuppressionGate, DEFAULT_INTERVAL};

use crate::error::LoggerError;
use crate::paths::plugin_log_dir;

/// A structured key/value pair attached to a log line.
pub type Field<'a> = (&'a str, &'a dyn fmt::Display);

/// Renders fields as ` key=value` pairs.
pub(crate) struct Fields<'a>(pub &'a [Field<'a>]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.0 {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// Emit one event through the current dispatcher.
pub(crate) fn emit(level: Level, message: &str, fields: &[Field<'_>]) {
    let fields = Fields(fields);
    if level == Level::ERROR {
        tracing::error!("{message}{fields}");
    } else if level == Level::WARN {
        tracing::warn!("{message}{fields}");
    } else if level == Level::INFO {
        tracing::info!("{message}{fields}");
    } else if level == Level::DEBUG {
        tracing::debug!("{message}{fields}");
    } else {
        tracing::trace!("{message}{fields}");
    }
}

/// Where the log file lives.
#[derive(Debug, Clone)]
enum Location {
    /// `<home>/.ssot/gitspace/logs/<name>/<name>_...`
    Component(String),
    /// `<dir>/<prefix>_...`
    Directory { dir: PathBuf, prefix: String },
}

/// Builder for [`RateLimitedLogger`].
pub struct LoggerBuilder {
    location: Location,
    interval: Duration,
    level: LevelFilter,
    console: Option<BoxMakeWriter>,
    console_ansi: bool,
}

impl LoggerBuilder {
    /// Log under the derived directory for a component.
    pub fn component(name: impl Into<String>) -> Self {
        Self::with_location(Location::Component(name.into()))
    }

    /// Log under an explicit directory with an explicit file prefix.
    pub fn directory(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self::with_location(Location::Directory {
            dir: dir.into(),
            prefix: prefix.into(),
        })
    }

    fn with_location(location: Location) -> Self {
        Self {
            location,
            interval: DEFAULT_INTERVAL,
            level: LevelFilter::DEBUG,
            console: None,
            console_ansi: true,
        }
    }

    /// Set the suppression interval.
    ///
    /// Default: 5 seconds
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the most verbose level that is emitted.
    ///
    /// Default: DEBUG
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Replace the console sink (stderr by default).
    pub fn console_writer<M>(mut self, make_writer: M) -> Self
    where
        M: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.console = Some(BoxMakeWriter::new(make_writer));
        self
    }

    /// Enable or disable ANSI colors on the console sink.
    ///
    /// Default: enabled
    pub fn console_ansi(mut self, ansi: bool) -> Self {
        self.console_ansi = ansi;
        self
    }

    /// Create the log directory and file, then build the logger.
    pub fn build(self) -> Result<RateLimitedLogger, LoggerError> {
        let (dir, prefix) = match self.location {
            Location::Component(name) => (plugin_log_dir(&name)?, name),
            Location::Directory { dir, prefix } => (dir, prefix),
        };

        let today = chrono::Local::now().date_naive();
        let (file, log_file_path) = create_log_file(&dir, &prefix, today)?;

        let console = self
            .console
            .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(console)
            .with_ansi(self.console_ansi)
            .with_timer(ChronoLocal::rfc_3339())
            .with_target(false);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_timer(ChronoLocal::rfc_3339())
            .with_target(false);

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        Ok(RateLimitedLogger {
            dispatch: Dispatch::new(subscriber),
            log_file_path,
            state: Mutex::new(LoggerState {
                gate: SuppressionGate::new(self.interval),
                level: self.level,
                updated_files: BTreeSet::new(),
            }),
        })
    }
}

/// Mutable state guarded by the logger's lock.
struct LoggerState {
    gate: SuppressionGate,
    level: LevelFilter,
    updated_files: BTreeSet<PathBuf>,
}

/// Leveled dual-sink logger with exact-repeat suppression.
///
/// Owns one log file for the lifetime of the value; the file is closed when
/// the logger is dropped.
pub struct RateLimitedLogger {
    dispatch: Dispatch,
    log_file_path: PathBuf,
    state: Mutex<LoggerState>,
}

impl RateLimitedLogger {
    /// Logger for a component, writing under `<home>/.ssot/gitspace/logs/<component>/`.
    pub fn new(component: &str) -> Result<Self, LoggerError> {
        LoggerBuilder::component(component).build()
    }

    /// Logger writing `<prefix>_<YYYYMMDD>_<NN>.log` files into `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>, prefix: &str) -> Result<Self, LoggerError> {
        LoggerBuilder::directory(dir, prefix).build()
    }

    /// Start configuring a logger for a component.
    pub fn builder(component: &str) -> LoggerBuilder {
        LoggerBuilder::component(component)
    }

    /// Path of this run's log file.
    pub fn log_file_path(&self) -> &Path {
        &self.log_file_path
    }

    /// Log a line at `level`.
    ///
    /// The line is dropped if `level` is filtered out or if the exact same
    /// `message` was emitted less than one interval ago. Fields do not take
    /// part in the suppression key.
    pub fn log(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        let mut state = self.lock();
        if level > state.level {
            return;
        }
        if !state.gate.admit(message, Instant::now()) {
            return;
        }

        dispatcher::with_default(&self.dispatch, || emit(level, message, fields));
        state.updated_files.insert(self.log_file_path.clone());
    }

    /// Log at DEBUG.
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::DEBUG, message, fields);
    }

    /// Log at INFO.
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::INFO, message, fields);
    }

    /// Log at WARN.
    pub fn warn(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::WARN, message, fields);
    }

    /// Log at ERROR.
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::ERROR, message, fields);
    }

    /// Change the most verbose level that is emitted.
    pub fn set_level(&self, level: LevelFilter) {
        self.lock().level = level;
    }

    /// Current level.
    pub fn level(&self) -> LevelFilter {
        self.lock().level
    }

    /// Log files written to (not merely opened) during this run.
    pub fn updated_log_files(&self) -> Vec<PathBuf> {
        self.lock().updated_files.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RateLimitedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimitedLogger")
            .field("log_file_path", &self.log_file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    /// In-memory console sink.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logger_in(dir: &Path, interval: Duration) -> (RateLimitedLogger, SharedBuf) {
        let console = SharedBuf::default();
        let sink = console.clone();
        let logger = LoggerBuilder::directory(dir, "test")
            .interval(interval)
            .console_writer(move || sink.clone())
            .console_ansi(false)
            .build()
            .unwrap();
        (logger, console)
    }

    fn file_contents(logger: &RateLimitedLogger) -> String {
        std::fs::read_to_string(logger.log_file_path()).unwrap()
    }

    #[test]
    fn test_repeat_emitted_once_to_each_sink() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, console) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        logger.info("x-repeated", &[]);
        logger.info("x-repeated", &[]);

        assert_eq!(console.contents().matches("x-repeated").count(), 1);
        assert_eq!(file_contents(&logger).matches("x-repeated").count(), 1);
    }

    #[test]
    fn test_repeat_after_interval_emitted_again() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, console) = logger_in(tmp.path(), Duration::from_millis(50));

        logger.warn("x-again", &[]);
        logger.warn("x-again", &[]);
        thread::sleep(Duration::from_millis(80));
        logger.warn("x-again", &[]);

        assert_eq!(console.contents().matches("x-again").count(), 2);
        assert_eq!(file_contents(&logger).matches("x-again").count(), 2);
    }

    #[test]
    fn test_distinct_messages_not_throttled() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, console) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        for i in 0..10 {
            logger.debug(&format!("burst-{i}"), &[]);
        }
        let out = console.contents();
        for i in 0..10 {
            assert!(out.contains(&format!("burst-{i}")));
        }
    }

    #[test]
    fn test_fields_and_level_rendered() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, _console) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        logger.error("Error handling message", &[("type", &2u32), ("error", &"boom")]);

        let line = file_contents(&logger);
        assert!(line.contains("ERROR"));
        assert!(line.contains("Error handling message type=2 error=boom"));
        // File sink never carries color codes.
        assert!(!line.contains('\u{1b}'));
    }

    #[test]
    fn test_level_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, console) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        logger.set_level(LevelFilter::WARN);
        assert_eq!(logger.level(), LevelFilter::WARN);
        logger.info("quiet-info", &[]);
        logger.error("loud-error", &[]);

        let out = console.contents();
        assert!(!out.contains("quiet-info"));
        assert!(out.contains("loud-error"));

        // A filtered line did not consume its suppression slot.
        logger.set_level(LevelFilter::DEBUG);
        logger.info("quiet-info", &[]);
        assert!(console.contents().contains("quiet-info"));
    }

    #[test]
    fn test_updated_files_tracks_writes_only() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, _console) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        assert!(logger.updated_log_files().is_empty());
        logger.info("first write", &[]);
        assert_eq!(
            logger.updated_log_files(),
            vec![logger.log_file_path().to_path_buf()]
        );
    }

    #[test]
    fn test_two_loggers_get_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let (a, _) = logger_in(tmp.path(), DEFAULT_INTERVAL);
        let (b, _) = logger_in(tmp.path(), DEFAULT_INTERVAL);

        assert_ne!(a.log_file_path(), b.log_file_path());
        a.info("from-a", &[]);
        b.info("from-b", &[]);
        assert!(!file_contents(&a).contains("from-b"));
        assert!(!file_contents(&b).contains("from-a"));

        let names: Vec<String> = [&a, &b]
            .iter()
            .map(|l| {
                l.log_file_path()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert!(names[0].ends_with("_00.log"));
        assert!(names[1].ends_with("_01.log"));
    }

    #[test]
    fn test_concurrent_callers() {
        let tmp = tempfile::tempdir().unwrap();
        let (logger, console) = logger_in(tmp.path(), DEFAULT_INTERVAL);
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = logger.clone();
                thread::spawn(move || {
                    for _ in 0..20 {
                        logger.info("shared-line", &[]);
                        logger.info(&format!("thread-{t}"), &[]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let out = console.contents();
        assert_eq!(out.matches("shared-line").count(), 1);
        for t in 0..8 {
            assert_eq!(out.matches(&format!("thread-{t}\n")).count(), 1);
        }
    }
}
