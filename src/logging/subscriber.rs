//! `tracing` subscriber driven by the logging configuration.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::format::{Attribute, LogFormat};
use crate::config::{LogLevel, LoggingSection};

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to install the global log subscriber: {0}")]
    Install(String),
}

/// Initializes the logging subsystem.
///
/// `RUST_LOG` takes precedence over the configured level; `level_override`
/// (from the command line) takes precedence over the file.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(section: &LoggingSection, level_override: Option<LogLevel>) -> Result<(), LoggingError> {
    let level = level_override.unwrap_or(section.level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(TemplateFormatter::new(section))
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// Event formatter that renders a `%`-style template.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    format: LogFormat,
    date_format: String,
    started: Instant,
}

impl TemplateFormatter {
    #[must_use]
    pub fn new(section: &LoggingSection) -> Self {
        Self {
            format: section.format.clone(),
            date_format: section.date_format.clone(),
            started: Instant::now(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for TemplateFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let now = Local::now();
        let mut asctime = String::new();
        if self.format.uses(Attribute::Asctime) {
            write!(asctime, "{}", now.format(&self.date_format))?;
        }

        let record = Record {
            now,
            asctime,
            relative_ms: self.started.elapsed().as_millis(),
            name: meta.target(),
            level: *meta.level(),
            message,
            file: meta.file(),
            line: meta.line(),
            module_path: meta.module_path(),
        };

        self.format.render(&mut writer, |attribute| record.value(attribute))?;
        writeln!(writer)
    }
}

/// Values available to a template for one event.
struct Record<'a> {
    now: DateTime<Local>,
    asctime: String,
    relative_ms: u128,
    name: &'a str,
    level: Level,
    message: String,
    file: Option<&'a str>,
    line: Option<u32>,
    module_path: Option<&'a str>,
}

impl Record<'_> {
    fn value(&self, attribute: Attribute) -> Cow<'_, str> {
        match attribute {
            Attribute::Asctime => Cow::Borrowed(&self.asctime),
            Attribute::Created => Cow::Owned(format!(
                "{}.{:03}",
                self.now.timestamp(),
                self.now.timestamp_subsec_millis()
            )),
            Attribute::Msecs => Cow::Owned(self.now.timestamp_subsec_millis().to_string()),
            Attribute::RelativeCreated => Cow::Owned(self.relative_ms.to_string()),
            Attribute::Levelname => Cow::Borrowed(level_name(self.level)),
            Attribute::Levelno => Cow::Owned(level_no(self.level).to_string()),
            Attribute::Message => Cow::Borrowed(&self.message),
            Attribute::Name => Cow::Borrowed(self.name),
            Attribute::Pathname => Cow::Borrowed(self.file.unwrap_or("-")),
            Attribute::Filename => Cow::Borrowed(
                self.file
                    .and_then(|f| Path::new(f).file_name())
                    .and_then(|f| f.to_str())
                    .unwrap_or("-"),
            ),
            Attribute::Module => Cow::Borrowed(
                self.file
                    .and_then(|f| Path::new(f).file_stem())
                    .and_then(|f| f.to_str())
                    .unwrap_or("-"),
            ),
            Attribute::FuncName => Cow::Borrowed(
                self.module_path
                    .and_then(|m| m.rsplit("::").next())
                    .unwrap_or("-"),
            ),
            Attribute::Lineno => Cow::Owned(self.line.unwrap_or(0).to_string()),
            Attribute::Process => Cow::Owned(std::process::id().to_string()),
            Attribute::ProcessName => Cow::Borrowed("MainProcess"),
            Attribute::Thread => Cow::Owned(format!("{:?}", std::thread::current().id())),
            Attribute::ThreadName => Cow::Owned(
                std::thread::current()
                    .name()
                    .unwrap_or("unnamed")
                    .to_owned(),
            ),
            Attribute::TaskName => Cow::Borrowed("None"),
        }
    }
}

/// Level names as they appear in log lines.
fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        _ => "TRACE",
    }
}

fn level_no(level: Level) -> u8 {
    match level {
        Level::ERROR => 40,
        Level::WARN => 30,
        Level::INFO => 20,
        Level::DEBUG => 10,
        _ => 5,
    }
}
