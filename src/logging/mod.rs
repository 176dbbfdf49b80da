//! Logging setup.
//!
//! Builds the global `tracing` subscriber from the `logging` section of the
//! configuration.

mod format;
mod subscriber;

pub use format::{
    Attribute, DEFAULT_DATE_FORMAT, DEFAULT_FORMAT, DateFormatError, FormatError, LogFormat,
    Placeholder, validate_date_format,
};
pub use subscriber::{LoggingError, TemplateFormatter, init};
