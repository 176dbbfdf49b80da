//! `%`-style log line templates and strftime date formats.
//!
//! The `logging.format` setting uses the placeholder syntax of Python's
//! `logging` module (`%(asctime)s - %(levelname)-8s - %(message)s`), so
//! existing deployment files keep working. Templates are parsed once at
//! load time and rendered per event by the subscriber.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Default log line template.
pub const DEFAULT_FORMAT: &str = "%(asctime)s - %(name)s - %(levelname)s - %(message)s";

/// Default timestamp format for `%(asctime)s`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FLAG_CHARS: &str = "#0+- ";
const CONVERSION_CHARS: &str = "diouxXeEfFgGcrsa";

/// Errors produced while parsing a log line template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("template is empty")]
    Empty,

    #[error("unterminated field name starting at offset {0}")]
    UnterminatedField(usize),

    #[error("empty field name at offset {0}")]
    EmptyField(usize),

    #[error("unknown log record attribute '{name}' at offset {offset}")]
    UnknownAttribute { name: String, offset: usize },

    #[error("'*' width or precision is not supported (offset {0})")]
    StarWidth(usize),

    #[error("missing conversion type at offset {0}")]
    MissingConversion(usize),

    #[error("unsupported conversion type '{conversion}' at offset {offset}")]
    BadConversion { conversion: char, offset: usize },

    #[error("'%' at offset {0} must be followed by '(' or '%'")]
    BareSpecifier(usize),

    #[error("template contains no %(attribute) placeholders")]
    NoFields,
}

/// Errors produced while checking a strftime date format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("date format is empty")]
    Empty,

    #[error("date format contains an unrecognized or incomplete specifier")]
    InvalidSpecifier,
}

/// Log record attributes a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Asctime,
    Created,
    Filename,
    FuncName,
    Levelname,
    Levelno,
    Lineno,
    Message,
    Module,
    Msecs,
    Name,
    Pathname,
    Process,
    ProcessName,
    RelativeCreated,
    Thread,
    ThreadName,
    TaskName,
}

impl Attribute {
    pub const ALL: [Self; 18] = [
        Self::Asctime,
        Self::Created,
        Self::Filename,
        Self::FuncName,
        Self::Levelname,
        Self::Levelno,
        Self::Lineno,
        Self::Message,
        Self::Module,
        Self::Msecs,
        Self::Name,
        Self::Pathname,
        Self::Process,
        Self::ProcessName,
        Self::RelativeCreated,
        Self::Thread,
        Self::ThreadName,
        Self::TaskName,
    ];

    /// Returns the attribute name as written inside `%(...)`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asctime => "asctime",
            Self::Created => "created",
            Self::Filename => "filename",
            Self::FuncName => "funcName",
            Self::Levelname => "levelname",
            Self::Levelno => "levelno",
            Self::Lineno => "lineno",
            Self::Message => "message",
            Self::Module => "module",
            Self::Msecs => "msecs",
            Self::Name => "name",
            Self::Pathname => "pathname",
            Self::Process => "process",
            Self::ProcessName => "processName",
            Self::RelativeCreated => "relativeCreated",
            Self::Thread => "thread",
            Self::ThreadName => "threadName",
            Self::TaskName => "taskName",
        }
    }
}

impl FromStr for Attribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|a| a.as_str() == s).ok_or(())
    }
}

/// One `%(attribute)...` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub attribute: Attribute,
    pub left_align: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: char,
}

impl Placeholder {
    /// A plain `%(attribute)s` placeholder.
    #[must_use]
    pub const fn plain(attribute: Attribute) -> Self {
        Self {
            attribute,
            left_align: false,
            zero_pad: false,
            width: None,
            precision: None,
            conversion: 's',
        }
    }

    fn is_numeric(&self) -> bool {
        !matches!(self.conversion, 's' | 'r' | 'a' | 'c')
    }

    fn write_value(&self, out: &mut impl fmt::Write, value: &str) -> fmt::Result {
        let value: Cow<'_, str> = match self.precision {
            Some(p) if !self.is_numeric() && value.chars().count() > p => {
                Cow::Owned(value.chars().take(p).collect())
            }
            _ => Cow::Borrowed(value),
        };

        let len = value.chars().count();
        let pad = self.width.map_or(0, |w| w.saturating_sub(len));
        if pad == 0 {
            return out.write_str(&value);
        }

        if self.left_align {
            out.write_str(&value)?;
            (0..pad).try_for_each(|_| out.write_char(' '))
        } else {
            let fill = if self.zero_pad && self.is_numeric() { '0' } else { ' ' };
            (0..pad).try_for_each(|_| out.write_char(fill))?;
            out.write_str(&value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed log line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    raw: String,
    segments: Vec<Segment>,
}

impl LogFormat {
    /// Parses a `%`-style template.
    ///
    /// # Errors
    ///
    /// Returns the first syntax problem found, with its byte offset.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        if text.trim().is_empty() {
            return Err(FormatError::Empty);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((open, '(')) => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ')')) => break,
                            Some((_, ch)) => name.push(ch),
                            None => return Err(FormatError::UnterminatedField(start)),
                        }
                    }
                    if name.is_empty() {
                        return Err(FormatError::EmptyField(open));
                    }
                    let attribute = name.parse::<Attribute>().map_err(|()| {
                        FormatError::UnknownAttribute {
                            name: name.clone(),
                            offset: open + 1,
                        }
                    })?;

                    let mut placeholder = Placeholder::plain(attribute);
                    while let Some(&(_, flag)) = chars.peek() {
                        if !FLAG_CHARS.contains(flag) {
                            break;
                        }
                        match flag {
                            '-' => placeholder.left_align = true,
                            '0' => placeholder.zero_pad = true,
                            _ => {}
                        }
                        chars.next();
                    }

                    placeholder.width = take_number(&mut chars)?;
                    if chars.peek().is_some_and(|&(_, ch)| ch == '.') {
                        chars.next();
                        placeholder.precision = Some(take_number(&mut chars)?.unwrap_or(0));
                    }

                    match chars.next() {
                        Some((_, conv)) if CONVERSION_CHARS.contains(conv) => {
                            placeholder.conversion = conv;
                        }
                        Some((offset, conv)) => {
                            return Err(FormatError::BadConversion {
                                conversion: conv,
                                offset,
                            });
                        }
                        None => return Err(FormatError::MissingConversion(text.len())),
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(placeholder));
                }
                Some(_) | None => return Err(FormatError::BareSpecifier(start)),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.iter().any(|s| matches!(s, Segment::Field(_))) {
            return Err(FormatError::NoFields);
        }

        Ok(Self {
            raw: text.to_owned(),
            segments,
        })
    }

    /// Returns the template as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterates over the placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// Checks whether the template references an attribute.
    #[must_use]
    pub fn uses(&self, attribute: Attribute) -> bool {
        self.placeholders().any(|p| p.attribute == attribute)
    }

    /// Renders the template, asking `lookup` for each attribute value.
    pub fn render<'a, W, F>(&self, out: &mut W, mut lookup: F) -> fmt::Result
    where
        W: fmt::Write,
        F: FnMut(Attribute) -> Cow<'a, str>,
    {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Field(placeholder) => {
                    let value = lookup(placeholder.attribute);
                    placeholder.write_value(out, &value)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        let sep = || Segment::Literal(" - ".to_owned());
        Self {
            raw: DEFAULT_FORMAT.to_owned(),
            segments: vec![
                Segment::Field(Placeholder::plain(Attribute::Asctime)),
                sep(),
                Segment::Field(Placeholder::plain(Attribute::Name)),
                sep(),
                Segment::Field(Placeholder::plain(Attribute::Levelname)),
                sep(),
                Segment::Field(Placeholder::plain(Attribute::Message)),
            ],
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for LogFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn take_number<I>(chars: &mut std::iter::Peekable<I>) -> Result<Option<usize>, FormatError>
where
    I: Iterator<Item = (usize, char)>,
{
    if let Some(&(offset, '*')) = chars.peek() {
        return Err(FormatError::StarWidth(offset));
    }

    let mut value: Option<usize> = None;
    while let Some(&(_, ch)) = chars.peek() {
        let Some(digit) = ch.to_digit(10) else { break };
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    Ok(value)
}

/// Checks that every strftime specifier in `format` is understood.
///
/// # Errors
///
/// Returns an error for an empty format, any unknown specifier, or a
/// specifier that chrono only supports for parsing (such as `%#z`).
pub fn validate_date_format(format: &str) -> Result<(), DateFormatError> {
    if format.trim().is_empty() {
        return Err(DateFormatError::Empty);
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DateFormatError::InvalidSpecifier);
    }

    // Some items parse fine but fail when formatting a timestamp.
    let mut sample = String::new();
    write!(sample, "{}", Local::now().format(format))
        .map_err(|_| DateFormatError::InvalidSpecifier)?;
    Ok(())
}
