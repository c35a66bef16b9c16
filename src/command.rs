//! Line-oriented serial command parsing.
//!
//! The command channel carries one command: `<r>,<g>,<b>` terminated by
//! `\n` or `\r`, integers clamped to 0-255. [`CommandReader`] accumulates
//! raw bytes and yields a [`ParseOutcome`] whenever a terminator completes
//! a line.
//!
//! Lines without any comma are not commands and are dropped without
//! diagnostics; lines that look like commands but do not parse are reported
//! as failures. Keeping the two apart matters: the channel may carry
//! unrelated chatter, but a malformed color command is worth a diagnostic.

use heapless::Vec;
use palette::Srgb;

/// Capacity of the line accumulation buffer, in bytes.
pub const LINE_CAPACITY: usize = 64;

/// Result of parsing one completed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    /// A well-formed color command.
    Color(Srgb<u8>),
    /// The line had no comma at all; ignored without diagnostics.
    DiscardedNoComma,
    /// The line looked like a command but failed to parse.
    Failed(ParseError),
}

/// Reasons a command line is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Comma-separated field count was not exactly three.
    NotThreeFields,
    /// A field did not parse as an integer.
    InvalidInteger,
    /// The line overflowed the accumulation buffer.
    LineTooLong,
    /// The line was not valid UTF-8.
    InvalidUtf8,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::NotThreeFields => {
                write!(f, "expected exactly three comma-separated values")
            }
            ParseError::InvalidInteger => {
                write!(f, "field is not a valid integer")
            }
            ParseError::LineTooLong => {
                write!(f, "line exceeds buffer capacity")
            }
            ParseError::InvalidUtf8 => {
                write!(f, "line is not valid UTF-8")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Accumulates serial bytes and parses complete lines into color commands.
pub struct CommandReader {
    buf: Vec<u8, LINE_CAPACITY>,
    overflowed: bool,
}

impl CommandReader {
    /// Creates an empty reader.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Feeds newly received bytes.
    ///
    /// Returns a parse outcome when the bytes complete a line. The whole
    /// accumulated buffer is consumed by one parse attempt, successful or
    /// not.
    pub fn push(&mut self, bytes: &[u8]) -> Option<ParseOutcome> {
        let mut terminated = false;
        for &byte in bytes {
            if byte == b'\n' || byte == b'\r' {
                terminated = true;
            }
            if self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
        }

        if !terminated {
            return None;
        }

        let outcome = if self.overflowed {
            ParseOutcome::Failed(ParseError::LineTooLong)
        } else {
            match core::str::from_utf8(&self.buf) {
                Ok(text) => parse_line(text.trim()),
                Err(_) => ParseOutcome::Failed(ParseError::InvalidUtf8),
            }
        };

        self.buf.clear();
        self.overflowed = false;
        Some(outcome)
    }
}

impl Default for CommandReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one trimmed line as `<int>,<int>,<int>` with 0-255 clamping.
///
/// Out-of-range values are clamped rather than rejected: `300,0,0` is
/// accepted as `255,0,0`, negative values floor at 0.
pub fn parse_line(line: &str) -> ParseOutcome {
    if !line.contains(',') {
        return ParseOutcome::DiscardedNoComma;
    }

    let mut channels = [0u8; 3];
    let mut fields = line.split(',');
    for slot in &mut channels {
        let Some(field) = fields.next() else {
            return ParseOutcome::Failed(ParseError::NotThreeFields);
        };
        match field.trim().parse::<i32>() {
            Ok(value) => *slot = value.clamp(0, 255) as u8,
            Err(_) => return ParseOutcome::Failed(ParseError::InvalidInteger),
        }
    }
    if fields.next().is_some() {
        return ParseOutcome::Failed(ParseError::NotThreeFields);
    }

    ParseOutcome::Color(Srgb::new(channels[0], channels[1], channels[2]))
}
