use thiserror::Error;

/// Failure to decode a single comma delimited field
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid character 0x{0:02x}")]
    InvalidCharacter(u8),

    #[error("repeated decimal point")]
    RepeatedDecimalPoint,

    #[error("field is too wide")]
    TooWide,

    #[error("truncated field")]
    Truncated,

    #[error("invalid hemisphere '{}'", *.0 as char)]
    InvalidHemisphere(u8),

    #[error("invalid unit '{}'", *.0 as char)]
    InvalidUnit(u8),

    #[error("value out of range")]
    OutOfRange,
}

/// Failure to decode a validated sentence.
/// Any of these aborts the whole sentence.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DecodeError {
    #[error("field #{index}: {error}")]
    Field {
        index: usize,
        #[source]
        error: FieldError,
    },

    #[error("truncated sentence: {found} fields (expecting {expected})")]
    Truncated { expected: usize, found: usize },

    #[error("field #{index}: value and hemisphere should both be present or both be empty")]
    MissingHemisphere { index: usize },
}

impl DecodeError {
    /// Attaches the field index to a [FieldError]
    pub fn field(index: usize) -> impl FnOnce(FieldError) -> Self {
        move |error| Self::Field { index, error }
    }
}

/// Transport and configuration errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    #[error("invalid talker \"{0}\": expecting two ASCII letters")]
    InvalidTalker(String),

    #[error("invalid update rate \"{0}\": supported values are 1, 5 and 10 (Hz)")]
    InvalidUpdateRate(String),
}
