use thiserror::Error;

/// Error that possible during sentence tokenizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("empty sentence")]
    Empty,
    #[error("sentence contains non ASCII bytes")]
    NonAscii,
    #[error("sentence does not start with '$' or '!'")]
    MissingStartDelimiter,
    #[error("sentence has no '*' checksum delimiter")]
    MissingChecksum,
    #[error("checksum is not two hex digits")]
    InvalidChecksumDigits,
    #[error("Not valid sentence checksum, expect {expect:02X}, got {got:02X}")]
    InvalidChecksum { expect: u8, got: u8 },
    #[error("sentence tag is not a talker and sentence identifier")]
    InvalidTag,
}

/// Error returned by a decoder that cannot make sense of a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid {sentence} field count, expect at least {expect}, got {got}")]
    TooFewFields {
        sentence: &'static str,
        expect: usize,
        got: usize,
    },
    #[error("Invalid field {field} of sentence {sentence}")]
    InvalidField {
        sentence: &'static str,
        field: &'static str,
    },
    #[error("GSV message {got} out of sequence, expected {expected}")]
    OutOfSequence { expected: u8, got: u8 },
}

/// Programmer error while registering a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("decoder handles no sentence identifiers")]
    NoSentenceIds,
    #[error("sentence identifier {0:?} is not three ASCII alphanumerics")]
    InvalidSentenceId(&'static str),
}

/// Error reported by the line splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line exceeded the buffer capacity, {dropped} bytes dropped")]
    LineTooLong { dropped: usize },
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}
