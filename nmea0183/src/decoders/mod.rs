//! Per sentence type decoders.
//!
//! A decoder turns the positional fields of a validated [`Sentence`] into a
//! typed result, notifies its own subscribers and hands the result back to
//! the processor as a [`DecodeOutcome`].

use crate::{
    error::DecodeError,
    field,
    sentence::Sentence,
    types::{Message, Position},
};

mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod vtg;

pub use gga::GgaDecoder;
pub use gll::GllDecoder;
pub use gsa::GsaDecoder;
pub use gsv::{GsvDecoder, GsvState};
pub use rmc::RmcDecoder;
pub use vtg::VtgDecoder;

/// Result of handing one sentence to a decoder
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome<T> {
    /// A complete result
    Decoded(T),
    /// Sentence accepted, the result needs more sentences (GSV pages)
    Pending,
    /// Sentence structure not recognised
    Failed(DecodeError),
}

impl<T> DecodeOutcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DecodeOutcome<U> {
        match self {
            DecodeOutcome::Decoded(value) => DecodeOutcome::Decoded(f(value)),
            DecodeOutcome::Pending => DecodeOutcome::Pending,
            DecodeOutcome::Failed(err) => DecodeOutcome::Failed(err),
        }
    }

    pub fn decoded(self) -> Option<T> {
        match self {
            DecodeOutcome::Decoded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }
}

impl<T> From<Result<T, DecodeError>> for DecodeOutcome<T> {
    fn from(result: Result<T, DecodeError>) -> Self {
        match result {
            Ok(value) => DecodeOutcome::Decoded(value),
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}

/// Uniform interface the processor dispatches through
pub trait Decoder {
    /// Three character sentence identifiers handled, e.g. `["GGA"]`
    fn sentence_ids(&self) -> &'static [&'static str];

    fn can_decode(&self, sentence_id: &str) -> bool {
        self.sentence_ids().iter().any(|id| *id == sentence_id)
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message>;
}

pub(crate) fn require_fields(
    sentence: &Sentence<'_>,
    name: &'static str,
    expect: usize,
) -> Result<(), DecodeError> {
    let got = sentence.field_count();
    if got < expect {
        return Err(DecodeError::TooFewFields {
            sentence: name,
            expect,
            got,
        });
    }
    Ok(())
}

/// Position from the four fields starting at `first`: lat, N/S, lon, E/W
pub(crate) fn position_at(sentence: &Sentence<'_>, first: usize) -> Option<Position> {
    let lat = field::parse_latitude(sentence.field(first), sentence.field(first + 1))?;
    let lon = field::parse_longitude(sentence.field(first + 2), sentence.field(first + 3))?;
    Some(Position { lat, lon })
}
