use alloc::{collections::BTreeMap, vec::Vec};
use log::debug;

use crate::{
    decoders::{require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::{Sentence, Talker},
    subscribers::{ResultHandler, Subscribers},
    types::{Message, Satellite, SatellitesInView},
};

// $--GSV,x,x,xx,xx,xx,xxx,xx,....,xx,xx,xxx,xx[,h]*hh
const MIN_FIELDS: usize = 3;
const FIRST_SATELLITE: usize = 3;
const SATELLITE_FIELDS: usize = 4;

/// Pagination state of one talker's GSV cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GsvState {
    /// No partial cycle buffered
    #[default]
    Idle,
    /// Messages `1..next` of a `total` message cycle received
    Accumulating {
        total: u8,
        next: u8,
        in_view: Option<u16>,
        satellites: Vec<Satellite>,
    },
}

static IDLE: GsvState = GsvState::Idle;

/// Satellites in view.
///
/// A cycle spans `total` sentences; satellites are buffered until the last
/// one arrives and only then emitted. Message 1 always starts a new cycle
/// and drops any partial one. Any other message that is not the next
/// expected one drops the partial cycle and is reported as
/// [`DecodeError::OutOfSequence`]. Each talker has its own cycle, so GPGSV
/// and GLGSV runs may interleave.
#[derive(Debug, Default)]
pub struct GsvDecoder {
    states: BTreeMap<Talker, GsvState>,
    subscribers: Subscribers<SatellitesInView>,
}

impl GsvDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per complete cycle
    pub fn on_satellites_in_view<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResultHandler<SatellitesInView> + Send + 'static,
    {
        self.subscribers.subscribe(handler);
        self
    }

    pub fn state(&self, talker: &Talker) -> &GsvState {
        self.states.get(talker).unwrap_or(&IDLE)
    }

    /// Drops every partial cycle
    pub fn reset(&mut self) {
        self.states.clear();
    }

    /// Feeds one page, returning the full view when the cycle completes
    pub fn accept(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<SatellitesInView> {
        if let Err(err) = require_fields(sentence, "GSV", MIN_FIELDS) {
            return DecodeOutcome::Failed(err);
        }
        let total: u8 = match field::parse(sentence.field(0)) {
            Some(total) if total > 0 => total,
            _ => return invalid_field("total messages"),
        };
        let number: u8 = match field::parse(sentence.field(1)) {
            Some(number) if number > 0 && number <= total => number,
            _ => return invalid_field("message number"),
        };
        let in_view = field::parse(sentence.field(2));
        let page = satellites(sentence.fields());

        // Finished or dropped cycles leave no entry behind
        let talker = sentence.talker();
        let previous = self.states.remove(&talker).unwrap_or_default();

        let mut satellites = match (previous, number) {
            (previous, 1) => {
                if let GsvState::Accumulating { next, total, .. } = previous {
                    debug!("{talker} GSV cycle restarted, dropping {}/{total}", next - 1);
                }
                Vec::new()
            },
            (
                GsvState::Accumulating {
                    total: expected_total,
                    next,
                    satellites,
                    ..
                },
                number,
            ) if number == next && total == expected_total => satellites,
            (GsvState::Accumulating { next, total, .. }, number) => {
                debug!(
                    "{talker} GSV message {number} out of sequence, dropping {}/{total}",
                    next - 1
                );
                return DecodeOutcome::Failed(DecodeError::OutOfSequence {
                    expected: next,
                    got: number,
                });
            },
            (GsvState::Idle, number) => {
                return DecodeOutcome::Failed(DecodeError::OutOfSequence {
                    expected: 1,
                    got: number,
                });
            },
        };
        satellites.extend(page);

        if number == total {
            return DecodeOutcome::Decoded(SatellitesInView {
                talker,
                in_view,
                satellites,
            });
        }
        self.states.insert(
            talker,
            GsvState::Accumulating {
                total,
                next: number + 1,
                in_view,
                satellites,
            },
        );
        DecodeOutcome::Pending
    }
}

fn invalid_field<T>(field: &'static str) -> DecodeOutcome<T> {
    DecodeOutcome::Failed(DecodeError::InvalidField {
        sentence: "GSV",
        field,
    })
}

/// Satellite groups of one page. A trailing NMEA 4.10 signal ID leaves a
/// single field after the last group and is ignored by `chunks_exact`.
fn satellites<'a>(fields: &'a [&'a str]) -> impl Iterator<Item = Satellite> + 'a {
    fields
        .get(FIRST_SATELLITE..)
        .unwrap_or_default()
        .chunks_exact(SATELLITE_FIELDS)
        .filter_map(|group| {
            Some(Satellite {
                prn: field::parse(group[0])?,
                elevation: field::parse(group[1]),
                azimuth: field::parse(group[2]),
                snr: field::parse(group[3]),
            })
        })
}

impl Decoder for GsvDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["GSV"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        let outcome = self.accept(sentence);
        if let DecodeOutcome::Decoded(view) = &outcome {
            self.subscribers.notify(view);
        }
        outcome.map(Message::Gsv)
    }
}
