use crate::{
    decoders::{position_at, require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::Sentence,
    subscribers::{ResultHandler, Subscribers},
    types::{DataStatus, FixSource, GnssFix, Message, ModeIndicator},
};

// $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,A,a*hh
// Receivers predating NMEA 2.0 stop after the longitude hemisphere.
const MIN_FIELDS: usize = 4;

/// Geographic position, latitude and longitude
#[derive(Debug, Default)]
pub struct GllDecoder {
    subscribers: Subscribers<GnssFix>,
}

impl GllDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_position<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResultHandler<GnssFix> + Send + 'static,
    {
        self.subscribers.subscribe(handler);
        self
    }

    pub fn decode_fix(&self, sentence: &Sentence<'_>) -> Result<GnssFix, DecodeError> {
        require_fields(sentence, "GLL", MIN_FIELDS)?;

        let mut fix = GnssFix::new(sentence.talker(), FixSource::Gll);
        fix.position = position_at(sentence, 0);
        fix.time = field::parse_time(sentence.field(4));
        fix.status = field::parse_char(sentence.field(5)).and_then(DataStatus::from_char);
        fix.mode = field::parse_char(sentence.field(6)).map(ModeIndicator::from);
        Ok(fix)
    }
}

impl Decoder for GllDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["GLL"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        match self.decode_fix(sentence) {
            Ok(fix) => {
                self.subscribers.notify(&fix);
                DecodeOutcome::Decoded(Message::Gll(fix))
            },
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}
