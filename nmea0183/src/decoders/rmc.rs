use crate::{
    constants::KNOTS_TO_METERS_PER_SECOND,
    decoders::{position_at, require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::Sentence,
    subscribers::{ResultHandler, Subscribers},
    types::{DataStatus, FixSource, GnssFix, Message, ModeIndicator},
};

// $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,ddmmyy,x.x,a,m*hh
const MIN_FIELDS: usize = 9;

/// Recommended minimum specific GNSS data.
///
/// Speed is converted from knots to m/s and the date and time fields are
/// available combined through [`GnssFix::timestamp`].
#[derive(Debug, Default)]
pub struct RmcDecoder {
    subscribers: Subscribers<GnssFix>,
}

impl RmcDecoder {
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
        require_fields(sentence, "RMC", MIN_FIELDS)?;

        let mut fix = GnssFix::new(sentence.talker(), FixSource::Rmc);
        fix.time = field::parse_time(sentence.field(0));
        fix.status = field::parse_char(sentence.field(1)).and_then(DataStatus::from_char);
        fix.position = position_at(sentence, 2);
        fix.speed =
            field::parse_f64(sentence.field(6)).map(|knots| knots * KNOTS_TO_METERS_PER_SECOND);
        fix.course = field::parse_f64(sentence.field(7));
        fix.date = field::parse_date(sentence.field(8));
        fix.magnetic_variation = magnetic_variation(sentence.field(9), sentence.field(10));
        fix.mode = field::parse_char(sentence.field(11)).map(ModeIndicator::from);
        Ok(fix)
    }
}

fn magnetic_variation(value: &str, direction: &str) -> Option<f64> {
    let value = field::parse_f64(value)?;
    match field::parse_char(direction)? {
        'E' => Some(value),
        'W' => Some(-value),
        _ => None,
    }
}

impl Decoder for RmcDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["RMC"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        match self.decode_fix(sentence) {
            Ok(fix) => {
                self.subscribers.notify(&fix);
                DecodeOutcome::Decoded(Message::Rmc(fix))
            },
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}
