use crate::{
    decoders::{require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::Sentence,
    subscribers::{ResultHandler, Subscribers},
    types::{CourseOverGround, Message, ModeIndicator},
};

// $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh
// Before NMEA 2.0 the unit letters were absent: $--VTG,x.x,x.x,x.x,x.x*hh
const MIN_FIELDS: usize = 4;
const MIN_FIELDS_WITH_UNITS: usize = 8;

/// Course over ground and ground speed
#[derive(Debug, Default)]
pub struct VtgDecoder {
    subscribers: Subscribers<CourseOverGround>,
}

impl VtgDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_course<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResultHandler<CourseOverGround> + Send + 'static,
    {
        self.subscribers.subscribe(handler);
        self
    }

    pub fn decode_course(&self, sentence: &Sentence<'_>) -> Result<CourseOverGround, DecodeError> {
        require_fields(sentence, "VTG", MIN_FIELDS)?;

        let with_units =
            sentence.field(1) == "T" || sentence.field_count() >= MIN_FIELDS_WITH_UNITS;
        let course = if with_units {
            CourseOverGround {
                talker: sentence.talker(),
                true_course: field::parse_f64(sentence.field(0)),
                magnetic_course: field::parse_f64(sentence.field(2)),
                speed_knots: field::parse_f64(sentence.field(4)),
                speed_kph: field::parse_f64(sentence.field(6)),
                mode: field::parse_char(sentence.field(8)).map(ModeIndicator::from),
            }
        } else {
            CourseOverGround {
                talker: sentence.talker(),
                true_course: field::parse_f64(sentence.field(0)),
                magnetic_course: field::parse_f64(sentence.field(1)),
                speed_knots: field::parse_f64(sentence.field(2)),
                speed_kph: field::parse_f64(sentence.field(3)),
                mode: None,
            }
        };
        Ok(course)
    }
}

impl Decoder for VtgDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["VTG"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        match self.decode_course(sentence) {
            Ok(course) => {
                self.subscribers.notify(&course);
                DecodeOutcome::Decoded(Message::Vtg(course))
            },
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}
