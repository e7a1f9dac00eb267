use crate::{
    decoders::{position_at, require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::Sentence,
    subscribers::{ResultHandler, Subscribers},
    types::{FixQuality, FixSource, GnssFix, Message},
};

//         0         1       2 3        4 5 6  7   8   9 10  11 12  13
//         |         |       | |        | | |  |   |   | |   | |   |
// $--GGA,hhmmss.ss,ddmm.mm,a,ddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh
const MIN_FIELDS: usize = 6;

/// Global positioning system fix data.
///
/// A result is produced for every well formed sentence, including quality 0
/// (no fix); check [`GnssFix::has_fix`] before using the position.
#[derive(Debug, Default)]
pub struct GgaDecoder {
    subscribers: Subscribers<GnssFix>,
}

impl GgaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every decoded GGA sentence
    pub fn on_position<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResultHandler<GnssFix> + Send + 'static,
    {
        self.subscribers.subscribe(handler);
        self
    }

    pub fn decode_fix(&self, sentence: &Sentence<'_>) -> Result<GnssFix, DecodeError> {
        require_fields(sentence, "GGA", MIN_FIELDS)?;

        let mut fix = GnssFix::new(sentence.talker(), FixSource::Gga);
        fix.time = field::parse_time(sentence.field(0));
        fix.position = position_at(sentence, 1);
        fix.quality = field::parse::<u8>(sentence.field(5)).map(FixQuality::from);
        fix.satellites_used = field::parse(sentence.field(6));
        fix.hdop = field::parse_f64(sentence.field(7));
        fix.altitude = field::parse_f64(sentence.field(8));
        fix.geoid_separation = field::parse_f64(sentence.field(10));
        fix.dgps_age = field::parse_f64(sentence.field(12));
        fix.dgps_station = field::parse(sentence.field(13));
        Ok(fix)
    }
}

impl Decoder for GgaDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["GGA"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        match self.decode_fix(sentence) {
            Ok(fix) => {
                self.subscribers.notify(&fix);
                DecodeOutcome::Decoded(Message::Gga(fix))
            },
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sentence::Talker, types::Position};
    use chrono::NaiveTime;
    use std::sync::{Arc, Mutex};

    const RTK_FIXED: &str =
        "$GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000*6E";

    fn decode(line: &str) -> Result<GnssFix, DecodeError> {
        GgaDecoder::new().decode_fix(&Sentence::parse(line).unwrap())
    }

    #[test]
    fn decodes_rtk_fix() {
        let fix = decode(RTK_FIXED).unwrap();
        assert_eq!(fix.talker, Talker::Gps);
        assert_eq!(fix.source, FixSource::Gga);
        assert_eq!(fix.time, NaiveTime::from_hms_opt(11, 57, 39));
        let Position { lat, lon } = fix.position.unwrap();
        assert!((lat - (41.0 + 58.8441367 / 60.0)).abs() < 1e-9);
        assert!((lon + (91.0 + 47.4416929 / 60.0)).abs() < 1e-9);
        assert_eq!(fix.quality, Some(FixQuality::RtkFixed));
        assert_eq!(fix.satellites_used, Some(13));
        assert_eq!(fix.hdop, Some(0.9));
        assert_eq!(fix.altitude, Some(255.747));
        assert_eq!(fix.geoid_separation, Some(-32.0));
        assert_eq!(fix.dgps_age, Some(1.0));
        assert_eq!(fix.dgps_station, Some(0));
        assert!(fix.has_fix());
        assert_eq!(fix.date, None);
    }

    #[test]
    fn no_fix_still_decodes() {
        let line = crate::encode(
            "GPGGA",
            &["", "", "", "", "", "0", "00", "99.99", "", "", "", "", "", ""],
        );
        let fix = decode(&line).unwrap();
        assert_eq!(fix.quality, Some(FixQuality::Invalid));
        assert_eq!(fix.position, None);
        assert_eq!(fix.altitude, None);
        assert_eq!(fix.satellites_used, Some(0));
        assert!(!fix.has_fix());
    }

    #[test]
    fn bad_numbers_are_absent() {
        let line = crate::encode(
            "GNGGA",
            &[
                "155338.00", "5129.48272", "N", "00002.27093", "W", "2", "x", "0.97", "abc", "M",
                "45.5", "M", "", "",
            ],
        );
        let fix = decode(&line).unwrap();
        assert_eq!(fix.talker, Talker::Gnss);
        assert_eq!(fix.satellites_used, None);
        assert_eq!(fix.altitude, None);
        assert_eq!(fix.geoid_separation, Some(45.5));
        assert_eq!(fix.quality, Some(FixQuality::Dgps));
        assert!(fix.position.is_some());
    }

    #[test]
    fn too_few_fields() {
        let line = crate::encode("GPGGA", &["115739.00", "4158.8441367", "N"]);
        assert_eq!(
            decode(&line),
            Err(DecodeError::TooFewFields {
                sentence: "GGA",
                expect: 6,
                got: 3
            })
        );
    }

    #[test]
    fn notifies_subscribers() {
        let count = Arc::new(Mutex::new(0));
        let mut decoder = GgaDecoder::new();
        let seen = count.clone();
        decoder.on_position(move |fix: &GnssFix| {
            assert_eq!(fix.quality, Some(FixQuality::RtkFixed));
            *seen.lock().unwrap() += 1;
        });
        let sentence = Sentence::parse(RTK_FIXED).unwrap();
        assert!(decoder.decode(&sentence).is_decoded());
        assert!(decoder.decode(&sentence).is_decoded());
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
