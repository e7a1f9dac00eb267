use alloc::vec::Vec;

use crate::{
    decoders::{require_fields, DecodeOutcome, Decoder},
    error::DecodeError,
    field,
    sentence::Sentence,
    subscribers::{ResultHandler, Subscribers},
    types::{ActiveSatellites, FixType, Message, SelectionMode},
};

// $--GSA,a,x,xx,xx,xx,xx,xx,xx,xx,xx,xx,xx,xx,xx,x.x,x.x,x.x[,h]*hh
const MIN_FIELDS: usize = 17;
const PRN_SLOTS: core::ops::Range<usize> = 2..14;

/// GNSS DOP and active satellites
#[derive(Debug, Default)]
pub struct GsaDecoder {
    subscribers: Subscribers<ActiveSatellites>,
}

impl GsaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_active_satellites<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResultHandler<ActiveSatellites> + Send + 'static,
    {
        self.subscribers.subscribe(handler);
        self
    }

    pub fn decode_active(&self, sentence: &Sentence<'_>) -> Result<ActiveSatellites, DecodeError> {
        require_fields(sentence, "GSA", MIN_FIELDS)?;

        let prns: Vec<u16> = PRN_SLOTS
            .filter_map(|slot| field::parse(sentence.field(slot)))
            .collect();

        Ok(ActiveSatellites {
            talker: sentence.talker(),
            selection_mode: field::parse_char(sentence.field(0)).and_then(SelectionMode::from_char),
            fix_type: field::parse(sentence.field(1)).and_then(FixType::from_u8),
            prns,
            pdop: field::parse_f64(sentence.field(14)),
            hdop: field::parse_f64(sentence.field(15)),
            vdop: field::parse_f64(sentence.field(16)),
            system_id: field::parse(sentence.field(17)),
        })
    }
}

impl Decoder for GsaDecoder {
    fn sentence_ids(&self) -> &'static [&'static str] {
        &["GSA"]
    }

    fn decode(&mut self, sentence: &Sentence<'_>) -> DecodeOutcome<Message> {
        match self.decode_active(sentence) {
            Ok(active) => {
                self.subscribers.notify(&active);
                DecodeOutcome::Decoded(Message::Gsa(active))
            },
            Err(err) => DecodeOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Talker;

    fn decode(line: &str) -> Result<ActiveSatellites, DecodeError> {
        GsaDecoder::new().decode_active(&Sentence::parse(line).unwrap())
    }

    #[test]
    fn decodes_partial_slots() {
        let active = decode("$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39").unwrap();
        assert_eq!(active.talker, Talker::Gps);
        assert_eq!(active.selection_mode, Some(SelectionMode::Automatic));
        assert_eq!(active.fix_type, Some(FixType::Fix3D));
        assert_eq!(active.prns, vec![4, 5, 9, 12, 24]);
        assert_eq!(active.pdop, Some(2.5));
        assert_eq!(active.hdop, Some(1.3));
        assert_eq!(active.vdop, Some(2.1));
        assert_eq!(active.system_id, None);
    }

    #[test]
    fn decodes_system_id() {
        let line = crate::encode(
            "GNGSA",
            &[
                "A", "3", "65", "66", "", "", "", "", "", "", "", "", "", "", "1.94", "1.18", "1.54",
                "2",
            ],
        );
        let active = decode(&line).unwrap();
        assert_eq!(active.prns, vec![65, 66]);
        assert_eq!(active.system_id, Some(2));
    }

    #[test]
    fn no_fix() {
        let line = crate::encode(
            "GPGSA",
            &["M", "1", "", "", "", "", "", "", "", "", "", "", "", "", "", "", ""],
        );
        let active = decode(&line).unwrap();
        assert_eq!(active.selection_mode, Some(SelectionMode::Manual));
        assert_eq!(active.fix_type, Some(FixType::NoFix));
        assert!(active.prns.is_empty());
        assert_eq!(active.pdop, None);
    }

    #[test]
    fn too_few_fields() {
        let line = crate::encode("GPGSA", &["A", "3", "04"]);
        assert!(matches!(
            decode(&line),
            Err(DecodeError::TooFewFields {
                sentence: "GSA",
                expect: 17,
                got: 3
            })
        ));
    }
}
