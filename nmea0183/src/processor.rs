use alloc::{boxed::Box, collections::BTreeMap, vec::Vec};
use core::fmt;
use log::{debug, trace};

use crate::{
    constants::NMEA_SENTENCE_ID_LEN,
    decoders::{
        DecodeOutcome, Decoder, GgaDecoder, GllDecoder, GsaDecoder, GsvDecoder, RmcDecoder,
        VtgDecoder,
    },
    error::{DecodeError, ParserError, RegistrationError},
    sentence::Sentence,
    types::Message,
};

/// What happened to one line handed to [`NmeaProcessor::process_sentence`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// A decoder produced a result and notified its subscribers
    Decoded(Message),
    /// Accepted, waiting for further sentences (GSV pages)
    Pending,
    /// Valid sentence, no decoder registered for its identifier
    Ignored,
    /// Dropped by the tokenizer: bad checksum or malformed framing
    Rejected(ParserError),
    /// Dropped by the decoder: unrecognisable structure
    Failed(DecodeError),
}

impl ProcessOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, ProcessOutcome::Decoded(_))
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            ProcessOutcome::Decoded(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_message(self) -> Option<Message> {
        match self {
            ProcessOutcome::Decoded(message) => Some(message),
            _ => None,
        }
    }
}

/// Link diagnostics, counted per processed line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessorStats {
    pub received: u64,
    pub decoded: u64,
    pub pending: u64,
    pub ignored: u64,
    pub checksum_errors: u64,
    pub malformed: u64,
    pub decode_failures: u64,
}

/// Routes sentences to registered decoders by their three character
/// sentence identifier, whatever the talker.
///
/// Malformed input never panics and never surfaces as an error: it is
/// reported through [`ProcessOutcome`] and counted in [`ProcessorStats`].
///
/// When two decoders claim the same identifier the later registration wins.
pub struct NmeaProcessor {
    decoders: Vec<Option<Box<dyn Decoder + Send>>>,
    routes: BTreeMap<&'static str, usize>,
    stats: ProcessorStats,
}

impl Default for NmeaProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaProcessor {
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
            routes: BTreeMap::new(),
            stats: ProcessorStats::default(),
        }
    }

    /// Processor with GGA, GLL, RMC, GSA, GSV and VTG decoders that have no
    /// subscribers; results are only returned through [`ProcessOutcome`].
    pub fn with_standard_decoders() -> Self {
        let mut processor = Self::new();
        processor.register(GgaDecoder::new());
        processor.register(GllDecoder::new());
        processor.register(RmcDecoder::new());
        processor.register(GsaDecoder::new());
        processor.register(GsvDecoder::new());
        processor.register(VtgDecoder::new());
        processor
    }

    pub fn register_decoder<D>(&mut self, decoder: D) -> Result<(), RegistrationError>
    where
        D: Decoder + Send + 'static,
    {
        let ids = decoder.sentence_ids();
        if ids.is_empty() {
            return Err(RegistrationError::NoSentenceIds);
        }
        if let Some(id) = ids.iter().find(|id| !is_valid_sentence_id(id)) {
            return Err(RegistrationError::InvalidSentenceId(id));
        }
        self.register(decoder);
        Ok(())
    }

    fn register<D>(&mut self, decoder: D)
    where
        D: Decoder + Send + 'static,
    {
        let ids = decoder.sentence_ids();
        let decoder: Box<dyn Decoder + Send> = Box::new(decoder);
        // Slots of replaced decoders are reused so repeated registration stays bounded
        let index = match self.decoders.iter().position(Option::is_none) {
            Some(free) => {
                self.decoders[free] = Some(decoder);
                free
            },
            None => {
                self.decoders.push(Some(decoder));
                self.decoders.len() - 1
            },
        };

        for id in ids {
            let Some(previous) = self.routes.insert(id, index) else {
                continue;
            };
            debug!("{id} decoder replaced by a later registration");
            if !self.routes.values().any(|routed| *routed == previous) {
                self.decoders[previous] = None;
            }
        }
    }

    pub fn has_decoder(&self, sentence_id: &str) -> bool {
        self.routes.contains_key(sentence_id)
    }

    /// Number of decoders still reachable through at least one identifier
    pub fn decoder_count(&self) -> usize {
        self.decoders.iter().flatten().count()
    }

    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ProcessorStats::default();
    }

    /// Validates, tokenizes and dispatches one sentence.
    ///
    /// The line may still carry its `<CR><LF>` or other surrounding whitespace.
    pub fn process_sentence(&mut self, line: &str) -> ProcessOutcome {
        self.stats.received += 1;

        let sentence = match Sentence::parse(line) {
            Ok(sentence) => sentence,
            Err(err) => {
                match err {
                    ParserError::InvalidChecksum { .. } => self.stats.checksum_errors += 1,
                    _ => self.stats.malformed += 1,
                }
                trace!("dropping {line:?}: {err}");
                return ProcessOutcome::Rejected(err);
            },
        };

        let decoder = self
            .routes
            .get(sentence.sentence_id())
            .and_then(|index| self.decoders.get_mut(*index))
            .and_then(Option::as_mut);
        let Some(decoder) = decoder else {
            self.stats.ignored += 1;
            trace!("no decoder for {}", sentence.tag());
            return ProcessOutcome::Ignored;
        };

        match decoder.decode(&sentence) {
            DecodeOutcome::Decoded(message) => {
                self.stats.decoded += 1;
                ProcessOutcome::Decoded(message)
            },
            DecodeOutcome::Pending => {
                self.stats.pending += 1;
                ProcessOutcome::Pending
            },
            DecodeOutcome::Failed(err) => {
                self.stats.decode_failures += 1;
                debug!("dropping {}: {err}", sentence.tag());
                ProcessOutcome::Failed(err)
            },
        }
    }

    /// Processes every non-empty line of `text`, returning how many decoded
    pub fn process_lines(&mut self, text: &str) -> usize {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.process_sentence(line))
            .filter(ProcessOutcome::is_decoded)
            .count()
    }
}

fn is_valid_sentence_id(id: &str) -> bool {
    id.len() == NMEA_SENTENCE_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl fmt::Debug for NmeaProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NmeaProcessor")
            .field("routes", &self.routes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
pub use shared::SharedProcessor;

#[cfg(feature = "std")]
mod shared {
    use super::{NmeaProcessor, ProcessOutcome, ProcessorStats};
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    /// Cloneable handle for several producer threads feeding one processor.
    /// Calls are serialised by a mutex around the routes and decoder state.
    #[derive(Debug, Clone)]
    pub struct SharedProcessor {
        inner: Arc<Mutex<NmeaProcessor>>,
    }

    impl SharedProcessor {
        pub fn new(processor: NmeaProcessor) -> Self {
            Self {
                inner: Arc::new(Mutex::new(processor)),
            }
        }

        // A subscriber that panicked leaves the decoders usable
        fn lock(&self) -> MutexGuard<'_, NmeaProcessor> {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub fn process_sentence(&self, line: &str) -> ProcessOutcome {
            self.lock().process_sentence(line)
        }

        pub fn stats(&self) -> ProcessorStats {
            self.lock().stats()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::GnssFix, GgaDecoder};
    use std::sync::{Arc, Mutex};

    const GGA: &str =
        "$GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000*6E";

    struct NoIds;

    impl Decoder for NoIds {
        fn sentence_ids(&self) -> &'static [&'static str] {
            &[]
        }

        fn decode(&mut self, _: &Sentence<'_>) -> DecodeOutcome<Message> {
            DecodeOutcome::Pending
        }
    }

    struct BadId;

    impl Decoder for BadId {
        fn sentence_ids(&self) -> &'static [&'static str] {
            &["GPGGA"]
        }

        fn decode(&mut self, _: &Sentence<'_>) -> DecodeOutcome<Message> {
            DecodeOutcome::Pending
        }
    }

    #[test]
    fn rejects_programmer_errors() {
        let mut processor = NmeaProcessor::new();
        assert_eq!(
            processor.register_decoder(NoIds),
            Err(RegistrationError::NoSentenceIds)
        );
        assert_eq!(
            processor.register_decoder(BadId),
            Err(RegistrationError::InvalidSentenceId("GPGGA"))
        );
        assert_eq!(processor.decoder_count(), 0);
    }

    #[test]
    fn later_registration_wins() {
        let first = Arc::new(Mutex::new(0));
        let second = Arc::new(Mutex::new(0));
        let mut processor = NmeaProcessor::new();

        let mut decoder = GgaDecoder::new();
        let seen = first.clone();
        decoder.on_position(move |_: &GnssFix| *seen.lock().unwrap() += 1);
        processor.register_decoder(decoder).unwrap();

        let mut decoder = GgaDecoder::new();
        let seen = second.clone();
        decoder.on_position(move |_: &GnssFix| *seen.lock().unwrap() += 1);
        processor.register_decoder(decoder).unwrap();

        assert_eq!(processor.decoder_count(), 1);
        assert!(processor.process_sentence(GGA).is_decoded());
        assert_eq!(*first.lock().unwrap(), 0);
        assert_eq!(*second.lock().unwrap(), 1);
    }

    #[test]
    fn replaced_decoder_slots_are_reused() {
        let mut processor = NmeaProcessor::with_standard_decoders();
        for _ in 0..100 {
            processor.register_decoder(GgaDecoder::new()).unwrap();
            processor.register_decoder(GsvDecoder::new()).unwrap();
        }
        assert_eq!(processor.decoder_count(), 6);
        assert!(processor.decoders.len() <= 7);
        assert!(processor.process_sentence(GGA).is_decoded());
        assert!(processor.process_sentence("$GPGSV,1,1,01,07,79,048,42*4B").is_decoded());
    }

    #[test]
    fn counts_every_outcome() {
        let mut processor = NmeaProcessor::new();
        processor.register_decoder(GgaDecoder::new()).unwrap();
        processor.register_decoder(GsvDecoder::new()).unwrap();

        assert!(processor.process_sentence(GGA).is_decoded());
        assert_eq!(
            processor.process_sentence("$GPGLL,4916.45,N,12311.12,W,225444,A*31"),
            ProcessOutcome::Ignored
        );
        assert!(matches!(
            processor.process_sentence("$GPGLL,4916.45,N,12311.12,W,225444,A*30"),
            ProcessOutcome::Rejected(ParserError::InvalidChecksum { .. })
        ));
        assert_eq!(
            processor.process_sentence("garbage"),
            ProcessOutcome::Rejected(ParserError::MissingStartDelimiter)
        );
        let first_page = crate::encode("GPGSV", &["2", "1", "05", "01", "", "", ""]);
        assert_eq!(processor.process_sentence(&first_page), ProcessOutcome::Pending);
        assert!(matches!(
            processor.process_sentence(&crate::encode("GPGGA", &["1"])),
            ProcessOutcome::Failed(DecodeError::TooFewFields { .. })
        ));

        assert_eq!(
            processor.stats(),
            ProcessorStats {
                received: 6,
                decoded: 1,
                pending: 1,
                ignored: 1,
                checksum_errors: 1,
                malformed: 1,
                decode_failures: 1,
            }
        );
        processor.reset_stats();
        assert_eq!(processor.stats(), ProcessorStats::default());
    }

    #[test]
    fn dispatches_on_sentence_id_for_any_talker() {
        let mut processor = NmeaProcessor::with_standard_decoders();
        assert_eq!(processor.decoder_count(), 6);
        for id in ["GGA", "GLL", "RMC", "GSA", "GSV", "VTG"] {
            assert!(processor.has_decoder(id));
        }
        let outcome = processor.process_sentence("$GNGLL,,,,,,V,N*7A\r\n");
        assert_eq!(outcome.message().map(Message::sentence_id), Some("GLL"));
    }

    #[test]
    fn process_lines_skips_blank_lines() {
        let mut processor = NmeaProcessor::with_standard_decoders();
        let text = alloc::format!("{GGA}\r\n\r\n$GNGLL,,,,,,V,N*7A\r\n$GPGLL,bad*00\n");
        assert_eq!(processor.process_lines(&text), 2);
        assert_eq!(processor.stats().received, 3);
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_processor_across_threads() {
        let shared = SharedProcessor::new(NmeaProcessor::with_standard_decoders());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        assert!(shared.process_sentence(GGA).is_decoded());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.stats().decoded, 40);
    }
}
