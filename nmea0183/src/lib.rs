//! # nmea0183
//!
//! This project aims to build a pure-rust library for the NMEA-0183 text protocol spoken by
//! GNSS receivers: validating and tokenizing sentences, and decoding the common position,
//! satellite and course sentences into typed results.
//!
//! A command line tool reading a serial port or a log file can be found in the nmea_cli
//! subfolder of this project.
//!
//! Processing Sentences
//! ====================
//!
//! Sentences are handed to an `NmeaProcessor` one line at a time. The processor checks the
//! framing and checksum, then routes the sentence by its three character identifier
//! (`GGA`, `RMC`, ...) to the decoder registered for it, whatever the talker (`GP`, `GN`, ...).
//! Decoders notify their subscribers with the decoded result:
//! ```
//! use nmea0183::{GnssFix, NmeaProcessor, RmcDecoder};
//!
//! let mut rmc = RmcDecoder::new();
//! rmc.on_position(|fix: &GnssFix| {
//!     if let Some(position) = fix.position {
//!         println!("{:.5} {:.5}", position.lat, position.lon);
//!     }
//! });
//!
//! let mut processor = NmeaProcessor::new();
//! processor.register_decoder(rmc).unwrap();
//!
//! let outcome = processor.process_sentence(
//!     "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
//! );
//! assert!(outcome.is_decoded());
//! ```
//! Corrupted or malformed sentences are dropped and counted in `ProcessorStats`, they never
//! reach a subscriber.
//!
//! Reading a Stream
//! ================
//!
//! Raw bytes from a serial port arrive in arbitrary chunks. A `LineBuffer` keeps partial lines
//! between reads and returns complete ones through its `consume()` method:
//! ```
//! use nmea0183::{LineBuffer, NmeaProcessor};
//!
//! let mut processor = NmeaProcessor::with_standard_decoders();
//! let mut lines = LineBuffer::default();
//! let my_raw_data = b"$GNGLL,,,,,,V,N*7A\r\n$GPG"; // From your serial port
//! let mut it = lines.consume(my_raw_data);
//! loop {
//!     match it.next() {
//!         Some(Ok(line)) => {
//!             processor.process_sentence(line);
//!         }
//!         Some(Err(_)) => {
//!             // Received an overlong or non UTF-8 line
//!         }
//!         None => {
//!             // "$GPG" stays buffered until the rest of the line arrives
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! no_std Support
//! ==============
//!
//! This library supports no_std environments with an allocator. To avoid growing the line
//! buffer, create a FixedLinearBuffer and use it to construct a `LineBuffer` object:
//! ```
//! let mut buf = [0; 128];
//! let buf = nmea0183::FixedLinearBuffer::new(&mut buf[..]);
//! let mut lines = nmea0183::LineBuffer::new(buf);
//! ```
//! Lines that do not fit in the buffer are dropped and reported as `LineError::LineTooLong`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    checksum::{checksum, NmeaChecksum},
    decoders::{
        DecodeOutcome, Decoder, GgaDecoder, GllDecoder, GsaDecoder, GsvDecoder, GsvState,
        RmcDecoder, VtgDecoder,
    },
    error::{DecodeError, LineError, ParserError, RegistrationError},
    line_buffer::{
        FixedLinearBuffer, LineBuffer, LineIter, UnderlyingBuffer, DEFAULT_MAX_LINE_LENGTH,
    },
    processor::{NmeaProcessor, ProcessOutcome, ProcessorStats},
    sentence::{encode, Sentence, StartDelimiter, Talker},
    subscribers::{ResultHandler, Subscribers},
    types::*,
};

#[cfg(feature = "std")]
pub use crate::processor::SharedProcessor;

pub mod constants;
pub mod decoders;

mod checksum;
mod error;
mod field;
mod line_buffer;
mod processor;
mod sentence;
mod subscribers;
mod types;
