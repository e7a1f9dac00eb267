use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

use crate::{
    checksum::{parse_hex_byte, NmeaChecksum},
    constants::{
        NMEA_CHECKSUM_DELIMITER, NMEA_CHECKSUM_LEN, NMEA_ENCAPSULATION_CHAR, NMEA_FIELD_DELIMITER,
        NMEA_SENTENCE_ID_LEN, NMEA_SYNC_CHAR,
    },
    error::ParserError,
};

/// Character a sentence starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDelimiter {
    /// `$`, regular parametric sentences
    Parametric,
    /// `!`, encapsulated (AIS style) sentences
    Encapsulation,
}

impl StartDelimiter {
    pub const fn as_char(self) -> char {
        match self {
            StartDelimiter::Parametric => NMEA_SYNC_CHAR as char,
            StartDelimiter::Encapsulation => NMEA_ENCAPSULATION_CHAR as char,
        }
    }
}

/// System a sentence originates from, derived from the talker identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Talker {
    Gps,
    Glonass,
    Galileo,
    BeiDou,
    Qzss,
    NavIC,
    /// Combined solution from several constellations
    Gnss,
    /// Any other talker, including proprietary `P` prefixes, kept verbatim
    Other(String),
}

impl Talker {
    pub fn from_code(code: &str) -> Self {
        match code {
            "GP" => Talker::Gps,
            "GL" => Talker::Glonass,
            "GA" => Talker::Galileo,
            "GB" | "BD" => Talker::BeiDou,
            "GQ" | "QZ" => Talker::Qzss,
            "GI" => Talker::NavIC,
            "GN" => Talker::Gnss,
            other => Talker::Other(other.into()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Talker::Gps => "GP",
            Talker::Glonass => "GL",
            Talker::Galileo => "GA",
            Talker::BeiDou => "GB",
            Talker::Qzss => "GQ",
            Talker::NavIC => "GI",
            Talker::Gnss => "GN",
            Talker::Other(code) => code,
        }
    }

    /// Human readable name of the positioning system
    pub fn system_name(&self) -> &'static str {
        match self {
            Talker::Gps => "GPS",
            Talker::Glonass => "GLONASS",
            Talker::Galileo => "Galileo",
            Talker::BeiDou => "BeiDou",
            Talker::Qzss => "QZSS",
            Talker::NavIC => "NavIC",
            Talker::Gnss => "GNSS",
            Talker::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for Talker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A checksum-validated sentence split into its positional fields.
///
/// Fields borrow from the input line. An empty field is kept as an empty
/// string so every field keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    delimiter: StartDelimiter,
    tag: &'a str,
    fields: Vec<&'a str>,
    checksum: u8,
}

impl<'a> Sentence<'a> {
    /// Validates and tokenizes one line.
    ///
    /// Surrounding whitespace, including a trailing `<CR><LF>`, is ignored.
    pub fn parse(line: &'a str) -> Result<Self, ParserError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParserError::Empty);
        }
        if !line.is_ascii() {
            return Err(ParserError::NonAscii);
        }

        let bytes = line.as_bytes();
        let delimiter = match bytes[0] {
            NMEA_SYNC_CHAR => StartDelimiter::Parametric,
            NMEA_ENCAPSULATION_CHAR => StartDelimiter::Encapsulation,
            _ => return Err(ParserError::MissingStartDelimiter),
        };

        let star = bytes
            .iter()
            .position(|b| *b == NMEA_CHECKSUM_DELIMITER)
            .ok_or(ParserError::MissingChecksum)?;
        let digits = &bytes[star + 1..];
        if digits.len() != NMEA_CHECKSUM_LEN {
            return Err(ParserError::InvalidChecksumDigits);
        }
        let expected = parse_hex_byte(digits).ok_or(ParserError::InvalidChecksumDigits)?;

        let body = &line[1..star];
        let mut calc = NmeaChecksum::new();
        calc.update(body.as_bytes());
        calc.validate_result(expected)?;

        let mut tokens = body.split(NMEA_FIELD_DELIMITER as char);
        let tag = tokens.next().unwrap_or_default();
        if tag.len() < NMEA_SENTENCE_ID_LEN || !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ParserError::InvalidTag);
        }

        Ok(Self {
            delimiter,
            tag,
            fields: tokens.collect(),
            checksum: expected,
        })
    }

    pub fn delimiter(&self) -> StartDelimiter {
        self.delimiter
    }

    /// Talker and sentence identifier, e.g. `GPGGA`
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    /// Everything before the sentence identifier, usually two characters
    pub fn talker_code(&self) -> &'a str {
        &self.tag[..self.tag.len() - NMEA_SENTENCE_ID_LEN]
    }

    pub fn talker(&self) -> Talker {
        Talker::from_code(self.talker_code())
    }

    /// The trailing three characters of the tag, used as dispatch key
    pub fn sentence_id(&self) -> &'a str {
        &self.tag[self.tag.len() - NMEA_SENTENCE_ID_LEN..]
    }

    /// Data fields, not including the tag
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field at `index` with surrounding whitespace removed, or `""` past the end
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).map_or("", |field| field.trim())
    }

    /// Checksum transmitted with the sentence
    pub fn checksum(&self) -> u8 {
        self.checksum
    }
}

impl fmt::Display for Sentence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sentence(f, self.delimiter, self.tag, &self.fields)
    }
}

/// Builds a `$`-delimited sentence with a valid checksum, without line terminator.
///
/// ```
/// assert_eq!(
///     nmea0183::encode("GPGLL", &["4916.45", "N", "12311.12", "W", "225444", "A"]),
///     "$GPGLL,4916.45,N,12311.12,W,225444,A*31"
/// );
/// ```
pub fn encode(tag: &str, fields: &[&str]) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = write_sentence(&mut out, StartDelimiter::Parametric, tag, fields);
    out
}

fn write_sentence<W: Write>(
    out: &mut W,
    delimiter: StartDelimiter,
    tag: &str,
    fields: &[&str],
) -> fmt::Result {
    let mut calc = NmeaChecksum::new();
    calc.update(tag.as_bytes());
    out.write_char(delimiter.as_char())?;
    out.write_str(tag)?;
    for field in fields {
        calc.update_byte(NMEA_FIELD_DELIMITER);
        calc.update(field.as_bytes());
        out.write_char(NMEA_FIELD_DELIMITER as char)?;
        out.write_str(field)?;
    }
    write!(out, "*{:02X}", calc.result())
}
