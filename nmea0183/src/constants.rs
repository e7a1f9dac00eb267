pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_ENCAPSULATION_CHAR: u8 = 0x21; // '!'
pub const NMEA_CHECKSUM_DELIMITER: u8 = 0x2a; // '*'
pub const NMEA_FIELD_DELIMITER: u8 = 0x2c; // ','
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)

pub(crate) const NMEA_CHECKSUM_LEN: usize = 2; // two hex digits after '*'
pub(crate) const NMEA_SENTENCE_ID_LEN: usize = 3; // GGA, RMC, ...

/// Maximum sentence length allowed by NMEA-0183, including `$` and `<CR><LF>`.
pub const NMEA_MAX_SENTENCE_LENGTH: usize = 82;

/// Knots to metres per second, 1852 m / 3600 s.
pub const KNOTS_TO_METERS_PER_SECOND: f64 = 1852.0 / 3600.0;

/// Kilometres per hour to metres per second.
pub const KPH_TO_METERS_PER_SECOND: f64 = 1000.0 / 3600.0;
