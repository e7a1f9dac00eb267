use crate::error::ParserError;

/// NMEA XOR checksum calculator supporting both streaming and single-shot validation
#[derive(Default, Debug, Clone, Copy)]
pub struct NmeaChecksum {
    value: u8,
}

impl NmeaChecksum {
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Update checksum with new bytes
    pub const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub const fn update_byte(&mut self, byte: u8) {
        self.value ^= byte;
    }

    /// Get the current checksum result
    pub const fn result(self) -> u8 {
        self.value
    }

    /// Validate checksum against the value transmitted after `*`
    pub const fn validate_result(self, received: u8) -> Result<(), ParserError> {
        if self.is_valid(received) {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: received,
                got: self.value,
            })
        }
    }

    const fn is_valid(&self, received: u8) -> bool {
        self.value == received
    }
}

/// Single-shot checksum of the bytes between the start delimiter and `*`.
pub const fn checksum(bytes: &[u8]) -> u8 {
    let mut calc = NmeaChecksum::new();
    calc.update(bytes);
    calc.result()
}

/// Decodes the two hex digits following `*`. Both cases are accepted.
pub(crate) const fn parse_hex_byte(digits: &[u8]) -> Option<u8> {
    if digits.len() != 2 {
        return None;
    }
    match (hex_value(digits[0]), hex_value(digits[1])) {
        (Some(hi), Some(lo)) => Some((hi << 4) | lo),
        _ => None,
    }
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Content between '$' and '*' of `$GPGLL,4916.45,N,12311.12,W,225444,A*31`
    const GLL_BODY: &[u8] = b"GPGLL,4916.45,N,12311.12,W,225444,A";
    const GLL_CHECKSUM: u8 = 0x31;

    #[test]
    fn test_single_shot_checksum() {
        assert_eq!(checksum(GLL_BODY), GLL_CHECKSUM);
        assert_eq!(
            checksum(b"GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W"),
            0x6a
        );
        assert_eq!(checksum(b"GNGLL,,,,,,V,N"), 0x7a);
    }

    #[test]
    fn test_streaming_checksum_valid() {
        let mut calc = NmeaChecksum::new();
        calc.update(GLL_BODY);
        assert_eq!(calc.validate_result(GLL_CHECKSUM), Ok(()));
    }

    #[test]
    fn test_streaming_checksum_invalid() {
        let mut calc = NmeaChecksum::new();
        calc.update(GLL_BODY);
        assert_eq!(
            calc.validate_result(0x32),
            Err(ParserError::InvalidChecksum {
                expect: 0x32,
                got: GLL_CHECKSUM
            })
        );
    }

    #[test]
    fn test_streaming_checksum_chunks() {
        let mut calc = NmeaChecksum::new();
        calc.update(&GLL_BODY[..5]); // Tag
        calc.update(&GLL_BODY[5..20]);
        for byte in &GLL_BODY[20..] {
            calc.update_byte(*byte);
        }
        assert_eq!(calc.result(), GLL_CHECKSUM);
    }

    #[test]
    fn test_empty_body_checksum() {
        assert_eq!(checksum(b""), 0);
        assert_eq!(NmeaChecksum::default().result(), 0);
    }

    #[test]
    fn test_parse_hex_byte() {
        assert_eq!(parse_hex_byte(b"6A"), Some(0x6a));
        assert_eq!(parse_hex_byte(b"6a"), Some(0x6a));
        assert_eq!(parse_hex_byte(b"00"), Some(0));
        assert_eq!(parse_hex_byte(b"FF"), Some(0xff));
        assert_eq!(parse_hex_byte(b"6"), None);
        assert_eq!(parse_hex_byte(b"6A0"), None);
        assert_eq!(parse_hex_byte(b"G1"), None);
    }

    #[test]
    fn test_const_checksum_computation() {
        // Compile-time assertion
        const _: () = {
            assert!(checksum(GLL_BODY) == GLL_CHECKSUM);
        };
    }
}
