//! CRC-16/CCITT-FALSE checksum used to seal payloads.

use crc::{Crc, CRC_16_IBM_3740};

// IBM 3740 is the catalogue entry for CCITT-FALSE: polynomial 0x1021,
// initial register 0xFFFF, MSB first, no reflection, no final XOR.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Compute the checksum of `data`, rendered as 4 uppercase hex digits.
pub fn checksum(data: &[u8]) -> String {
    format!("{:04X}", CRC16.checksum(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_vector() {
        assert_eq!(checksum(b"123456789"), "29B1");
    }

    #[test]
    fn empty_input_is_initial_register() {
        assert_eq!(checksum(&[]), "FFFF");
    }

    #[test]
    fn small_values_are_zero_padded() {
        assert_eq!(checksum(b"B4"), "0076");
    }

    #[test]
    fn deterministic() {
        let payload = b"00020101021152040000";
        assert_eq!(checksum(payload), checksum(payload));
    }
}
