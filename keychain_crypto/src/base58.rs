//! Base58 and Base58Check text encoding.
//!
//! Base58Check appends the first four bytes of a double SHA-256 of the
//! payload before encoding, so corrupted text is rejected on decode.

use crate::hash::sha256d;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character {0:?}")]
    InvalidCharacter(char),
    #[error("base58check payload shorter than its 4-byte checksum")]
    TooShort,
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
}

pub const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const CHECKSUM_LEN: usize = 4;

// Reverse lookup from ASCII to digit value, -1 for characters outside the alphabet.
const DIGIT_VALUES: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

fn digit_value(c: char) -> Option<u32> {
    let idx = c as usize;
    if idx >= DIGIT_VALUES.len() || DIGIT_VALUES[idx] < 0 {
        return None;
    }
    Some(DIGIT_VALUES[idx] as u32)
}

/// Encodes `data` as Base58. Each leading zero byte becomes a leading `'1'`.
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // base-58 digits of the remaining big-endian integer, least significant first
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat_n(BASE58_ALPHABET[0] as char, zeros));
    encoded.extend(
        digits
            .iter()
            .rev()
            .map(|&d| BASE58_ALPHABET[d as usize] as char),
    );
    encoded
}

/// Decodes Base58 text. Leading `'1'` characters become leading zero bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    let zeros = s.bytes().take_while(|&b| b == BASE58_ALPHABET[0]).count();

    // base-256 bytes of the accumulated integer, least significant first
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    for c in s.chars().skip(zeros) {
        let mut carry = digit_value(c).ok_or(Base58Error::InvalidCharacter(c))?;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    bytes.extend(std::iter::repeat_n(0u8, zeros));
    bytes.reverse();
    Ok(bytes)
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encodes `payload` followed by its 4-byte double SHA-256 checksum.
pub fn check_encode(payload: &[u8]) -> String {
    let mut extended = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    extended.extend_from_slice(payload);
    extended.extend_from_slice(&checksum(payload));
    encode(&extended)
}

/// Decodes Base58Check text and verifies the trailing checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    let mut raw = decode(s)?;
    if raw.len() < CHECKSUM_LEN {
        return Err(Base58Error::TooShort);
    }
    let payload_len = raw.len() - CHECKSUM_LEN;
    if checksum(&raw[..payload_len]) != raw[payload_len..] {
        return Err(Base58Error::ChecksumMismatch);
    }
    raw.truncate(payload_len);
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn leading_zeroes() {
        assert_eq!(encode(&[0]), "1");
        assert_eq!(encode(&[0, 1]), "12");
        assert_eq!(encode(&[0, 0, 1]), "112");
        assert_eq!(encode(&[0, 0, 0, 1]), "1112");
        assert_eq!(decode("112").unwrap(), vec![0, 0, 1]);
        assert_eq!(decode("1115T").unwrap(), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(&[0x61]), "2g");
        assert_eq!(encode(&[0x62, 0x62, 0x62]), "a3gV");
        assert_eq!(encode(&[0x63, 0x63, 0x63]), "aPEr");
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(decode("Ldp").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode("5T").unwrap(), vec![1, 2]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn one_after_first_digit_is_a_zero_digit() {
        // "21" is 1 * 58 + 0
        assert_eq!(decode("21").unwrap(), vec![58]);
        assert_eq!(encode(&[58]), "21");
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(decode("4P1e!"), Err(Base58Error::InvalidCharacter('!')));
        for c in ['0', 'O', 'I', 'l'] {
            assert_eq!(
                decode(&format!("2{c}")),
                Err(Base58Error::InvalidCharacter(c))
            );
        }
        assert_eq!(decode("2é"), Err(Base58Error::InvalidCharacter('é')));
    }

    #[test]
    fn check_keeps_leading_zero_bytes() {
        let payload = [0x00, 0x00, 0x01, 0x02];
        let encoded = check_encode(&payload);
        assert!(encoded.starts_with("11"));
        assert!(!encoded[2..].starts_with('1'));
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn check_encode_empty_payload() {
        let encoded = check_encode(b"");
        assert_eq!(check_decode(&encoded).unwrap(), b"");
    }

    #[test]
    fn check_decode_too_short() {
        assert_eq!(check_decode(""), Err(Base58Error::TooShort));
        assert_eq!(check_decode("1"), Err(Base58Error::TooShort));
        assert_eq!(check_decode(&encode(&[1, 2, 3])), Err(Base58Error::TooShort));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let payload = b"Hello, World!";
        let mut raw = payload.to_vec();
        raw.extend_from_slice(&checksum(payload));
        for i in payload.len()..raw.len() {
            let mut corrupted = raw.clone();
            corrupted[i] ^= 0xff;
            assert_eq!(
                check_decode(&encode(&corrupted)),
                Err(Base58Error::ChecksumMismatch),
                "checksum byte {i} flipped"
            );
        }
    }

    #[test]
    fn check_decode_invalid_character() {
        let mut encoded = check_encode(b"Hello, World!").into_bytes();
        encoded[3] = b'0';
        let text = String::from_utf8(encoded).unwrap();
        assert_eq!(check_decode(&text), Err(Base58Error::InvalidCharacter('0')));
    }

    proptest! {
        #[test]
        fn check_round_trip(data in proptest::collection::vec(any::<u8>(), 0..96)) {
            let encoded = check_encode(&data);
            prop_assert_eq!(check_decode(&encoded).unwrap(), data);
        }

        #[test]
        fn zero_prefix_maps_to_ones(zeros in 0usize..8, tail in proptest::collection::vec(1u8.., 1..16)) {
            let mut data = vec![0u8; zeros];
            data.extend_from_slice(&tail);
            let encoded = encode(&data);
            let ones = encoded.chars().take_while(|&c| c == '1').count();
            prop_assert_eq!(ones, zeros);
            prop_assert_eq!(decode(&encoded).unwrap(), data);
        }
    }
}
