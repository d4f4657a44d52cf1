use crate::curve::{COMPRESSED_POINT_LEN, CurveError, CurveOps};
use keychain_crypto::hash::hash160;
use std::fmt;

/// SEC1-encoded secp256k1 point, 33 bytes compressed or 65 uncompressed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    key: Vec<u8>,
}

impl PublicKey {
    /// Encoding already produced or validated by a curve backend.
    pub(crate) fn from_encoded(key: Vec<u8>) -> Self {
        PublicKey { key }
    }

    /// Validates `bytes` as a curve point, keeping the form it was given in.
    pub fn from_slice<C: CurveOps>(curve: &C, bytes: &[u8]) -> Result<Self, CurveError> {
        let compressed = bytes.len() == COMPRESSED_POINT_LEN;
        let key = curve.decode_point(bytes, compressed)?;
        Ok(PublicKey { key })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_compressed(&self) -> bool {
        self.key.len() == COMPRESSED_POINT_LEN
    }

    /// Same point in compressed form.
    pub fn to_compressed<C: CurveOps>(&self, curve: &C) -> Result<Self, CurveError> {
        if self.is_compressed() {
            return Ok(self.clone());
        }
        Ok(PublicKey {
            key: curve.decode_point(&self.key, true)?,
        })
    }

    /// RIPEMD160(SHA256(encoding)).
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.key)
    }

    /// First four identifier bytes, big-endian.
    pub fn fingerprint(&self) -> u32 {
        let id = self.identifier();
        u32::from_be_bytes([id[0], id[1], id[2], id[3]])
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Secp256k1Curve;
    use hex_literal::hex;

    const MASTER_PUB: [u8; 33] =
        hex!("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2");

    #[test]
    fn identifier_and_fingerprint() {
        let curve = Secp256k1Curve::new();
        let key = PublicKey::from_slice(&curve, &MASTER_PUB).unwrap();
        assert!(key.is_compressed());
        assert_eq!(key.len(), 33);
        assert_eq!(
            key.identifier(),
            hex!("3442193e1bb70916e914552172cd4e2dbc9df811")
        );
        assert_eq!(key.fingerprint(), 0x3442193e);
    }

    #[test]
    fn uncompressed_form_round_trips() {
        let curve = Secp256k1Curve::new();
        let compressed = PublicKey::from_slice(&curve, &MASTER_PUB).unwrap();
        let uncompressed =
            PublicKey::from_slice(&curve, &curve.decode_point(&MASTER_PUB, false).unwrap()).unwrap();
        assert!(!uncompressed.is_compressed());
        assert_eq!(uncompressed.len(), 65);
        assert_ne!(uncompressed, compressed);
        assert_ne!(uncompressed.identifier(), compressed.identifier());
        assert_eq!(uncompressed.to_compressed(&curve).unwrap(), compressed);
    }

    #[test]
    fn rejects_bad_encodings() {
        let curve = Secp256k1Curve::new();
        let mut bad_prefix = MASTER_PUB;
        bad_prefix[0] = 0x04;
        assert_eq!(
            PublicKey::from_slice(&curve, &bad_prefix),
            Err(CurveError::InvalidPoint)
        );
        assert_eq!(
            PublicKey::from_slice(&curve, &MASTER_PUB[1..]),
            Err(CurveError::InvalidPoint)
        );
    }
}
