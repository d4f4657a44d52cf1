use crate::curve::{CurveError, CurveOps, SCALAR_LEN};
use crate::public_key::PublicKey;
use std::fmt;
use zeroize::Zeroize;

/// secp256k1 secret scalar in `[1, N-1]` together with its public key.
///
/// The scalar is stored as its fixed-width 32-byte big-endian encoding and
/// wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: [u8; SCALAR_LEN],
    public_key: PublicKey,
}

impl PrivateKey {
    /// Builds a key from a 32-byte scalar and derives its public key in the
    /// requested encoding.
    pub fn new<C: CurveOps>(
        curve: &C,
        secret: [u8; SCALAR_LEN],
        compressed: bool,
    ) -> Result<Self, CurveError> {
        if !curve.is_valid_scalar(&secret) {
            return Err(CurveError::ScalarOutOfRange);
        }
        let public_key = PublicKey::from_encoded(curve.mul_generator(&secret, compressed)?);
        Ok(PrivateKey { secret, public_key })
    }

    /// Like [`PrivateKey::new`] but accepts a big-endian scalar of up to 32
    /// bytes, zero-padding it on the left.
    pub fn from_slice<C: CurveOps>(
        curve: &C,
        bytes: &[u8],
        compressed: bool,
    ) -> Result<Self, CurveError> {
        if bytes.len() > SCALAR_LEN {
            return Err(CurveError::ScalarOutOfRange);
        }
        let mut secret = [0u8; SCALAR_LEN];
        secret[SCALAR_LEN - bytes.len()..].copy_from_slice(bytes);
        let key = Self::new(curve, secret, compressed);
        secret.zeroize();
        key
    }

    pub fn as_bytes(&self) -> &[u8; SCALAR_LEN] {
        &self.secret
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_LEN] {
        self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn is_compressed(&self) -> bool {
        self.public_key.is_compressed()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("secret", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
