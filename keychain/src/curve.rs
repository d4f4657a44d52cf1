//! Elliptic-curve seam used by key derivation.
//!
//! Scalars cross this boundary as 32-byte big-endian arrays and points as
//! SEC1 encodings, so any secp256k1 backend can sit behind [`CurveOps`].

use secp256k1::{All, PublicKey as Point, Scalar, Secp256k1, SecretKey, constants::CURVE_ORDER};
use thiserror::Error;

pub const SCALAR_LEN: usize = 32;
pub const COMPRESSED_POINT_LEN: usize = 33;
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("scalar is zero or not below the curve order")]
    ScalarOutOfRange,
    #[error("scalar sum is zero modulo the curve order")]
    ZeroScalar,
    #[error("bytes do not encode a point on the curve")]
    InvalidPoint,
    #[error("result is the point at infinity")]
    PointAtInfinity,
}

/// Curve arithmetic consumed by [`crate::PrivateKey`] and [`crate::ExtendedKey`].
pub trait CurveOps {
    /// Order `N` of the generator, big-endian.
    fn order(&self) -> [u8; SCALAR_LEN];

    /// `k·G`, encoded compressed or uncompressed.
    ///
    /// Fails with [`CurveError::ScalarOutOfRange`] if `k` is 0 or `>= N`.
    fn mul_generator(&self, k: &[u8; SCALAR_LEN], compressed: bool) -> Result<Vec<u8>, CurveError>;

    /// `(a + b) mod N` where `a` is a valid secret scalar and `b < N`.
    fn add_scalars(
        &self,
        a: &[u8; SCALAR_LEN],
        b: &[u8; SCALAR_LEN],
    ) -> Result<[u8; SCALAR_LEN], CurveError>;

    /// `m·G + P` for an encoded point `P` and `m < N`.
    fn add_generator_multiple(
        &self,
        point: &[u8],
        m: &[u8; SCALAR_LEN],
        compressed: bool,
    ) -> Result<Vec<u8>, CurveError>;

    /// Validates an encoded point and re-encodes it in the requested form.
    fn decode_point(&self, bytes: &[u8], compressed: bool) -> Result<Vec<u8>, CurveError>;

    fn is_below_order(&self, scalar: &[u8; SCALAR_LEN]) -> bool {
        // equal-length big-endian arrays compare numerically
        *scalar < self.order()
    }

    /// True for scalars in `[1, N-1]`.
    fn is_valid_scalar(&self, scalar: &[u8; SCALAR_LEN]) -> bool {
        scalar.iter().any(|&b| b != 0) && self.is_below_order(scalar)
    }
}

/// secp256k1 backend built on libsecp256k1.
#[derive(Clone, Debug)]
pub struct Secp256k1Curve {
    secp: Secp256k1<All>,
}

impl Secp256k1Curve {
    pub fn new() -> Self {
        Secp256k1Curve {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Curve {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_point(point: &Point, compressed: bool) -> Vec<u8> {
    if compressed {
        point.serialize().to_vec()
    } else {
        point.serialize_uncompressed().to_vec()
    }
}

impl CurveOps for Secp256k1Curve {
    fn order(&self) -> [u8; SCALAR_LEN] {
        CURVE_ORDER
    }

    fn mul_generator(&self, k: &[u8; SCALAR_LEN], compressed: bool) -> Result<Vec<u8>, CurveError> {
        let secret = SecretKey::from_slice(k).map_err(|_| CurveError::ScalarOutOfRange)?;
        let point = Point::from_secret_key(&self.secp, &secret);
        Ok(encode_point(&point, compressed))
    }

    fn add_scalars(
        &self,
        a: &[u8; SCALAR_LEN],
        b: &[u8; SCALAR_LEN],
    ) -> Result<[u8; SCALAR_LEN], CurveError> {
        let base = SecretKey::from_slice(a).map_err(|_| CurveError::ScalarOutOfRange)?;
        let tweak = Scalar::from_be_bytes(*b).map_err(|_| CurveError::ScalarOutOfRange)?;
        // libsecp256k1 only rejects a tweak sum of zero
        let sum = base.add_tweak(&tweak).map_err(|_| CurveError::ZeroScalar)?;
        Ok(sum.secret_bytes())
    }

    fn add_generator_multiple(
        &self,
        point: &[u8],
        m: &[u8; SCALAR_LEN],
        compressed: bool,
    ) -> Result<Vec<u8>, CurveError> {
        let parent = Point::from_slice(point).map_err(|_| CurveError::InvalidPoint)?;
        let tweak = Scalar::from_be_bytes(*m).map_err(|_| CurveError::ScalarOutOfRange)?;
        let child = parent
            .add_exp_tweak(&self.secp, &tweak)
            .map_err(|_| CurveError::PointAtInfinity)?;
        Ok(encode_point(&child, compressed))
    }

    fn decode_point(&self, bytes: &[u8], compressed: bool) -> Result<Vec<u8>, CurveError> {
        if bytes.len() != COMPRESSED_POINT_LEN && bytes.len() != UNCOMPRESSED_POINT_LEN {
            return Err(CurveError::InvalidPoint);
        }
        let point = Point::from_slice(bytes).map_err(|_| CurveError::InvalidPoint)?;
        Ok(encode_point(&point, compressed))
    }
}
