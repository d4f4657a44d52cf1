use crate::curve::CurveError;
use crate::network::Network;
use keychain_crypto::Base58Error;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] CurveError),
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("encoded key is too short to hold a checksum")]
    TooShort,
    #[error("encoded key checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid base58 character {0:?}")]
    InvalidCharacter(char),
    #[error("extended key must be 78 bytes, got {0}")]
    InvalidLength(usize),
    #[error("unknown extended key version {0:02x?}")]
    UnknownVersion([u8; 4]),
    #[error("extended key is for {found}, expected {expected}")]
    NetworkMismatch { expected: Network, found: Network },
    #[error("invalid hex seed: {0}")]
    InvalidHex(String),
    #[error("invalid derivation path {0:?}")]
    InvalidDerivationPath(String),
}

pub type Result<T> = std::result::Result<T, KeyError>;

impl From<Base58Error> for KeyError {
    fn from(e: Base58Error) -> Self {
        match e {
            Base58Error::InvalidCharacter(c) => KeyError::InvalidCharacter(c),
            Base58Error::TooShort => KeyError::TooShort,
            Base58Error::ChecksumMismatch => KeyError::ChecksumMismatch,
        }
    }
}

impl From<hex::FromHexError> for KeyError {
    fn from(e: hex::FromHexError) -> Self {
        KeyError::InvalidHex(e.to_string())
    }
}
