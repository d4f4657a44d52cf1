//! Digest primitives and the Base58Check text codec used by the key chain.

pub mod base58;
pub mod hash;
pub mod hmac;

pub use base58::Base58Error;
