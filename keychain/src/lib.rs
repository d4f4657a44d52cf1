//! Hierarchical deterministic (BIP32) key derivation over secp256k1.
//!
//! ```no_run
//! use keychain::{ExtendedKey, Network, Secp256k1Curve};
//!
//! let curve = Secp256k1Curve::new();
//! let master = ExtendedKey::master_from_hex(&curve, "000102030405060708090a0b0c0d0e0f")?;
//! let account = master.derive_path(&curve, &"m/44'/0'/0'".parse()?)?;
//! println!("{}", account.serialize_public(Network::Mainnet));
//! # Ok::<(), keychain::KeyError>(())
//! ```

pub mod curve;
pub mod derivation;
pub mod error;
pub mod extended_key;
pub mod network;
pub mod private_key;
pub mod public_key;

pub use curve::{CurveError, CurveOps, Secp256k1Curve};
pub use derivation::DerivationPath;
pub use error::{KeyError, Result};
pub use extended_key::{ExtendedKey, HARDENED_OFFSET, SERIALIZED_LEN};
pub use network::{KeyKind, Network};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
