use crate::curve::{CurveError, CurveOps, SCALAR_LEN};
use crate::derivation::DerivationPath;
use crate::error::{KeyError, Result};
use crate::network::{KeyKind, Network};
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;
use keychain_crypto::{base58, hmac::hmac_sha512_split};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

/// Index offset for hardened children (index >= 0x80000000) i.e., 0x80000000 = 2³¹
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Length of a serialized extended key before the Base58Check checksum.
pub const SERIALIZED_LEN: usize = 78;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";
const RANDOM_SEED_LEN: usize = 32;
const KEY_FIELD_LEN: usize = 33;

pub fn is_hardened(index: u32) -> bool {
    index & HARDENED_OFFSET != 0
}

/// A node of the derivation tree: a key pair (or public key only) plus the
/// chain code and position metadata needed to derive its children.
///
/// Nodes carrying a private key can derive both hardened and normal
/// children. Public-only nodes derive normal children only, and every node
/// they produce is public-only as well.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedKey {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: u32,
    sequence: u32,
}

impl ExtendedKey {
    fn from_private(
        private_key: PrivateKey,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: u32,
        sequence: u32,
    ) -> Self {
        ExtendedKey {
            public_key: private_key.public_key().clone(),
            private_key: Some(private_key),
            chain_code,
            depth,
            parent_fingerprint,
            sequence,
        }
    }

    fn from_public(
        public_key: PublicKey,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: u32,
        sequence: u32,
    ) -> Self {
        ExtendedKey {
            private_key: None,
            public_key,
            chain_code,
            depth,
            parent_fingerprint,
            sequence,
        }
    }

    /// Master node from a seed of any length.
    ///
    /// Fails with [`KeyError::InvalidKey`] when the left half of
    /// HMAC-SHA512("Bitcoin seed", seed) is zero or not below the curve order.
    pub fn master<C: CurveOps>(curve: &C, seed: &[u8]) -> Result<Self> {
        let (mut il, ir) = hmac_sha512_split(MASTER_HMAC_KEY, seed);
        let private_key = PrivateKey::new(curve, il, true);
        il.zeroize();
        let private_key = private_key.inspect_err(|e| {
            warn!(error = %e, "seed does not produce a valid master key");
        })?;
        debug!(seed_len = seed.len(), "created master key");
        Ok(Self::from_private(private_key, ir, 0, 0, 0))
    }

    /// Master node from a hex-encoded seed.
    pub fn master_from_hex<C: CurveOps>(curve: &C, hex_seed: &str) -> Result<Self> {
        let seed = Zeroizing::new(hex::decode(hex_seed.trim())?);
        Self::master(curve, &seed)
    }

    /// Master node from a fresh 256-bit seed drawn from `rng`.
    pub fn generate_master<C, R>(curve: &C, rng: &mut R) -> Result<Self>
    where
        C: CurveOps,
        R: RngCore + CryptoRng,
    {
        let mut seed = Zeroizing::new([0u8; RANDOM_SEED_LEN]);
        rng.fill_bytes(&mut seed[..]);
        Self::master(curve, seed.as_ref())
    }

    /// Child key derivation.
    ///
    /// Indices with the top bit set select hardened derivation, which needs
    /// the private key. A tweak that is not below the curve order, a zero
    /// child scalar, or a child point at infinity fails with
    /// [`KeyError::InvalidKey`]; the caller decides whether to move on to
    /// the next index.
    pub fn derive<C: CurveOps>(&self, curve: &C, index: u32) -> Result<Self> {
        let hardened = is_hardened(index);

        // Hardened: 0x00 || private key (32) || index
        // Normal: compressed public key (33) || index
        let mut data = Zeroizing::new(Vec::with_capacity(1 + SCALAR_LEN + 4));
        if hardened {
            let private_key = self.private_key.as_ref().ok_or(KeyError::InvalidOperation(
                "hardened derivation requires a private key",
            ))?;
            data.push(0u8);
            data.extend_from_slice(private_key.as_bytes());
        } else {
            data.extend_from_slice(self.public_key.as_bytes());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let depth = self
            .depth
            .checked_add(1)
            .ok_or(KeyError::InvalidOperation("maximum derivation depth reached"))?;

        let (mut il, ir) = hmac_sha512_split(&self.chain_code, data.as_slice());
        if !curve.is_below_order(&il) {
            il.zeroize();
            warn!(index, depth, "tweak is not below the curve order");
            return Err(KeyError::InvalidKey(CurveError::ScalarOutOfRange));
        }

        let parent_fingerprint = self.fingerprint();
        let child = match &self.private_key {
            // child = (IL + k) mod N
            Some(parent) => curve
                .add_scalars(parent.as_bytes(), &il)
                .and_then(|mut secret| {
                    let key = PrivateKey::new(curve, secret, true);
                    secret.zeroize();
                    key
                })
                .map(|key| Self::from_private(key, ir, depth, parent_fingerprint, index)),
            // child = IL·G + K
            None => curve
                .add_generator_multiple(self.public_key.as_bytes(), &il, true)
                .map(|point| {
                    Self::from_public(
                        PublicKey::from_encoded(point),
                        ir,
                        depth,
                        parent_fingerprint,
                        index,
                    )
                }),
        };
        il.zeroize();

        let child = child.inspect_err(|e| {
            warn!(index, depth, error = %e, "derived child key is invalid");
        })?;
        trace!(
            depth,
            index,
            hardened,
            private = child.has_private_key(),
            "derived child key"
        );
        Ok(child)
    }

    /// Hardened child at `index` (the hardened bit is set for the caller).
    pub fn private_derivation<C: CurveOps>(&self, curve: &C, index: u32) -> Result<Self> {
        self.derive(curve, index | HARDENED_OFFSET)
    }

    /// Normal child at `index`; the index must not carry the hardened bit.
    pub fn public_derivation<C: CurveOps>(&self, curve: &C, index: u32) -> Result<Self> {
        if is_hardened(index) {
            return Err(KeyError::InvalidOperation(
                "public derivation index has the hardened bit set",
            ));
        }
        self.derive(curve, index)
    }

    /// Derives every step of `path` in turn, starting from this node.
    pub fn derive_path<C: CurveOps>(&self, curve: &C, path: &DerivationPath) -> Result<Self> {
        let mut key = self.clone();
        for &index in path {
            key = key.derive(curve, index)?;
        }
        debug!(%path, depth = key.depth, "derived key along path");
        Ok(key)
    }

    /// Same node with the private key dropped.
    pub fn neuter(&self) -> Self {
        Self::from_public(
            self.public_key.clone(),
            self.chain_code,
            self.depth,
            self.parent_fingerprint,
            self.sequence,
        )
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> u32 {
        self.parent_fingerprint
    }

    /// Child index this node was derived with, 0 for the master.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn is_hardened(&self) -> bool {
        is_hardened(self.sequence)
    }

    pub fn identifier(&self) -> [u8; 20] {
        self.public_key.identifier()
    }

    /// Fingerprint children of this node record as their parent fingerprint.
    pub fn fingerprint(&self) -> u32 {
        self.public_key.fingerprint()
    }

    // version (4) | depth (1) | parent fingerprint (4) | sequence (4) | chain code (32) | key (33)
    fn write_payload(&self, version: [u8; 4], key_field: &[u8]) -> [u8; SERIALIZED_LEN] {
        let mut payload = [0u8; SERIALIZED_LEN];
        payload[0..4].copy_from_slice(&version);
        payload[4] = self.depth;
        payload[5..9].copy_from_slice(&self.parent_fingerprint.to_be_bytes());
        payload[9..13].copy_from_slice(&self.sequence.to_be_bytes());
        payload[13..45].copy_from_slice(&self.chain_code);
        payload[45..].copy_from_slice(key_field);
        payload
    }

    fn public_payload(&self, network: Network) -> [u8; SERIALIZED_LEN] {
        self.write_payload(network.version(KeyKind::Public), self.public_key.as_bytes())
    }

    /// The 78-byte serialization of this node.
    ///
    /// Serializing [`KeyKind::Private`] from a public-only node fails with
    /// [`KeyError::InvalidOperation`].
    pub fn to_bytes(&self, network: Network, kind: KeyKind) -> Result<[u8; SERIALIZED_LEN]> {
        match kind {
            KeyKind::Public => Ok(self.public_payload(network)),
            KeyKind::Private => {
                let private_key = self.private_key.as_ref().ok_or(KeyError::InvalidOperation(
                    "cannot serialize a private key from a public-only node",
                ))?;
                let mut key_field = [0u8; KEY_FIELD_LEN];
                key_field[1..].copy_from_slice(private_key.as_bytes());
                let payload = self.write_payload(network.version(KeyKind::Private), &key_field);
                key_field.zeroize();
                Ok(payload)
            }
        }
    }

    /// Base58Check text of [`ExtendedKey::to_bytes`].
    pub fn serialize(&self, network: Network, kind: KeyKind) -> Result<String> {
        let mut payload = self.to_bytes(network, kind)?;
        let encoded = base58::check_encode(&payload);
        payload.zeroize();
        Ok(encoded)
    }

    /// `xprv` / `tprv` text.
    pub fn serialize_private(&self, network: Network) -> Result<String> {
        self.serialize(network, KeyKind::Private)
    }

    /// `xpub` / `tpub` text.
    pub fn serialize_public(&self, network: Network) -> String {
        base58::check_encode(&self.public_payload(network))
    }

    /// Parses the 78-byte serialization for `network`.
    ///
    /// Depth, parent fingerprint and sequence are taken as encoded; only the
    /// key material is validated.
    pub fn from_bytes<C: CurveOps>(curve: &C, data: &[u8], network: Network) -> Result<Self> {
        if data.len() != SERIALIZED_LEN {
            return Err(KeyError::InvalidLength(data.len()));
        }
        let version = [data[0], data[1], data[2], data[3]];
        let (found, kind) = Network::from_version(version).ok_or(KeyError::UnknownVersion(version))?;
        if found != network {
            return Err(KeyError::NetworkMismatch {
                expected: network,
                found,
            });
        }

        let depth = data[4];
        let parent_fingerprint = u32::from_be_bytes([data[5], data[6], data[7], data[8]]);
        let sequence = u32::from_be_bytes([data[9], data[10], data[11], data[12]]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);
        let key_field = &data[45..];

        let key = match kind {
            KeyKind::Private => {
                // the leading key byte is padding and is not inspected
                let mut secret = [0u8; SCALAR_LEN];
                secret.copy_from_slice(&key_field[1..]);
                let private_key = PrivateKey::new(curve, secret, true);
                secret.zeroize();
                Self::from_private(private_key?, chain_code, depth, parent_fingerprint, sequence)
            }
            KeyKind::Public => {
                let point = curve.decode_point(key_field, true)?;
                Self::from_public(
                    PublicKey::from_encoded(point),
                    chain_code,
                    depth,
                    parent_fingerprint,
                    sequence,
                )
            }
        };
        debug!(%network, ?kind, depth, sequence, "parsed extended key");
        Ok(key)
    }

    /// Parses `xprv` / `xpub` / `tprv` / `tpub` text for `network`.
    pub fn deserialize<C: CurveOps>(curve: &C, text: &str, network: Network) -> Result<Self> {
        let data = Zeroizing::new(base58::check_decode(text)?);
        Self::from_bytes(curve, data.as_slice(), network)
    }
}
