use std::fmt;

/// Network an extended key is serialized for; selects the version bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

/// Whether a serialized extended key carries the private or the public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Private,
    Public,
}

const VERSION_MAINNET_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4]; // xprv
const VERSION_MAINNET_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E]; // xpub
const VERSION_TESTNET_PRIVATE: [u8; 4] = [0x04, 0x35, 0x83, 0x94]; // tprv
const VERSION_TESTNET_PUBLIC: [u8; 4] = [0x04, 0x35, 0x87, 0xCF]; // tpub

impl Network {
    /// Version prefix of a serialized key of `kind` on this network.
    pub fn version(self, kind: KeyKind) -> [u8; 4] {
        match (self, kind) {
            (Network::Mainnet, KeyKind::Private) => VERSION_MAINNET_PRIVATE,
            (Network::Mainnet, KeyKind::Public) => VERSION_MAINNET_PUBLIC,
            (Network::Testnet, KeyKind::Private) => VERSION_TESTNET_PRIVATE,
            (Network::Testnet, KeyKind::Public) => VERSION_TESTNET_PUBLIC,
        }
    }

    /// Looks up the network and key kind a version prefix belongs to.
    pub fn from_version(version: [u8; 4]) -> Option<(Network, KeyKind)> {
        match version {
            VERSION_MAINNET_PRIVATE => Some((Network::Mainnet, KeyKind::Private)),
            VERSION_MAINNET_PUBLIC => Some((Network::Mainnet, KeyKind::Public)),
            VERSION_TESTNET_PRIVATE => Some((Network::Testnet, KeyKind::Private)),
            VERSION_TESTNET_PUBLIC => Some((Network::Testnet, KeyKind::Public)),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}
