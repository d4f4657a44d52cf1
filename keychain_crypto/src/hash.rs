use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub fn sha256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// SHA-256 applied twice; the first four bytes are the Base58Check checksum.
pub fn sha256d(input: &[u8]) -> [u8; 32] {
    sha256(&sha256(input))
}

pub fn ripemd160(input: &[u8]) -> [u8; 20] {
    Ripemd160::digest(input).into()
}

/// RIPEMD160(SHA256(input)), the identifier of a public key.
pub fn hash160(input: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha256_vectors() {
        for (input, expected) in [
            (&b""[..], hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")),
            (&b"abc"[..], hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")),
        ] {
            assert_eq!(sha256(input), expected);
        }
    }

    #[test]
    fn sha256d_is_sha256_twice() {
        assert_eq!(
            sha256d(b""),
            hex!("5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456")
        );
        let data = [0x5au8; 300];
        assert_eq!(sha256d(&data), sha256(&sha256(&data)));
    }

    #[test]
    fn ripemd160_abc() {
        assert_eq!(
            ripemd160(b"abc"),
            hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc")
        );
    }

    // Identifier of the master public key from BIP32 test vector 1.
    #[test]
    fn hash160_of_compressed_pubkey() {
        let pubkey = hex!("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2");
        let expected = hex!("3442193e1bb70916e914552172cd4e2dbc9df811");
        assert_eq!(hash160(&pubkey), expected);
        assert_eq!(hash160(&pubkey), ripemd160(&sha256(&pubkey)));
    }
}
