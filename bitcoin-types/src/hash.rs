use serde_derive::{Serialize, Deserialize};

// 32-byte hash as it appears on the node RPC surface, i.e. in display
// (reversed) byte order. Conversions to `bitcoin::Txid` flip the order.
#[derive(Serialize, Deserialize, Eq, PartialEq, Copy, Clone, Hash)]
pub struct Hash256 {
    data: [u8; 32],
}

#[derive(Debug, Eq, PartialEq)]
pub enum ParseHashError {
    WrongLength(usize),
    BadHex,
}

impl Hash256 {
    // Parses 64 hex characters in display order.
    pub fn from_hex(s: &str) -> Result<Hash256, ParseHashError> {
        if s.len() != 64 {
            return Err(ParseHashError::WrongLength(s.len()));
        }
        let bytes = dependencies::hex::decode(s)
            .map_err(|_| ParseHashError::BadHex)?;
        let mut this = Hash256 { data: [0u8; 32] };
        this.data.copy_from_slice(bytes.as_slice());
        Ok(this)
    }

    pub fn to_hex(&self) -> String {
        dependencies::hex::encode(&self.data[..])
    }
}

impl From<Hash256> for [u8; 32] {
    fn from(h: Hash256) -> Self {
        return h.data;
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(data: [u8; 32]) -> Self {
        Hash256 { data: data }
    }
}

mod bitcoin_m {
    use super::Hash256;

    use dependencies::bitcoin::Txid;
    use dependencies::bitcoin_hashes::Hash;

    impl Hash256 {
        pub fn to_txid(&self) -> Txid {
            let mut inner = self.data;
            inner.reverse();
            Txid::from_inner(inner)
        }

        pub fn from_txid(txid: &Txid) -> Self {
            let mut data = txid.into_inner();
            data.reverse();
            Hash256 { data: data }
        }
    }
}

mod fmt_m {
    use super::{Hash256, ParseHashError};

    use dependencies::hex::encode;
    use std::fmt;

    impl fmt::Debug for Hash256 {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "Hash256 [ {} ]", encode(&self.data[0..]))
        }
    }

    impl fmt::Display for Hash256 {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", encode(&self.data[0..]))
        }
    }

    impl fmt::Display for ParseHashError {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                &ParseHashError::WrongLength(actual) =>
                    write!(f, "expected 64 hex characters, got {}", actual),
                &ParseHashError::BadHex =>
                    write!(f, "not a hex string"),
            }
        }
    }

    impl std::error::Error for ParseHashError {
    }
}

#[cfg(any(test, feature = "testing"))]
mod rand_m {
    use super::Hash256;

    use dependencies::rand::distributions::Distribution;
    use dependencies::rand::distributions::Standard;
    use dependencies::rand::Rng;

    impl Distribution<Hash256> for Standard {
        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Hash256 {
            let mut rng = rng;
            let rnd_bytes: Vec<u8> = self.sample_iter(&mut rng).take(32).collect();
            let mut this = Hash256 { data: [0u8; 32] };
            this.data.copy_from_slice(rnd_bytes.as_slice());
            this
        }
    }
}
