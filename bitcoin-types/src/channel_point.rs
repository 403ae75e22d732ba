use serde_derive::{Serialize, Deserialize};

use dependencies::bitcoin::OutPoint;

use super::Hash256;

// The outpoint a funding or transit transaction pays into.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct ChannelPoint {
    hash: Hash256,
    index: u32,
}

impl ChannelPoint {
    pub fn new(hash: Hash256, index: u32) -> Self {
        ChannelPoint {
            hash: hash,
            index: index,
        }
    }

    pub fn hash(&self) -> Hash256 {
        self.hash
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn to_outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.hash.to_txid(),
            vout: self.index,
        }
    }

    pub fn from_outpoint(outpoint: &OutPoint) -> Self {
        ChannelPoint {
            hash: Hash256::from_txid(&outpoint.txid),
            index: outpoint.vout,
        }
    }
}

mod fmt_m {
    use super::ChannelPoint;

    use std::fmt;

    impl fmt::Display for ChannelPoint {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}:{}", self.hash, self.index)
        }
    }
}
