use serde_derive::{Serialize, Deserialize};

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize, Debug, Hash)]
pub struct Satoshi {
    raw: u64,
}

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize, Debug, Hash)]
pub struct MilliSatoshi {
    raw: u64,
}

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize, Debug, Hash)]
pub struct SatoshiPerVByte {
    raw: u64,
}

mod wrappers {
    use super::*;

    impl From<Satoshi> for u64 {
        fn from(s: Satoshi) -> Self {
            return s.raw;
        }
    }

    impl From<u64> for Satoshi {
        fn from(s: u64) -> Self {
            Satoshi { raw: s }
        }
    }

    impl From<MilliSatoshi> for u64 {
        fn from(m: MilliSatoshi) -> Self {
            return m.raw;
        }
    }

    impl From<u64> for MilliSatoshi {
        fn from(s: u64) -> MilliSatoshi {
            MilliSatoshi { raw: s }
        }
    }

    impl From<SatoshiPerVByte> for u64 {
        fn from(s: SatoshiPerVByte) -> Self {
            return s.raw;
        }
    }

    impl From<u64> for SatoshiPerVByte {
        fn from(s: u64) -> SatoshiPerVByte {
            SatoshiPerVByte { raw: s }
        }
    }
}
