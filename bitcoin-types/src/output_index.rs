use serde_derive::{Serialize, Deserialize};

use std::convert::TryFrom;

// Transaction output index. Transit and funding outputs live in small
// transactions, so anything that does not fit u16 is treated as garbage.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct OutputIndex {
    index: u16,
}

impl From<OutputIndex> for u16 {
    fn from(x: OutputIndex) -> Self {
        return x.index;
    }
}

impl From<OutputIndex> for u32 {
    fn from(x: OutputIndex) -> Self {
        return x.index as u32;
    }
}

impl From<OutputIndex> for u64 {
    fn from(x: OutputIndex) -> Self {
        return x.index as u64;
    }
}

impl From<u16> for OutputIndex {
    fn from(index: u16) -> Self {
        OutputIndex { index: index }
    }
}

impl TryFrom<u64> for OutputIndex {
    type Error = ();

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > u16::max_value() as u64 {
            return Err(());
        }
        Ok(OutputIndex { index: value as u16 })
    }
}
