#![forbid(unsafe_code)]

mod hash;
pub use self::hash::{Hash256, ParseHashError};

mod output_index;
pub use self::output_index::OutputIndex;

mod channel_point;
pub use self::channel_point::ChannelPoint;

mod units;
pub use self::units::Satoshi;
pub use self::units::MilliSatoshi;
pub use self::units::SatoshiPerVByte;
