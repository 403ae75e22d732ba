#![forbid(unsafe_code)]

pub mod constants;

mod error;
pub use self::error::RecordError;

mod raw;
pub use self::raw::RawRecord;

mod number;
pub use self::number::{encode_number, decode_number};

mod fields;
pub use self::fields::{
    encode_public_key, decode_public_key,
    decode_hash, decode_signature, decode_utf8,
};

mod proposal;
pub use self::proposal::{OpenProposalRecords, accept_request_from_records};

mod acceptance;
pub use self::acceptance::AcceptanceRecords;
