use std::error;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum RecordError {
    MissingRecord(&'static str),
    BadHex,
    BadNumber,
    NumberTooLarge,
    BadHash,
    BadPublicKey,
    BadSignature,
    BadOutputIndex,
    OddCapacity,
    ZeroFeeRate,
    BadUtf8,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::RecordError::*;

        match self {
            &MissingRecord(record_type) => write!(f, "record type {} is missing", record_type),
            &BadHex => write!(f, "record value is not a hex string"),
            &BadNumber => write!(f, "record value is not a minimal big endian number"),
            &NumberTooLarge => write!(f, "numeric record value exceeds the maximum width"),
            &BadHash => write!(f, "record value is not a 32-byte hash"),
            &BadPublicKey => write!(f, "record value is not a compressed public key"),
            &BadSignature => write!(f, "record value is not a der encoded signature"),
            &BadOutputIndex => write!(f, "record value is not a small output index"),
            &OddCapacity => write!(f, "channel capacity must be even"),
            &ZeroFeeRate => write!(f, "funding tx fee rate must be nonzero"),
            &BadUtf8 => write!(f, "record value is not utf8 text"),
        }
    }
}

impl error::Error for RecordError {
}
