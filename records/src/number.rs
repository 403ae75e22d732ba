use dependencies::hex;

use super::RecordError;
use super::constants::MAX_NUMBER_BYTES;

// Minimal big-endian hex: no leading zero bytes, always a whole number of
// bytes. Zero is a single zero byte.
pub fn encode_number(value: u64) -> String {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    hex::encode(&bytes[skip..])
}

// Accepts at most MAX_NUMBER_BYTES bytes. Length is checked before the
// value is interpreted, so a value near the boundary can never be
// silently truncated.
pub fn decode_number(s: &str) -> Result<u64, RecordError> {
    if s.is_empty() || s.len() % 2 != 0 {
        return Err(RecordError::BadNumber);
    }
    if s.len() > 2 * MAX_NUMBER_BYTES {
        return Err(RecordError::NumberTooLarge);
    }
    let bytes = hex::decode(s).map_err(|_| RecordError::BadHex)?;
    let mut value = 0u64;
    for b in bytes {
        value = (value << 8) | b as u64;
    }
    Ok(value)
}
