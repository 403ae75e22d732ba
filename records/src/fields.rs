use dependencies::hex;
use dependencies::secp256k1::{PublicKey, Signature};

use bitcoin_types::Hash256;

use super::RecordError;

pub fn encode_public_key(key: &PublicKey) -> String {
    hex::encode(&key.serialize()[..])
}

// A compressed key: 33 bytes, 0x02 or 0x03 prefix, on the curve.
pub fn decode_public_key(s: &str) -> Result<PublicKey, RecordError> {
    if s.len() != 66 || !(s.starts_with("02") || s.starts_with("03")) {
        return Err(RecordError::BadPublicKey);
    }
    let bytes = hex::decode(s).map_err(|_| RecordError::BadHex)?;
    PublicKey::from_slice(bytes.as_slice()).map_err(|_| RecordError::BadPublicKey)
}

pub fn decode_hash(s: &str) -> Result<Hash256, RecordError> {
    Hash256::from_hex(s).map_err(|_| RecordError::BadHash)
}

// The signature travels as der bytes; it is parsed once here so garbage
// never reaches the witness assembly.
pub fn decode_signature(s: &str) -> Result<Vec<u8>, RecordError> {
    let bytes = hex::decode(s).map_err(|_| RecordError::BadHex)?;
    Signature::from_der(bytes.as_slice()).map_err(|_| RecordError::BadSignature)?;
    Ok(bytes)
}

pub fn decode_utf8(s: &str) -> Result<String, RecordError> {
    let bytes = hex::decode(s).map_err(|_| RecordError::BadHex)?;
    String::from_utf8(bytes).map_err(|_| RecordError::BadUtf8)
}
