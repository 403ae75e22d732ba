use dependencies::hex;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{Hash256, OutputIndex};

use std::convert::TryFrom;

use super::RawRecord;
use super::RecordError;
use super::constants::record_type;
use super::number::{encode_number, decode_number};
use super::fields::{encode_public_key, decode_public_key, decode_hash, decode_signature};

// The record set the acceptor sends back: its half of the multisig, its
// transit outpoint, and the signature over the joint funding transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AcceptanceRecords {
    pub multisig_public_key: PublicKey,
    pub transit_tx_id: Hash256,
    pub transit_tx_vout: OutputIndex,
    pub funding_signature: Vec<u8>,
    pub transit_public_key: PublicKey,
}

impl AcceptanceRecords {
    pub fn to_records(&self) -> Vec<RawRecord> {
        vec![
            RawRecord::new(record_type::MULTISIG_PUBLIC_KEY, encode_public_key(&self.multisig_public_key)),
            RawRecord::new(record_type::TRANSIT_TX_ID, self.transit_tx_id.to_hex()),
            RawRecord::new(record_type::TRANSIT_TX_VOUT, encode_number(u64::from(self.transit_tx_vout))),
            RawRecord::new(record_type::FUNDING_SIGNATURE, hex::encode(self.funding_signature.as_slice())),
            RawRecord::new(record_type::TRANSIT_PUBLIC_KEY, encode_public_key(&self.transit_public_key)),
        ]
    }

    pub fn from_records(records: &[RawRecord]) -> Result<Self, RecordError> {
        let multisig_public_key =
            decode_public_key(&find(records, record_type::MULTISIG_PUBLIC_KEY)?.value)?;
        let transit_tx_id = decode_hash(&find(records, record_type::TRANSIT_TX_ID)?.value)?;
        let transit_tx_vout = decode_number(&find(records, record_type::TRANSIT_TX_VOUT)?.value)
            .and_then(|v| OutputIndex::try_from(v).map_err(|()| RecordError::BadOutputIndex))?;
        let funding_signature =
            decode_signature(&find(records, record_type::FUNDING_SIGNATURE)?.value)?;
        let transit_public_key =
            decode_public_key(&find(records, record_type::TRANSIT_PUBLIC_KEY)?.value)?;

        Ok(AcceptanceRecords {
            multisig_public_key: multisig_public_key,
            transit_tx_id: transit_tx_id,
            transit_tx_vout: transit_tx_vout,
            funding_signature: funding_signature,
            transit_public_key: transit_public_key,
        })
    }
}

fn find<'a>(records: &'a [RawRecord], record_type: &'static str) -> Result<&'a RawRecord, RecordError> {
    RawRecord::find(records, record_type).ok_or(RecordError::MissingRecord(record_type))
}
