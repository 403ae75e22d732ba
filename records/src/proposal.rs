use dependencies::hex;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{Hash256, OutputIndex, Satoshi, SatoshiPerVByte};

use std::convert::TryFrom;

use super::RawRecord;
use super::RecordError;
use super::constants::record_type;
use super::number::{encode_number, decode_number};
use super::fields::{encode_public_key, decode_public_key, decode_hash, decode_utf8};

// The record set the initiator attaches to the proposal push payment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpenProposalRecords {
    pub capacity: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    pub multisig_public_key: PublicKey,
    pub transit_tx_id: Hash256,
    pub transit_tx_vout: OutputIndex,
    pub accept_request: String,
}

impl OpenProposalRecords {
    pub fn to_records(&self) -> Vec<RawRecord> {
        vec![
            RawRecord::new(record_type::ACCEPT_REQUEST, hex::encode(self.accept_request.as_bytes())),
            RawRecord::new(record_type::CHANNEL_CAPACITY, encode_number(u64::from(self.capacity))),
            RawRecord::new(record_type::FUNDING_TX_FEE_RATE, encode_number(u64::from(self.fee_rate))),
            RawRecord::new(record_type::MULTISIG_PUBLIC_KEY, encode_public_key(&self.multisig_public_key)),
            RawRecord::new(record_type::TRANSIT_TX_ID, self.transit_tx_id.to_hex()),
            RawRecord::new(record_type::TRANSIT_TX_VOUT, encode_number(u64::from(self.transit_tx_vout))),
        ]
    }

    pub fn from_records(records: &[RawRecord]) -> Result<Self, RecordError> {
        let capacity = decode_number(&find(records, record_type::CHANNEL_CAPACITY)?.value)?;
        if capacity % 2 != 0 {
            return Err(RecordError::OddCapacity);
        }

        let fee_rate = decode_number(&find(records, record_type::FUNDING_TX_FEE_RATE)?.value)?;
        if fee_rate == 0 {
            return Err(RecordError::ZeroFeeRate);
        }

        let multisig_public_key =
            decode_public_key(&find(records, record_type::MULTISIG_PUBLIC_KEY)?.value)?;
        let transit_tx_id = decode_hash(&find(records, record_type::TRANSIT_TX_ID)?.value)?;
        let transit_tx_vout = decode_number(&find(records, record_type::TRANSIT_TX_VOUT)?.value)
            .and_then(|v| OutputIndex::try_from(v).map_err(|()| RecordError::BadOutputIndex))?;
        let accept_request = accept_request_from_records(records)?;

        Ok(OpenProposalRecords {
            capacity: Satoshi::from(capacity),
            fee_rate: SatoshiPerVByte::from(fee_rate),
            multisig_public_key: multisig_public_key,
            transit_tx_id: transit_tx_id,
            transit_tx_vout: transit_tx_vout,
            accept_request: accept_request,
        })
    }
}

// The accept request is looked at before everything else: a payment whose
// records do not contain a decodable request is not a proposal at all.
pub fn accept_request_from_records(records: &[RawRecord]) -> Result<String, RecordError> {
    decode_utf8(&find(records, record_type::ACCEPT_REQUEST)?.value)
}

fn find<'a>(records: &'a [RawRecord], record_type: &'static str) -> Result<&'a RawRecord, RecordError> {
    RawRecord::find(records, record_type).ok_or(RecordError::MissingRecord(record_type))
}
