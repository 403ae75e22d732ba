use dependencies::bitcoin::Transaction;
use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::blockdata::transaction::SigHashType;
use dependencies::chrono::{DateTime, Utc};
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, MilliSatoshi, Satoshi};
use records::RawRecord;

use super::keys::{KeyDescriptor, KeyLocator};

// A received invoice as the node reports it. Push payments show up here
// too: they are invoices the node never issued but settled anyway.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: Hash256,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub is_confirmed: bool,
    pub is_push: bool,
    pub received_mtokens: MilliSatoshi,
    pub payments: Vec<InvoicePayment>,
}

// One settled HTLC of an invoice, with the message records it carried.
#[derive(Debug, Clone)]
pub struct InvoicePayment {
    pub messages: Vec<RawRecord>,
}

#[derive(Debug, Clone)]
pub struct CreatedInvoice {
    pub id: Hash256,
    pub request: String,
}

// The parts of a decoded payment request the protocol looks at.
#[derive(Debug, Clone)]
pub struct DecodedPaymentRequest {
    pub destination: PublicKey,
    pub id: Hash256,
    pub mtokens: MilliSatoshi,
}

// State of an outgoing payment in the local payment store. NotFound means
// the payment was never attempted; everything else means the corresponding
// proposal was already acted on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PaymentState {
    NotFound,
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PendingChannel {
    pub funding: ChannelPoint,
    pub partner_public_key: PublicKey,
    pub local_balance: Satoshi,
    pub is_opening: bool,
}

// Ties a funding outpoint to the node's channel acceptance machinery, so
// the channel establishment messages referencing the outpoint are
// recognized when they arrive.
#[derive(Debug, Clone)]
pub struct PendingChannelRegistration {
    pub id: Hash256,
    pub multisig_key_index: u32,
    pub remote_multisig_key: PublicKey,
    pub funding: ChannelPoint,
    pub capacity: Satoshi,
}

#[derive(Debug, Clone)]
pub struct Peer {
    pub public_key: PublicKey,
}

// A low level custom message received from a peer, already unpacked into
// records.
#[derive(Debug, Clone)]
pub struct PeerMessage {
    pub from: PublicKey,
    pub records: Vec<RawRecord>,
}

// Everything the remote signer needs to produce a signature for one input
// of the given transaction.
#[derive(Debug)]
pub struct SignOutputRequest<'a> {
    pub transaction: &'a Transaction,
    pub input_index: usize,
    pub key: KeyLocator,
    pub output_script: Script,
    pub output_value: Satoshi,
    pub sighash: SigHashType,
}

// One party's reserved contribution: a signed transaction moving the
// funds to a single-key transit output, plus a pre-signed refund path in
// case the joint open never completes. The reservation owns its UTXOs
// until the funding transaction confirms or the refund is used.
#[derive(Debug, Clone)]
pub struct TransitReservation {
    pub outpoint: ChannelPoint,
    pub key: KeyDescriptor,
    pub output_script: Script,
    pub tokens: Satoshi,
    pub transaction: Transaction,
    pub refund: Transaction,
}
