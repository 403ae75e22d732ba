use dependencies::bitcoin::Transaction;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, MilliSatoshi, Satoshi, SatoshiPerVByte};
use records::RawRecord;

use std::error;
use std::fmt;
use std::time::Duration;

use super::keys::{KeyDescriptor, KeyFamily, KeyLocator};
use super::types::{
    CreatedInvoice, DecodedPaymentRequest, Invoice, PaymentState,
    PeerMessage, Peer, PendingChannel, PendingChannelRegistration,
    SignOutputRequest, TransitReservation,
};

// An error surfaced by the node control api. The protocol treats the api
// as opaque: there is nothing to inspect beyond which call failed and the
// node's own description.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub method: &'static str,
    pub details: String,
}

impl ApiError {
    pub fn new(method: &'static str, details: String) -> Self {
        ApiError {
            method: method,
            details: details,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "node api call {} failed: {}", self.method, self.details)
    }
}

impl error::Error for ApiError {
}

// Wallet side of the node: key derivation, signing, transit funding and
// chain broadcast.
pub trait WalletRpc {
    // Derives the public key at the given locator.
    fn derive_key(&self, locator: KeyLocator) -> Result<KeyDescriptor, ApiError>;

    // Derives a key at the next unused index of the family.
    fn derive_next_key(&self, family: KeyFamily) -> Result<KeyDescriptor, ApiError>;

    // Signs one input of the given transaction with the located key.
    // Returns the der encoded signature without a sighash suffix.
    fn sign_output(&self, request: &SignOutputRequest) -> Result<Vec<u8>, ApiError>;

    // A fresh address from the wallet, used as a refund destination.
    fn create_chain_address(&self) -> Result<String, ApiError>;

    // Selects and locks UTXOs, derives a transit key, and produces the
    // signed transit transaction with its refund path.
    fn reserve_transit_funds(
        &self,
        tokens: Satoshi,
        fee_rate: SatoshiPerVByte,
    ) -> Result<TransitReservation, ApiError>;

    // Renews the wallet-level lock on a reservation's UTXOs.
    fn extend_transit_lock(&self, outpoint: &ChannelPoint) -> Result<(), ApiError>;

    fn broadcast_transaction(
        &self,
        transaction: &Transaction,
        description: &str,
    ) -> Result<(), ApiError>;
}

pub trait InvoiceRpc {
    fn create_invoice(
        &self,
        mtokens: MilliSatoshi,
        description: &str,
    ) -> Result<CreatedInvoice, ApiError>;

    fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError>;

    fn lookup_invoice(&self, id: &Hash256) -> Result<Invoice, ApiError>;

    // Structural validation included: an Err means the string is not a
    // payment request at all.
    fn decode_payment_request(&self, request: &str) -> Result<DecodedPaymentRequest, ApiError>;
}

pub trait PaymentRpc {
    fn pay(&self, request: &str, messages: &[RawRecord]) -> Result<(), ApiError>;

    fn push_payment(
        &self,
        destination: &PublicKey,
        mtokens: MilliSatoshi,
        messages: &[RawRecord],
    ) -> Result<(), ApiError>;

    fn payment_state(&self, id: &Hash256) -> Result<PaymentState, ApiError>;
}

pub trait PeerRpc {
    fn list_peers(&self) -> Result<Vec<Peer>, ApiError>;

    fn connect_peer(&self, public_key: &PublicKey) -> Result<(), ApiError>;

    // Best effort delivery of records over the p2p connection. The
    // implementation must give up after the timeout.
    fn send_peer_message(
        &self,
        public_key: &PublicKey,
        records: &[RawRecord],
        timeout: Duration,
    ) -> Result<(), ApiError>;

    // Custom messages received since the last call, already unpacked.
    fn peer_messages(&self) -> Result<Vec<PeerMessage>, ApiError>;
}

pub trait ChannelRpc {
    fn register_pending_channel(
        &self,
        registration: &PendingChannelRegistration,
    ) -> Result<(), ApiError>;

    fn list_pending_channels(&self) -> Result<Vec<PendingChannel>, ApiError>;
}

// The whole node control surface the balanced open flows drive.
pub trait NodeApi: WalletRpc + InvoiceRpc + PaymentRpc + PeerRpc + ChannelRpc {}

impl<T> NodeApi for T where T: WalletRpc + InvoiceRpc + PaymentRpc + PeerRpc + ChannelRpc {}
