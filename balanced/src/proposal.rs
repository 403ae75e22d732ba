use dependencies::chrono::{DateTime, Utc};
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, OutputIndex, Satoshi, SatoshiPerVByte};
use nodeapi::{InvoiceRpc, PaymentRpc, PaymentState};

use super::Error;

// A peer's request to jointly fund a channel, as reconstructed from a
// proposal push payment. Read-only once scanned; the embedded accept
// request is both the reply channel and the idempotency handle.
#[derive(Debug, Clone)]
pub struct BalancedOpenProposal {
    pub capacity: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    pub partner_public_key: PublicKey,
    pub remote_multisig_key: PublicKey,
    pub remote_transit_tx_id: Hash256,
    pub remote_transit_tx_vout: OutputIndex,
    pub proposed_at: DateTime<Utc>,
    pub accept_request: String,
}

impl BalancedOpenProposal {
    pub fn remote_transit(&self) -> ChannelPoint {
        ChannelPoint::new(self.remote_transit_tx_id, u32::from(self.remote_transit_tx_vout))
    }
}

// Whether a proposal was already acted on. The protocol keeps no ledger of
// its own; the default implementation asks the local payment store about
// the accept request's payment id. Anything the store knows about the id,
// in whatever final or intermediate state, means the proposal is spent.
pub trait Resolution {
    fn is_resolved(&self, proposal: &BalancedOpenProposal) -> Result<bool, Error>;
}

pub struct PaymentStoreResolution<'a, N> {
    node: &'a N,
}

impl<'a, N> PaymentStoreResolution<'a, N> {
    pub fn new(node: &'a N) -> Self {
        PaymentStoreResolution { node: node }
    }
}

impl<'a, N> Resolution for PaymentStoreResolution<'a, N>
where
    N: InvoiceRpc + PaymentRpc,
{
    fn is_resolved(&self, proposal: &BalancedOpenProposal) -> Result<bool, Error> {
        let decoded = self.node.decode_payment_request(&proposal.accept_request)?;
        let state = self.node.payment_state(&decoded.id)?;
        Ok(state != PaymentState::NotFound)
    }
}
