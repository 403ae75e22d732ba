use dependencies::bitcoin::Transaction;
use dependencies::bitcoin::blockdata::transaction::SigHashType;
use dependencies::log::info;

use bitcoin_types::{ChannelPoint, Hash256, OutputIndex, SatoshiPerVByte};
use funding::FundingTx;
use nodeapi::{
    KeyLocator, NodeApi, PendingChannelRegistration, SignOutputRequest,
};
use records::AcceptanceRecords;
use records::constants::MULTISIG_KEY_FAMILY;

use std::convert::TryFrom;

use super::Error;
use super::config::OpenConfig;
use super::funds::{half_balance, transit_tokens};
use super::poll::wait_for_pending_channel;
use super::proposal::BalancedOpenProposal;
use super::transport::{
    FallbackTransport, PaymentTransport, PeerMessageTransport, RecordTransport,
};

pub struct AcceptBalancedChannel {
    pub proposal: BalancedOpenProposal,
    pub multisig_key_index: u32,
    // rate the wallet pays to fund the transit output
    pub fee_rate: SatoshiPerVByte,
    pub config: OpenConfig,
}

pub struct AcceptedOpen {
    pub funding: ChannelPoint,
    pub pending_channel_id: Hash256,
    // everything this side still has to broadcast
    pub transactions: Vec<Transaction>,
}

// Drives a scanned proposal to a signed joint funding transaction and
// reports the acceptance back to the initiator. Every stage is gated on
// the previous one; a failure before delivery leaves nothing but a
// recoverable transit reservation behind.
pub fn accept_balanced_channel<N: NodeApi>(
    node: &N,
    args: AcceptBalancedChannel,
) -> Result<AcceptedOpen, Error> {
    let proposal = &args.proposal;

    let multisig = node.derive_key(KeyLocator::new(MULTISIG_KEY_FAMILY, args.multisig_key_index))?;

    let tokens = transit_tokens(proposal.capacity, proposal.fee_rate);
    let reservation = node.reserve_transit_funds(tokens, args.fee_rate)?;

    let funding = FundingTx {
        local_transit: reservation.outpoint,
        remote_transit: proposal.remote_transit(),
        local_multisig_key: multisig.public_key,
        remote_multisig_key: proposal.remote_multisig_key,
        capacity: proposal.capacity,
    };
    let unsigned_tx = funding.get_tx();

    // only the input spending our own transit output is ours to sign
    let input_index = funding
        .input_index(&unsigned_tx, &reservation.outpoint)
        .ok_or_else(|| {
            Error::Validation("own transit outpoint missing from funding transaction".to_owned())
        })?;
    let signature = node.sign_output(&SignOutputRequest {
        transaction: &unsigned_tx,
        input_index: input_index,
        key: reservation.key.locator,
        output_script: reservation.output_script.clone(),
        output_value: reservation.tokens,
        sighash: SigHashType::All,
    })?;

    let funding_point = funding.funding_point(&unsigned_tx);
    node.register_pending_channel(&PendingChannelRegistration {
        id: funding.pending_channel_id(),
        multisig_key_index: args.multisig_key_index,
        remote_multisig_key: proposal.remote_multisig_key,
        funding: funding_point,
        capacity: proposal.capacity,
    })?;

    let transit_vout = OutputIndex::try_from(reservation.outpoint.index() as u64)
        .map_err(|()| Error::Validation("transit output index does not fit a small index".to_owned()))?;
    let acceptance = AcceptanceRecords {
        multisig_public_key: multisig.public_key,
        transit_tx_id: reservation.outpoint.hash(),
        transit_tx_vout: transit_vout,
        funding_signature: signature,
        transit_public_key: reservation.key.public_key,
    };

    let transport = FallbackTransport {
        primary: PeerMessageTransport {
            node: node,
            peer: proposal.partner_public_key,
            timeout: args.config.peer_message_timeout,
        },
        fallback: PaymentTransport {
            node: node,
            request: proposal.accept_request.clone(),
        },
    };
    let delivery = transport.deliver(&acceptance.to_records())?;
    info!("acceptance delivered to {} via {:?}", proposal.partner_public_key, delivery);

    wait_for_pending_channel(
        node,
        &funding_point,
        half_balance(proposal.capacity),
        Some(&reservation.outpoint),
        &args.config,
    )?;

    Ok(AcceptedOpen {
        funding: funding_point,
        pending_channel_id: funding.pending_channel_id(),
        transactions: vec![reservation.transaction.clone()],
    })
}
