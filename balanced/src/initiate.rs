use dependencies::bitcoin::Transaction;
use dependencies::bitcoin::blockdata::transaction::SigHashType;
use dependencies::log::{info, warn};
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, MilliSatoshi, OutputIndex, Satoshi, SatoshiPerVByte};
use funding::{FundingTx, p2wpkh_witness};
use nodeapi::{
    KeyFamily, KeyLocator, NodeApi, PendingChannelRegistration, SignOutputRequest,
};
use records::{AcceptanceRecords, OpenProposalRecords};
use records::constants::{
    ACCEPT_REQUEST_MTOKENS, BALANCED_OPEN_REQUEST_MTOKENS, MULTISIG_KEY_FAMILY,
};

use std::convert::TryFrom;
use std::thread;

use super::Error;
use super::config::OpenConfig;
use super::funds::{half_balance, transit_tokens};
use super::poll::wait_for_pending_channel;

pub struct ProposeBalancedChannel {
    pub partner_public_key: PublicKey,
    pub capacity: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    // key index to use for the multisig key; the node picks one otherwise
    pub multisig_key_index: Option<u32>,
    pub config: OpenConfig,
}

pub struct InitiatedOpen {
    pub funding: ChannelPoint,
    pub pending_channel_id: Hash256,
    // transit transaction first, then the fully witnessed funding
    // transaction
    pub transactions: Vec<Transaction>,
}

// Initiator side of the protocol: reserve transit funds, push the
// proposal records to the peer, wait for the acceptance, and complete the
// joint funding transaction with both witnesses.
pub fn propose_balanced_channel<N: NodeApi>(
    node: &N,
    args: ProposeBalancedChannel,
) -> Result<InitiatedOpen, Error> {
    let capacity = u64::from(args.capacity);
    if capacity == 0 || capacity % 2 != 0 {
        return Err(Error::Validation(
            "channel capacity must be a nonzero even amount of tokens".to_owned(),
        ));
    }
    if u64::from(args.fee_rate) == 0 {
        return Err(Error::Validation("funding fee rate must be nonzero".to_owned()));
    }

    let multisig = match args.multisig_key_index {
        Some(index) => node.derive_key(KeyLocator::new(MULTISIG_KEY_FAMILY, index))?,
        None => node.derive_next_key(KeyFamily(MULTISIG_KEY_FAMILY))?,
    };

    let tokens = transit_tokens(args.capacity, args.fee_rate);
    let reservation = node.reserve_transit_funds(tokens, args.fee_rate)?;

    let invoice = node.create_invoice(
        MilliSatoshi::from(ACCEPT_REQUEST_MTOKENS),
        "balanced channel open acceptance",
    )?;

    let transit_vout = OutputIndex::try_from(reservation.outpoint.index() as u64)
        .map_err(|()| Error::Validation("transit output index does not fit a small index".to_owned()))?;
    let open = OpenProposalRecords {
        capacity: args.capacity,
        fee_rate: args.fee_rate,
        multisig_public_key: multisig.public_key,
        transit_tx_id: reservation.outpoint.hash(),
        transit_tx_vout: transit_vout,
        accept_request: invoice.request.clone(),
    };

    node.push_payment(
        &args.partner_public_key,
        MilliSatoshi::from(BALANCED_OPEN_REQUEST_MTOKENS),
        &open.to_records(),
    ).map_err(|e| Error::Payment(e.to_string()))?;
    info!("balanced open proposed to {}", args.partner_public_key);

    let acceptance = wait_for_acceptance(node, &args.partner_public_key, &invoice.id, &args.config)?;

    let funding = FundingTx {
        local_transit: reservation.outpoint,
        remote_transit: ChannelPoint::new(
            acceptance.transit_tx_id,
            u32::from(acceptance.transit_tx_vout),
        ),
        local_multisig_key: multisig.public_key,
        remote_multisig_key: acceptance.multisig_public_key,
        capacity: args.capacity,
    };
    let mut tx = funding.get_tx();

    let own_index = funding
        .input_index(&tx, &reservation.outpoint)
        .ok_or_else(|| {
            Error::Validation("own transit outpoint missing from funding transaction".to_owned())
        })?;
    let remote_index = funding
        .input_index(&tx, &funding.remote_transit)
        .ok_or_else(|| {
            Error::Validation("accepted transit outpoint missing from funding transaction".to_owned())
        })?;

    let signature = node.sign_output(&SignOutputRequest {
        transaction: &tx,
        input_index: own_index,
        key: reservation.key.locator,
        output_script: reservation.output_script.clone(),
        output_value: reservation.tokens,
        sighash: SigHashType::All,
    })?;

    // both signatures commit to the same transaction the acceptor built
    tx.input[own_index].witness = p2wpkh_witness(&signature, &reservation.key.public_key);
    tx.input[remote_index].witness =
        p2wpkh_witness(&acceptance.funding_signature, &acceptance.transit_public_key);

    let funding_point = funding.funding_point(&tx);
    node.register_pending_channel(&PendingChannelRegistration {
        id: funding.pending_channel_id(),
        multisig_key_index: multisig.locator.index,
        remote_multisig_key: acceptance.multisig_public_key,
        funding: funding_point,
        capacity: args.capacity,
    })?;

    wait_for_pending_channel(
        node,
        &funding_point,
        half_balance(args.capacity),
        Some(&reservation.outpoint),
        &args.config,
    )?;

    Ok(InitiatedOpen {
        funding: funding_point,
        pending_channel_id: funding.pending_channel_id(),
        transactions: vec![reservation.transaction.clone(), tx],
    })
}

// The acceptance arrives either as a direct peer message or attached to
// the payment of our accept request; whichever is observed first wins.
fn wait_for_acceptance<N: NodeApi>(
    node: &N,
    partner: &PublicKey,
    invoice_id: &Hash256,
    config: &OpenConfig,
) -> Result<AcceptanceRecords, Error> {
    for attempt in 0..config.poll_retries {
        if attempt > 0 {
            thread::sleep(config.poll_interval);
        }

        for message in node.peer_messages()? {
            if &message.from != partner {
                continue;
            }
            if let Ok(acceptance) = AcceptanceRecords::from_records(&message.records) {
                info!("acceptance received from {} over p2p", partner);
                return Ok(acceptance);
            }
        }

        let invoice = node.lookup_invoice(invoice_id)?;
        if invoice.is_confirmed {
            for payment in &invoice.payments {
                if let Ok(acceptance) = AcceptanceRecords::from_records(&payment.messages) {
                    info!("acceptance received from {} via the accept request", partner);
                    return Ok(acceptance);
                }
            }
            warn!("accept request paid without decodable acceptance records");
        }
    }

    Err(Error::Timeout("no acceptance received for the balanced open proposal".to_owned()))
}
