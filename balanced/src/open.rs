use dependencies::log::info;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{Satoshi, SatoshiPerVByte};
use nodeapi::{KeyFamily, NodeApi, PeerRpc};
use records::constants::MULTISIG_KEY_FAMILY;

use super::Error;
use super::accept::{AcceptBalancedChannel, AcceptedOpen, accept_balanced_channel};
use super::broadcast::broadcast_transactions;
use super::config::OpenConfig;
use super::initiate::{InitiatedOpen, ProposeBalancedChannel, propose_balanced_channel};
use super::recover::{RecoverTransitFunds, RecoveredFunds, recover_transit_funds};
use super::scanner::get_balanced_opens;

// What the orchestrator is asked to do: recover stranded transit funds,
// or open a balanced channel with a partner. The open case resolves to
// accepting the partner's outstanding proposal when one exists, and to
// initiating a fresh proposal otherwise.
pub enum OpenBalancedChannel {
    Recover(RecoverTransitFunds),
    Open(OpenChannelRequest),
}

pub struct OpenChannelRequest {
    pub partner_public_key: PublicKey,
    pub capacity: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    pub multisig_key_index: Option<u32>,
    pub config: OpenConfig,
}

pub enum BalancedOpenOutcome {
    Accepted(AcceptedOpen),
    Initiated(InitiatedOpen),
    Recovered(RecoveredFunds),
}

pub fn open_balanced_channel<N: NodeApi>(
    node: &N,
    request: OpenBalancedChannel,
) -> Result<BalancedOpenOutcome, Error> {
    match request {
        OpenBalancedChannel::Recover(args) => {
            recover_transit_funds(node, args).map(BalancedOpenOutcome::Recovered)
        }

        OpenBalancedChannel::Open(args) => {
            ensure_peer_connected(node, &args.partner_public_key)?;

            let proposal = get_balanced_opens(node)?
                .into_iter()
                .find(|p| p.partner_public_key == args.partner_public_key);

            match proposal {
                Some(proposal) => {
                    info!(
                        "accepting the outstanding balanced open proposal from {}",
                        args.partner_public_key,
                    );
                    let multisig_key_index = match args.multisig_key_index {
                        Some(index) => index,
                        None => {
                            node.derive_next_key(KeyFamily(MULTISIG_KEY_FAMILY))?.locator.index
                        }
                    };
                    let accepted = accept_balanced_channel(node, AcceptBalancedChannel {
                        proposal: proposal,
                        multisig_key_index: multisig_key_index,
                        fee_rate: args.fee_rate,
                        config: args.config.clone(),
                    })?;
                    broadcast_transactions(
                        node,
                        &accepted.transactions,
                        "balanced channel open",
                        &args.config,
                    )?;
                    Ok(BalancedOpenOutcome::Accepted(accepted))
                }

                None => {
                    let initiated = propose_balanced_channel(node, ProposeBalancedChannel {
                        partner_public_key: args.partner_public_key,
                        capacity: args.capacity,
                        fee_rate: args.fee_rate,
                        multisig_key_index: args.multisig_key_index,
                        config: args.config.clone(),
                    })?;
                    broadcast_transactions(
                        node,
                        &initiated.transactions,
                        "balanced channel open",
                        &args.config,
                    )?;
                    Ok(BalancedOpenOutcome::Initiated(initiated))
                }
            }
        }
    }
}

fn ensure_peer_connected<N: PeerRpc>(node: &N, public_key: &PublicKey) -> Result<(), Error> {
    let connected = node
        .list_peers()?
        .iter()
        .any(|peer| &peer.public_key == public_key);
    if connected {
        return Ok(());
    }
    node.connect_peer(public_key).map_err(|e| Error::Peer(e.to_string()))
}
