use dependencies::log::{debug, info};

use nodeapi::{InvoicePayment, NodeApi};
use records::{OpenProposalRecords, accept_request_from_records};
use records::constants::{ACCEPT_REQUEST_MTOKENS, BALANCED_OPEN_REQUEST_MTOKENS};

use std::collections::HashSet;

use super::Error;
use super::proposal::{BalancedOpenProposal, PaymentStoreResolution, Resolution};

// Scans received payments for balanced open proposals that are still
// actionable. Resolution is checked against the local payment store.
pub fn get_balanced_opens<N: NodeApi>(node: &N) -> Result<Vec<BalancedOpenProposal>, Error> {
    get_balanced_opens_with(node, &PaymentStoreResolution::new(node))
}

pub fn get_balanced_opens_with<N, R>(
    node: &N,
    resolution: &R,
) -> Result<Vec<BalancedOpenProposal>, Error>
where
    N: NodeApi,
    R: Resolution,
{
    let invoices = node.list_invoices()?;

    // one proposal per peer per scan
    let mut seen_peers = HashSet::new();
    let mut proposals = Vec::new();

    for invoice in invoices {
        // a proposal is an unsolicited settled payment of exactly the
        // request sentinel amount
        if !invoice.is_confirmed || !invoice.is_push {
            continue;
        }
        if u64::from(invoice.received_mtokens) != BALANCED_OPEN_REQUEST_MTOKENS {
            continue;
        }

        // the payment must carry a structurally valid accept request
        let candidate = invoice.payments.iter().find_map(|payment| {
            let request = accept_request_from_records(&payment.messages).ok()?;
            let decoded = node.decode_payment_request(&request).ok()?;
            Some((payment, request, decoded))
        });
        let (payment, request, decoded): (&InvoicePayment, String, _) = match candidate {
            Some(found) => found,
            None => {
                debug!("push payment {} carries no decodable accept request", invoice.id);
                continue;
            }
        };

        // replays and spam from one peer: first decodable proposal wins
        if !seen_peers.insert(decoded.destination) {
            continue;
        }

        // the embedded request must ask for the accept sentinel, anything
        // else is an unrelated push payment
        if u64::from(decoded.mtokens) != ACCEPT_REQUEST_MTOKENS {
            continue;
        }

        // remaining fields come from the same payment's records
        let open = match OpenProposalRecords::from_records(&payment.messages) {
            Ok(open) => open,
            Err(e) => {
                debug!("discarding malformed proposal from {}: {}", decoded.destination, e);
                continue;
            }
        };

        let proposal = BalancedOpenProposal {
            capacity: open.capacity,
            fee_rate: open.fee_rate,
            partner_public_key: decoded.destination,
            remote_multisig_key: open.multisig_public_key,
            remote_transit_tx_id: open.transit_tx_id,
            remote_transit_tx_vout: open.transit_tx_vout,
            proposed_at: invoice.confirmed_at.unwrap_or(invoice.created_at),
            accept_request: request,
        };

        if resolution.is_resolved(&proposal)? {
            continue;
        }

        info!(
            "balanced open proposal from {}: capacity {:?} at {:?}",
            proposal.partner_public_key, proposal.capacity, proposal.fee_rate,
        );
        proposals.push(proposal);
    }

    Ok(proposals)
}
