use dependencies::bitcoin::Transaction;
use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::blockdata::transaction::SigHashType;
use dependencies::bitcoin::util::address::Address;
use dependencies::log::info;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, Satoshi, SatoshiPerVByte};
use funding::{RefundTx, p2wpkh_witness, v0_p2wpkh};
use nodeapi::{KeyDescriptor, KeyLocator, NodeApi, SignOutputRequest, WalletRpc};
use records::constants::{RECOVERY_KEY_INDEX_LIMIT, TRANSIT_KEY_FAMILY};

use std::str::FromStr;

use super::Error;
use super::broadcast::broadcast_transactions;
use super::config::OpenConfig;

pub struct RecoverTransitFunds {
    // the transit address the stranded funds sit on
    pub address: String,
    // the transit transaction that funded it
    pub transaction: Transaction,
    pub fee_rate: SatoshiPerVByte,
    pub config: OpenConfig,
}

pub struct RecoveredFunds {
    pub key: KeyDescriptor,
    pub tokens: Satoshi,
    pub refund: Transaction,
}

pub struct GetBalancedRefund {
    pub transit: ChannelPoint,
    pub tokens: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    pub refund_address: String,
    pub key: KeyDescriptor,
}

// Scans key indices of the transit family until one derives the target
// script. Pure over the derivation capability, so it runs against the
// node key service in production and against plain closures in tests.
// Returns the lowest matching index; a miss at one index is a normal
// continuation, only exhausting the range is a failure.
pub fn find_key_index<E, F>(target: &Script, derive: F, limit: u32) -> Result<Option<u32>, E>
where
    F: Fn(u32) -> Result<PublicKey, E>,
{
    for index in 0..limit {
        let key = derive(index)?;
        if v0_p2wpkh(&key) == *target {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

// Builds and signs the refund transaction sweeping a transit output back
// to the wallet.
pub fn get_balanced_refund<N: WalletRpc>(
    node: &N,
    args: GetBalancedRefund,
) -> Result<Transaction, Error> {
    let refund_script = Address::from_str(&args.refund_address)
        .map_err(|e| Error::Validation(format!("bad refund address: {}", e)))?
        .script_pubkey();

    let refund = RefundTx {
        transit: args.transit,
        tokens: args.tokens,
        fee_rate: args.fee_rate,
        refund_script: refund_script,
    };
    let mut tx = refund.get_tx().map_err(|e| Error::Recovery(e.to_string()))?;

    let transit_script = v0_p2wpkh(&args.key.public_key);
    let signature = node.sign_output(&SignOutputRequest {
        transaction: &tx,
        input_index: 0,
        key: args.key.locator,
        output_script: transit_script,
        output_value: args.tokens,
        sighash: SigHashType::All,
    })?;
    tx.input[0].witness = p2wpkh_witness(&signature, &args.key.public_key);

    Ok(tx)
}

// Brute-force fallback for funds stranded mid-protocol: given only the
// transit address and transaction, re-derive the key, sweep the output to
// a fresh wallet address, and broadcast the sweep.
pub fn recover_transit_funds<N: NodeApi>(
    node: &N,
    args: RecoverTransitFunds,
) -> Result<RecoveredFunds, Error> {
    let target = Address::from_str(&args.address)
        .map_err(|e| Error::Validation(format!("bad transit address: {}", e)))?
        .script_pubkey();

    let vout = args
        .transaction
        .output
        .iter()
        .position(|out| out.script_pubkey == target)
        .ok_or_else(|| {
            Error::Recovery("the named transaction does not pay the target address".to_owned())
        })?;
    let tokens = args.transaction.output[vout].value;

    let index = find_key_index(
        &target,
        |index| {
            node.derive_key(KeyLocator::new(TRANSIT_KEY_FAMILY, index))
                .map(|descriptor| descriptor.public_key)
        },
        RECOVERY_KEY_INDEX_LIMIT,
    )?
    .ok_or_else(|| {
        Error::Recovery(format!(
            "no transit key index below {} derives the target address",
            RECOVERY_KEY_INDEX_LIMIT,
        ))
    })?;
    info!("stranded transit funds match key index {}", index);

    let key = node.derive_key(KeyLocator::new(TRANSIT_KEY_FAMILY, index))?;
    let refund_address = node.create_chain_address()?;
    let transit = ChannelPoint::new(Hash256::from_txid(&args.transaction.txid()), vout as u32);

    let refund = get_balanced_refund(node, GetBalancedRefund {
        transit: transit,
        tokens: Satoshi::from(tokens),
        fee_rate: args.fee_rate,
        refund_address: refund_address,
        key: key,
    })?;

    broadcast_transactions(node, &[refund.clone()], "balanced open transit refund", &args.config)?;

    Ok(RecoveredFunds {
        key: key,
        tokens: Satoshi::from(tokens),
        refund: refund,
    })
}
