use dependencies::bitcoin::Txid;
use dependencies::bitcoin::blockdata::transaction::{Transaction, TxIn, TxOut};
use dependencies::bitcoin_hashes::Hash;

use std::cmp::Ordering;

// Ordering is defined in BIP 69: inputs ascending by previous outpoint
// hash in display order, then by output index; outputs ascending by value,
// then by script bytes. Both funding parties sort the same two outpoints
// the same way, so they compute identical unsigned transactions before
// either of them signs.

fn display_order(txid: &Txid) -> [u8; 32] {
    let mut bytes = txid.into_inner();
    bytes.reverse();
    bytes
}

pub fn cmp_inputs(a: &TxIn, b: &TxIn) -> Ordering {
    let hash_ordering = display_order(&a.previous_output.txid)
        .cmp(&display_order(&b.previous_output.txid));
    let index_ordering = a.previous_output.vout.cmp(&b.previous_output.vout);
    hash_ordering.then(index_ordering)
}

pub fn cmp_outputs(a: &TxOut, b: &TxOut) -> Ordering {
    let value_ordering = a.value.cmp(&b.value);
    let script_ordering = a.script_pubkey.as_bytes().cmp(b.script_pubkey.as_bytes());
    value_ordering.then(script_ordering)
}

// Reorder inputs and outputs of the transaction in place. Must run before
// witnesses are attached, otherwise a witness would stay glued to the
// wrong input.
pub fn reorder_tx(tx: &mut Transaction) {
    tx.input.sort_by(cmp_inputs);
    tx.output.sort_by(cmp_outputs);
}
