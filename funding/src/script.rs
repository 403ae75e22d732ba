use dependencies::bitcoin::blockdata::opcodes::all::{OP_PUSHBYTES_0, OP_PUSHNUM_2, OP_CHECKMULTISIG};
use dependencies::bitcoin::blockdata::script::{Builder, Script};
use dependencies::bitcoin::blockdata::transaction::SigHashType;
use dependencies::bitcoin_hashes::{hash160, sha256, Hash};
use dependencies::secp256k1::PublicKey;

use bitcoin_types::Hash256;

// Keys in the multisig script are sorted as raw serialized bytes, so the
// script does not depend on which party contributed which key.
pub fn ordered<'a>(pk1: &'a [u8], pk2: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    if pk1 < pk2 {
        return (pk1, pk2);
    } else {
        return (pk2, pk1);
    }
}

pub fn new_2x2_multisig(pk1: &[u8], pk2: &[u8]) -> Script {
    let (pk1, pk2) = ordered(pk1, pk2);
    let b = Builder::new();
    let b = b
        .push_opcode(OP_PUSHNUM_2)
        .push_slice(pk1)
        .push_slice(pk2)
        .push_opcode(OP_PUSHNUM_2)
        .push_opcode(OP_CHECKMULTISIG);
    return b.into_script();
}

pub fn new_2x2_wsh_lock_script(pk1: &[u8], pk2: &[u8]) -> Script {
    let sc = new_2x2_multisig(pk1, pk2);
    return sc.to_v0_p2wsh();
}

pub fn v0_p2wpkh(pk: &PublicKey) -> Script {
    let pk_hash160 = hash160::Hash::hash(&pk.serialize()[..]);
    let sc = Builder::new()
        .push_opcode(OP_PUSHBYTES_0)
        .push_slice(&pk_hash160.into_inner())
        .into_script();
    return sc;
}

// Witness spending a p2wpkh output: signature with the sighash suffix,
// then the key.
pub fn p2wpkh_witness(signature_der: &[u8], pk: &PublicKey) -> Vec<Vec<u8>> {
    let mut signature = signature_der.to_vec();
    signature.push(SigHashType::All as u8);
    vec![signature, pk.serialize().to_vec()]
}

// The pending channel handle: sha256 of the multisig witness script, which
// is also the p2wsh witness program of the funding output.
pub fn witness_script_hash(script: &Script) -> Hash256 {
    Hash256::from(sha256::Hash::hash(script.as_bytes()).into_inner())
}
