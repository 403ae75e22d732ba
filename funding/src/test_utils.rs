use dependencies::bitcoin::Txid;
use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::hashes::hex::FromHex;
use dependencies::hex;
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256};

pub fn s2txid(s: &str) -> Txid {
    match Txid::from_hex(s) {
        Ok(txid) => txid,
        Err(e) => panic!("bad txid fixture: {}", e),
    }
}

pub fn s2script(s: &str) -> Script {
    let b = match hex::decode(s) {
        Ok(r) => r,
        Err(e) => panic!("bad script fixture: {}", e),
    };
    let sc = Script::from(b);
    return sc;
}

pub fn s2pubkey(s: &str) -> PublicKey {
    let b = hex::decode(s).unwrap();
    let pk = PublicKey::from_slice(&b).unwrap();
    return pk;
}

pub fn s2point(s: &str, index: u32) -> ChannelPoint {
    ChannelPoint::new(Hash256::from_hex(s).unwrap(), index)
}
