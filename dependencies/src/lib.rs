#![forbid(unsafe_code)]

pub use secp256k1;
pub use bitcoin_hashes;
pub use bitcoin;
pub use rand;
pub use hex;
pub use chrono;
pub use log;
pub use hex_literal;
pub use pretty_assertions;
