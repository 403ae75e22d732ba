#![forbid(unsafe_code)]

pub mod bip69;

mod script;
pub use self::script::{
    ordered, new_2x2_multisig, new_2x2_wsh_lock_script, v0_p2wpkh,
    p2wpkh_witness, witness_script_hash,
};

mod funding_tx;
pub use self::funding_tx::FundingTx;

mod refund;
pub use self::refund::{RefundTx, RefundError};

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
