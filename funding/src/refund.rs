use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::blockdata::transaction::{Transaction, TxIn, TxOut};

use bitcoin_types::{ChannelPoint, Satoshi, SatoshiPerVByte};
use records::constants::REFUND_TX_VSIZE;

use std::error;
use std::fmt;

// Sweeps a stranded transit output back to the wallet: single input,
// single output, fee charged for the fixed refund size at the given rate.
#[derive(Debug, Clone)]
pub struct RefundTx {
    pub transit: ChannelPoint,
    pub tokens: Satoshi,
    pub fee_rate: SatoshiPerVByte,
    pub refund_script: Script,
}

#[derive(Debug, Eq, PartialEq)]
pub enum RefundError {
    FeeExceedsFunds {
        tokens: u64,
        fee: u64,
    },
}

impl RefundTx {
    pub fn fee(&self) -> u64 {
        REFUND_TX_VSIZE * u64::from(self.fee_rate)
    }

    pub fn get_tx(&self) -> Result<Transaction, RefundError> {
        let tokens = u64::from(self.tokens);
        let fee = self.fee();
        if fee >= tokens {
            return Err(RefundError::FeeExceedsFunds {
                tokens: tokens,
                fee: fee,
            });
        }

        Ok(Transaction {
            version: 2,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: self.transit.to_outpoint(),
                script_sig: Script::new(),
                sequence: 0xFFFFFFFF,
                witness: vec![],
            }],
            output: vec![TxOut {
                value: tokens - fee,
                script_pubkey: self.refund_script.clone(),
            }],
        })
    }
}

impl fmt::Display for RefundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &RefundError::FeeExceedsFunds { tokens, fee } => write!(
                f,
                "refund fee {} leaves nothing of the {} funded tokens",
                fee, tokens,
            ),
        }
    }
}

impl error::Error for RefundError {
}
