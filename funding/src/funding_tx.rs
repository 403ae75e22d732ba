use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::blockdata::transaction::{Transaction, TxIn, TxOut};
use dependencies::secp256k1::PublicKey;

use bitcoin_types::{ChannelPoint, Hash256, Satoshi};

use super::bip69;
use super::script::{new_2x2_multisig, witness_script_hash};

// The joint funding transaction: both parties' transit outpoints in, one
// output paying the agreed capacity to the 2-of-2. Input order and the
// output script are pure functions of the fields, so either party can
// build the identical unsigned transaction from the exchanged records and
// the transaction id is fixed before anyone signs.
#[derive(Debug, Clone)]
pub struct FundingTx {
    pub local_transit: ChannelPoint,
    pub remote_transit: ChannelPoint,
    pub local_multisig_key: PublicKey,
    pub remote_multisig_key: PublicKey,
    pub capacity: Satoshi,
}

impl FundingTx {
    pub fn multisig_script(&self) -> Script {
        new_2x2_multisig(
            &self.local_multisig_key.serialize(),
            &self.remote_multisig_key.serialize(),
        )
    }

    pub fn output_script(&self) -> Script {
        self.multisig_script().to_v0_p2wsh()
    }

    // The handle the node correlates channel establishment with.
    pub fn pending_channel_id(&self) -> Hash256 {
        witness_script_hash(&self.multisig_script())
    }

    pub fn get_tx(&self) -> Transaction {
        let mut tx = Transaction {
            version: 2,
            lock_time: 0,
            input: vec![
                transit_input(&self.local_transit),
                transit_input(&self.remote_transit),
            ],
            output: vec![TxOut {
                value: u64::from(self.capacity),
                script_pubkey: self.output_script(),
            }],
        };
        bip69::reorder_tx(&mut tx);
        return tx;
    }

    // Index of the funding output inside the built transaction.
    pub fn output_index(&self, tx: &Transaction) -> u32 {
        let script = self.output_script();
        tx.output
            .iter()
            .position(|out| out.script_pubkey == script)
            .unwrap_or(0) as u32
    }

    pub fn funding_point(&self, tx: &Transaction) -> ChannelPoint {
        ChannelPoint::new(Hash256::from_txid(&tx.txid()), self.output_index(tx))
    }

    // Index of the input spending the given transit outpoint, if present.
    pub fn input_index(&self, tx: &Transaction, transit: &ChannelPoint) -> Option<usize> {
        let outpoint = transit.to_outpoint();
        tx.input.iter().position(|input| input.previous_output == outpoint)
    }
}

fn transit_input(point: &ChannelPoint) -> TxIn {
    TxIn {
        previous_output: point.to_outpoint(),
        script_sig: Script::new(),
        sequence: 0xFFFFFFFF,
        witness: vec![],
    }
}
