use bitcoin_types::{Satoshi, SatoshiPerVByte};
use records::constants::FUNDING_TX_VSIZE;

// Tokens one party moves to its transit output: half the capacity plus
// half the estimated funding transaction fee, both rounded up so the two
// halves always cover the whole.
pub fn transit_tokens(capacity: Satoshi, fee_rate: SatoshiPerVByte) -> Satoshi {
    let capacity = u64::from(capacity);
    let fee = FUNDING_TX_VSIZE * u64::from(fee_rate);
    Satoshi::from((capacity + 1) / 2 + (fee + 1) / 2)
}

// The local balance a party expects its pending channel to show.
pub fn half_balance(capacity: Satoshi) -> Satoshi {
    Satoshi::from(u64::from(capacity) / 2)
}
