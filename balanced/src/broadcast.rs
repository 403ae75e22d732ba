use dependencies::bitcoin::Transaction;
use dependencies::log::{info, warn};

use nodeapi::WalletRpc;

use std::thread;

use super::Error;
use super::config::OpenConfig;

// Pushes the attempt's transactions to the chain one by one. A rejection
// is retried on a fixed interval; up to `broadcast_error_tolerance`
// consecutive rejections are tolerated before the error turns fatal, and
// any acceptance resets the count. After an acceptance the loop sleeps
// one interval so the mempool can propagate the parent before a child is
// offered.
pub fn broadcast_transactions<N: WalletRpc>(
    node: &N,
    transactions: &[Transaction],
    description: &str,
    config: &OpenConfig,
) -> Result<(), Error> {
    let mut consecutive_failures = 0u32;

    for tx in transactions {
        let mut attempts = 0u32;
        loop {
            if attempts >= config.broadcast_retry_limit {
                return Err(Error::Chain(format!(
                    "gave up broadcasting {} after {} attempts",
                    tx.txid(), attempts,
                )));
            }
            attempts += 1;

            match node.broadcast_transaction(tx, description) {
                Ok(()) => {
                    consecutive_failures = 0;
                    info!("broadcast accepted: {}", tx.txid());
                    thread::sleep(config.broadcast_interval);
                    break;
                }
                Err(e) => {
                    consecutive_failures += 1;
                    if consecutive_failures > config.broadcast_error_tolerance {
                        return Err(Error::Chain(format!(
                            "broadcast of {} keeps failing: {}",
                            tx.txid(), e,
                        )));
                    }
                    warn!(
                        "broadcast attempt {} for {} failed, retrying: {}",
                        attempts, tx.txid(), e,
                    );
                    thread::sleep(config.broadcast_interval);
                }
            }
        }
    }

    Ok(())
}
