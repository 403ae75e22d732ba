use dependencies::log::{debug, info};

use bitcoin_types::{ChannelPoint, Satoshi};
use nodeapi::{ChannelRpc, PendingChannel, WalletRpc};

use std::thread;

use super::Error;
use super::config::OpenConfig;

// Waits for the joint funding transaction to surface as a pending channel
// with the expected outpoint and local balance. Iterations that find
// nothing are normal, not errors; only an exhausted budget is. While
// waiting, the wallet lock on the transit reservation is renewed so the
// coins cannot wander into a concurrent attempt; a failed renewal is
// logged and ignored.
pub(crate) fn wait_for_pending_channel<N>(
    node: &N,
    funding: &ChannelPoint,
    local_balance: Satoshi,
    transit: Option<&ChannelPoint>,
    config: &OpenConfig,
) -> Result<PendingChannel, Error>
where
    N: ChannelRpc + WalletRpc,
{
    for attempt in 0..config.poll_retries {
        if attempt > 0 {
            thread::sleep(config.poll_interval);
        }

        if let Some(outpoint) = transit {
            if let Err(e) = node.extend_transit_lock(outpoint) {
                debug!("transit relock failed, continuing: {}", e);
            }
        }

        let channels = node.list_pending_channels()?;
        let found = channels
            .into_iter()
            .find(|c| &c.funding == funding && c.local_balance == local_balance);
        if let Some(channel) = found {
            info!("funding {} recognized as a pending channel", funding);
            return Ok(channel);
        }
    }

    Err(Error::Timeout(format!(
        "no pending channel appeared for funding {}",
        funding,
    )))
}
