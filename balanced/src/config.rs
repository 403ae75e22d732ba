use std::time::Duration;

// Operational bounds of one attempt. The wire level constants live in
// records::constants; these only shape how long the loops run.
const PENDING_CHANNEL_POLL_INTERVAL: Duration = Duration::from_secs(15);
const PENDING_CHANNEL_POLL_RETRIES: u32 = 60;
const PEER_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);
const BROADCAST_INTERVAL: Duration = Duration::from_secs(3);
const BROADCAST_RETRY_LIMIT: u32 = 10;
const BROADCAST_ERROR_TOLERANCE: u32 = 4;

#[derive(Debug, Clone)]
pub struct OpenConfig {
    pub poll_interval: Duration,
    pub poll_retries: u32,
    pub peer_message_timeout: Duration,
    pub broadcast_interval: Duration,
    pub broadcast_retry_limit: u32,
    // Consecutive broadcast failures tolerated; one more is fatal.
    pub broadcast_error_tolerance: u32,
}

impl Default for OpenConfig {
    fn default() -> Self {
        OpenConfig {
            poll_interval: PENDING_CHANNEL_POLL_INTERVAL,
            poll_retries: PENDING_CHANNEL_POLL_RETRIES,
            peer_message_timeout: PEER_MESSAGE_TIMEOUT,
            broadcast_interval: BROADCAST_INTERVAL,
            broadcast_retry_limit: BROADCAST_RETRY_LIMIT,
            broadcast_error_tolerance: BROADCAST_ERROR_TOLERANCE,
        }
    }
}

#[cfg(test)]
impl OpenConfig {
    // All waiting collapsed so loop tests run instantly.
    pub fn immediate() -> Self {
        OpenConfig {
            poll_interval: Duration::from_secs(0),
            poll_retries: 3,
            peer_message_timeout: Duration::from_secs(0),
            broadcast_interval: Duration::from_secs(0),
            ..OpenConfig::default()
        }
    }
}
