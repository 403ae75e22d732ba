#![forbid(unsafe_code)]

mod error;
pub use self::error::Error;

mod config;
pub use self::config::OpenConfig;

mod funds;
pub use self::funds::{transit_tokens, half_balance};

mod proposal;
pub use self::proposal::{BalancedOpenProposal, Resolution, PaymentStoreResolution};

mod scanner;
pub use self::scanner::{get_balanced_opens, get_balanced_opens_with};

mod transport;
pub use self::transport::{
    Delivery, RecordTransport,
    PeerMessageTransport, PaymentTransport, FallbackTransport,
};

mod poll;

mod accept;
pub use self::accept::{AcceptBalancedChannel, AcceptedOpen, accept_balanced_channel};

mod initiate;
pub use self::initiate::{ProposeBalancedChannel, InitiatedOpen, propose_balanced_channel};

mod broadcast;
pub use self::broadcast::broadcast_transactions;

mod recover;
pub use self::recover::{
    RecoverTransitFunds, RecoveredFunds, GetBalancedRefund,
    find_key_index, get_balanced_refund, recover_transit_funds,
};

mod open;
pub use self::open::{
    OpenBalancedChannel, OpenChannelRequest, BalancedOpenOutcome,
    open_balanced_channel,
};

#[cfg(test)]
mod test_node;
