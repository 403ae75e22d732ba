// PROTOCOL_VERSION is the version of the balanced open record schema
// defined below. Every constant in this file is part of the wire contract
// with already deployed peers; changing any of them requires a version bump
// here, never a silent edit.
pub const PROTOCOL_VERSION: u32 = 0;

// Types of the message records attached to balanced open payments. The
// values are decimal strings because that is how the node RPC surface
// addresses custom payment records.
pub mod record_type {
    // ACCEPT_REQUEST carries the embedded payment request that both
    // identifies the proposal and transports the acceptance back.
    pub const ACCEPT_REQUEST: &str = "0";

    pub const CHANNEL_CAPACITY: &str = "1";
    pub const FUNDING_TX_FEE_RATE: &str = "2";
    pub const MULTISIG_PUBLIC_KEY: &str = "3";
    pub const TRANSIT_TX_ID: &str = "4";
    pub const TRANSIT_TX_VOUT: &str = "5";
    pub const FUNDING_SIGNATURE: &str = "6";
    pub const TRANSIT_PUBLIC_KEY: &str = "7";
}

// A proposal is pushed as a payment of exactly this many millitokens.
// The amount is a sentinel distinguishing protocol carriers from ordinary
// push payments, not a payload.
pub const BALANCED_OPEN_REQUEST_MTOKENS: u64 = 10_000;

// The invoice embedded in a proposal must ask for exactly this many
// millitokens. A push payment of BALANCED_OPEN_REQUEST_MTOKENS whose
// embedded request asks for anything else is not a proposal.
pub const ACCEPT_REQUEST_MTOKENS: u64 = 1_000;

// Key family of the 2-of-2 funding output keys.
pub const MULTISIG_KEY_FAMILY: u32 = 0;

// Key family of the single-key transit outputs. Recovery relies on this
// family being fixed: given only an address, the key is found by scanning
// indices within the family.
pub const TRANSIT_KEY_FAMILY: u32 = 805;

// Highest transit key index recovery will try, exclusive.
pub const RECOVERY_KEY_INDEX_LIMIT: u32 = 20_000;

// Estimated virtual size of the two-input one-output funding transaction.
// Each party reserves half of the fee this size implies.
pub const FUNDING_TX_VSIZE: u64 = 190;

// Virtual size charged against a refund before broadcast.
pub const REFUND_TX_VSIZE: u64 = 110;

// Numeric record values are minimal big-endian hex. Decoders accept at
// most this many bytes; longer values are rejected outright rather than
// guessed at from string length.
pub const MAX_NUMBER_BYTES: usize = 8;
