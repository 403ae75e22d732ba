#![forbid(unsafe_code)]

mod keys;
pub use self::keys::{KeyFamily, KeyLocator, KeyDescriptor};

mod types;
pub use self::types::{
    Invoice, InvoicePayment, CreatedInvoice, DecodedPaymentRequest,
    PaymentState, PendingChannel, PendingChannelRegistration,
    Peer, PeerMessage, SignOutputRequest, TransitReservation,
};

mod api;
pub use self::api::{
    ApiError, WalletRpc, InvoiceRpc, PaymentRpc, PeerRpc, ChannelRpc, NodeApi,
};
