use dependencies::log::warn;
use dependencies::secp256k1::PublicKey;

use nodeapi::{PaymentRpc, PeerRpc};
use records::RawRecord;

use std::time::Duration;

use super::Error;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Delivery {
    PeerMessage,
    Payment,
}

// How a record set reaches the other party. The flows do not care whether
// bytes travel over the p2p connection or ride a payment; they only need
// one deliver capability.
pub trait RecordTransport {
    fn deliver(&self, records: &[RawRecord]) -> Result<Delivery, Error>;
}

// Direct low level peer message, bounded by a timeout.
pub struct PeerMessageTransport<'a, N> {
    pub node: &'a N,
    pub peer: PublicKey,
    pub timeout: Duration,
}

impl<'a, N> RecordTransport for PeerMessageTransport<'a, N>
where
    N: PeerRpc,
{
    fn deliver(&self, records: &[RawRecord]) -> Result<Delivery, Error> {
        self.node
            .send_peer_message(&self.peer, records, self.timeout)
            .map_err(|e| Error::Peer(e.to_string()))?;
        Ok(Delivery::PeerMessage)
    }
}

// Pays a payment request with the records attached. Works before any
// channel exists between the parties, which is exactly the situation the
// protocol is in.
pub struct PaymentTransport<'a, N> {
    pub node: &'a N,
    pub request: String,
}

impl<'a, N> RecordTransport for PaymentTransport<'a, N>
where
    N: PaymentRpc,
{
    fn deliver(&self, records: &[RawRecord]) -> Result<Delivery, Error> {
        self.node
            .pay(&self.request, records)
            .map_err(|e| Error::Payment(e.to_string()))?;
        Ok(Delivery::Payment)
    }
}

// Primary transport with a fallback. A primary failure is recoverable; a
// fallback failure is whatever the fallback says it is.
pub struct FallbackTransport<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P, F> RecordTransport for FallbackTransport<P, F>
where
    P: RecordTransport,
    F: RecordTransport,
{
    fn deliver(&self, records: &[RawRecord]) -> Result<Delivery, Error> {
        match self.primary.deliver(records) {
            Ok(delivery) => Ok(delivery),
            Err(e) => {
                warn!("primary delivery failed, trying fallback: {}", e);
                self.fallback.deliver(records)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Delivery, FallbackTransport, RecordTransport};
    use crate::Error;

    use records::RawRecord;

    use std::cell::Cell;

    struct ScriptedTransport {
        delivery: Delivery,
        succeed: bool,
        calls: Cell<u32>,
    }

    impl ScriptedTransport {
        fn new(delivery: Delivery, succeed: bool) -> Self {
            ScriptedTransport {
                delivery: delivery,
                succeed: succeed,
                calls: Cell::new(0),
            }
        }
    }

    impl RecordTransport for ScriptedTransport {
        fn deliver(&self, _records: &[RawRecord]) -> Result<Delivery, Error> {
            self.calls.set(self.calls.get() + 1);
            if self.succeed {
                Ok(self.delivery)
            } else {
                Err(Error::Peer("scripted failure".to_owned()))
            }
        }
    }

    #[test]
    fn fallback_is_not_touched_when_primary_delivers() {
        let transport = FallbackTransport {
            primary: ScriptedTransport::new(Delivery::PeerMessage, true),
            fallback: ScriptedTransport::new(Delivery::Payment, true),
        };
        let outcome = transport.deliver(&[]).unwrap();
        assert_eq!(outcome, Delivery::PeerMessage);
        assert_eq!(transport.primary.calls.get(), 1);
        assert_eq!(transport.fallback.calls.get(), 0);
    }

    #[test]
    fn primary_failure_falls_back() {
        let transport = FallbackTransport {
            primary: ScriptedTransport::new(Delivery::PeerMessage, false),
            fallback: ScriptedTransport::new(Delivery::Payment, true),
        };
        let outcome = transport.deliver(&[]).unwrap();
        assert_eq!(outcome, Delivery::Payment);
        assert_eq!(transport.fallback.calls.get(), 1);
    }

    #[test]
    fn fallback_failure_is_final() {
        let transport = FallbackTransport {
            primary: ScriptedTransport::new(Delivery::PeerMessage, false),
            fallback: ScriptedTransport::new(Delivery::Payment, false),
        };
        assert!(transport.deliver(&[]).is_err());
    }
}
