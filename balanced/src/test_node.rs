// In-memory stand-in for the node control api. State is scripted through
// public RefCell fields; every mutation the flows perform is recorded so
// tests can assert on the calls the protocol actually made.

use dependencies::bitcoin::{Network, OutPoint, Transaction, Txid};
use dependencies::bitcoin::blockdata::script::Script;
use dependencies::bitcoin::blockdata::transaction::{TxIn, TxOut};
use dependencies::bitcoin::util::address::Address;
use dependencies::bitcoin_hashes::{sha256, Hash};
use dependencies::chrono::{TimeZone, Utc};
use dependencies::secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

use bitcoin_types::{ChannelPoint, Hash256, MilliSatoshi, OutputIndex, Satoshi, SatoshiPerVByte};
use funding::v0_p2wpkh;
use nodeapi::{
    ApiError, ChannelRpc, CreatedInvoice, DecodedPaymentRequest, Invoice,
    InvoicePayment, InvoiceRpc, KeyDescriptor, KeyFamily, KeyLocator,
    PaymentRpc, PaymentState, Peer, PeerMessage, PeerRpc, PendingChannel,
    PendingChannelRegistration, SignOutputRequest, TransitReservation,
    WalletRpc,
};
use records::{AcceptanceRecords, OpenProposalRecords, RawRecord, accept_request_from_records};
use records::constants::{
    ACCEPT_REQUEST_MTOKENS, BALANCED_OPEN_REQUEST_MTOKENS, TRANSIT_KEY_FAMILY,
};

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

pub struct TestNode {
    secp: Secp256k1<All>,
    counter: Cell<u32>,

    pub invoices: RefCell<Vec<Invoice>>,
    pub decoded_requests: RefCell<HashMap<String, DecodedPaymentRequest>>,
    pub payment_states: RefCell<HashMap<Hash256, PaymentState>>,
    pub acceptance_on_invoice: RefCell<Option<Vec<RawRecord>>>,

    pub payments: RefCell<Vec<(String, Vec<RawRecord>)>>,
    pub pushes: RefCell<Vec<(PublicKey, u64, Vec<RawRecord>)>>,
    pub fail_payments: Cell<bool>,

    pub peers: RefCell<Vec<Peer>>,
    pub connect_calls: RefCell<Vec<PublicKey>>,
    pub sent_peer_messages: RefCell<Vec<(PublicKey, Vec<RawRecord>)>>,
    pub incoming_peer_messages: RefCell<Vec<PeerMessage>>,
    pub fail_peer_messages: Cell<bool>,

    pub registrations: RefCell<Vec<PendingChannelRegistration>>,
    pub auto_pending: Cell<bool>,

    pub reservations: RefCell<Vec<TransitReservation>>,
    pub reserve_requests: RefCell<Vec<Satoshi>>,
    pub relocks: Cell<u32>,
    pub sign_requests: RefCell<Vec<(KeyLocator, usize)>>,

    pub broadcast_plan: RefCell<VecDeque<bool>>,
    pub broadcasts: RefCell<Vec<Txid>>,
    pub broadcast_attempts: Cell<u32>,

    next_transit_index: Cell<u32>,
    next_multisig_index: Cell<u32>,
}

impl TestNode {
    pub fn new() -> Self {
        TestNode {
            secp: Secp256k1::new(),
            counter: Cell::new(0),
            invoices: RefCell::new(Vec::new()),
            decoded_requests: RefCell::new(HashMap::new()),
            payment_states: RefCell::new(HashMap::new()),
            acceptance_on_invoice: RefCell::new(None),
            payments: RefCell::new(Vec::new()),
            pushes: RefCell::new(Vec::new()),
            fail_payments: Cell::new(false),
            peers: RefCell::new(Vec::new()),
            connect_calls: RefCell::new(Vec::new()),
            sent_peer_messages: RefCell::new(Vec::new()),
            incoming_peer_messages: RefCell::new(Vec::new()),
            fail_peer_messages: Cell::new(false),
            registrations: RefCell::new(Vec::new()),
            auto_pending: Cell::new(true),
            reservations: RefCell::new(Vec::new()),
            reserve_requests: RefCell::new(Vec::new()),
            relocks: Cell::new(0),
            sign_requests: RefCell::new(Vec::new()),
            broadcast_plan: RefCell::new(VecDeque::new()),
            broadcasts: RefCell::new(Vec::new()),
            broadcast_attempts: Cell::new(0),
            next_transit_index: Cell::new(0),
            next_multisig_index: Cell::new(10),
        }
    }

    fn fresh(&self) -> u32 {
        let n = self.counter.get();
        self.counter.set(n + 1);
        n
    }

    fn fresh_hash(&self) -> Hash256 {
        let tag = format!("test-node-hash/{}", self.fresh());
        Hash256::from(sha256::Hash::hash(tag.as_bytes()).into_inner())
    }

    fn secret_key(&self, family: u32, index: u32) -> SecretKey {
        let tag = format!("test-node-key/{}/{}", family, index);
        let digest = sha256::Hash::hash(tag.as_bytes());
        SecretKey::from_slice(&digest.into_inner()).expect("test key")
    }

    pub fn derived_public_key(&self, family: u32, index: u32) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.secret_key(family, index))
    }

    // Identity keys for fictional peers, outside any protocol family.
    pub fn peer_key(&self, index: u32) -> PublicKey {
        self.derived_public_key(900_000, index)
    }

    fn dummy_signature(&self, key: &SecretKey) -> Vec<u8> {
        let message = Message::from_slice(&[0x2b; 32]).expect("static message");
        self.secp.sign(&message, key).serialize_der().to_vec()
    }

    pub fn script_address(script: &Script) -> String {
        Address::from_script(script, Network::Regtest)
            .expect("scripts used in tests are addressable")
            .to_string()
    }

    pub fn last_reservation(&self) -> TransitReservation {
        self.reservations.borrow().last().expect("a reservation was made").clone()
    }

    // Seeds a settled proposal push payment from the given peer and
    // returns the invoice id it lives in.
    pub fn add_proposal_invoice(
        &self,
        partner: &PublicKey,
        capacity: u64,
        fee_rate: u64,
    ) -> Hash256 {
        let n = self.fresh();
        let request = format!("lnbcrt10n1proposal{}", n);
        let request_id = self.fresh_hash();
        self.decoded_requests.borrow_mut().insert(request.clone(), DecodedPaymentRequest {
            destination: *partner,
            id: request_id,
            mtokens: MilliSatoshi::from(ACCEPT_REQUEST_MTOKENS),
        });

        let open = OpenProposalRecords {
            capacity: Satoshi::from(capacity),
            fee_rate: SatoshiPerVByte::from(fee_rate),
            multisig_public_key: self.derived_public_key(700_000, n),
            transit_tx_id: self.fresh_hash(),
            transit_tx_vout: OutputIndex::from(0),
            accept_request: request,
        };

        let invoice_id = self.fresh_hash();
        let created_at = Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap();
        self.invoices.borrow_mut().push(Invoice {
            id: invoice_id,
            created_at: created_at,
            confirmed_at: Some(created_at),
            is_confirmed: true,
            is_push: true,
            received_mtokens: MilliSatoshi::from(BALANCED_OPEN_REQUEST_MTOKENS),
            payments: vec![InvoicePayment {
                messages: open.to_records(),
            }],
        });
        invoice_id
    }

    pub fn proposal_request_of(&self, invoice_id: &Hash256) -> String {
        let invoices = self.invoices.borrow();
        let invoice = invoices.iter().find(|i| &i.id == invoice_id).expect("seeded invoice");
        accept_request_from_records(&invoice.payments[0].messages).expect("seeded request")
    }

    fn make_acceptance(&self) -> AcceptanceRecords {
        let n = self.fresh();
        let remote_transit_secret = self.secret_key(810_000, n);
        AcceptanceRecords {
            multisig_public_key: self.derived_public_key(710_000, n),
            transit_tx_id: self.fresh_hash(),
            transit_tx_vout: OutputIndex::from(0),
            funding_signature: self.dummy_signature(&remote_transit_secret),
            transit_public_key: PublicKey::from_secret_key(&self.secp, &remote_transit_secret),
        }
    }

    // The partner's acceptance will arrive as a direct peer message.
    pub fn stage_acceptance_via_peer_message(&self, partner: &PublicKey) {
        let acceptance = self.make_acceptance();
        self.incoming_peer_messages.borrow_mut().push(PeerMessage {
            from: *partner,
            records: acceptance.to_records(),
        });
    }

    // The partner's acceptance will arrive as payment of the accept
    // request invoice.
    pub fn stage_acceptance_via_invoice(&self) {
        let acceptance = self.make_acceptance();
        *self.acceptance_on_invoice.borrow_mut() = Some(acceptance.to_records());
    }

    // A transit output stranded on the given key index, with its funding
    // transaction. The transit output deliberately is not the first one.
    pub fn stranded_transit(&self, index: u32, tokens: u64) -> (String, Transaction) {
        let script = v0_p2wpkh(&self.derived_public_key(TRANSIT_KEY_FAMILY, index));
        let change = v0_p2wpkh(&self.derived_public_key(600_000, self.fresh()));
        let transaction = Transaction {
            version: 2,
            lock_time: 0,
            input: vec![null_input()],
            output: vec![
                TxOut {
                    value: 1_234,
                    script_pubkey: change,
                },
                TxOut {
                    value: tokens,
                    script_pubkey: script.clone(),
                },
            ],
        };
        (Self::script_address(&script), transaction)
    }
}

fn null_input() -> TxIn {
    TxIn {
        previous_output: OutPoint::null(),
        script_sig: Script::new(),
        sequence: 0xFFFFFFFF,
        witness: vec![],
    }
}

impl WalletRpc for TestNode {
    fn derive_key(&self, locator: KeyLocator) -> Result<KeyDescriptor, ApiError> {
        Ok(KeyDescriptor {
            locator: locator,
            public_key: self.derived_public_key(locator.family.0, locator.index),
        })
    }

    fn derive_next_key(&self, family: KeyFamily) -> Result<KeyDescriptor, ApiError> {
        let index = self.next_multisig_index.get();
        self.next_multisig_index.set(index + 1);
        self.derive_key(KeyLocator::new(family.0, index))
    }

    fn sign_output(&self, request: &SignOutputRequest) -> Result<Vec<u8>, ApiError> {
        self.sign_requests.borrow_mut().push((request.key, request.input_index));
        let secret = self.secret_key(request.key.family.0, request.key.index);
        Ok(self.dummy_signature(&secret))
    }

    fn create_chain_address(&self) -> Result<String, ApiError> {
        let script = v0_p2wpkh(&self.derived_public_key(600_000, self.fresh()));
        Ok(Self::script_address(&script))
    }

    fn reserve_transit_funds(
        &self,
        tokens: Satoshi,
        _fee_rate: SatoshiPerVByte,
    ) -> Result<TransitReservation, ApiError> {
        self.reserve_requests.borrow_mut().push(tokens);

        let index = self.next_transit_index.get();
        self.next_transit_index.set(index + 1);
        let locator = KeyLocator::new(TRANSIT_KEY_FAMILY, index);
        let public_key = self.derived_public_key(TRANSIT_KEY_FAMILY, index);
        let output_script = v0_p2wpkh(&public_key);

        let transaction = Transaction {
            version: 2,
            lock_time: 0,
            input: vec![null_input()],
            output: vec![TxOut {
                value: u64::from(tokens),
                script_pubkey: output_script.clone(),
            }],
        };
        let outpoint = ChannelPoint::new(Hash256::from_txid(&transaction.txid()), 0);

        let refund = Transaction {
            version: 2,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: outpoint.to_outpoint(),
                script_sig: Script::new(),
                sequence: 0xFFFFFFFF,
                witness: vec![],
            }],
            output: vec![TxOut {
                value: u64::from(tokens).saturating_sub(110),
                script_pubkey: Script::new(),
            }],
        };

        let reservation = TransitReservation {
            outpoint: outpoint,
            key: KeyDescriptor {
                locator: locator,
                public_key: public_key,
            },
            output_script: output_script,
            tokens: tokens,
            transaction: transaction,
            refund: refund,
        };
        self.reservations.borrow_mut().push(reservation.clone());
        Ok(reservation)
    }

    fn extend_transit_lock(&self, _outpoint: &ChannelPoint) -> Result<(), ApiError> {
        self.relocks.set(self.relocks.get() + 1);
        Ok(())
    }

    fn broadcast_transaction(
        &self,
        transaction: &Transaction,
        _description: &str,
    ) -> Result<(), ApiError> {
        self.broadcast_attempts.set(self.broadcast_attempts.get() + 1);
        let accepted = self.broadcast_plan.borrow_mut().pop_front().unwrap_or(true);
        if !accepted {
            return Err(ApiError::new("broadcast_transaction", "scripted rejection".to_owned()));
        }
        self.broadcasts.borrow_mut().push(transaction.txid());
        Ok(())
    }
}

impl InvoiceRpc for TestNode {
    fn create_invoice(
        &self,
        _mtokens: MilliSatoshi,
        _description: &str,
    ) -> Result<CreatedInvoice, ApiError> {
        Ok(CreatedInvoice {
            id: self.fresh_hash(),
            request: format!("lnbcrt10n1accept{}", self.fresh()),
        })
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        Ok(self.invoices.borrow().clone())
    }

    fn lookup_invoice(&self, id: &Hash256) -> Result<Invoice, ApiError> {
        if let Some(invoice) = self.invoices.borrow().iter().find(|i| &i.id == id) {
            return Ok(invoice.clone());
        }

        let created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        match self.acceptance_on_invoice.borrow().clone() {
            Some(messages) => Ok(Invoice {
                id: *id,
                created_at: created_at,
                confirmed_at: Some(created_at),
                is_confirmed: true,
                is_push: false,
                received_mtokens: MilliSatoshi::from(ACCEPT_REQUEST_MTOKENS),
                payments: vec![InvoicePayment { messages: messages }],
            }),
            None => Ok(Invoice {
                id: *id,
                created_at: created_at,
                confirmed_at: None,
                is_confirmed: false,
                is_push: false,
                received_mtokens: MilliSatoshi::from(0),
                payments: Vec::new(),
            }),
        }
    }

    fn decode_payment_request(&self, request: &str) -> Result<DecodedPaymentRequest, ApiError> {
        self.decoded_requests
            .borrow()
            .get(request)
            .cloned()
            .ok_or_else(|| ApiError::new("decode_payment_request", "not a payment request".to_owned()))
    }
}

impl PaymentRpc for TestNode {
    fn pay(&self, request: &str, messages: &[RawRecord]) -> Result<(), ApiError> {
        if self.fail_payments.get() {
            return Err(ApiError::new("pay", "scripted payment failure".to_owned()));
        }
        self.payments.borrow_mut().push((request.to_owned(), messages.to_vec()));
        Ok(())
    }

    fn push_payment(
        &self,
        destination: &PublicKey,
        mtokens: MilliSatoshi,
        messages: &[RawRecord],
    ) -> Result<(), ApiError> {
        if self.fail_payments.get() {
            return Err(ApiError::new("push_payment", "scripted payment failure".to_owned()));
        }
        self.pushes
            .borrow_mut()
            .push((*destination, u64::from(mtokens), messages.to_vec()));
        Ok(())
    }

    fn payment_state(&self, id: &Hash256) -> Result<PaymentState, ApiError> {
        Ok(self
            .payment_states
            .borrow()
            .get(id)
            .copied()
            .unwrap_or(PaymentState::NotFound))
    }
}

impl PeerRpc for TestNode {
    fn list_peers(&self) -> Result<Vec<Peer>, ApiError> {
        Ok(self.peers.borrow().clone())
    }

    fn connect_peer(&self, public_key: &PublicKey) -> Result<(), ApiError> {
        self.connect_calls.borrow_mut().push(*public_key);
        self.peers.borrow_mut().push(Peer { public_key: *public_key });
        Ok(())
    }

    fn send_peer_message(
        &self,
        public_key: &PublicKey,
        records: &[RawRecord],
        _timeout: Duration,
    ) -> Result<(), ApiError> {
        if self.fail_peer_messages.get() {
            return Err(ApiError::new("send_peer_message", "peer unreachable".to_owned()));
        }
        self.sent_peer_messages
            .borrow_mut()
            .push((*public_key, records.to_vec()));
        Ok(())
    }

    fn peer_messages(&self) -> Result<Vec<PeerMessage>, ApiError> {
        Ok(self.incoming_peer_messages.borrow().clone())
    }
}

impl ChannelRpc for TestNode {
    fn register_pending_channel(
        &self,
        registration: &PendingChannelRegistration,
    ) -> Result<(), ApiError> {
        self.registrations.borrow_mut().push(registration.clone());
        Ok(())
    }

    fn list_pending_channels(&self) -> Result<Vec<PendingChannel>, ApiError> {
        if !self.auto_pending.get() {
            return Ok(Vec::new());
        }
        Ok(self
            .registrations
            .borrow()
            .iter()
            .map(|r| PendingChannel {
                funding: r.funding,
                partner_public_key: r.remote_multisig_key,
                local_balance: Satoshi::from(u64::from(r.capacity) / 2),
                is_opening: true,
            })
            .collect())
    }
}

// A helper for assertions comparing scanned output against the seeded
// records.
pub fn proposal_records_for(node: &TestNode, invoice_id: &Hash256) -> OpenProposalRecords {
    let invoices = node.invoices.borrow();
    let invoice = invoices.iter().find(|i| &i.id == invoice_id).expect("seeded invoice");
    OpenProposalRecords::from_records(&invoice.payments[0].messages).expect("seeded records")
}
