//! Recording transport for unit tests.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};

use tracing::subscriber::DefaultGuard;

use crate::{
    client::Client,
    config::{ClientConfig, Environment},
    error::{QvoError, Result},
    transport::{Transport, TransportRequest, TransportResponse},
};

enum Reply {
    Response(TransportResponse),
    Timeout,
}

#[derive(Default)]
struct State {
    requests: Vec<TransportRequest>,
    replies: VecDeque<Reply>,
}

/// Transport that records every request and answers from a queue.
///
/// With an empty queue it answers `200 {}`.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    state: Arc<Mutex<State>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        let response = TransportResponse { status, body: body.as_bytes().to_vec() };
        self.state.lock().unwrap().replies.push_back(Reply::Response(response));
    }

    pub(crate) fn fail_with_timeout(&self) {
        self.state.lock().unwrap().replies.push_back(Reply::Timeout);
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub(crate) fn last_request(&self) -> TransportRequest {
        self.state.lock().unwrap().requests.last().cloned().expect("no request was sent")
    }

    /// Body of the last request decoded back into pairs.
    pub(crate) fn last_form(&self) -> Vec<(String, String)> {
        let body = self.last_request().body.expect("last request had no body");
        url::form_urlencoded::parse(&body).into_owned().collect()
    }

    /// Query string of the last request decoded into pairs.
    pub(crate) fn last_query(&self) -> Vec<(String, String)> {
        let request = self.last_request();
        let url = url::Url::parse(&request.url).unwrap();
        url.query_pairs().into_owned().collect()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        match state.replies.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Timeout) => Err(QvoError::Timeout),
            None => Ok(TransportResponse { status: 200, body: b"{}".to_vec() }),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "stub"
    }
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes `info` and above on the current thread into a buffer until the guard drops.
pub(crate) fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

/// Sandbox client with token `test-token` wired to a fresh stub.
pub(crate) fn stub_client() -> (Client<StubTransport>, StubTransport) {
    let transport = StubTransport::new();
    let config = ClientConfig::new("test-token", Environment::Sandbox);
    let client = Client::with_transport(config, transport.clone()).unwrap();
    (client, transport)
}

pub(crate) const CUSTOMER_JSON: &str = r#"{
    "id": "cus_qos_6r3-H0PlnSQFDAA8Kw",
    "name": "Ignacio Gómez",
    "email": "test@manglar.cl",
    "default_payment_method": null,
    "subscriptions": [],
    "cards": [],
    "transactions": [],
    "created_at": "2017-05-17T17:59:51.343Z",
    "updated_at": "2017-05-17T17:59:51.343Z"
}"#;

pub(crate) const CARD_JSON: &str = r#"{
    "id": "woc_ktsvbnWWkqgqd_9BeDg3mg",
    "last_4_digits": "4242",
    "card_type": "VISA",
    "payment_type": "CD",
    "failure_count": 0,
    "created_at": "2017-05-23T19:43:10.409Z"
}"#;

pub(crate) const PLAN_JSON: &str = r#"{
    "id": "oro",
    "name": "Plan Oro",
    "price": "30000.0",
    "currency": "CLP",
    "interval": "month",
    "interval_count": 1,
    "trial_period_days": 0,
    "default_cycle_count": 12,
    "status": "active",
    "subscriptions": [],
    "created_at": "2017-05-18T18:44:13Z",
    "updated_at": "2017-05-18T18:44:13Z"
}"#;

pub(crate) const SUBSCRIPTION_JSON: &str = r#"{
    "id": "sub_NrNi8qBSsXUSqd1bfxrZlw",
    "status": "active",
    "debt": 0,
    "start": "2017-05-18T00:00:00Z",
    "end": null,
    "cycle_count": null,
    "current_period_start": "2017-05-18T00:00:00Z",
    "current_period_end": "2017-06-18T00:00:00Z",
    "transactions": [],
    "tax_name": null,
    "tax_percent": null,
    "created_at": "2017-05-18T00:00:00Z",
    "updated_at": "2017-05-18T00:00:00Z"
}"#;

pub(crate) const TRANSACTION_JSON: &str = r#"{
    "id": "trx_1",
    "amount": 30000,
    "currency": "CLP",
    "description": "Plan Oro",
    "gateway": "webpay_oneclick",
    "credits": 0,
    "status": "successful",
    "payment": null,
    "refund": null,
    "created_at": "2017-05-19T12:00:00Z",
    "updated_at": "2017-05-19T12:00:00Z"
}"#;

pub(crate) const WITHDRAWAL_JSON: &str = r#"{
    "id": "wdr_1",
    "amount": 50000,
    "status": "processing",
    "created_at": "2017-05-19T12:00:00Z",
    "updated_at": "2017-05-19T12:00:00Z"
}"#;

pub(crate) const EVENT_JSON: &str = r#"{
    "id": "evt_1",
    "type": "customer.created",
    "data": {"id": "cus_1"},
    "created_at": "2017-05-19T12:00:00Z"
}"#;

/// Wraps one fixture in a JSON array.
pub(crate) fn list_of(item: &str) -> String {
    format!("[{item}]")
}
