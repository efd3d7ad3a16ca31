//! HTTP transport implementation.
//!
//! Uses reqwest with a fixed request timeout. Connection reuse is whatever
//! reqwest provides by default.

use reqwest::{Client, Method};
use tracing::{debug, instrument};

use super::config::HttpConfig;
use crate::{
    error::{QvoError, Result},
    transport::{HttpMethod, Transport, TransportRequest, TransportResponse},
};

fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .user_agent(config.user_agent())
        .build()
        .map_err(QvoError::Transport)
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_send_error(err: reqwest::Error) -> QvoError {
    if err.is_timeout() { QvoError::Timeout } else { QvoError::Transport(err) }
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// # Examples
///
/// ```
/// use qvo::transport::{HttpConfig, HttpTransport, Transport};
///
/// let transport = HttpTransport::with_config(&HttpConfig::default()).unwrap();
/// assert_eq!(transport.protocol_name(), "http");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given timeouts and user agent.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or the HTTP client
    /// cannot be created (for example when the TLS backend fails to initialise).
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method))]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_send_error)?.to_vec();

        debug!(status, bytes = body.len(), "response received");

        Ok(TransportResponse { status, body })
    }

    fn protocol_name(&self) -> &'static str {
        "http"
    }
}
