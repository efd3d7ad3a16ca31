//! The QVO client and its shared request executor.
//!
//! Every resource accessor funnels through [`Client::request`], which:
//!
//! 1. builds `{base_url}/{endpoint}` for the configured environment
//! 2. encodes parameters as a query string (GET, DELETE) or as a form body
//!    with a matching `Content-Length` (POST, PUT, PATCH)
//! 3. attaches `Authorization: Bearer <token>`
//! 4. performs exactly one exchange through the [`Transport`]
//! 5. returns the raw body on 2xx, or translates the error envelope otherwise

use std::{fmt, sync::Arc};

use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::{ClientConfig, Environment},
    error::{QvoError, Result},
    params::Params,
    transport::{HttpMethod, HttpTransport, Transport, TransportRequest},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Error envelope returned by QVO on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

/// Translates a non-2xx response into a [`QvoError`].
fn translate_error(status: u16, body: &[u8]) -> QvoError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => QvoError::RemoteApi {
            status,
            kind: error.kind,
            message: error.message,
            param: error.param,
        },
        Err(_) => QvoError::malformed(status, body),
    }
}

/// Client for the QVO payments API.
///
/// The client is immutable after construction and cheap to clone; clones
/// share the configuration and the underlying transport.
///
/// # Examples
///
/// ```rust,no_run
/// use qvo::{Client, config::Environment, query::ListOptions};
///
/// # async fn example() -> qvo::error::Result<()> {
/// let client = Client::new("my-api-token", Environment::Sandbox)?;
///
/// let customer = client.create_customer("Jane Doe", "jane@example.com").await?;
/// println!("created {}", customer.id);
///
/// let customers = client.list_customers(&ListOptions::new().page(1, 20)).await?;
/// println!("first page has {} customers", customers.len());
/// # Ok(())
/// # }
/// ```
pub struct Client<T = HttpTransport> {
    inner: Arc<Inner>,
    transport: T,
}

struct Inner {
    base_url: Url,
    authorization: String,
    environment: Environment,
}

impl<T: Clone> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), transport: self.transport.clone() }
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("environment", &self.inner.environment)
            .finish_non_exhaustive()
    }
}

impl Client<HttpTransport> {
    /// Creates a client with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the token is empty or the HTTP client
    /// cannot be created.
    pub fn new(token: impl Into<String>, environment: Environment) -> Result<Self> {
        Self::from_config(ClientConfig::new(token, environment))
    }

    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the configuration is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client that sends requests through a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the configuration is invalid.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let base_url = config.resolved_base_url()?;
        let inner = Inner {
            base_url,
            authorization: format!("Bearer {}", config.token),
            environment: config.environment,
        };
        Ok(Self { inner: Arc::new(inner), transport })
    }

    /// Target environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes a request with a verb given as a string.
    ///
    /// The verb is checked before anything else: an unsupported verb fails
    /// with [`QvoError::UnsupportedMethod`] and nothing is sent.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn request_raw(
        &self,
        method: &str,
        endpoint: &str,
        params: &Params,
    ) -> Result<Vec<u8>> {
        let method: HttpMethod = method.parse()?;
        self.request(method, endpoint, params).await
    }

    /// Executes a request and returns the raw 2xx body.
    ///
    /// # Errors
    ///
    /// - [`QvoError::Timeout`] / [`QvoError::Transport`] if the exchange fails
    /// - [`QvoError::RemoteApi`] for a non-2xx response with an error envelope
    /// - [`QvoError::MalformedErrorResponse`] for a non-2xx response without one
    #[instrument(
        skip(self, params),
        fields(method = %method, protocol = self.transport.protocol_name())
    )]
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<Vec<u8>> {
        let request = self.build_request(method, endpoint, params)?;
        let response = self.transport.send(request).await?;

        if response.is_success() {
            debug!(status = response.status, "request succeeded");
            return Ok(response.body);
        }

        let error = translate_error(response.status, &response.body);
        warn!(status = response.status, error = %error, "QVO returned an error");
        Err(error)
    }

    /// Builds the wire request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the base URL cannot take path segments.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<TransportRequest> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| QvoError::Config("base_url cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend(endpoint.split('/').filter(|segment| !segment.is_empty()));

        let mut headers = vec![
            ("Authorization", self.inner.authorization.clone()),
            ("Accept", "application/json".to_owned()),
        ];

        let encoded = params.encode();
        let body = if method.has_body() {
            headers.push(("Content-Type", FORM_CONTENT_TYPE.to_owned()));
            headers.push(("Content-Length", encoded.len().to_string()));
            Some(encoded.into_bytes())
        } else {
            if !encoded.is_empty() {
                url.set_query(Some(&encoded));
            }
            None
        };

        Ok(TransportRequest { method, url: url.into(), headers, body })
    }

    /// Executes a request and decodes the JSON body into `R`.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<R> {
        let body = self.request(method, endpoint, params).await?;
        decode(&body)
    }

    /// Executes a request whose response body carries nothing of interest.
    pub(crate) async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<()> {
        self.request(method, endpoint, params).await.map(drop)
    }
}

/// Decodes a JSON body, naming the expected type on failure.
pub(crate) fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    serde_json::from_slice(body).map_err(|e| {
        QvoError::Decode(format!("expected {}: {e}", std::any::type_name::<R>()))
    })
}
