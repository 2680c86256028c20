//! HTTP transport for the Notion REST API.
//!
//! [`Transport`] is the single-request seam the publisher talks to.
//! [`UreqTransport`] is the sync implementation backed by a ureq agent.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::TransportError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Sends one HTTP POST and returns whatever status came back.
///
/// Non-2xx statuses are responses, not errors. Only failures that prevent a
/// response (DNS, connect, timeout, I/O) are reported as [`TransportError`].
pub trait Transport {
    /// POST `body` to `url` with the given headers.
    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, headers, body)
    }
}

/// Blocking transport over a ureq agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with a global per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send(body)?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;
        debug!("POST {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}
