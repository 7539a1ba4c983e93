//! HTTP client used to reach the Mandrill API

use std::time::Duration;

use reqwest::{blocking::Client, header::CONTENT_TYPE, Proxy};
use serde::{Deserialize, Serialize};

use crate::BoxError;

/// Status and body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the `2xx` range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP client posting JSON documents
///
/// An error means no response was received (connection, TLS or timeout
/// failure). Responses with an error status are not errors.
pub trait HttpClient: Send + Sync {
    /// POST `body` to `url` with `Content-Type: application/json`,
    /// giving up after `timeout`
    fn post_json(&self, url: &str, body: Vec<u8>, timeout: Duration)
        -> Result<HttpResponse, BoxError>;
}

/// Options of the HTTP client, read from the `services.mandrill` section
/// of the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Connection timeout, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
    /// `User-Agent` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Proxy URL used for every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

/// [`HttpClient`] backed by a blocking `reqwest` client
///
/// Certificates and host names are always verified.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Creates a client with default options
    pub fn new() -> Result<Self, BoxError> {
        Self::with_options(&ClientOptions::default())
    }

    /// Creates a client from the given options
    pub fn with_options(options: &ClientOptions) -> Result<Self, BoxError> {
        let mut builder = Client::builder();

        #[cfg(any(feature = "rustls-tls", feature = "native-tls"))]
        {
            builder = builder.danger_accept_invalid_certs(false);
        }

        if let Some(secs) = options.connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(proxy) = &options.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<HttpResponse, BoxError> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
