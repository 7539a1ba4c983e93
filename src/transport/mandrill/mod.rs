//! The Mandrill transport sends messages through the `messages/send.json`
//! endpoint of the Mandrill (Mailchimp Transactional) API.
//!
//! The transport does not look at the HTTP status or at the content of the
//! response: whatever Mandrill answers is decoded and returned, so that
//! rejected recipients or an invalid API key show up in the returned value
//! (and in the [`MandrillMessageSent`] event), not as an [`Error`]. Only a
//! request that did not complete fails.
//!
//! ```rust,no_run
//! use lettre_mandrill::{
//!     transport::mandrill::{MandrillTransport, ReqwestClient, Sender},
//!     Message, Transport,
//! };
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//! let transport = MandrillTransport::new(
//!     ReqwestClient::new()?,
//!     "md-secret",
//!     "https://mandrillapp.com/api/1.0",
//! )
//! .with_sender(Sender::new(Some("noreply@domain.tld".to_owned()), None));
//!
//! transport.on_sent(|event| {
//!     println!("mandrill answered {}", event.response);
//! });
//!
//! let message = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .html("<p>Be happy!</p>")
//!     .build()?;
//! transport.send(&message)?;
//! # Ok(())
//! # }
//! ```

use std::{
    fmt::{self, Debug, Display},
    time::Duration,
};

use serde_json::Value;

pub use self::{
    client::{ClientOptions, HttpClient, HttpResponse, ReqwestClient},
    error::Error,
    event::{Dispatcher, MandrillError, MandrillMessageSent},
    request::{
        fetch_attachments, fetch_to, AttachmentPayload, MessagePayload, Recipient, RecipientType,
        SendRequest, Sender, DEFAULT_FROM_NAME,
    },
};
use crate::{Message, Transport};

mod client;
mod error;
mod event;
mod request;

/// Default base URL of the API
pub const DEFAULT_URL: &str = "https://mandrillapp.com/api/1.0";

/// Path of the send endpoint, relative to the base URL
pub const SEND_PATH: &str = "/messages/send.json";

/// Total time allowed for one request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends emails through the Mandrill API
pub struct MandrillTransport<C = ReqwestClient> {
    client: C,
    key: String,
    url: String,
    sender: Option<Sender>,
    events: Dispatcher,
}

impl<C> MandrillTransport<C>
where
    C: HttpClient,
{
    /// Creates a transport posting to `url` with the API key `key`
    ///
    /// Unless [`with_sender`](Self::with_sender) is used, the sender is read
    /// from `MAIL_FROM_ADDRESS` and `MAIL_FROM_NAME` on every send.
    pub fn new<K, U>(client: C, key: K, url: U) -> Self
    where
        K: Into<String>,
        U: Into<String>,
    {
        Self {
            client,
            key: key.into(),
            url: url.into(),
            sender: None,
            events: Dispatcher::new(),
        }
    }

    /// Uses `sender` in every request instead of the environment
    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Publishes events to `events` instead of a private dispatcher
    pub fn with_dispatcher(mut self, events: Dispatcher) -> Self {
        self.events = events;
        self
    }

    /// Registers a handler for [`MandrillMessageSent`] events
    pub fn on_sent<F>(&self, handler: F)
    where
        F: Fn(&MandrillMessageSent<'_>) + Send + Sync + 'static,
    {
        self.events.on_sent(handler);
    }

    /// Registers a handler for [`MandrillError`] events
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&MandrillError<'_>) + Send + Sync + 'static,
    {
        self.events.on_error(handler);
    }

    /// Dispatcher events are published to
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.events
    }

    /// API key sent with every request
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sender of the next request
    pub fn sender(&self) -> Sender {
        self.sender.clone().unwrap_or_else(Sender::from_env)
    }

    /// Full URL of the send endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{SEND_PATH}", self.url.trim_end_matches('/'))
    }

    /// Request document for `message`
    pub fn request(&self, message: &Message) -> SendRequest {
        SendRequest::new(&self.key, &self.sender(), message)
    }

    fn fail(&self, message: &Message, request: &SendRequest, err: Error) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %err, "mandrill request failed");

        self.events.error(&MandrillError {
            message,
            request,
            error: err.description(),
        });
        err
    }
}

fn decode(body: &[u8]) -> Value {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "mandrill response is not valid JSON");
            Value::Null
        }
    }
}

impl<C> Transport for MandrillTransport<C>
where
    C: HttpClient,
{
    type Ok = Value;
    type Error = Error;

    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let endpoint = self.endpoint();
        let request = self.request(message);

        let body = match serde_json::to_vec(&request) {
            Ok(body) => body,
            Err(err) => return Err(self.fail(message, &request, error::serialization(err))),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            endpoint = %endpoint,
            recipients = request.message.to.len(),
            attachments = request.message.attachments.len(),
            "sending message through mandrill"
        );

        let response = match self.client.post_json(&endpoint, body, REQUEST_TIMEOUT) {
            Ok(response) => response,
            Err(err) => return Err(self.fail(message, &request, error::network(err))),
        };

        #[cfg(feature = "tracing")]
        {
            if !response.is_success() {
                tracing::warn!(
                    status = response.status,
                    "mandrill answered with an error status"
                );
            }
        }

        let response = decode(&response.body);
        self.events.sent(&MandrillMessageSent {
            message,
            request: &request,
            response: &response,
        });

        Ok(response)
    }
}

impl<C> Display for MandrillTransport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("mandrill")
    }
}

impl<C: Debug> Debug for MandrillTransport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MandrillTransport")
            .field("client", &self.client)
            .field("key", &"<redacted>")
            .field("url", &self.url)
            .field("sender", &self.sender)
            .field("events", &self.events)
            .finish()
    }
}
