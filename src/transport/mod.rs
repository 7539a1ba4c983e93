//! ### Sending Messages
//!
//! To be sendable, a message only has to be a [`Message`]. Transports decide
//! how it leaves the process.
//!
//! The following transports are available:
//!
//! * The [`MandrillTransport`](mandrill::MandrillTransport) maps the message to the JSON body
//!   of Mandrill's `messages/send.json` endpoint and posts it over HTTPS.
//!
//! [`Transport`] is the typed interface: each transport keeps its own response
//! and error types. [`Mailer`] erases them so that transports can be stored
//! and resolved by name, which is what the [`MailManager`](crate::MailManager)
//! does.

use std::fmt::Display;

use crate::{BoxError, Message};

pub mod mandrill;

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the email
    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error>;
}

/// Object-safe view of a [`Transport`], identified by name
pub trait Mailer: Send + Sync {
    /// Name of the transport, such as `mandrill`
    fn name(&self) -> String;

    /// Sends the email, discarding the transport specific response
    fn deliver(&self, message: &Message) -> Result<(), BoxError>;
}

impl<T> Mailer for T
where
    T: Transport + Display + Send + Sync,
    T::Error: Into<BoxError>,
{
    fn name(&self) -> String {
        self.to_string()
    }

    fn deliver(&self, message: &Message) -> Result<(), BoxError> {
        Transport::send(self, message)
            .map(|_| ())
            .map_err(Into::into)
    }
}
