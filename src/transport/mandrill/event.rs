//! Events published after each send attempt
//!
//! Every call to [`MandrillTransport::send`](super::MandrillTransport) publishes
//! exactly one of them, to handlers registered on a [`Dispatcher`].

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use serde_json::Value;

use super::SendRequest;
use crate::message::Message;

/// The request could not be completed
#[derive(Debug, Clone, Copy)]
pub struct MandrillError<'a> {
    /// Message passed to the transport
    pub message: &'a Message,
    /// Request document that was being sent
    pub request: &'a SendRequest,
    /// Description of the failure, also the `Display` of the returned error
    pub error: &'a str,
}

/// Mandrill answered, with a success or an error document
#[derive(Debug, Clone, Copy)]
pub struct MandrillMessageSent<'a> {
    /// Message passed to the transport
    pub message: &'a Message,
    /// Request document that was sent
    pub request: &'a SendRequest,
    /// Decoded response body, `null` if it was not JSON
    pub response: &'a Value,
}

type SentHandler = Arc<dyn Fn(&MandrillMessageSent<'_>) + Send + Sync>;
type ErrorHandler = Arc<dyn Fn(&MandrillError<'_>) + Send + Sync>;

#[derive(Default)]
struct Handlers {
    sent: RwLock<Vec<SentHandler>>,
    error: RwLock<Vec<ErrorHandler>>,
}

/// Shared list of event handlers
///
/// Clones share their handlers: a handler registered through one clone is
/// called for events published through any of them.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: Arc<Handlers>,
}

impl Dispatcher {
    /// Creates a dispatcher without handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for [`MandrillMessageSent`] events
    pub fn on_sent<F>(&self, handler: F)
    where
        F: Fn(&MandrillMessageSent<'_>) + Send + Sync + 'static,
    {
        self.handlers
            .sent
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(handler));
    }

    /// Registers a handler for [`MandrillError`] events
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&MandrillError<'_>) + Send + Sync + 'static,
    {
        self.handlers
            .error
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(handler));
    }

    /// Calls the sent handlers, in registration order
    pub fn sent(&self, event: &MandrillMessageSent<'_>) {
        // handlers may register other handlers
        let handlers = self
            .handlers
            .sent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for handler in &handlers {
            handler(event);
        }
    }

    /// Calls the error handlers, in registration order
    pub fn error(&self, event: &MandrillError<'_>) {
        let handlers = self
            .handlers
            .error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for handler in &handlers {
            handler(event);
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sent = self
            .handlers
            .sent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        let error = self
            .handlers
            .error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();

        f.debug_struct("Dispatcher")
            .field("sent_handlers", &sent)
            .field("error_handlers", &error)
            .finish()
    }
}
