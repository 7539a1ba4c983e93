//! Error and result type for the Mandrill transport

use std::{error::Error as StdError, fmt, io};

use crate::BoxError;

/// The errors that may occur when sending an email through Mandrill
///
/// Only failures that prevent an HTTP response from coming back end up
/// here. A response carrying an error status or an error document is
/// returned as a success, see [`MandrillTransport`](super::MandrillTransport).
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    description: String,
    source: BoxError,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: E) -> Error
    where
        E: Into<BoxError>,
    {
        let source = source.into();
        let description = describe(&*source);

        Error {
            inner: Box::new(Inner {
                kind,
                description,
                source,
            }),
        }
    }

    /// Returns true if the request could not be completed
    pub fn is_network(&self) -> bool {
        matches!(self.inner.kind, Kind::Network)
    }

    /// Returns true if the request body could not be encoded
    pub fn is_serialization(&self) -> bool {
        matches!(self.inner.kind, Kind::Serialization)
    }

    /// Returns true if the error is caused by a timeout
    pub fn is_timeout(&self) -> bool {
        let root: &(dyn StdError + 'static) = &*self.inner.source;
        let mut source = Some(root);

        while let Some(err) = source {
            if let Some(err) = err.downcast_ref::<reqwest::Error>() {
                if err.is_timeout() {
                    return true;
                }
            }
            if let Some(io_err) = err.downcast_ref::<io::Error>() {
                if io_err.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }

            source = err.source();
        }

        false
    }

    /// Human readable description, as published in
    /// [`MandrillError`](super::MandrillError) events
    pub fn description(&self) -> &str {
        &self.inner.description
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// Connection, TLS or timeout failure of the HTTP request
    Network,
    /// The request payload could not be encoded
    Serialization,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("lettre_mandrill::transport::mandrill::Error")
            .field("kind", &self.inner.kind)
            .field("source", &self.inner.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.description)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source: &(dyn StdError + 'static) = &*self.inner.source;
        Some(source)
    }
}

pub(crate) fn network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Network, e)
}

pub(crate) fn serialization<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Serialization, e)
}

// Error chain flattened into one line, skipping causes already
// included in their parent's message
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();

    while let Some(err) = source {
        let cause = err.to_string();
        if !description.contains(&cause) {
            description.push_str(": ");
            description.push_str(&cause);
        }
        source = err.source();
    }

    description
}
