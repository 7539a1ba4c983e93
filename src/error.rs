//! Error type for message building and transport resolution

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

use crate::BoxError;

/// Errors raised while building a [`Message`](crate::Message) or
/// resolving a mailer from the [`MailManager`](crate::MailManager)
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Missing `From` mailbox
    MissingFrom,
    /// No `To`, `Cc` or `Bcc` mailbox
    MissingTo,
    /// No transport was registered under this name
    UnknownTransport(String),
    /// The transport factory failed
    Transport(BoxError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingFrom => f.write_str("missing source address"),
            Error::MissingTo => f.write_str("missing destination address"),
            Error::UnknownTransport(name) => write!(f, "transport [{name}] is not supported"),
            Error::Transport(err) => write!(f, "transport could not be created: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Transport(err) => {
                let err: &(dyn StdError + 'static) = &**err;
                Some(err)
            }
            _ => None,
        }
    }
}
