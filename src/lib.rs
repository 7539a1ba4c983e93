//! Mandrill transport for typed email messages.
//!
//! This crate translates a [`Message`] into the JSON body of Mandrill's
//! `messages/send.json` endpoint and posts it with a blocking HTTP client.
//! Every send publishes exactly one event: [`MandrillMessageSent`] when an
//! HTTP response came back (whatever its status), or [`MandrillError`] when
//! the request never completed.
//!
//! ## Features
//!
//! * **rustls-tls** (default): use `rustls` as the TLS backend of the HTTP client
//! * **native-tls**: use the platform TLS library instead
//! * **tracing** (default): emit logs through the `tracing` crate
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lettre_mandrill::{
//!     transport::mandrill::{MandrillTransport, ReqwestClient},
//!     Message, Transport,
//! };
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//! let message = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .html("<p>Be happy!</p>")
//!     .build()?;
//!
//! let transport = MandrillTransport::new(
//!     ReqwestClient::new()?,
//!     "md-secret",
//!     "https://mandrillapp.com/api/1.0",
//! );
//! transport.on_error(|event| eprintln!("mandrill failure: {}", event.error));
//!
//! let response = transport.send(&message)?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```
//!
//! Applications that resolve transports by name go through a
//! [`MailManager`](manager::MailManager) with the Mandrill factory
//! [registered](manager::mandrill::register).

#![doc(html_root_url = "https://docs.rs/crate/lettre-mandrill/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    clippy::string_add,
    clippy::string_add_assign,
    clippy::clone_on_ref_ptr,
    clippy::verbose_file_reads,
    clippy::unnecessary_self_imports,
    clippy::string_to_string,
    clippy::mem_forget,
    clippy::cast_lossless,
    clippy::inefficient_to_string,
    clippy::inline_always,
    clippy::linkedlist,
    clippy::macro_use_imports,
    clippy::manual_assert,
    clippy::unnecessary_join,
    clippy::wildcard_imports,
    clippy::zero_sized_map_values
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod address;
mod base64;
pub mod config;
pub mod error;
pub mod manager;
pub mod message;
pub mod transport;

pub use crate::{
    address::Address,
    config::Config,
    error::Error,
    manager::MailManager,
    message::{Mailbox, Message, Priority},
    transport::{
        mandrill::{MandrillError, MandrillMessageSent, MandrillTransport},
        Mailer, Transport,
    },
};

/// Type-erased error, as returned by [`Mailer`] and [`HttpClient`](transport::mandrill::HttpClient)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
