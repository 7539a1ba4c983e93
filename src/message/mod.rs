//! Provides a strongly typed way to build emails
//!
//! ## Usage
//!
//! ```rust
//! use lettre_mandrill::message::{mime, Attachment, Message, Priority};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .reply_to("Yuin <yuin@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .cc("Mei <mei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .html("<p><b>Hello</b>, <i>world</i>!</p>")
//!     .text("Hello, world!")
//!     .priority(Priority::High)
//!     .attach(Attachment::new("example.rs").body(
//!         "fn main() { println!(\"Hello, World!\") }",
//!         mime::TEXT_PLAIN_UTF_8,
//!     ))
//!     .build()?;
//!
//! assert_eq!(m.recipients().count(), 2);
//! # Ok(())
//! # }
//! ```

pub use attachment::{Attachment, Part, SinglePart};
pub use mailbox::*;
pub use priority::{InvalidPriority, Priority};

pub use mime;

mod attachment;
mod mailbox;
mod priority;

use crate::Error as EmailError;

/// A builder for messages
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    from: Mailboxes,
    to: Mailboxes,
    cc: Mailboxes,
    bcc: Mailboxes,
    reply_to: Mailboxes,
    priority: Option<Priority>,
    attachments: Vec<Part>,
}

impl MessageBuilder {
    /// Creates a new default message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `Subject` header to message
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the HTML body
    pub fn html<S: Into<String>>(mut self, html: S) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain text body
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add mailbox to `From` header
    pub fn from(mut self, mbox: Mailbox) -> Self {
        self.from.push(mbox);
        self
    }

    /// Add mailbox to `Reply-To` header
    pub fn reply_to(mut self, mbox: Mailbox) -> Self {
        self.reply_to.push(mbox);
        self
    }

    /// Add mailbox to `To` header
    pub fn to(mut self, mbox: Mailbox) -> Self {
        self.to.push(mbox);
        self
    }

    /// Add mailbox to `Cc` header
    pub fn cc(mut self, mbox: Mailbox) -> Self {
        self.cc.push(mbox);
        self
    }

    /// Add mailbox to `Bcc` header
    pub fn bcc(mut self, mbox: Mailbox) -> Self {
        self.bcc.push(mbox);
        self
    }

    /// Set `X-Priority` of the message
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Append an attachment, keeping insertion order
    pub fn attach(mut self, part: Part) -> Self {
        self.attachments.push(part);
        self
    }

    /// Create the [`Message`]
    ///
    /// Fails when there is no `From` mailbox, or no recipient at all.
    pub fn build(self) -> Result<Message, EmailError> {
        if self.from.is_empty() {
            return Err(EmailError::MissingFrom);
        }
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(EmailError::MissingTo);
        }

        Ok(Message {
            subject: self.subject,
            html: self.html,
            text: self.text,
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            reply_to: self.reply_to,
            priority: self.priority,
            attachments: self.attachments,
        })
    }
}

/// Email message, immutable once built
#[derive(Clone, Debug)]
pub struct Message {
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    from: Mailboxes,
    to: Mailboxes,
    cc: Mailboxes,
    bcc: Mailboxes,
    reply_to: Mailboxes,
    priority: Option<Priority>,
    attachments: Vec<Part>,
}

impl Message {
    /// Create a new message builder without headers
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// `Subject` of the message
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// HTML body
    pub fn html_body(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Plain text body
    pub fn text_body(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// `From` mailboxes
    pub fn from(&self) -> &Mailboxes {
        &self.from
    }

    /// `To` mailboxes
    pub fn to(&self) -> &Mailboxes {
        &self.to
    }

    /// `Cc` mailboxes
    pub fn cc(&self) -> &Mailboxes {
        &self.cc
    }

    /// `Bcc` mailboxes
    pub fn bcc(&self) -> &Mailboxes {
        &self.bcc
    }

    /// `Reply-To` mailboxes
    pub fn reply_to(&self) -> &Mailboxes {
        &self.reply_to
    }

    /// `X-Priority`, when one was set
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Attached parts, in insertion order
    pub fn attachments(&self) -> &[Part] {
        &self.attachments
    }

    /// Every recipient: `To`, then `Cc`, then `Bcc`
    pub fn recipients(&self) -> impl Iterator<Item = &Mailbox> {
        self.to.iter().chain(self.cc.iter()).chain(self.bcc.iter())
    }
}
