//! Body of the `messages/send.json` request
//!
//! See <https://mailchimp.com/developer/transactional/api/messages/send-new-message/>

use std::{collections::BTreeMap, env};

use serde::Serialize;

use crate::{base64, message::Message};

/// `from_name` used when `MAIL_FROM_NAME` is not set
pub const DEFAULT_FROM_NAME: &str = "Mandrill Mailer.";

/// Sender identity put in every request
///
/// The `From` mailboxes of the message itself are not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    email: Option<String>,
    name: String,
}

impl Sender {
    /// Creates a sender, `name` falling back to [`DEFAULT_FROM_NAME`]
    pub fn new(email: Option<String>, name: Option<String>) -> Self {
        Self {
            email,
            name: name.unwrap_or_else(|| DEFAULT_FROM_NAME.to_owned()),
        }
    }

    /// Reads `MAIL_FROM_ADDRESS` and `MAIL_FROM_NAME` from the environment
    pub fn from_env() -> Self {
        Self::new(
            env::var("MAIL_FROM_ADDRESS").ok(),
            env::var("MAIL_FROM_NAME").ok(),
        )
    }

    /// Sender address, `None` when unset
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Sender display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Sender {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Top-level request document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    /// API key
    pub key: String,
    /// The message to send
    pub message: MessagePayload,
    /// Always `true`: let Mandrill process the message in the background
    #[serde(rename = "async")]
    pub is_async: bool,
}

/// The `message` object of the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    /// HTML body
    pub html: Option<String>,
    /// Subject line
    pub subject: Option<String>,
    /// Plain text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Sender address
    pub from_email: Option<String>,
    /// Sender display name
    pub from_name: String,
    /// Every recipient, see [`fetch_to`]
    pub to: Vec<Recipient>,
    /// Extra headers, only `Reply-To` for now
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Present and `true` for high priority messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    /// File attachments, see [`fetch_attachments`]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload>,
}

/// Entry of the `to` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Recipient address
    pub email: String,
    /// Recipient display name, empty when the mailbox has none
    pub name: String,
    /// Header the recipient is listed in
    #[serde(rename = "type")]
    pub kind: RecipientType,
}

/// Value of [`Recipient::kind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    /// `to`
    To,
    /// `cc`
    Cc,
    /// `bcc`
    Bcc,
}

/// Entry of the `attachments` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentPayload {
    /// MIME type of the attachment
    #[serde(rename = "type")]
    pub content_type: String,
    /// File name
    pub name: Option<String>,
    /// Base64 encoded content
    pub content: String,
}

impl SendRequest {
    /// Maps `message` to the request document
    pub fn new(key: &str, sender: &Sender, message: &Message) -> Self {
        let mut headers = BTreeMap::new();
        if let Some(reply_to) = message.reply_to().first() {
            headers.insert("Reply-To".to_owned(), reply_to.email.to_string());
        }

        SendRequest {
            key: key.to_owned(),
            message: MessagePayload {
                html: message.html_body().map(ToOwned::to_owned),
                subject: message.subject().map(ToOwned::to_owned),
                text: message.text_body().map(ToOwned::to_owned),
                from_email: sender.email().map(ToOwned::to_owned),
                from_name: sender.name().to_owned(),
                to: fetch_to(message),
                headers,
                important: message
                    .priority()
                    .filter(|priority| priority.is_important())
                    .map(|_| true),
                attachments: fetch_attachments(message),
            },
            is_async: true,
        }
    }
}

/// Every `To`, `Cc` and `Bcc` mailbox, in that order
///
/// All of them are listed with type `to`: Mandrill still applies the `Cc`
/// and `Bcc` semantics of the message headers, this list only decides who
/// receives a copy.
pub fn fetch_to(message: &Message) -> Vec<Recipient> {
    message
        .recipients()
        .map(|mailbox| Recipient {
            email: mailbox.email.to_string(),
            name: mailbox.name.clone().unwrap_or_default(),
            kind: RecipientType::To,
        })
        .collect()
}

/// Data part attachments of the message, inline parts and forwarded
/// messages are left out
pub fn fetch_attachments(message: &Message) -> Vec<AttachmentPayload> {
    message
        .attachments()
        .iter()
        .filter_map(|part| part.as_data())
        .map(|part| AttachmentPayload {
            content_type: part.content_type().to_string(),
            name: part.filename().map(ToOwned::to_owned),
            content: base64::encode(part.body()),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{fetch_attachments, fetch_to, RecipientType, SendRequest, Sender};
    use crate::message::{Attachment, Message, MessageBuilder, Priority};

    fn builder() -> MessageBuilder {
        Message::builder().from("Ignored <ignored@example.org>".parse().unwrap())
    }

    fn sender() -> Sender {
        Sender::new(Some("noreply@example.org".to_owned()), None)
    }

    #[test]
    fn minimal_message_payload() {
        let message = builder()
            .to("A <a@x.com>".parse().unwrap())
            .subject("Hi")
            .html("<p>Hi</p>")
            .priority(Priority::Normal)
            .build()
            .unwrap();

        let request = SendRequest::new("secret", &sender(), &message);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "key": "secret",
                "message": {
                    "html": "<p>Hi</p>",
                    "subject": "Hi",
                    "from_email": "noreply@example.org",
                    "from_name": "Mandrill Mailer.",
                    "to": [{"email": "a@x.com", "name": "A", "type": "to"}],
                },
                "async": true,
            })
        );
    }

    #[test]
    fn unset_values_in_payload() {
        let message = builder().to("a@x.com".parse().unwrap()).build().unwrap();

        let value =
            serde_json::to_value(SendRequest::new("", &Sender::default(), &message)).unwrap();

        assert_eq!(value["key"], json!(""));
        assert_eq!(value["message"]["html"], json!(null));
        assert_eq!(value["message"]["subject"], json!(null));
        assert_eq!(value["message"]["from_email"], json!(null));
        assert_eq!(value["message"]["to"][0]["name"], json!(""));
        assert!(value["message"].get("text").is_none());
    }

    #[test]
    fn text_body_is_forwarded() {
        let message = builder()
            .to("a@x.com".parse().unwrap())
            .text("plain")
            .build()
            .unwrap();

        let request = SendRequest::new("k", &sender(), &message);
        assert_eq!(request.message.text.as_deref(), Some("plain"));
    }

    #[test]
    fn recipients_flattened_in_order() {
        let message = builder()
            .bcc("Bcc1 <bcc1@x.com>".parse().unwrap())
            .cc("cc1@x.com".parse().unwrap())
            .to("To1 <to1@x.com>".parse().unwrap())
            .cc("Cc2 <cc2@x.com>".parse().unwrap())
            .to("to2@x.com".parse().unwrap())
            .build()
            .unwrap();

        let to = fetch_to(&message);

        let emails: Vec<&str> = to.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(
            emails,
            ["to1@x.com", "to2@x.com", "cc1@x.com", "cc2@x.com", "bcc1@x.com"]
        );
        assert!(to.iter().all(|r| r.kind == RecipientType::To));
        assert_eq!(to[0].name, "To1");
        assert_eq!(to[2].name, "");
    }

    #[test]
    fn important_only_for_high_priorities() {
        for (priority, expected) in [
            (Some(Priority::Highest), Some(true)),
            (Some(Priority::High), Some(true)),
            (Some(Priority::Normal), None),
            (Some(Priority::Low), None),
            (Some(Priority::Lowest), None),
            (None, None),
        ] {
            let mut builder = builder().to("a@x.com".parse().unwrap());
            if let Some(priority) = priority {
                builder = builder.priority(priority);
            }
            let message = builder.build().unwrap();

            let request = SendRequest::new("k", &sender(), &message);
            assert_eq!(request.message.important, expected, "{priority:?}");

            let value = serde_json::to_value(&request).unwrap();
            assert_eq!(
                value["message"].get("important").is_some(),
                expected.is_some()
            );
        }
    }

    #[test]
    fn reply_to_keeps_first_address() {
        let message = builder()
            .to("a@x.com".parse().unwrap())
            .reply_to("First <first@x.com>".parse().unwrap())
            .reply_to("second@x.com".parse().unwrap())
            .build()
            .unwrap();

        let value = serde_json::to_value(SendRequest::new("k", &sender(), &message)).unwrap();
        assert_eq!(value["message"]["headers"], json!({"Reply-To": "first@x.com"}));
    }

    #[test]
    fn no_reply_to_no_headers() {
        let message = builder().to("a@x.com".parse().unwrap()).build().unwrap();

        let value = serde_json::to_value(SendRequest::new("k", &sender(), &message)).unwrap();
        assert!(value["message"].get("headers").is_none());
    }

    #[test]
    fn only_data_parts_are_attached() {
        let forwarded = builder().to("z@x.com".parse().unwrap()).build().unwrap();
        let message = builder()
            .to("a@x.com".parse().unwrap())
            .attach(Attachment::new("hello.txt").body("Hello", mime::TEXT_PLAIN))
            .attach(Attachment::new_inline("logo").body(vec![1, 2, 3], mime::IMAGE_PNG))
            .attach(Attachment::message(forwarded))
            .attach(
                Attachment::new("data.bin").body(vec![0xff, 0x00], mime::APPLICATION_OCTET_STREAM),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(fetch_attachments(&message)).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "text/plain", "name": "hello.txt", "content": "SGVsbG8="},
                {"type": "application/octet-stream", "name": "data.bin", "content": "/wA="},
            ])
        );
    }

    #[test]
    fn no_data_parts_no_attachments_field() {
        let message = builder()
            .to("a@x.com".parse().unwrap())
            .attach(Attachment::new_inline("logo").body(vec![1], mime::IMAGE_PNG))
            .build()
            .unwrap();

        let value = serde_json::to_value(SendRequest::new("k", &sender(), &message)).unwrap();
        assert!(value["message"].get("attachments").is_none());
    }
}
