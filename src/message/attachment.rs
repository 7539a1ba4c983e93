use mime::Mime;

use crate::message::Message;

#[derive(Debug, Clone, Copy)]
enum Disposition {
    Attachment,
    Inline,
}

/// Builder for the parts attached to a [`Message`]
///
/// ```
/// use lettre_mandrill::message::{mime, Attachment};
///
/// let part = Attachment::new("invoice.pdf").body(b"%PDF-1.7".to_vec(), mime::APPLICATION_PDF);
/// assert!(part.is_data());
///
/// let logo = Attachment::new_inline("logo").body(Vec::new(), mime::IMAGE_PNG);
/// assert!(!logo.is_data());
/// ```
#[derive(Debug, Clone)]
pub struct Attachment {
    filename: Option<String>,
    content_disposition: Disposition,
    content_id: Option<String>,
}

impl Attachment {
    /// Creates a regular file attachment
    pub fn new<S: Into<String>>(filename: S) -> Self {
        Self {
            filename: Some(filename.into()),
            content_disposition: Disposition::Attachment,
            content_id: None,
        }
    }

    /// Creates an inline part, referenced from the HTML body as `cid:<content_id>`
    pub fn new_inline<S: Into<String>>(content_id: S) -> Self {
        Self {
            filename: None,
            content_disposition: Disposition::Inline,
            content_id: Some(content_id.into()),
        }
    }

    /// Sets the file name of an inline part
    pub fn filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Attaches a whole message as `message/rfc822`
    pub fn message(message: Message) -> Part {
        Part::Message(Box::new(message))
    }

    /// Build the attachment part
    pub fn body<T: Into<Vec<u8>>>(self, content: T, content_type: Mime) -> Part {
        let part = SinglePart {
            filename: self.filename,
            content_type,
            content_id: self.content_id,
            body: content.into(),
        };

        match self.content_disposition {
            Disposition::Attachment => Part::Data(part),
            Disposition::Inline => Part::Inline(part),
        }
    }
}

/// A part attached to a [`Message`]
#[derive(Debug, Clone)]
pub enum Part {
    /// A file attachment
    Data(SinglePart),
    /// A part embedded in the body, such as an image
    Inline(SinglePart),
    /// A forwarded message
    Message(Box<Message>),
}

impl Part {
    /// Whether this is a plain file attachment
    pub fn is_data(&self) -> bool {
        matches!(self, Part::Data(_))
    }

    /// The data part, if this is one
    pub fn as_data(&self) -> Option<&SinglePart> {
        match self {
            Part::Data(part) => Some(part),
            Part::Inline(_) | Part::Message(_) => None,
        }
    }
}

/// A single-body part: file name, content type and raw content
#[derive(Debug, Clone)]
pub struct SinglePart {
    filename: Option<String>,
    content_type: Mime,
    content_id: Option<String>,
    body: Vec<u8>,
}

impl SinglePart {
    /// File name of the part
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// `Content-Type` of the part
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// `Content-ID` of an inline part, without angle brackets
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    /// Raw (not transfer-encoded) content
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod test {
    use super::{Attachment, Part};

    #[test]
    fn attachment_is_data_part() {
        let part = Attachment::new("report.csv").body("a,b\n1,2\n", mime::TEXT_CSV);
        let data = part.as_data().unwrap();
        assert_eq!(data.filename(), Some("report.csv"));
        assert_eq!(data.content_type().as_ref(), "text/csv");
        assert_eq!(data.body(), b"a,b\n1,2\n");
        assert_eq!(data.content_id(), None);
    }

    #[test]
    fn inline_is_not_data_part() {
        let part = Attachment::new_inline("123")
            .filename("logo.png")
            .body(vec![0x89, b'P', b'N', b'G'], mime::IMAGE_PNG);
        match &part {
            Part::Inline(inline) => {
                assert_eq!(inline.content_id(), Some("123"));
                assert_eq!(inline.filename(), Some("logo.png"));
            }
            other => panic!("unexpected part {other:?}"),
        }
        assert!(part.as_data().is_none());
    }
}
