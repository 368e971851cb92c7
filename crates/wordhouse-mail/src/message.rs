//! Email message model.

use bytes::Bytes;

/// A file attached to an outbound message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Filename shown to the recipient.
    pub filename: String,
    /// Attachment bytes.
    pub content: Bytes,
    /// MIME type.
    pub content_type: String,
}

impl Attachment {
    /// Creates an attachment.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

/// An outbound email message.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Sender, display-name form allowed.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body; falls back to the text body when absent.
    pub html: Option<String>,
    /// Attachments forwarded with the message.
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Creates a plain message without attachments.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: None,
            attachments: Vec::new(),
        }
    }

    /// Sets an HTML body.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Adds attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}
