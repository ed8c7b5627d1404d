//! Typed message model and the MailHog wire format it is mapped from.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// One email captured by MailHog.
///
/// Produced by decoding a raw MailHog message record; never constructed
/// directly. Addresses come from the SMTP envelope, the subject from the
/// parsed message headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// MailHog's storage id for the message.
    pub id: String,
    /// Envelope sender as `mailbox@domain`.
    pub sender: String,
    /// Envelope recipients as `mailbox@domain`, in server order.
    pub recipients: Vec<String>,
    /// First `Subject` header, or empty when the message carries none.
    pub subject: String,
    /// Plain message body.
    pub body: String,
    /// When MailHog received the message.
    pub created: DateTime<Utc>,
}

impl Message {
    /// Decode one raw message record from a MailHog API response.
    ///
    /// # Arguments
    /// * `record` - One entry of a list response's `items` array, or the
    ///   body of a single-message response
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedRecord`] when a required field is
    /// missing or has the wrong shape.
    pub fn from_record(record: serde_json::Value) -> Result<Self> {
        let raw: RawMessage = serde_json::from_value(record)?;

        Ok(Self {
            id: raw.id,
            sender: raw.from.address(),
            recipients: raw.to.iter().map(EmailPath::address).collect(),
            subject: raw
                .content
                .headers
                .get("Subject")
                .and_then(|values| values.first())
                .cloned()
                .unwrap_or_default(),
            body: raw.content.body,
            created: raw.created,
        })
    }
}

/// One page of the `/api/v2/messages` envelope.
///
/// `items` stays untyped here; each record is decoded on its own so a single
/// malformed message fails with the record, not the page.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageList {
    pub count: u64,
    pub total: u64,
    pub items: Vec<serde_json::Value>,
}

/// A message as MailHog serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMessage {
    #[serde(rename = "ID")]
    id: String,
    from: EmailPath,
    to: Vec<EmailPath>,
    content: Content,
    created: DateTime<Utc>,
}

/// An SMTP envelope path (`MAIL FROM` / `RCPT TO`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EmailPath {
    mailbox: String,
    domain: String,
}

impl EmailPath {
    fn address(&self) -> String {
        format!("{}@{}", self.mailbox, self.domain)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Content {
    headers: HashMap<String, Vec<String>>,
    body: String,
}
