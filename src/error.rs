//! Error types for MailHog API operations.

use thiserror::Error;

/// Errors returned by [`crate::Client`] operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request failed at the transport level or the server
    /// answered with a non-2xx status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A message record in a server response did not match the MailHog
    /// message schema.
    #[error("malformed message record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// The mailbox holds no messages.
    #[error("no last message found, inbox is empty")]
    EmptyInbox,

    /// The server has no message with the given id.
    #[error("no message found with id {0}")]
    NoSuchMessage(String),

    /// The release payload could not be encoded as JSON.
    #[error("unable to encode release payload for message {message_id}")]
    ReleasePayload {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },
}
