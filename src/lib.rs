//! # MailHog Client
//! Asynchronous wrapper around the MailHog mail-capture HTTP API, providing simple methods to page through, fetch, release, and purge captured test email from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who assert on outgoing email in integration tests, demos, or automation scripts against a local MailHog instance: point [`Client`] at the MailHog HTTP port, drain the mailbox with [`Client::find_all_messages`] or grab the newest capture with [`Client::get_last_message`], then [`Client::purge_messages`] between test cases.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application.
//!
//! ## Out of scope
//! Not a mail-capture server, SMTP sender, or MIME parser. It only proxies a running MailHog instance and inherits its retention, ordering, and storage behavior. Retry, timeout, and proxy policy belong to the `reqwest::Client` you inject via [`ClientBuilder::http_client`].
//!
//! ## Errors
//! All network calls surface transport and non-2xx statuses as [`Error::Request`]; a message record that does not match the MailHog schema becomes [`Error::MalformedRecord`]. Missing messages are reported as [`Error::NoSuchMessage`] (or [`Error::EmptyInbox`] when no id is involved). The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use futures::TryStreamExt;
//! use mailhog_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailhog_client::Error> {
//!     let client = Client::new("http://localhost:8025");
//!     println!("captured: {}", client.get_number_of_messages().await?);
//!
//!     let messages = client.find_all_messages();
//!     futures::pin_mut!(messages);
//!     while let Some(msg) = messages.try_next().await? {
//!         println!("{} -> {:?}: {}", msg.sender, msg.recipients, msg.subject);
//!     }
//!
//!     client.purge_messages().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Client, ClientBuilder, DEFAULT_PAGE_SIZE};
pub use error::Error;
pub use models::Message;

/// Result type alias for MailHog operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
