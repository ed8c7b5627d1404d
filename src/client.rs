//! MailHog async client implementation.

use crate::models::MessageList;
use crate::{Error, Message, Result};
use futures::{Stream, stream};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::collections::VecDeque;

/// Async client for the MailHog mail-capture HTTP API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] to inject a
/// custom `reqwest::Client` (proxies, TLS, timeouts) or user agent.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Create a new MailHog client against the given base endpoint.
    ///
    /// Any trailing slashes on `base_url` are stripped before requests are
    /// composed.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// let client = Client::new("http://localhost:8025");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_parts(reqwest::Client::new(), base_url.into())
    }

    /// Get the configured MailHog endpoint, without any trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stream every captured message, oldest first, using
    /// [`DEFAULT_PAGE_SIZE`] messages per request.
    ///
    /// See [`Client::find_all_messages_with_page_size`] for the paging
    /// contract.
    pub fn find_all_messages(&self) -> impl Stream<Item = Result<Message>> + '_ {
        self.find_all_messages_with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Stream every captured message, oldest first, fetching `page_size`
    /// messages per request.
    ///
    /// The stream is lazy: nothing is requested until it is polled, and each
    /// page is fetched only once the previous page's messages have been
    /// consumed. The server's ordering is preserved as-is. The stream ends
    /// when the server reports a page count of zero; after every other page
    /// the offset advances by `page_size`, matching MailHog's paging
    /// contract even when a page comes back shorter than requested.
    ///
    /// Transport failures and malformed records end the stream with an `Err`
    /// item. Each call starts over from offset zero.
    ///
    /// # Arguments
    /// * `page_size` - How many messages to request per round-trip; must be
    ///   at least 1
    ///
    /// # Examples
    /// ```no_run
    /// # use futures::TryStreamExt;
    /// # use mailhog_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025");
    /// let messages = client.find_all_messages_with_page_size(100);
    /// futures::pin_mut!(messages);
    /// while let Some(msg) = messages.try_next().await? {
    ///     println!("{}: {}", msg.id, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_all_messages_with_page_size(
        &self,
        page_size: u64,
    ) -> impl Stream<Item = Result<Message>> + '_ {
        let cursor = PageCursor {
            start: 0,
            buffered: VecDeque::new(),
        };

        stream::try_unfold(cursor, move |mut cursor| async move {
            loop {
                if let Some(record) = cursor.buffered.pop_front() {
                    return Ok(Some((Message::from_record(record)?, cursor)));
                }

                let page = self
                    .messages_page(&[("limit", page_size), ("start", cursor.start)])
                    .await?;

                // A zero count is the only termination signal; a short but
                // nonempty page still advances the offset by `page_size`.
                if page.count == 0 {
                    return Ok(None);
                }

                cursor.buffered.extend(page.items);
                cursor.start += page_size;
            }
        })
    }

    /// Fetch the `number_of_messages` most recently captured messages.
    ///
    /// Issues a single request and maps the result eagerly, newest first.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025");
    /// for msg in client.find_latest_messages(5).await? {
    ///     println!("{}: {}", msg.sender, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_latest_messages(&self, number_of_messages: u64) -> Result<Vec<Message>> {
        let page = self
            .messages_page(&[("limit", number_of_messages)])
            .await?;

        page.items.into_iter().map(Message::from_record).collect()
    }

    /// Fetch the single most recently captured message.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInbox`] when nothing has been captured yet.
    pub async fn get_last_message(&self) -> Result<Message> {
        self.find_latest_messages(1)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::EmptyInbox)
    }

    /// Get the total number of captured messages.
    ///
    /// Reads the server-reported total from a minimal one-item page, so the
    /// cost does not grow with the mailbox.
    pub async fn get_number_of_messages(&self) -> Result<u64> {
        let page = self.messages_page(&[("limit", 1)]).await?;

        Ok(page.total)
    }

    /// Delete every captured message.
    ///
    /// The response body is not interpreted; the call succeeds when the
    /// server acknowledges the delete.
    pub async fn purge_messages(&self) -> Result<()> {
        self.http
            .delete(format!("{}/api/v1/messages", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Release a captured message to a real SMTP server.
    ///
    /// MailHog re-sends the stored message to `email_address` via the SMTP
    /// server at `host:port`.
    ///
    /// # Arguments
    /// * `message_id` - Id of the captured message to release
    /// * `host` - SMTP host to relay through
    /// * `port` - SMTP port; sent to MailHog as a string
    /// * `email_address` - Recipient of the released message
    pub async fn release_message(
        &self,
        message_id: &str,
        host: &str,
        port: u16,
        email_address: &str,
    ) -> Result<()> {
        let payload = ReleaseRequest {
            host,
            port: port.to_string(),
            email: email_address,
        };

        let body = serde_json::to_string(&payload).map_err(|source| Error::ReleasePayload {
            message_id: message_id.to_string(),
            source,
        })?;

        self.http
            .post(format!(
                "{}/api/v1/messages/{}/release",
                self.base_url, message_id
            ))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Fetch a single captured message by id.
    ///
    /// # Errors
    /// Returns [`Error::NoSuchMessage`] carrying `message_id` when the
    /// server has no such message.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025");
    /// let msg = client.get_message_by_id("4oRBnPtjPNSA").await?;
    /// println!("{}", msg.body);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_message_by_id(&self, message_id: &str) -> Result<Message> {
        let response = self
            .http
            .get(format!("{}/api/v1/messages/{}", self.base_url, message_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NoSuchMessage(message_id.to_string()));
        }

        let body = response.error_for_status()?.text().await?;

        // MailHog signals an unknown id with a null or empty body rather
        // than an error payload.
        let record = serde_json::from_str::<serde_json::Value>(&body)
            .unwrap_or(serde_json::Value::Null);
        if record.is_null() {
            return Err(Error::NoSuchMessage(message_id.to_string()));
        }

        Message::from_record(record)
    }

    /// Common list-endpoint request pattern.
    async fn messages_page(&self, query: &[(&str, u64)]) -> Result<MessageList> {
        self.http
            .get(format!("{}/api/v2/messages", self.base_url))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<MessageList>()
            .await
            .map_err(Into::into)
    }

    fn from_parts(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

/// Paging state threaded through [`Client::find_all_messages_with_page_size`].
struct PageCursor {
    start: u64,
    buffered: VecDeque<serde_json::Value>,
}

/// Body of a release request; MailHog expects the port as a string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ReleaseRequest<'a> {
    host: &'a str,
    port: String,
    email: &'a str,
}

/// Page size used by [`Client::find_all_messages`].
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Builder for configuring a MailHog client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    http: Option<reqwest::Client>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - A plain `reqwest::Client` as transport
    /// - reqwest's default user agent
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: None,
            user_agent: None,
        }
    }

    /// Use a preconfigured `reqwest::Client` for all requests.
    ///
    /// This is the place for proxy, TLS, timeout, and retry policy; the
    /// MailHog client adds none of its own. When a client is supplied here,
    /// [`ClientBuilder::user_agent`] is ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::builder("http://localhost:8025")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(user_agent) = &self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build()?
            }
        };

        Ok(Client::from_parts(http, self.base_url))
    }
}
