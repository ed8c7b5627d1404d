//! Walk a local MailHog instance: count, list, fetch, and purge messages.
//!
//! Run with a MailHog listening on http://localhost:8025:
//! `cargo run --example demo`

use futures::TryStreamExt;
use mailhog_client::Client;

#[tokio::main]
async fn main() -> Result<(), mailhog_client::Error> {
    let client = Client::new("http://localhost:8025");

    let total = client.get_number_of_messages().await?;
    println!("{total} captured messages");

    let messages = client.find_all_messages();
    futures::pin_mut!(messages);
    while let Some(msg) = messages.try_next().await? {
        println!(
            "[{}] {} -> {}: {}",
            msg.created,
            msg.sender,
            msg.recipients.join(", "),
            msg.subject
        );
    }

    if let Ok(last) = client.get_last_message().await {
        let full = client.get_message_by_id(&last.id).await?;
        println!("last message body:\n{}", full.body);
    }

    client.purge_messages().await?;
    println!("mailbox purged");

    Ok(())
}
