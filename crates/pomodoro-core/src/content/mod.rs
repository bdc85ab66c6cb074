//! Quote and date text shown above the countdown.
//!
//! Both are fetched once per activation of the pomodoro view, best effort:
//! a failure is logged and leaves the text empty.

mod client;

pub use client::{ContentClient, DateResponse, QuoteResponse};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Identifies one activation of the pomodoro view. Results carrying an
/// older id belong to a torn-down view and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivationId(u64);

impl ActivationId {
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayContent {
    pub quote: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentField {
    Quote(String),
    Date(String),
}

/// A successful fetch, addressed to the activation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUpdate {
    pub activation: ActivationId,
    pub field: ContentField,
}

impl DisplayContent {
    pub fn apply(&mut self, field: ContentField) {
        match field {
            ContentField::Quote(quote) => self.quote = quote,
            ContentField::Date(date) => self.date = date,
        }
    }
}

pub async fn load_quote(client: &ContentClient) -> Option<String> {
    match client.fetch_quote().await {
        Ok(resp) => {
            tracing::debug!(id = resp.id, "quote received");
            Some(resp.quote)
        }
        Err(e) => {
            tracing::warn!("Failed to get quote: {e}");
            None
        }
    }
}

pub async fn load_date(client: &ContentClient) -> Option<String> {
    match client.fetch_date().await {
        Ok(resp) => Some(resp.date),
        Err(e) => {
            tracing::warn!("Failed to get date: {e}");
            None
        }
    }
}

/// Fetch both texts concurrently and wait for both.
pub async fn fetch_display_content(client: &ContentClient) -> DisplayContent {
    let (quote, date) = tokio::join!(load_quote(client), load_date(client));
    DisplayContent {
        quote: quote.unwrap_or_default(),
        date: date.unwrap_or_default(),
    }
}

/// Issue both fetches in the background.
///
/// Each success is sent on `tx` as soon as it arrives; failures send
/// nothing. If the receiver is gone the result is dropped.
pub fn spawn_fetches(
    client: &ContentClient,
    activation: ActivationId,
    tx: &UnboundedSender<ContentUpdate>,
) {
    let (quote_client, quote_tx) = (client.clone(), tx.clone());
    tokio::spawn(async move {
        if let Some(quote) = load_quote(&quote_client).await {
            let _ = quote_tx.send(ContentUpdate {
                activation,
                field: ContentField::Quote(quote),
            });
        }
    });

    let (date_client, date_tx) = (client.clone(), tx.clone());
    tokio::spawn(async move {
        if let Some(date) = load_date(&date_client).await {
            let _ = date_tx.send(ContentUpdate {
                activation,
                field: ContentField::Date(date),
            });
        }
    });
}
