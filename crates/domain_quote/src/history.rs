//! Persisted quote and payment history
//!
//! Newest-first lists kept in device storage through the persistence port.
//! History is a convenience, not a ledger: read or parse failures degrade to
//! an empty list and write failures are logged and dropped, never surfaced.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use core_kernel::{PersistencePort, QuoteId};

use crate::checkout::PaymentReceipt;
use crate::quote::Quote;
use crate::request::QuoteRequest;

/// Storage key for quote history
pub const QUOTE_HISTORY_KEY: &str = "motor_insurance_quote_history";
/// Storage key for payment history
pub const PAYMENT_HISTORY_KEY: &str = "motor_insurance_payment_history";

/// Maximum retained quote entries
pub const QUOTE_HISTORY_LIMIT: usize = 10;
/// Maximum retained payment entries
pub const PAYMENT_HISTORY_LIMIT: usize = 20;

/// One remembered quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteHistoryEntry {
    pub quote: Quote,
    pub request: QuoteRequest,
    pub recorded_at: DateTime<Utc>,
}

/// One remembered payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistoryEntry {
    pub receipt: PaymentReceipt,
    pub quote_id: QuoteId,
    pub recorded_at: DateTime<Utc>,
}

/// Reads a history list, treating any failure as an empty list
pub(crate) async fn read_entries<T: DeserializeOwned>(
    store: &dyn PersistencePort,
    key: &str,
) -> Vec<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key, %err, "history read failed, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(key, %err, "history entry corrupted, treating as empty");
            Vec::new()
        }
    }
}

/// Prepends an entry and trims the list to `limit`, dropping write failures
pub(crate) async fn push_entry<T: Serialize + DeserializeOwned>(
    store: &dyn PersistencePort,
    key: &str,
    entry: T,
    limit: usize,
) {
    let mut entries: Vec<T> = read_entries(store, key).await;
    entries.insert(0, entry);
    entries.truncate(limit);

    let serialized = match serde_json::to_string(&entries) {
        Ok(serialized) => serialized,
        Err(err) => {
            tracing::warn!(key, %err, "history serialization failed, entry dropped");
            return;
        }
    };

    if let Err(err) = store.set(key, &serialized).await {
        tracing::warn!(key, %err, "history write failed, entry dropped");
    }
}
