//! Ports for infrastructure the quoting core does not own
//!
//! The core never touches device storage or a random source directly.
//! Each concern is expressed as a small trait implemented by an adapter:
//!
//! - [`PersistencePort`] - keyed string storage, scoped per device. The
//!   production adapter wraps whatever the host platform offers; tests use
//!   an in-memory fake.
//! - [`IdSource`] - opaque identifier generation. The default adapter draws
//!   from a cryptographically-strong random source via UUID v4; tests can
//!   substitute a deterministic sequence.

use async_trait::async_trait;
use thiserror::Error;

use crate::identifiers::{QuoteId, ReceiptId, TransactionId};

/// Error type for port operations
///
/// Persistence failures are recoverable by design: callers treat a failed
/// read the same as an absent value and start fresh.
#[derive(Debug, Error)]
pub enum PortError {
    /// The underlying storage could not be read or written
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The storage backend is not available on this device
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl PortError {
    /// Creates a storage error from a message
    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage {
            message: message.into(),
            source: None,
        }
    }
}

/// Keyed string persistence, scoped per device
///
/// Single-writer, single-reader on the active device; writes overwrite
/// wholesale with no merge semantics.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, PortError>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), PortError>;

    /// Removes the value stored under `key`, if any
    async fn remove(&self, key: &str) -> Result<(), PortError>;
}

/// Source of opaque, collision-resistant identifiers
///
/// Collision resistance is required across realistic usage volume, not
/// cryptographic unforgeability.
pub trait IdSource: Send + Sync {
    /// Generates a fresh quote identifier
    fn quote_id(&self) -> QuoteId;

    /// Generates a fresh payment transaction identifier
    fn transaction_id(&self) -> TransactionId;

    /// Generates a fresh receipt identifier
    fn receipt_id(&self) -> ReceiptId;
}

/// Default identifier source backed by UUID v4 (122 bits of randomness)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn quote_id(&self) -> QuoteId {
        QuoteId::new()
    }

    fn transaction_id(&self) -> TransactionId {
        TransactionId::new()
    }

    fn receipt_id(&self) -> ReceiptId {
        ReceiptId::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_id_source_does_not_collide() {
        let source = RandomIdSource;
        let ids: HashSet<_> = (0..1000).map(|_| source.quote_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
