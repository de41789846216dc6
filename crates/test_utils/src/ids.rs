//! Deterministic identifier source for tests

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use core_kernel::{IdSource, QuoteId, ReceiptId, TransactionId};

/// Hands out identifiers from a predictable counter
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_uuid(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(n as u128)
    }
}

impl IdSource for SequentialIdSource {
    fn quote_id(&self) -> QuoteId {
        QuoteId::from_uuid(self.next_uuid())
    }

    fn transaction_id(&self) -> TransactionId {
        TransactionId::from_uuid(self.next_uuid())
    }

    fn receipt_id(&self) -> ReceiptId {
        ReceiptId::from_uuid(self.next_uuid())
    }
}
