//! Simulated checkout
//!
//! "Activates" a policy by charging a quote's total through a simulated
//! payment provider and emailing a simulated receipt. Only the annual and
//! quarterly totals of a quote are valid charge targets; asking for any
//! other frequency is a caller error, not a degraded path.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{IdSource, Money, PersistencePort, RandomIdSource, TransactionId};

use crate::error::CheckoutError;
use crate::history::{
    push_entry, read_entries, PaymentHistoryEntry, PAYMENT_HISTORY_KEY, PAYMENT_HISTORY_LIMIT,
};
use crate::quote::Quote;
use crate::request::QuoteRequest;

/// Default simulated payment-provider latency
const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(3);
/// Default simulated email latency
const DEFAULT_EMAIL_DELAY: Duration = Duration::from_millis(1500);

/// How often the customer wants to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    /// The amount a quote charges at this frequency
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnsupportedFrequency`] for monthly and
    /// semi-annual: the product only sells annual and quarterly payment.
    pub fn charge_amount(&self, quote: &Quote) -> Result<Money, CheckoutError> {
        match self {
            PaymentFrequency::Annual => Ok(quote.breakdown.total_premium_annual),
            PaymentFrequency::Quarterly => Ok(quote.breakdown.quarterly_premium),
            PaymentFrequency::Monthly | PaymentFrequency::SemiAnnual => {
                Err(CheckoutError::UnsupportedFrequency {
                    frequency: self.to_string(),
                })
            }
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnual => "semi-annual",
            PaymentFrequency::Annual => "annual",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a simulated payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
    Pending,
}

/// Receipt for a processed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Provider transaction identifier
    pub transaction_id: TransactionId,
    /// Short printed receipt reference, e.g. "RCP-1A2B3C4D"
    pub receipt_id: String,
    /// Payment method chosen by the customer
    pub payment_method: String,
    /// Amount actually charged
    pub amount: Money,
    /// Payment outcome
    pub status: PaymentStatus,
    /// When the payment completed
    pub timestamp: DateTime<Utc>,
    /// Whether the simulated email receipt went out
    pub email_sent: bool,
}

/// Simulated payment processing and receipts
pub struct CheckoutService {
    ids: Arc<dyn IdSource>,
    store: Arc<dyn PersistencePort>,
    processing_delay: Duration,
    email_delay: Duration,
}

impl CheckoutService {
    /// Creates a checkout service with default simulated latencies
    pub fn new(store: Arc<dyn PersistencePort>) -> Self {
        Self {
            ids: Arc::new(RandomIdSource),
            store,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            email_delay: DEFAULT_EMAIL_DELAY,
        }
    }

    /// Substitutes the identifier source
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Overrides the simulated latencies
    pub fn with_delays(mut self, processing: Duration, email: Duration) -> Self {
        self.processing_delay = processing;
        self.email_delay = email;
        self
    }

    /// Charges the quote at the requested frequency
    ///
    /// Fire-to-completion like the full-quote path: once started, the
    /// payment always resolves. On success the receipt is emailed
    /// (simulated) and remembered in payment history.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnsupportedFrequency`] when the frequency is
    /// not a valid charge target.
    pub async fn process_payment(
        &self,
        quote: &Quote,
        request: &QuoteRequest,
        payment_method: &str,
        frequency: PaymentFrequency,
    ) -> Result<PaymentReceipt, CheckoutError> {
        let amount = frequency.charge_amount(quote)?;

        // Simulated provider round-trip
        tokio::time::sleep(self.processing_delay).await;

        let mut receipt = PaymentReceipt {
            transaction_id: self.ids.transaction_id(),
            receipt_id: self.ids.receipt_id().short(),
            payment_method: payment_method.to_string(),
            amount,
            status: PaymentStatus::Success,
            timestamp: Utc::now(),
            email_sent: false,
        };

        receipt.email_sent = self.send_email_receipt(&request.email, &receipt, quote).await;

        tracing::info!(
            transaction_id = %receipt.transaction_id,
            receipt_id = %receipt.receipt_id,
            amount = %receipt.amount,
            %frequency,
            "payment processed"
        );

        self.record_payment(&receipt, quote).await;

        Ok(receipt)
    }

    /// Returns remembered payments, newest first
    pub async fn payment_history(&self) -> Vec<PaymentHistoryEntry> {
        read_entries(self.store.as_ref(), PAYMENT_HISTORY_KEY).await
    }

    /// Simulated email delivery; coverage is active immediately
    async fn send_email_receipt(
        &self,
        email: &str,
        receipt: &PaymentReceipt,
        quote: &Quote,
    ) -> bool {
        tokio::time::sleep(self.email_delay).await;

        tracing::info!(
            to = email,
            receipt_id = %receipt.receipt_id,
            quote_id = %quote.quote_id,
            "email receipt sent (simulated)"
        );
        true
    }

    async fn record_payment(&self, receipt: &PaymentReceipt, quote: &Quote) {
        let entry = PaymentHistoryEntry {
            receipt: receipt.clone(),
            quote_id: quote.quote_id,
            recorded_at: Utc::now(),
        };
        push_entry(
            self.store.as_ref(),
            PAYMENT_HISTORY_KEY,
            entry,
            PAYMENT_HISTORY_LIMIT,
        )
        .await;
    }
}
