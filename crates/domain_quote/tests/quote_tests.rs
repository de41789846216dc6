//! Quote Service and Checkout Tests
//!
//! Covers the two quoting modes and the simulated checkout:
//! - full-quote completeness validation and quote assembly
//! - quick-preview defaults and the preview/final consistency guarantee
//! - payment frequency rules and receipts
//! - history retention and storage-failure recovery

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rust_decimal_macros::dec;

use domain_pricing::{CoverageTier, UsageClass};
use domain_quote::{
    CheckoutService, PaymentFrequency, PaymentStatus, QuoteDraft, QuoteError, QuoteService,
    QUOTE_VALIDITY_DAYS,
};
use test_utils::{
    current_year, init_test_logging, known_instant, zmw, FailingStore, MemoryStore,
    SequentialIdSource,
};

fn full_draft() -> QuoteDraft {
    QuoteDraft {
        full_name: Some("Chanda Mwape".to_string()),
        email: Some("chanda@example.com".to_string()),
        phone: Some("+260971234567".to_string()),
        nrc: Some("123456/78/1".to_string()),
        vehicle_make: Some("Toyota".to_string()),
        vehicle_model: Some("Corolla".to_string()),
        vehicle_year: Some(current_year()),
        vehicle_value: Some(zmw(dec!(50000))),
        usage: Some(UsageClass::Personal),
        coverage_tier: Some(CoverageTier::Standard),
        number_plate: Some("ABC 1234".to_string()),
        document_ref: Some("whitebook-001.pdf".to_string()),
    }
}

fn quote_service(store: Arc<MemoryStore>) -> QuoteService {
    QuoteService::new(store)
        .with_id_source(Arc::new(SequentialIdSource::new()))
        .with_network_delay(Duration::ZERO)
}

mod full_quote_tests {
    use super::*;

    #[tokio::test]
    async fn generates_quote_with_narrative_and_validity_window() {
        init_test_logging();
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store.clone());

        let quote = service.generate_full_quote(full_draft()).await.unwrap();

        // Current-year vehicle, personal, standard: 50000 * 0.035 * 1.2
        assert_eq!(quote.breakdown.base_premium_annual.amount(), dec!(2100.00));
        assert_eq!(quote.breakdown.vat_annual.amount(), dec!(336.00));
        assert_eq!(quote.breakdown.total_premium_annual.amount(), dec!(2436.00));
        assert_eq!(quote.breakdown.quarterly_premium.amount(), dec!(609.00));

        assert_eq!(quote.coverage_tier, CoverageTier::Standard);
        assert!(quote.coverage_details[0].contains("Toyota Corolla"));
        assert_eq!(
            quote.valid_until,
            (quote.created_at + ChronoDuration::days(QUOTE_VALIDITY_DAYS)).date_naive()
        );
        assert!(!quote.is_expired(Utc::now().date_naive()));
    }

    #[test]
    fn issuing_at_a_fixed_instant_stamps_the_validity_window() {
        let request = full_draft().finalize().unwrap();
        let breakdown = domain_pricing::compute_premium_at(
            &domain_pricing::PrimaryRatePolicy,
            request.vehicle_value,
            request.vehicle_year,
            request.usage,
            request.coverage_tier,
            current_year(),
        )
        .unwrap();

        let quote = domain_quote::Quote::issue(
            core_kernel::QuoteId::new(),
            &request,
            breakdown,
            known_instant(),
        );

        assert_eq!(quote.created_at, known_instant());
        // 2026-03-14 plus the 30-day window lands on 2026-04-13
        assert_eq!(
            quote.valid_until,
            chrono::NaiveDate::from_ymd_opt(2026, 4, 13).unwrap()
        );
    }

    #[tokio::test]
    async fn quote_ids_are_unique_across_requests() {
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store);

        let first = service.generate_full_quote(full_draft()).await.unwrap();
        let second = service.generate_full_quote(full_draft()).await.unwrap();
        assert_ne!(first.quote_id, second.quote_id);
    }

    #[tokio::test]
    async fn missing_field_fails_before_any_pricing() {
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store.clone());

        let mut draft = full_draft();
        draft.vehicle_value = None;

        let err = service.generate_full_quote(draft).await.unwrap_err();
        assert!(matches!(
            err,
            QuoteError::IncompleteRequest {
                field: "vehicle_value"
            }
        ));
        // Nothing was recorded for the rejected request
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn invalid_value_surfaces_as_pricing_error() {
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store);

        let mut draft = full_draft();
        draft.vehicle_value = Some(zmw(dec!(0)));

        let err = service.generate_full_quote(draft).await.unwrap_err();
        assert!(matches!(err, QuoteError::Pricing(_)));
    }

    #[tokio::test]
    async fn storage_failure_never_blocks_quoting() {
        init_test_logging();
        let service = QuoteService::new(Arc::new(FailingStore))
            .with_network_delay(Duration::ZERO);

        // History write fails silently; the quote itself still resolves.
        let quote = service.generate_full_quote(full_draft()).await.unwrap();
        assert_eq!(quote.breakdown.total_premium_annual.amount(), dec!(2436.00));
    }
}

mod quick_preview_tests {
    use super::*;

    #[tokio::test]
    async fn missing_value_or_tier_yields_none() {
        let service = quote_service(Arc::new(MemoryStore::new()));

        assert!(service
            .quick_preview(&QuoteDraft::default())
            .unwrap()
            .is_none());

        let only_value = QuoteDraft {
            vehicle_value: Some(zmw(dec!(30000))),
            ..QuoteDraft::default()
        };
        assert!(service.quick_preview(&only_value).unwrap().is_none());

        let only_tier = QuoteDraft {
            coverage_tier: Some(CoverageTier::Basic),
            ..QuoteDraft::default()
        };
        assert!(service.quick_preview(&only_tier).unwrap().is_none());
    }

    #[tokio::test]
    async fn defaults_to_personal_usage_and_current_year() {
        let service = quote_service(Arc::new(MemoryStore::new()));

        let draft = QuoteDraft {
            vehicle_value: Some(zmw(dec!(50000))),
            coverage_tier: Some(CoverageTier::Standard),
            ..QuoteDraft::default()
        };

        let breakdown = service.quick_preview(&draft).unwrap().unwrap();
        // Defaults: age 0 (factor 1.2), personal (factor 1.0)
        assert_eq!(breakdown.base_premium_annual.amount(), dec!(2100.00));
        assert_eq!(breakdown.quarterly_premium.amount(), dec!(609.00));
    }

    #[tokio::test]
    async fn preview_matches_final_quote_exactly() {
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store);

        let draft = full_draft();
        let preview = service.quick_preview(&draft).unwrap().unwrap();
        let quote = service.generate_full_quote(draft).await.unwrap();

        assert_eq!(preview, quote.breakdown);
    }

    #[tokio::test]
    async fn tier_comparison_prices_each_tier() {
        let service = quote_service(Arc::new(MemoryStore::new()));
        let draft = full_draft();

        let basic = service
            .preview_for_tier(&draft, CoverageTier::Basic)
            .unwrap()
            .unwrap();
        let premium = service
            .preview_for_tier(&draft, CoverageTier::Premium)
            .unwrap()
            .unwrap();

        assert!(basic.total_premium_annual.amount() < premium.total_premium_annual.amount());
    }
}

mod history_tests {
    use super::*;

    #[tokio::test]
    async fn quote_history_is_newest_first_and_trimmed_to_ten() {
        let store = Arc::new(MemoryStore::new());
        let service = quote_service(store);

        for _ in 0..12 {
            service.generate_full_quote(full_draft()).await.unwrap();
        }

        let history = service.quote_history().await;
        assert_eq!(history.len(), 10);
        // Sequential ids: the newest quote carries the highest counter value
        let newest = history[0].quote.quote_id;
        assert!(history.iter().skip(1).all(|e| e.quote.quote_id != newest));
        assert!(history[0].recorded_at >= history[9].recorded_at);
    }

    #[tokio::test]
    async fn corrupted_history_degrades_to_empty() {
        init_test_logging();
        let store = Arc::new(MemoryStore::new());
        store.seed("motor_insurance_quote_history", "{not json");

        let service = quote_service(store);
        assert!(service.quote_history().await.is_empty());

        // A fresh quote replaces the corrupted blob
        service.generate_full_quote(full_draft()).await.unwrap();
        assert_eq!(service.quote_history().await.len(), 1);
    }
}

mod checkout_tests {
    use super::*;

    async fn quote_and_request() -> (domain_quote::Quote, domain_quote::QuoteRequest) {
        let service = quote_service(Arc::new(MemoryStore::new()));
        let draft = full_draft();
        let request = draft.clone().finalize().unwrap();
        let quote = service.generate_full_quote(draft).await.unwrap();
        (quote, request)
    }

    fn checkout(store: Arc<MemoryStore>) -> CheckoutService {
        CheckoutService::new(store)
            .with_id_source(Arc::new(SequentialIdSource::new()))
            .with_delays(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn annual_payment_charges_the_annual_total() {
        let (quote, request) = quote_and_request().await;
        let service = checkout(Arc::new(MemoryStore::new()));

        let receipt = service
            .process_payment(&quote, &request, "mobile-money", PaymentFrequency::Annual)
            .await
            .unwrap();

        assert_eq!(receipt.amount, quote.breakdown.total_premium_annual);
        assert_eq!(receipt.status, PaymentStatus::Success);
        assert!(receipt.email_sent);
        assert!(receipt.receipt_id.starts_with("RCP-"));
    }

    #[tokio::test]
    async fn quarterly_payment_charges_one_installment() {
        let (quote, request) = quote_and_request().await;
        let service = checkout(Arc::new(MemoryStore::new()));

        let receipt = service
            .process_payment(&quote, &request, "card", PaymentFrequency::Quarterly)
            .await
            .unwrap();

        assert_eq!(receipt.amount, quote.breakdown.quarterly_premium);
    }

    #[tokio::test]
    async fn monthly_and_semi_annual_are_caller_errors() {
        let (quote, request) = quote_and_request().await;
        let service = checkout(Arc::new(MemoryStore::new()));

        for frequency in [PaymentFrequency::Monthly, PaymentFrequency::SemiAnnual] {
            let err = service
                .process_payment(&quote, &request, "card", frequency)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                domain_quote::CheckoutError::UnsupportedFrequency { .. }
            ));
        }
    }

    #[tokio::test]
    async fn payments_are_remembered_newest_first() {
        let (quote, request) = quote_and_request().await;
        let store = Arc::new(MemoryStore::new());
        let service = checkout(store);

        for _ in 0..3 {
            service
                .process_payment(&quote, &request, "card", PaymentFrequency::Quarterly)
                .await
                .unwrap();
        }

        let history = service.payment_history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].quote_id, quote.quote_id);
        assert!(history[0].recorded_at >= history[2].recorded_at);
    }
}
