//! Form Lifecycle Tests
//!
//! Covers session restore and freshness, write-through persistence, step
//! transitions, all-at-once validation with focus priority, and the
//! submit-to-quote boundary.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use app_form::{
    validate_step2, FormField, FormFields, FormLifecycleManager, FormSession, FormStep,
    SessionStore, FORM_DATA_KEY,
};
use domain_pricing::{CoverageTier, UsageClass};
use test_utils::{current_year, init_test_logging, zmw, FailingStore, MemoryStore};

fn seeded_session(store: &MemoryStore, step: u8, age_hours: i64) {
    let mut data = FormFields::default();
    data.set(FormField::FullName, "Chanda Mwape");
    data.set(FormField::Email, "chanda@example.com");
    data.set(FormField::Phone, "0971234567");
    data.set(FormField::Nrc, "123456/78/1");
    data.set(FormField::VehicleMake, "Toyota");

    let session = FormSession {
        data,
        step,
        saved_at: Utc::now() - Duration::hours(age_hours),
    };
    store.seed(FORM_DATA_KEY, &serde_json::to_string(&session).unwrap());
}

async fn fill_step1(manager: &mut FormLifecycleManager) {
    manager.edit_field(FormField::FullName, "Chanda Mwape").await;
    manager
        .edit_field(FormField::Email, "chanda@example.com")
        .await;
    manager.edit_field(FormField::Phone, "0971234567").await;
    manager.edit_field(FormField::Nrc, "123456/78/1").await;
}

async fn fill_step2(manager: &mut FormLifecycleManager) {
    let year = (current_year() - 2).to_string();
    manager.edit_field(FormField::VehicleMake, "Toyota").await;
    manager.edit_field(FormField::VehicleModel, "Hilux").await;
    manager.edit_field(FormField::VehicleYear, &year).await;
    manager.edit_field(FormField::VehicleValue, "85000").await;
    manager.edit_field(FormField::NumberPlate, "BAD 1234").await;
    manager
        .edit_field(FormField::DocumentRef, "whitebook-042.pdf")
        .await;
    manager.edit_field(FormField::Usage, "business").await;
}

mod restore_tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_starts_fresh_at_step1() {
        let manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        assert_eq!(manager.step(), FormStep::Step1);
        assert!(!manager.was_restored());
        assert!(manager.fields().is_empty());
    }

    #[tokio::test]
    async fn fresh_session_restores_fields_and_step() {
        let store = Arc::new(MemoryStore::new());
        seeded_session(&store, 2, 23);

        let manager = FormLifecycleManager::start(store).await;
        assert!(manager.was_restored());
        assert_eq!(manager.step(), FormStep::Step2);
        assert_eq!(
            manager.fields().get(FormField::FullName),
            Some("Chanda Mwape")
        );
        assert_eq!(manager.fields().get(FormField::VehicleMake), Some("Toyota"));
    }

    #[tokio::test]
    async fn stale_session_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        seeded_session(&store, 2, 25);

        let manager = FormLifecycleManager::start(store).await;
        assert!(!manager.was_restored());
        assert_eq!(manager.step(), FormStep::Step1);
        assert!(manager.fields().is_empty());
    }

    #[tokio::test]
    async fn corrupted_session_starts_fresh() {
        init_test_logging();
        let store = Arc::new(MemoryStore::new());
        store.seed(FORM_DATA_KEY, "][ not json");

        let manager = FormLifecycleManager::start(store).await;
        assert!(!manager.was_restored());
        assert!(manager.fields().is_empty());
    }

    #[tokio::test]
    async fn unreadable_storage_starts_fresh() {
        init_test_logging();
        let manager = FormLifecycleManager::start(Arc::new(FailingStore)).await;
        assert!(!manager.was_restored());
        assert_eq!(manager.step(), FormStep::Step1);
    }

    #[tokio::test]
    async fn restore_round_trips_through_session_store() {
        let store = Arc::new(MemoryStore::new());
        seeded_session(&store, 1, 1);

        let sessions = SessionStore::new(store);
        let restored = sessions.restore().await.unwrap();
        assert_eq!(restored.step, 1);
        assert_eq!(restored.data.get(FormField::Phone), Some("0971234567"));
    }
}

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn field_edits_persist_write_through() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;

        manager.edit_field(FormField::FullName, "Chanda Mwape").await;
        manager.edit_field(FormField::Email, "chanda@example.com").await;

        let raw = store.peek(FORM_DATA_KEY).unwrap();
        let session: FormSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(session.step, 1);
        assert_eq!(session.data.get(FormField::FullName), Some("Chanda Mwape"));
        // Empty fields are skipped in the persisted map
        assert!(!raw.contains("vehicle_make"));
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;

        manager.edit_field(FormField::FullName, "First Name").await;
        manager.edit_field(FormField::FullName, "Second Name").await;

        let session: FormSession =
            serde_json::from_str(&store.peek(FORM_DATA_KEY).unwrap()).unwrap();
        assert_eq!(session.data.get(FormField::FullName), Some("Second Name"));
    }

    #[tokio::test]
    async fn write_failures_do_not_break_editing() {
        init_test_logging();
        let mut manager = FormLifecycleManager::start(Arc::new(FailingStore)).await;
        manager.edit_field(FormField::FullName, "Chanda Mwape").await;
        assert_eq!(
            manager.fields().get(FormField::FullName),
            Some("Chanda Mwape")
        );
    }
}

mod transition_tests {
    use super::*;

    #[tokio::test]
    async fn advance_requires_valid_step1() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;
        manager.edit_field(FormField::FullName, "Chanda Mwape").await;

        let err = manager.advance().await.unwrap_err();
        assert!(matches!(err, app_form::FormError::Validation(_)));
        assert_eq!(manager.step(), FormStep::Step1);

        // Failed transition never persists a step change
        let session: FormSession =
            serde_json::from_str(&store.peek(FORM_DATA_KEY).unwrap()).unwrap();
        assert_eq!(session.step, 1);
    }

    #[tokio::test]
    async fn advance_moves_to_step2_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;
        fill_step1(&mut manager).await;

        manager.advance().await.unwrap();
        assert_eq!(manager.step(), FormStep::Step2);

        let session: FormSession =
            serde_json::from_str(&store.peek(FORM_DATA_KEY).unwrap()).unwrap();
        assert_eq!(session.step, 2);
    }

    #[tokio::test]
    async fn back_is_unconditional() {
        let mut manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        fill_step1(&mut manager).await;
        manager.advance().await.unwrap();

        // No vehicle data at all; back still succeeds
        manager.back().await.unwrap();
        assert_eq!(manager.step(), FormStep::Step1);
    }

    #[tokio::test]
    async fn submit_from_step1_is_a_wrong_step() {
        let mut manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        let err = manager.submit().await.unwrap_err();
        assert!(matches!(
            err,
            app_form::FormError::WrongStep { action: "submit", .. }
        ));
    }
}

mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn submit_finalizes_request_and_clears_session() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;
        fill_step1(&mut manager).await;
        manager.advance().await.unwrap();
        fill_step2(&mut manager).await;

        let request = manager.submit().await.unwrap();
        assert_eq!(request.vehicle_make, "Toyota");
        assert_eq!(request.vehicle_value, zmw(dec!(85000)));
        assert_eq!(request.usage, UsageClass::Business);
        // Tier defaults to the pre-selected standard cover
        assert_eq!(request.coverage_tier, CoverageTier::Standard);

        // Terminal: the persisted session is gone and the wizard is reset
        assert!(store.peek(FORM_DATA_KEY).is_none());
        assert_eq!(manager.step(), FormStep::Step1);
        assert!(manager.fields().is_empty());
    }

    #[tokio::test]
    async fn submit_validation_is_all_at_once_with_focus_priority() {
        let mut manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        fill_step1(&mut manager).await;
        manager.advance().await.unwrap();
        fill_step2(&mut manager).await;
        manager.edit_field(FormField::VehicleModel, "").await;
        manager.edit_field(FormField::VehicleValue, "500").await;

        let err = manager.submit().await.unwrap_err();
        let app_form::FormError::Validation(outcome) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(outcome.errors().len(), 2);
        // Declared order: model before value
        assert_eq!(outcome.first_invalid(), Some(FormField::VehicleModel));
        assert_eq!(manager.step(), FormStep::Step2);
    }

    #[tokio::test]
    async fn chosen_tier_is_honoured() {
        let mut manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        fill_step1(&mut manager).await;
        manager.advance().await.unwrap();
        fill_step2(&mut manager).await;
        manager.edit_field(FormField::CoverageTier, "premium").await;

        let request = manager.submit().await.unwrap();
        assert_eq!(request.coverage_tier, CoverageTier::Premium);
    }
}

mod preview_integration_tests {
    use super::*;
    use domain_quote::QuoteService;

    #[tokio::test]
    async fn draft_feeds_the_quick_preview() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = FormLifecycleManager::start(store.clone()).await;
        let service = QuoteService::new(store);

        // Nothing priceable yet
        assert!(service.quick_preview(&manager.draft()).unwrap().is_none());

        manager.edit_field(FormField::VehicleValue, "50000").await;
        let breakdown = service.quick_preview(&manager.draft()).unwrap().unwrap();
        // Defaults: standard tier, current year, personal usage
        assert_eq!(breakdown.base_premium_annual, zmw(dec!(2100.00)));
    }

    #[tokio::test]
    async fn unparseable_numbers_stay_absent_from_the_draft() {
        let mut manager = FormLifecycleManager::start(Arc::new(MemoryStore::new())).await;
        manager.edit_field(FormField::VehicleValue, "fifty grand").await;
        assert!(manager.draft().vehicle_value.is_none());
    }
}

mod validation_unit_hook {
    use super::*;

    // The step-2 rules are unit-tested in the crate; this exercises the
    // same entry point integration tests rely on.
    #[tokio::test]
    async fn direct_step2_validation_matches_manager_behavior() {
        let mut fields = FormFields::default();
        fields.set(FormField::VehicleMake, "Toyota");
        let outcome = validate_step2(&fields, current_year());
        assert_eq!(outcome.first_invalid(), Some(FormField::VehicleModel));
    }
}
