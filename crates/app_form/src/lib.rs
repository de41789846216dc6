//! Form Application Layer
//!
//! Drives the two-step quoting wizard:
//!
//! - [`FormSession`] is the persisted partial state (non-empty fields, step
//!   index, save timestamp) with a 24-hour freshness rule.
//! - [`FormLifecycleManager`] is the step state machine: it restores a fresh
//!   session on entry, persists every field edit write-through, validates
//!   step transitions, and finalizes a [`domain_quote::QuoteRequest`] on
//!   submission.
//! - [`DebounceScheduler`] coalesces bursts of field edits into one
//!   quick-preview invocation after a quiescence window, with a latest-wins
//!   sequence guard.
//!
//! The layer never touches device storage directly; everything goes through
//! the kernel's persistence port, so tests run against an in-memory fake.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use catalog::{find_make, VehicleMake, VEHICLE_MAKES};
pub use error::FormError;
pub use lifecycle::{FormLifecycleManager, FormStep};
pub use scheduler::{DebounceScheduler, PREVIEW_DEBOUNCE, RECALC_DEBOUNCE};
pub use session::{FormField, FormFields, FormSession, SessionStore, FORM_DATA_KEY};
pub use validation::{validate_step1, validate_step2, FieldError, ValidationOutcome};
