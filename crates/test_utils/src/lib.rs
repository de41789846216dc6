//! Test Utilities Crate
//!
//! Shared test infrastructure for the motor quoting core:
//!
//! - `store`: in-memory and failing fakes for the persistence port
//! - `ids`: deterministic identifier source
//! - `fixtures`: common money and date fixtures
//! - `logging`: once-only tracing subscriber init for tests

pub mod fixtures;
pub mod ids;
pub mod logging;
pub mod store;

pub use fixtures::*;
pub use ids::SequentialIdSource;
pub use logging::init_test_logging;
pub use store::{FailingStore, MemoryStore};
