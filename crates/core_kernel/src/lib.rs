//! Core Kernel - Foundational types and utilities for the motor quoting core
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for quotes and payments
//! - Ports for persistence and identifier generation

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{QuoteId, ReceiptId, TransactionId};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{IdSource, PersistencePort, PortError, RandomIdSource};
