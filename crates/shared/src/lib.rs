//! Shared types for Tradeledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Amount tolerance helpers for epsilon comparisons

pub mod types;

pub use types::{ArchiveEntryId, EntityId, LedgerEntryId, PlannerEntryId, VoucherId};
pub use types::{tolerance, within_tolerance};
