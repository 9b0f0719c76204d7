//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{tolerance, within_tolerance};
pub use id::*;
