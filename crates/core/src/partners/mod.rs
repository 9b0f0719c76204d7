//! Customer/supplier partners and balance classification.

pub mod classify;
pub mod types;

pub use classify::{PartnerClassification, PartnerRole, classify, live_balance};
pub use types::{Partner, PartnerType};
