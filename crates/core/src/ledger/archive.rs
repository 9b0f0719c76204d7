//! Audit trail of voided or edited vouchers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::{ArchiveEntryId, VoucherId};

use super::types::LedgerEntry;

/// Snapshot of a voided or edited voucher, taken before the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Unique identifier for this snapshot.
    pub id: ArchiveEntryId,
    /// The voucher that was voided or edited.
    pub original_voucher_id: VoucherId,
    /// When the void/edit happened.
    pub deleted_at: DateTime<Utc>,
    /// Stated reason for the change.
    pub reason: String,
    /// Who performed the change.
    pub deleted_by: String,
    /// Total value of the original voucher.
    pub total_value: Decimal,
    /// The full original entry list.
    pub entries: Vec<LedgerEntry>,
}

/// Append-only log of archive snapshots. Never mutated after the fact.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ArchiveLog {
    snapshots: Vec<ArchiveEntry>,
}

impl ArchiveLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot to the log.
    pub fn record(&mut self, snapshot: ArchiveEntry) {
        self.snapshots.push(snapshot);
    }

    /// All snapshots taken for one voucher, in recording order.
    #[must_use]
    pub fn for_voucher(&self, voucher_id: &VoucherId) -> Vec<&ArchiveEntry> {
        self.snapshots
            .iter()
            .filter(|s| &s.original_voucher_id == voucher_id)
            .collect()
    }

    /// Iterates over every snapshot in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.snapshots.iter()
    }

    /// Number of snapshots in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
