//! Indexed, versioned ledger snapshot.
//!
//! The store is the leaf dependency for every derivation in this crate. It
//! pre-indexes entries by account/partner id, by voucher and by date so that
//! balance and report queries stay O(hits) instead of O(entries) per account;
//! naive scans across accounts x entries are disallowed at production scale.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tradeledger_shared::{EntityId, VoucherId};

use super::error::LedgerError;
use super::types::LedgerEntry;
use super::validation::validate_entry;

/// Append-only collection of ledger entries with read indexes.
///
/// The `version` increases on every append and is the memoization
/// invalidation key for everything derived from this snapshot.
#[derive(Debug, Default)]
pub struct LedgerStore {
    entries: Vec<LedgerEntry>,
    by_entity: HashMap<EntityId, Vec<usize>>,
    by_voucher: HashMap<VoucherId, Vec<usize>>,
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
    version: u64,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from upstream records, validating each structurally.
    ///
    /// # Errors
    ///
    /// Returns the first [`LedgerError`] found; structurally invalid input is
    /// a hard failure, not a diagnostic.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Result<Self, LedgerError> {
        let mut store = Self::new();
        for entry in entries {
            store.append(entry)?;
        }
        Ok(store)
    }

    /// Appends a single entry, updating all indexes.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the entry is structurally invalid.
    pub fn append(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        validate_entry(&entry)?;

        let idx = self.entries.len();
        self.by_entity
            .entry(entry.entity_id.clone())
            .or_default()
            .push(idx);
        self.by_voucher
            .entry(entry.voucher_id.clone())
            .or_default()
            .push(idx);
        self.by_date.entry(entry.date).or_default().push(idx);
        self.entries.push(entry);
        self.version += 1;
        Ok(())
    }

    /// Snapshot version; bumped on every write.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of entries in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order, including reporting-only rows.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// All entries for one account/partner, including reporting-only rows.
    ///
    /// Display/audit queries use this directly; financial totals must filter
    /// with [`LedgerEntry::counts_in_financials`] or use
    /// [`Self::financial_entries_for_account`].
    #[must_use]
    pub fn entries_for_account(&self, entity_id: &EntityId) -> Vec<&LedgerEntry> {
        self.by_entity
            .get(entity_id)
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Entries for one account/partner that count toward financial totals.
    #[must_use]
    pub fn financial_entries_for_account(&self, entity_id: &EntityId) -> Vec<&LedgerEntry> {
        self.by_entity
            .get(entity_id)
            .map(|ids| {
                ids.iter()
                    .map(|&i| &self.entries[i])
                    .filter(|e| e.counts_in_financials())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All entries of one voucher, including reporting-only rows.
    #[must_use]
    pub fn entries_for_voucher(&self, voucher_id: &VoucherId) -> Vec<&LedgerEntry> {
        self.by_voucher
            .get(voucher_id)
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// All entries with transaction date in `[start, end]` (inclusive).
    #[must_use]
    pub fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&LedgerEntry> {
        self.by_date
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter().map(|&i| &self.entries[i]))
            .collect()
    }

    /// All entries with the given transaction date.
    #[must_use]
    pub fn entries_on(&self, date: NaiveDate) -> Vec<&LedgerEntry> {
        self.by_date
            .get(&date)
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Iterates over every voucher id present in the snapshot.
    pub fn voucher_ids(&self) -> impl Iterator<Item = &VoucherId> {
        self.by_voucher.keys()
    }

    /// Iterates over every account/partner id referenced by the snapshot.
    pub fn entity_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.by_entity.keys()
    }
}
