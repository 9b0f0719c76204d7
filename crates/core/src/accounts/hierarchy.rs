//! One-level account hierarchy roll-ups.
//!
//! Groups child accounts under their parents and rolls the balances up.
//! Aggregation never changes the grand total, only the grouping: an account
//! whose parent cannot be used (missing, cyclic, or itself a child) is
//! promoted to its own top-level row rather than dropped, because dropping it
//! would break the balance sheet identity even though the underlying
//! transactions were balanced.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::Account;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// A display row produced by hierarchy aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedAccount {
    /// The top-level account.
    pub account: Account,
    /// The account's own resolved balance.
    pub own_balance: Decimal,
    /// Own balance plus the balances of all direct children.
    pub balance: Decimal,
    /// Whether any children rolled into this row.
    pub has_children: bool,
    /// Number of children rolled into this row.
    pub children_count: usize,
}

/// How an account's parent reference resolved within the set.
#[derive(Clone, Copy, PartialEq)]
enum ParentLink {
    None,
    Dangling,
    Resolved(usize),
}

/// Aggregates a flat list of accounts of one type into top-level rows.
///
/// `balance_of` supplies each account's resolved balance (live from the
/// ledger, not the cached field). Dangling parent references and cycles are
/// reported as diagnostics and the affected accounts promoted to top level.
pub fn aggregate<F>(accounts: &[Account], balance_of: F) -> (Vec<AggregatedAccount>, Diagnostics)
where
    F: Fn(&Account) -> Decimal,
{
    let index_of: std::collections::HashMap<&tradeledger_shared::EntityId, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| (&a.id, i))
        .collect();

    let links: Vec<ParentLink> = accounts
        .iter()
        .map(|a| match a.parent() {
            None => ParentLink::None,
            Some(p) => index_of
                .get(p)
                .map_or(ParentLink::Dangling, |&i| ParentLink::Resolved(i)),
        })
        .collect();

    // An account is on a cycle if walking its parent chain returns to it.
    // The walk is bounded by the set size, so accidental cycles cannot loop.
    let on_cycle: Vec<bool> = (0..accounts.len())
        .map(|start| {
            let mut current = start;
            for _ in 0..accounts.len() {
                match links[current] {
                    ParentLink::Resolved(next) => {
                        if next == start {
                            return true;
                        }
                        current = next;
                    }
                    _ => return false,
                }
            }
            false
        })
        .collect();

    // One level deep: an account is a child only if its parent is itself a
    // top-level row; deeper chain members are promoted so no balance is lost.
    let mut top_level = vec![None::<bool>; accounts.len()];
    fn is_top(
        i: usize,
        links: &[ParentLink],
        on_cycle: &[bool],
        memo: &mut Vec<Option<bool>>,
    ) -> bool {
        if let Some(answer) = memo[i] {
            return answer;
        }
        let answer = match links[i] {
            ParentLink::Resolved(p) if !on_cycle[i] => !is_top(p, links, on_cycle, memo),
            _ => true,
        };
        memo[i] = Some(answer);
        answer
    }

    let mut diagnostics = Diagnostics::new();
    for (i, account) in accounts.iter().enumerate() {
        if on_cycle[i] {
            diagnostics.push(Diagnostic::CyclicParentReference {
                account_id: account.id.clone(),
            });
        } else if links[i] == ParentLink::Dangling {
            if let Some(parent_id) = account.parent() {
                diagnostics.push(Diagnostic::DanglingParentReference {
                    account_id: account.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
        }
    }

    let balances: Vec<Decimal> = accounts.iter().map(&balance_of).collect();

    let mut rows = Vec::new();
    for (i, account) in accounts.iter().enumerate() {
        if !is_top(i, &links, &on_cycle, &mut top_level) {
            continue;
        }
        let children: Vec<usize> = (0..accounts.len())
            .filter(|&c| {
                c != i
                    && !on_cycle[c]
                    && links[c] == ParentLink::Resolved(i)
                    && !is_top(c, &links, &on_cycle, &mut top_level)
            })
            .collect();

        let rolled: Decimal = balances[i] + children.iter().map(|&c| balances[c]).sum::<Decimal>();
        rows.push(AggregatedAccount {
            account: account.clone(),
            own_balance: balances[i],
            balance: rolled,
            has_children: !children.is_empty(),
            children_count: children.len(),
        });
    }

    (rows, diagnostics)
}
