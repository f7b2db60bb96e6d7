use std::collections::HashMap;

use super::{Cents, Expense, Member, MemberId};

/// Split a total evenly across `count` participants, in integer cents.
/// The remainder is spread one cent at a time over the first participants,
/// so the shares always sum to the total exactly.
pub fn even_shares(total: Cents, count: usize) -> Vec<Cents> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as Cents;
    let base = total / n;
    let remainder = total % n;

    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Compute the signed balance of every member against an even split of
/// total group spending.
///
/// Positive = the member is owed money, negative = the member owes.
/// Balance = what the member paid minus their share of the total. With a
/// valid expense set (every payer is a member) the balances sum to zero
/// exactly; the submission boundary guarantees that property by rejecting
/// payers from outside the group.
///
/// Pure and deterministic: callers re-run it after any change to the
/// member or expense set.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> HashMap<MemberId, Cents> {
    if members.is_empty() {
        // No members means no shares to assign, not a division error.
        return HashMap::new();
    }

    let total: Cents = expenses.iter().map(|e| e.amount_cents).sum();
    let shares = even_shares(total, members.len());

    let mut paid: HashMap<MemberId, Cents> = HashMap::new();
    for expense in expenses {
        *paid.entry(expense.paid_by).or_insert(0) += expense.amount_cents;
    }

    members
        .iter()
        .zip(shares)
        .map(|(member, share)| {
            let paid_by_member = paid.get(&member.id).copied().unwrap_or(0);
            (member.id, paid_by_member - share)
        })
        .collect()
}
