use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, GroupId, MemberId};

pub type ExpenseId = Uuid;

/// A single payment made by one member on behalf of the whole group.
/// Expenses are append-only and immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    /// What the money was spent on
    pub description: String,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    /// The member who fronted the money
    pub paid_by: MemberId,
    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense. Amount validation against user input happens
    /// at the service boundary; this constructor enforces the invariant.
    pub fn new(
        group_id: GroupId,
        description: String,
        amount_cents: Cents,
        paid_by: MemberId,
    ) -> Self {
        assert!(amount_cents > 0, "Expense amount must be positive");
        Self {
            id: Uuid::new_v4(),
            group_id,
            description,
            amount_cents,
            paid_by,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense() {
        let group_id = Uuid::new_v4();
        let payer = Uuid::new_v4();
        let expense = Expense::new(group_id, "Dinner".into(), 4500, payer);

        assert_eq!(expense.amount_cents, 4500);
        assert_eq!(expense.paid_by, payer);
        assert_eq!(expense.group_id, group_id);
        assert_eq!(expense.description, "Dinner");
    }

    #[test]
    #[should_panic(expected = "Expense amount must be positive")]
    fn test_expense_requires_positive_amount() {
        Expense::new(Uuid::new_v4(), "Free lunch".into(), 0, Uuid::new_v4());
    }
}
