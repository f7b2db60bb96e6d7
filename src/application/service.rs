use crate::domain::{compute_balances, Cents, Expense, Group, Member};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations over groups and
/// their expenses. This is the primary interface for any client (CLI,
/// export, tests); the repository is injected so tests can point it at a
/// throwaway database.
pub struct GroupService {
    repo: Repository,
}

/// Signed balance of one member against the even split
pub struct BalanceEntry {
    pub member: Member,
    pub balance: Cents,
}

/// Everything the group detail view needs in one call
pub struct GroupSummary {
    pub group: Group,
    pub members: Vec<Member>,
    pub expense_count: usize,
    pub total_cents: Cents,
    pub balances: Vec<BalanceEntry>,
}

impl GroupService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Group operations
    // ========================

    /// Create a new group.
    pub async fn create_group(&self, name: String) -> Result<Group, AppError> {
        if self.repo.get_group_by_name(&name).await?.is_some() {
            return Err(AppError::GroupAlreadyExists(name));
        }

        let group = Group::new(name);
        self.repo.save_group(&group).await?;
        Ok(group)
    }

    /// Get a group by name.
    pub async fn get_group(&self, name: &str) -> Result<Group, AppError> {
        self.repo
            .get_group_by_name(name)
            .await?
            .ok_or_else(|| AppError::GroupNotFound(name.to_string()))
    }

    /// List all groups.
    pub async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        Ok(self.repo.list_groups().await?)
    }

    // ========================
    // Member operations
    // ========================

    /// Add a member to a group.
    pub async fn add_member(
        &self,
        group_name: &str,
        display_name: String,
    ) -> Result<Member, AppError> {
        let group = self.get_group(group_name).await?;

        if self
            .repo
            .get_member_by_name(group.id, &display_name)
            .await?
            .is_some()
        {
            return Err(AppError::MemberAlreadyExists {
                group: group_name.to_string(),
                member: display_name,
            });
        }

        let member = Member::new(group.id, display_name);
        self.repo.save_member(&member).await?;
        Ok(member)
    }

    /// List the members of a group, in join order.
    pub async fn list_members(&self, group_name: &str) -> Result<Vec<Member>, AppError> {
        let group = self.get_group(group_name).await?;
        Ok(self.repo.list_members(group.id).await?)
    }

    /// Resolve a member of a group by display name.
    pub async fn get_member(
        &self,
        group_name: &str,
        display_name: &str,
    ) -> Result<Member, AppError> {
        let group = self.get_group(group_name).await?;
        self.repo
            .get_member_by_name(group.id, display_name)
            .await?
            .ok_or_else(|| AppError::MemberNotFound {
                group: group_name.to_string(),
                member: display_name.to_string(),
            })
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense paid by a member of the group.
    ///
    /// The payer must belong to the group: a stored expense with an
    /// unattributable payer would silently break the zero-sum property of
    /// the balances, so it is rejected here rather than tolerated at
    /// computation time. The expense is returned only once the store has
    /// confirmed the write; nothing is appended optimistically.
    pub async fn add_expense(
        &self,
        group_name: &str,
        description: String,
        amount_cents: Cents,
        paid_by_name: &str,
    ) -> Result<Expense, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let group = self.get_group(group_name).await?;

        let payer = self
            .repo
            .get_member_by_name(group.id, paid_by_name)
            .await?
            .ok_or_else(|| AppError::UnknownPayer {
                group: group_name.to_string(),
                member: paid_by_name.to_string(),
            })?;

        let expense = Expense::new(group.id, description, amount_cents, payer.id);
        self.repo.save_expense(&expense).await?;
        Ok(expense)
    }

    /// List the expenses of a group in recorded order (the transaction
    /// history).
    pub async fn list_expenses(&self, group_name: &str) -> Result<Vec<Expense>, AppError> {
        let group = self.get_group(group_name).await?;
        Ok(self.repo.list_expenses(group.id).await?)
    }

    // ========================
    // Balances
    // ========================

    /// Compute the current per-member balances of a group.
    pub async fn get_balances(&self, group_name: &str) -> Result<Vec<BalanceEntry>, AppError> {
        let group = self.get_group(group_name).await?;
        let members = self.repo.list_members(group.id).await?;
        let expenses = self.repo.list_expenses(group.id).await?;

        Ok(balance_entries(members, &expenses))
    }

    /// Full summary of a group: members, spending totals and balances.
    pub async fn group_summary(&self, group_name: &str) -> Result<GroupSummary, AppError> {
        let group = self.get_group(group_name).await?;
        let members = self.repo.list_members(group.id).await?;
        let expenses = self.repo.list_expenses(group.id).await?;
        let total_cents = self.repo.sum_expenses(group.id).await?;

        let expense_count = expenses.len();
        let balances = balance_entries(members.clone(), &expenses);

        Ok(GroupSummary {
            group,
            members,
            expense_count,
            total_cents,
            balances,
        })
    }
}

/// Pair each member with their computed balance, keeping join order.
fn balance_entries(members: Vec<Member>, expenses: &[Expense]) -> Vec<BalanceEntry> {
    let balances = compute_balances(&members, expenses);
    members
        .into_iter()
        .map(|member| {
            let balance = balances.get(&member.id).copied().unwrap_or(0);
            BalanceEntry { member, balance }
        })
        .collect()
}
