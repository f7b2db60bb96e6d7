use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Cents, Expense, Group, GroupId, Member};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying groups, members and expenses.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Group operations
    // ========================

    /// Save a new group to the database.
    pub async fn save_group(&self, group: &Group) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO groups (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(group.id.to_string())
        .bind(&group.name)
        .bind(group.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save group")?;
        Ok(())
    }

    /// Get a group by name.
    pub async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM groups
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch group by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_group(&row)?)),
            None => Ok(None),
        }
    }

    /// List all groups.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM groups ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list groups")?;

        rows.iter().map(Self::row_to_group).collect()
    }

    fn row_to_group(row: &sqlx::sqlite::SqliteRow) -> Result<Group> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(Group {
            id: Uuid::parse_str(&id_str).context("Invalid group ID")?,
            name: row.get("name"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Member operations
    // ========================

    /// Save a new member to the database.
    pub async fn save_member(&self, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (id, group_id, display_name, joined_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(member.group_id.to_string())
        .bind(&member.display_name)
        .bind(member.joined_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save member")?;
        Ok(())
    }

    /// Get a member of a group by display name.
    pub async fn get_member_by_name(
        &self,
        group_id: GroupId,
        display_name: &str,
    ) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, group_id, display_name, joined_at
            FROM members
            WHERE group_id = ? AND display_name = ?
            "#,
        )
        .bind(group_id.to_string())
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch member by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_member(&row)?)),
            None => Ok(None),
        }
    }

    /// List the members of a group in join order.
    pub async fn list_members(&self, group_id: GroupId) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, display_name, joined_at
            FROM members
            WHERE group_id = ?
            ORDER BY joined_at, id
            "#,
        )
        .bind(group_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list members")?;

        rows.iter().map(Self::row_to_member).collect()
    }

    fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<Member> {
        let id_str: String = row.get("id");
        let group_id_str: String = row.get("group_id");
        let joined_at_str: String = row.get("joined_at");

        Ok(Member {
            id: Uuid::parse_str(&id_str).context("Invalid member ID")?,
            group_id: Uuid::parse_str(&group_id_str).context("Invalid group ID")?,
            display_name: row.get("display_name"),
            joined_at: DateTime::parse_from_rfc3339(&joined_at_str)
                .context("Invalid joined_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense to the database.
    pub async fn save_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, group_id, description, amount_cents, paid_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.to_string())
        .bind(expense.group_id.to_string())
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(expense.paid_by.to_string())
        .bind(expense.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;
        Ok(())
    }

    /// List the expenses of a group in recorded order.
    pub async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, description, amount_cents, paid_by, created_at
            FROM expenses
            WHERE group_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(group_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Total spending of a group, computed with SQL aggregation.
    pub async fn sum_expenses(&self, group_id: GroupId) -> Result<Cents> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0) as total
            FROM expenses
            WHERE group_id = ?
            "#,
        )
        .bind(group_id.to_string())
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum expenses")?;

        Ok(row.get("total"))
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let id_str: String = row.get("id");
        let group_id_str: String = row.get("group_id");
        let paid_by_str: String = row.get("paid_by");
        let created_at_str: String = row.get("created_at");

        Ok(Expense {
            id: Uuid::parse_str(&id_str).context("Invalid expense ID")?,
            group_id: Uuid::parse_str(&group_id_str).context("Invalid group ID")?,
            description: row.get("description"),
            amount_cents: row.get("amount_cents"),
            paid_by: Uuid::parse_str(&paid_by_str).context("Invalid paid_by ID")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
