use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

use crate::application::GroupService;
use crate::domain::{Cents, Expense, Group, Member, MemberId};

/// Snapshot of one group with everything that belongs to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub group: Group,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

/// Database snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub groups: Vec<GroupSnapshot>,
}

/// Exporter for converting group data to CSV or JSON
pub struct Exporter<'a> {
    service: &'a GroupService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a GroupService) -> Self {
        Self { service }
    }

    /// Export a group's expense history to CSV format
    pub async fn export_expenses_csv<W: Write>(&self, group_name: &str, writer: W) -> Result<usize> {
        let members = self.service.list_members(group_name).await?;
        let expenses = self.service.list_expenses(group_name).await?;
        let names = display_names(&members);

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "created_at", "description", "paid_by", "amount_cents"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.created_at.to_rfc3339(),
                expense.description.clone(),
                names
                    .get(&expense.paid_by)
                    .cloned()
                    .unwrap_or_else(|| expense.paid_by.to_string()),
                expense.amount_cents.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export a group's per-member balances to CSV format: what each
    /// member paid in total, and their balance against the even split.
    pub async fn export_balances_csv<W: Write>(&self, group_name: &str, writer: W) -> Result<usize> {
        let entries = self.service.get_balances(group_name).await?;
        let expenses = self.service.list_expenses(group_name).await?;

        let mut paid: HashMap<MemberId, Cents> = HashMap::new();
        for expense in &expenses {
            *paid.entry(expense.paid_by).or_insert(0) += expense.amount_cents;
        }

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["member", "paid_cents", "balance_cents"])?;

        let mut count = 0;
        for entry in &entries {
            csv_writer.write_record([
                entry.member.display_name.clone(),
                paid.get(&entry.member.id).copied().unwrap_or(0).to_string(),
                entry.balance.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export every group as a versioned JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<DatabaseSnapshot> {
        let mut groups = Vec::new();
        for group in self.service.list_groups().await? {
            let members = self.service.list_members(&group.name).await?;
            let expenses = self.service.list_expenses(&group.name).await?;
            groups.push(GroupSnapshot {
                group,
                members,
                expenses,
            });
        }

        let snapshot = DatabaseSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            groups,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

fn display_names(members: &[Member]) -> HashMap<MemberId, String> {
    members
        .iter()
        .map(|m| (m.id, m.display_name.clone()))
        .collect()
}
