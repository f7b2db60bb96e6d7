use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{BalanceEntry, GroupService};
use crate::domain::{format_cents, parse_cents};

/// Currency symbol used for display only; amounts are stored as plain cents.
const CURRENCY_SYMBOL: &str = "₹";

/// Splitpot - Group Expense Splitting Ledger
#[derive(Parser)]
#[command(name = "splitpot")]
#[command(about = "A local-first tool for splitting group expenses evenly")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "splitpot.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Group management commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Record an expense paid by a group member
    Expense {
        /// Group name
        group: String,

        /// Amount paid (e.g., "50.00" or "50")
        amount: String,

        /// Member who paid
        #[arg(long)]
        paid_by: String,

        /// What the money was spent on
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// Show per-member balances for a group
    Balance {
        /// Group name
        group: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show the expense history of a group
    History {
        /// Group name
        group: String,

        /// Maximum number of expenses to show (most recent last)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, balances, full
        export_type: String,

        /// Group name (required for expenses and balances)
        #[arg(short, long)]
        group: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Create {
        /// Group name (must be unique)
        name: String,
    },

    /// List all groups
    List,

    /// Show group summary: members, spending total and balances
    Show {
        /// Group name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to a group
    Add {
        /// Group name
        group: String,

        /// Member display name (unique within the group)
        name: String,
    },

    /// List the members of a group
    List {
        /// Group name
        group: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.verbose {
            eprintln!("[splitpot] database: {}", self.database);
        }

        match self.command {
            Commands::Init => {
                GroupService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Group(group_cmd) => {
                let service = GroupService::connect(&self.database).await?;
                run_group_command(&service, group_cmd).await?;
            }

            Commands::Member(member_cmd) => {
                let service = GroupService::connect(&self.database).await?;
                run_member_command(&service, member_cmd).await?;
            }

            Commands::Expense {
                group,
                amount,
                paid_by,
                description,
            } => {
                let service = GroupService::connect(&self.database).await?;
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

                if self.verbose {
                    eprintln!(
                        "[splitpot] parsed '{}' as {} cents, payer '{}'",
                        amount, amount_cents, paid_by
                    );
                }

                let expense = service
                    .add_expense(&group, description, amount_cents, &paid_by)
                    .await?;

                println!(
                    "Recorded expense: {}{} paid by {} ({})",
                    CURRENCY_SYMBOL,
                    format_cents(expense.amount_cents),
                    paid_by,
                    expense.id
                );
            }

            Commands::Balance { group, format } => {
                let service = GroupService::connect(&self.database).await?;
                if self.verbose {
                    eprintln!("[splitpot] computing balances for group '{}'", group);
                }
                run_balance_command(&service, &group, &format).await?;
            }

            Commands::History { group, limit } => {
                let service = GroupService::connect(&self.database).await?;
                if self.verbose {
                    eprintln!("[splitpot] loading history for group '{}'", group);
                }
                run_history_command(&service, &group, limit).await?;
            }

            Commands::Export {
                export_type,
                group,
                output,
            } => {
                let service = GroupService::connect(&self.database).await?;
                run_export_command(&service, &export_type, group.as_deref(), output.as_deref())
                    .await?;
            }
        }

        Ok(())
    }
}

async fn run_group_command(service: &GroupService, cmd: GroupCommands) -> Result<()> {
    match cmd {
        GroupCommands::Create { name } => {
            let group = service.create_group(name).await?;
            println!("Created group: {} ({})", group.name, group.id);
        }

        GroupCommands::List => {
            let groups = service.list_groups().await?;
            if groups.is_empty() {
                println!("No groups found.");
            } else {
                println!("{:<24} {:<12}", "NAME", "CREATED");
                println!("{}", "-".repeat(36));
                for group in groups {
                    println!(
                        "{:<24} {:<12}",
                        group.name,
                        group.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }

        GroupCommands::Show { name } => {
            let summary = service.group_summary(&name).await?;

            println!("Group: {}", summary.group.name);
            println!(
                "  Created:  {}",
                summary.group.created_at.format("%Y-%m-%d %H:%M:%S")
            );
            println!("  Members:  {}", summary.members.len());
            println!("  Expenses: {}", summary.expense_count);
            println!(
                "  Total:    {}{}",
                CURRENCY_SYMBOL,
                format_cents(summary.total_cents)
            );
            println!();
            println!("Balances:");
            for entry in &summary.balances {
                println!("  {}", render_balance(entry));
            }
        }
    }
    Ok(())
}

async fn run_member_command(service: &GroupService, cmd: MemberCommands) -> Result<()> {
    match cmd {
        MemberCommands::Add { group, name } => {
            let member = service.add_member(&group, name).await?;
            println!("Added member: {} ({})", member.display_name, member.id);
        }

        MemberCommands::List { group } => {
            let members = service.list_members(&group).await?;
            if members.is_empty() {
                println!("No members in group '{}'.", group);
            } else {
                println!("{:<24} {:<12}", "NAME", "JOINED");
                println!("{}", "-".repeat(36));
                for member in members {
                    println!(
                        "{:<24} {:<12}",
                        member.display_name,
                        member.joined_at.format("%Y-%m-%d")
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_balance_command(service: &GroupService, group: &str, format: &str) -> Result<()> {
    let entries = service.get_balances(group).await?;

    match format {
        "json" => {
            let values: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "member": entry.member.display_name,
                        "balance_cents": entry.balance,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        "table" => {
            if entries.is_empty() {
                println!("No members in group '{}'.", group);
            } else {
                for entry in &entries {
                    println!("{}", render_balance(entry));
                }
            }
        }
        other => anyhow::bail!("Unknown format '{}'. Use 'table' or 'json'", other),
    }
    Ok(())
}

async fn run_history_command(
    service: &GroupService,
    group: &str,
    limit: Option<usize>,
) -> Result<()> {
    let mut expenses = service.list_expenses(group).await?;
    let members = service.list_members(group).await?;

    if let Some(limit) = limit {
        let skip = expenses.len().saturating_sub(limit);
        expenses.drain(..skip);
    }

    if expenses.is_empty() {
        println!("No expenses in group '{}'.", group);
        return Ok(());
    }

    println!(
        "{:<20} {:<24} {:<16} {:>12}",
        "DATE", "DESCRIPTION", "PAID BY", "AMOUNT"
    );
    println!("{}", "-".repeat(74));
    for expense in &expenses {
        let payer = members
            .iter()
            .find(|m| m.id == expense.paid_by)
            .map(|m| m.display_name.as_str())
            .unwrap_or("(unknown)");

        println!(
            "{:<20} {:<24} {:<16} {:>12}",
            expense.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expense.description,
            payer,
            format!("{}{}", CURRENCY_SYMBOL, format_cents(expense.amount_cents))
        );
    }
    Ok(())
}

async fn run_export_command(
    service: &GroupService,
    export_type: &str,
    group: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let group = group.context("--group is required when exporting expenses")?;
            let count = exporter.export_expenses_csv(group, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "balances" => {
            let group = group.context("--group is required when exporting balances")?;
            let count = exporter.export_balances_csv(group, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} balances", count);
            }
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer).await?;
            if output.is_some() {
                eprintln!("Exported full database: {} groups", snapshot.groups.len());
            }
        }
        other => anyhow::bail!(
            "Unknown export type '{}'. Use 'expenses', 'balances' or 'full'",
            other
        ),
    }
    Ok(())
}

/// One balance line in the group view: who receives, who owes.
fn render_balance(entry: &BalanceEntry) -> String {
    let name = &entry.member.display_name;
    if entry.balance >= 0 {
        format!(
            "{}: receives {}{}",
            name,
            CURRENCY_SYMBOL,
            format_cents(entry.balance)
        )
    } else {
        format!(
            "{}: owes {}{}",
            name,
            CURRENCY_SYMBOL,
            format_cents(-entry.balance)
        )
    }
}
