use anyhow::Result;
use splitpot::cli::{Cli, Commands, GroupCommands, MemberCommands};
use tempfile::TempDir;

fn cli(database: &str, command: Commands) -> Cli {
    Cli {
        database: database.into(),
        verbose: true,
        command,
    }
}

#[tokio::test]
async fn test_cli_round_trip_with_verbose_output() -> Result<()> {
    let temp = TempDir::new()?;
    let db_path = temp.path().join("cli.db");
    let db = db_path.to_str().unwrap();

    cli(db, Commands::Init).run().await?;
    cli(db, Commands::Group(GroupCommands::Create { name: "Trip".into() }))
        .run()
        .await?;
    cli(
        db,
        Commands::Member(MemberCommands::Add {
            group: "Trip".into(),
            name: "Alice".into(),
        }),
    )
    .run()
    .await?;
    cli(
        db,
        Commands::Member(MemberCommands::Add {
            group: "Trip".into(),
            name: "Bob".into(),
        }),
    )
    .run()
    .await?;

    cli(
        db,
        Commands::Expense {
            group: "Trip".into(),
            amount: "100.00".into(),
            paid_by: "Alice".into(),
            description: "Hotel".into(),
        },
    )
    .run()
    .await?;

    // Every verbose-gated path runs cleanly
    cli(
        db,
        Commands::Group(GroupCommands::Show { name: "Trip".into() }),
    )
    .run()
    .await?;
    cli(
        db,
        Commands::Balance {
            group: "Trip".into(),
            format: "json".into(),
        },
    )
    .run()
    .await?;
    cli(
        db,
        Commands::History {
            group: "Trip".into(),
            limit: Some(1),
        },
    )
    .run()
    .await?;

    // Export through the CLI lands the three-column balances CSV on disk
    let out_path = temp.path().join("balances.csv");
    cli(
        db,
        Commands::Export {
            export_type: "balances".into(),
            group: Some("Trip".into()),
            output: Some(out_path.to_str().unwrap().into()),
        },
    )
    .run()
    .await?;

    let csv = std::fs::read_to_string(&out_path)?;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "member,paid_cents,balance_cents");
    assert_eq!(lines[1], "Alice,10000,5000");
    assert_eq!(lines[2], "Bob,0,-5000");
    Ok(())
}

#[tokio::test]
async fn test_cli_rejects_malformed_amount() -> Result<()> {
    let temp = TempDir::new()?;
    let db_path = temp.path().join("cli.db");
    let db = db_path.to_str().unwrap();

    cli(db, Commands::Init).run().await?;
    cli(db, Commands::Group(GroupCommands::Create { name: "Trip".into() }))
        .run()
        .await?;
    cli(
        db,
        Commands::Member(MemberCommands::Add {
            group: "Trip".into(),
            name: "Alice".into(),
        }),
    )
    .run()
    .await?;

    let result = cli(
        db,
        Commands::Expense {
            group: "Trip".into(),
            amount: "12.345".into(),
            paid_by: "Alice".into(),
            description: "Fuel".into(),
        },
    )
    .run()
    .await;

    assert!(result.is_err());
    Ok(())
}
