mod common;

use anyhow::Result;
use common::{test_service, TripGroup};
use splitpot::domain::Cents;

#[tokio::test]
async fn test_no_expenses_means_zero_balances() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_trio(&service).await?;

    let entries = service.get_balances(TripGroup::NAME).await?;
    assert_eq!(entries.len(), 3);
    for entry in entries {
        assert_eq!(entry.balance, 0);
    }
    Ok(())
}

#[tokio::test]
async fn test_single_payer_split_two_ways() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_pair(&service).await?;

    // Alice pays 100.00, split evenly: Alice +50.00, Bob -50.00
    service
        .add_expense(TripGroup::NAME, "Hotel".into(), 10000, "Alice")
        .await?;

    let entries = service.get_balances(TripGroup::NAME).await?;
    assert_eq!(balance_of(&entries, "Alice"), 5000);
    assert_eq!(balance_of(&entries, "Bob"), -5000);
    Ok(())
}

#[tokio::test]
async fn test_two_payers_split_three_ways() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_trio(&service).await?;

    // total = 150.00, share = 50.00
    service
        .add_expense(TripGroup::NAME, "Dinner".into(), 9000, "Alice")
        .await?;
    service
        .add_expense(TripGroup::NAME, "Drinks".into(), 6000, "Bob")
        .await?;

    let entries = service.get_balances(TripGroup::NAME).await?;
    assert_eq!(balance_of(&entries, "Alice"), 4000);
    assert_eq!(balance_of(&entries, "Bob"), 1000);
    assert_eq!(balance_of(&entries, "Carol"), -5000);
    Ok(())
}

#[tokio::test]
async fn test_balances_sum_to_zero() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_trio(&service).await?;

    // Deliberately awkward amounts that do not divide by three
    for (payer, amount) in [("Alice", 3334), ("Bob", 101), ("Carol", 9999), ("Alice", 7)] {
        service
            .add_expense(TripGroup::NAME, "misc".into(), amount, payer)
            .await?;
    }

    let entries = service.get_balances(TripGroup::NAME).await?;
    let total: Cents = entries.iter().map(|e| e.balance).sum();
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn test_balances_recomputed_after_each_change() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_pair(&service).await?;

    service
        .add_expense(TripGroup::NAME, "Lunch".into(), 2000, "Alice")
        .await?;
    let entries = service.get_balances(TripGroup::NAME).await?;
    assert_eq!(balance_of(&entries, "Alice"), 1000);

    // A new member dilutes the share on the next computation
    service.add_member(TripGroup::NAME, "Carol".into()).await?;
    let entries = service.get_balances(TripGroup::NAME).await?;
    assert_eq!(balance_of(&entries, "Alice"), 2000 - 667);
    assert_eq!(balance_of(&entries, "Bob"), -667);
    assert_eq!(balance_of(&entries, "Carol"), -666);

    // Asking twice yields the same answer
    let again = service.get_balances(TripGroup::NAME).await?;
    for (a, b) in entries.iter().zip(again.iter()) {
        assert_eq!(a.member.id, b.member.id);
        assert_eq!(a.balance, b.balance);
    }
    Ok(())
}

#[tokio::test]
async fn test_group_summary() -> Result<()> {
    let (service, _temp) = test_service().await?;
    TripGroup::create_pair(&service).await?;

    service
        .add_expense(TripGroup::NAME, "Hotel".into(), 10000, "Alice")
        .await?;
    service
        .add_expense(TripGroup::NAME, "Taxi".into(), 1500, "Bob")
        .await?;

    let summary = service.group_summary(TripGroup::NAME).await?;
    assert_eq!(summary.group.name, TripGroup::NAME);
    assert_eq!(summary.members.len(), 2);
    assert_eq!(summary.expense_count, 2);
    assert_eq!(summary.total_cents, 11500);

    let total: Cents = summary.balances.iter().map(|e| e.balance).sum();
    assert_eq!(total, 0);
    Ok(())
}

fn balance_of(entries: &[splitpot::application::BalanceEntry], name: &str) -> Cents {
    entries
        .iter()
        .find(|e| e.member.display_name == name)
        .map(|e| e.balance)
        .unwrap_or_else(|| panic!("no balance entry for {}", name))
}
