mod common;

use anyhow::Result;
use common::{SampleLedger, parse_date, record, test_config, test_service};
use kharcha::application::{AppError, LedgerService, NewTransaction};
use kharcha::domain::{Transaction, TransactionType};
use kharcha::storage::{BlobStore, Repository};
use tempfile::TempDir;

fn ids(service: &LedgerService) -> Vec<String> {
    service
        .ledger()
        .transactions()
        .iter()
        .map(|t| t.id.clone())
        .collect()
}

#[tokio::test]
async fn test_fresh_database_starts_empty() -> Result<()> {
    let (service, _temp) = test_service().await?;
    assert!(service.ledger().is_empty());
    assert_eq!(service.key(), "expense_tracker_v1");
    Ok(())
}

#[tokio::test]
async fn test_record_assigns_unique_ids() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    SampleLedger::quarter(&mut service).await?;

    let mut all = ids(&service);
    assert_eq!(all.len(), 9);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 9, "every transaction must get its own id");
    Ok(())
}

#[tokio::test]
async fn test_ledger_survives_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(&temp_dir);

    let recorded = {
        let mut service = LedgerService::open(&config).await?;
        let txn = service
            .record(
                NewTransaction::new(TransactionType::Expense, 25000, "Food")
                    .on(parse_date("2024-01-10"))
                    .with_note("Dinner, \"fancy\""),
            )
            .await?;
        service.store().close().await;
        txn
    };

    let reopened = LedgerService::open(&config).await?;
    assert_eq!(reopened.ledger().transactions(), &[recorded]);
    Ok(())
}

#[tokio::test]
async fn test_remove_leaves_others_in_order() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    SampleLedger::quarter(&mut service).await?;

    let before = ids(&service);
    let victim = before[4].clone();

    assert!(service.remove(&victim).await?);

    let expected: Vec<String> = before.iter().filter(|id| **id != victim).cloned().collect();
    assert_eq!(ids(&service), expected);

    // The removal was persisted
    service.reload().await?;
    assert_eq!(ids(&service), expected);
    Ok(())
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    SampleLedger::salary_and_food(&mut service).await?;
    let before = service.ledger().clone();

    assert!(!service.remove("t_does_not_exist").await?);
    assert_eq!(service.ledger(), &before);

    // Removing twice is fine
    let id = before.transactions()[0].id.clone();
    assert!(service.remove(&id).await?);
    assert!(!service.remove(&id).await?);
    Ok(())
}

#[tokio::test]
async fn test_clear_empties_ledger_and_store() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    SampleLedger::quarter(&mut service).await?;

    assert_eq!(service.clear().await?, 9);
    assert!(service.ledger().is_empty());

    service.reload().await?;
    assert!(service.ledger().is_empty());

    // Clearing an already-empty ledger still succeeds
    assert_eq!(service.clear().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_amount_changes_nothing() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    SampleLedger::salary_and_food(&mut service).await?;

    let result = service
        .record(NewTransaction::new(TransactionType::Expense, -100, "Food"))
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    service.reload().await?;
    assert_eq!(service.ledger().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_blob_resets_silently() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(&temp_dir);

    let repo = Repository::open(&config.database).await?;
    repo.write(&config.store_key, "{ this is not a ledger").await?;
    repo.close().await;

    let mut service = LedgerService::open(&config).await?;
    assert!(service.ledger().is_empty());

    // The next mutation overwrites the corrupt blob
    record(&mut service, TransactionType::Income, 500, "Gift", "2024-06-01").await?;
    let blob = service.store().read(&config.store_key).await?.unwrap();
    let stored: Vec<Transaction> = serde_json::from_str(&blob)?;
    assert_eq!(stored.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_separate_keys_are_isolated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(&temp_dir);

    let mut personal = LedgerService::open(&config).await?;
    SampleLedger::salary_and_food(&mut personal).await?;

    let household = LedgerService::open(&config.clone().with_store_key("household")).await?;
    assert!(household.ledger().is_empty());
    assert_eq!(personal.ledger().len(), 2);
    Ok(())
}
