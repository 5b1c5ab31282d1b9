//! PostgreSQL account store tests.
//!
//! Run with `TEST_DATABASE_URL` pointing at a disposable database.

use account_service::{
    models::NewAccount,
    services::{AccountStore, PostgresAccountStore, ServiceError},
};
use sqlx::postgres::PgPoolOptions;

async fn store() -> PostgresAccountStore {
    dotenvy::dotenv().ok();
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to Postgres");
    let store = PostgresAccountStore::new(pool);
    store.run_migrations().await.expect("Failed to run migrations");
    store
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn create_get_delete_round_trip() {
    let store = store().await;

    let created = store
        .create_account(&NewAccount::new("Ada", "Lovelace").with_number(4242))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.number, 4242);
    assert_eq!(created.balance, 0);

    let fetched = store.get_account(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.first_name, "Ada");

    store.delete_account(created.id).await.unwrap();
    assert!(matches!(
        store.get_account(created.id).await,
        Err(ServiceError::AccountNotFound(_))
    ));
    assert!(matches!(
        store.delete_account(created.id).await,
        Err(ServiceError::AccountNotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn list_includes_new_accounts_in_id_order() {
    let store = store().await;

    let first = store.create_account(&NewAccount::new("A", "One")).await.unwrap();
    let second = store.create_account(&NewAccount::new("B", "Two")).await.unwrap();

    let ids: Vec<i64> = store
        .list_accounts()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    let first_pos = ids.iter().position(|id| *id == first.id).unwrap();
    let second_pos = ids.iter().position(|id| *id == second.id).unwrap();
    assert!(first_pos < second_pos);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn health_check_succeeds() {
    store().await.health_check().await.unwrap();
}
