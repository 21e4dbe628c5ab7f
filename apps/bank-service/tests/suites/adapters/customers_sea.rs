use bank_service::adapters::customers_sea::{self, CustomerCreate};
use bank_service::db::txn::with_txn;
use bank_service::error::AppError;

use crate::support::build_test_state;

/// Test: create_customer assigns ids and find_by_id/exists see the row
#[tokio::test]
async fn test_create_and_find_customer() -> Result<(), AppError> {
    let state = build_test_state().await;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let first = customers_sea::create_customer(
                txn,
                CustomerCreate {
                    first_name: "Jan".into(),
                    last_name: "Kowalski".into(),
                },
            )
            .await?;
            let second = customers_sea::create_customer(
                txn,
                CustomerCreate {
                    first_name: "Anna".into(),
                    last_name: "Nowak".into(),
                },
            )
            .await?;

            assert!(first.id > 0);
            assert!(second.id > first.id);

            let found = customers_sea::find_by_id(txn, first.id).await?.unwrap();
            assert_eq!(found.last_name, "Kowalski");

            assert!(customers_sea::exists(txn, second.id).await?);
            assert!(!customers_sea::exists(txn, second.id + 100).await?);
            assert!(customers_sea::find_by_id(txn, -1).await?.is_none());

            Ok::<_, AppError>(())
        })
    })
    .await
}
