//! RocksDB engine: data written through the gateway survives a reopen.

use roster_core::db;
use roster_core::StoreService;
use shared::models::StoreCreate;

#[tokio::test(flavor = "multi_thread")]
async fn store_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap().to_string();

    let id = {
        let gateway = db::connect_rocksdb(&path).await.unwrap();
        let store = StoreService::new(gateway.clone())
            .create(StoreCreate {
                name: "Mitte".into(),
                street: "Main St 1".into(),
                postal_code: "10115".into(),
                city: "Berlin".into(),
                organization_id: "org-1".into(),
            })
            .await
            .unwrap();
        store.id
    };

    let reopened = db::connect_rocksdb(&path).await.unwrap();
    let found = StoreService::new(reopened)
        .find(&id)
        .await
        .unwrap()
        .expect("store persisted");
    assert_eq!(found.name, "Mitte");
}
