//! Optimistic sync: mirror-first mutations, reconcile-by-refetch on failure.

mod common;

use common::{
    mem_gateway, seed_assignment_raw, seed_definition, seed_employee, seed_store, FlakyGateway,
    ORG,
};
use roster_core::{AssignmentService, SyncSession};
use shared::models::AssignmentCreate;
use shared::{AppError, DayKey};

fn input(employee: &str, definition: &str, store: &str, date: &str) -> AssignmentCreate {
    AssignmentCreate {
        employee_id: employee.into(),
        shift_definition_id: definition.into(),
        store_id: store.into(),
        date: date.into(),
        work_hours: Some(8.0),
        organization_id: ORG.into(),
    }
}

#[tokio::test]
async fn successful_create_replaces_the_provisional_entry() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;

    let mut session = SyncSession::new(AssignmentService::new(gateway.clone()), ORG);
    session.refresh().await.unwrap();
    assert!(session.mirror().is_empty());

    let record = session
        .create(input(&anna.id, &definition.id, &store.id, "2024-06-10"))
        .await
        .unwrap();

    assert_eq!(session.mirror().len(), 1);
    assert!(session.mirror().get(&record.id).is_some());
    assert!(session.mirror().get("pending:1").is_none());
}

#[tokio::test]
async fn failed_create_surfaces_the_error_and_refetches() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;
    let existing =
        seed_assignment_raw(&gateway, &anna.id, &definition.id, &store.id, "2024-06-10", 8.0).await;

    let mut session = SyncSession::new(AssignmentService::new(gateway.clone()), ORG);
    session.refresh().await.unwrap();
    assert_eq!(session.mirror().len(), 1);

    // Same employee, same day: the server rejects, the optimistic entry must
    // not survive the refetch
    let result = session
        .create(input(&anna.id, &definition.id, &store.id, "2024-06-10"))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(session.mirror().len(), 1);
    assert!(session.mirror().get(&existing).is_some());
}

#[tokio::test]
async fn failed_move_restores_server_truth() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;
    let monday =
        seed_assignment_raw(&gateway, &anna.id, &definition.id, &store.id, "2024-06-10", 8.0).await;
    seed_assignment_raw(&gateway, &anna.id, &definition.id, &store.id, "2024-06-11", 8.0).await;

    let mut session = SyncSession::new(AssignmentService::new(gateway.clone()), ORG);
    session.refresh().await.unwrap();

    // Dragging Monday's shift onto occupied Tuesday fails server-side; the
    // optimistic date mutation is rolled back by the forced refetch
    let result = session.move_assignment(&monday, "2024-06-11").await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let entry = session.mirror().get(&monday).expect("entry restored");
    assert_eq!(entry.date, DayKey::normalize("2024-06-10").unwrap());
}

#[tokio::test]
async fn successful_move_keeps_mirror_and_server_aligned() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;
    let monday =
        seed_assignment_raw(&gateway, &anna.id, &definition.id, &store.id, "2024-06-10", 8.0).await;

    let mut session = SyncSession::new(AssignmentService::new(gateway.clone()), ORG);
    session.refresh().await.unwrap();

    let moved = session.move_assignment(&monday, "2024-06-14").await.unwrap();
    assert_eq!(moved.date.to_string(), "2024-06-14");
    let mirrored = session.mirror().get(&monday).expect("mirror entry");
    assert_eq!(mirrored.date, moved.date);

    let server = AssignmentService::new(gateway.clone())
        .find(&monday)
        .await
        .unwrap()
        .expect("server record");
    assert_eq!(server.date, moved.date);
}

#[tokio::test]
async fn failed_delete_restores_the_optimistically_removed_entry() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;
    let target =
        seed_assignment_raw(&gateway, &anna.id, &definition.id, &store.id, "2024-06-10", 8.0).await;

    let flaky = FlakyGateway::new(gateway.clone());
    flaky.fail_delete_of(&target);

    let mut session = SyncSession::new(AssignmentService::new(flaky), ORG);
    session.refresh().await.unwrap();

    let result = session.delete(&target).await;
    assert!(matches!(result, Err(AppError::Gateway(_))));
    // The entry came back with the refetch — the mirror never lies for long
    assert!(session.mirror().get(&target).is_some());
}

#[tokio::test]
async fn mirror_day_index_follows_mutations() {
    let gateway = mem_gateway().await;
    let store = seed_store(&gateway, "Mitte").await;
    let anna = seed_employee(&gateway, "Anna").await;
    let definition = seed_definition(&gateway, "Early", false).await;

    let mut session = SyncSession::new(AssignmentService::new(gateway.clone()), ORG);
    session.refresh().await.unwrap();

    let record = session
        .create(input(&anna.id, &definition.id, &store.id, "2024-06-10"))
        .await
        .unwrap();
    let monday = DayKey::normalize("2024-06-10").unwrap();
    let friday = DayKey::normalize("2024-06-14").unwrap();
    assert_eq!(session.mirror().on_day(&monday).len(), 1);

    session.move_assignment(&record.id, "2024-06-14").await.unwrap();
    assert!(session.mirror().on_day(&monday).is_empty());
    assert_eq!(session.mirror().on_day(&friday).len(), 1);

    session.delete(&record.id).await.unwrap();
    assert!(session.mirror().is_empty());
}
