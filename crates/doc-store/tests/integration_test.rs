use async_trait::async_trait;
use doc_store::{ChangeEvent, DocumentActor, DocumentEntity, StoreError};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ledger {
    id: u32,
    name: String,
    balance: i64,
    frozen: bool,
}

#[derive(Debug)]
struct LedgerCreate {
    name: String,
}

#[derive(Debug)]
enum LedgerUpdate {
    Rename(String),
    SetBalance(i64),
}

#[derive(Debug)]
enum LedgerAction {
    Freeze,
}

#[derive(Debug, thiserror::Error)]
enum LedgerError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Ledger is frozen")]
    Frozen,
}

#[async_trait]
impl DocumentEntity for Ledger {
    type Id = u32;
    type Create = LedgerCreate;
    type Update = LedgerUpdate;
    type Action = LedgerAction;
    type ActionResult = bool;
    type Record = i64;
    type Context = ();
    type Error = LedgerError;

    fn from_create_params(id: u32, params: LedgerCreate) -> Result<Self, Self::Error> {
        if params.name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            balance: 0,
            frozen: false,
        })
    }

    async fn on_update(
        &mut self,
        update: LedgerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if self.frozen {
            return Err(LedgerError::Frozen);
        }
        match update {
            LedgerUpdate::Rename(name) => self.name = name,
            LedgerUpdate::SetBalance(balance) => self.balance = balance,
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: LedgerAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            LedgerAction::Freeze => {
                let changed = !self.frozen;
                self.frozen = true;
                Ok(changed)
            }
        }
    }
}

fn spawn_store() -> doc_store::DocumentClient<Ledger> {
    let (actor, client) = DocumentActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let client = spawn_store();

    // 1. Create
    let id = client
        .create(LedgerCreate {
            name: "Alice".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    let created = client.get(id).await.unwrap().unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.data.name, "Alice");

    // 2. Update bumps the version
    let updated = client
        .update(id, LedgerUpdate::Rename("Bob".into()))
        .await
        .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.data.name, "Bob");

    // 3. Action
    assert!(client.perform_action(id, LedgerAction::Freeze).await.unwrap());
    assert!(!client.perform_action(id, LedgerAction::Freeze).await.unwrap());

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.records(id).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_rejected_by_entity() {
    let client = spawn_store();

    let result = client.create(LedgerCreate { name: String::new() }).await;
    assert!(matches!(result, Err(StoreError::EntityError(_))));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let client = spawn_store();
    for name in ["a", "b", "c"] {
        client.create(LedgerCreate { name: name.into() }).await.unwrap();
    }

    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|doc| doc.data.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_commit_applies_update_and_records_together() {
    let client = spawn_store();
    let id = client.create(LedgerCreate { name: "x".into() }).await.unwrap();

    let receipt = client
        .commit(id, 1, LedgerUpdate::SetBalance(30), vec![10, 20])
        .await
        .unwrap();
    assert_eq!(receipt.document.version, 2);
    assert_eq!(receipt.document.data.balance, 30);
    assert_eq!(receipt.records.len(), 2);
    assert!(receipt.records[0] < receipt.records[1]);

    // Newest first.
    let records: Vec<i64> = client
        .records(id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.data)
        .collect();
    assert_eq!(records, vec![20, 10]);
}

#[tokio::test]
async fn test_stale_commit_is_rejected_without_side_effects() {
    let client = spawn_store();
    let id = client.create(LedgerCreate { name: "x".into() }).await.unwrap();

    client
        .commit(id, 1, LedgerUpdate::SetBalance(5), vec![5])
        .await
        .unwrap();

    let err = client
        .commit(id, 1, LedgerUpdate::SetBalance(7), vec![7])
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: 1,
            actual: 2,
            ..
        }
    ));

    let current = client.get(id).await.unwrap().unwrap();
    assert_eq!(current.version, 2);
    assert_eq!(current.data.balance, 5);
    assert_eq!(client.records(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_commit_rejected_by_entity_writes_nothing() {
    let client = spawn_store();
    let id = client.create(LedgerCreate { name: "x".into() }).await.unwrap();
    client.perform_action(id, LedgerAction::Freeze).await.unwrap();

    let err = client
        .commit(id, 2, LedgerUpdate::SetBalance(9), vec![9])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EntityError(_)));
    assert!(client.records(id).await.unwrap().is_empty());
    assert_eq!(client.get(id).await.unwrap().unwrap().version, 2);
}

#[tokio::test]
async fn test_commit_on_missing_document() {
    let client = spawn_store();

    let err = client
        .commit(42, 1, LedgerUpdate::SetBalance(1), vec![1])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref id) if id == "42"));
}

#[tokio::test]
async fn test_racing_commits_only_one_wins() {
    let client = spawn_store();
    let id = client.create(LedgerCreate { name: "x".into() }).await.unwrap();

    let mut handles = Vec::new();
    for amount in 1..=8i64 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .commit(id, 1, LedgerUpdate::SetBalance(amount), vec![amount])
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(e) => assert!(e.is_conflict()),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(client.records(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_subscribers_see_committed_writes() {
    let client = spawn_store();
    let mut changes = client.subscribe();

    let id = client.create(LedgerCreate { name: "x".into() }).await.unwrap();
    client
        .commit(id, 1, LedgerUpdate::SetBalance(3), vec![3])
        .await
        .unwrap();
    let _ = client.commit(id, 1, LedgerUpdate::SetBalance(4), vec![4]).await;
    client.delete(id).await.unwrap();

    match changes.recv().await.unwrap() {
        ChangeEvent::Created { id: got, document } => {
            assert_eq!(got, id);
            assert_eq!(document.version, 1);
        }
        other => panic!("Expected Created, got {:?}", other),
    }
    let updated = changes.recv().await.unwrap();
    assert_eq!(updated.document().map(|d| d.data.balance), Some(3));
    // The rejected commit published nothing.
    let deleted = changes.recv().await.unwrap();
    assert!(matches!(deleted, ChangeEvent::Deleted { .. }));
    assert_eq!(deleted.id(), &id);
}

#[tokio::test]
async fn test_closed_store() {
    let (actor, client) = DocumentActor::<Ledger>::new(10);
    drop(actor);

    let result = client.get(1).await;
    assert!(matches!(result, Err(StoreError::ActorClosed)));
}
