use actor_framework::{ActorEntity, Filter, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct StockBin {
    id: u32,
    sku: String,
    units: u32,
}

#[derive(Debug)]
struct StockBinCreate {
    sku: String,
    units: u32,
}

#[derive(Debug)]
struct StockBinUpdate {
    sku: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Take(u32),
    PutBack(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BinError {
    #[error("sku must not be empty")]
    EmptySku,
    #[error("requested {requested}, only {available} left")]
    Insufficient { requested: u32, available: u32 },
}

#[async_trait]
impl ActorEntity for StockBin {
    type Id = u32;
    type Create = StockBinCreate;
    type Update = StockBinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: StockBinCreate) -> Result<Self, Self::Error> {
        if params.sku.is_empty() {
            return Err(BinError::EmptySku);
        }
        Ok(Self {
            id,
            sku: params.sku,
            units: params.units,
        })
    }

    async fn on_update(
        &mut self,
        update: StockBinUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BinAction,
        _ctx: &Self::Context,
    ) -> Result<u32, Self::Error> {
        match action {
            BinAction::Take(n) => {
                if n > self.units {
                    return Err(BinError::Insufficient {
                        requested: n,
                        available: self.units,
                    });
                }
                // Yield between check and write; the actor must still serialize.
                tokio::task::yield_now().await;
                self.units -= n;
                Ok(self.units)
            }
            BinAction::PutBack(n) => {
                self.units += n;
                Ok(self.units)
            }
        }
    }
}

fn bin(sku: &str, units: u32) -> StockBinCreate {
    StockBinCreate {
        sku: sku.to_string(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(bin("A-100", 5)).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    let left = client.perform_action(id, BinAction::Take(2)).await.unwrap();
    assert_eq!(left, 3);

    // 3. Update
    let updated: StockBin = client
        .update(
            id,
            StockBinUpdate {
                sku: Some("A-101".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.sku, "A-101");
    assert_eq!(updated.units, 3);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn failed_create_does_not_consume_an_id() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(bin("", 1)).await.unwrap_err();
    assert_eq!(err.downcast_entity::<BinError>().unwrap(), BinError::EmptySku);

    assert_eq!(client.create(bin("B-1", 1)).await.unwrap(), 1);
}

#[tokio::test]
async fn failed_action_leaves_entity_unchanged() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("C-1", 2)).await.unwrap();
    let err = client
        .perform_action(id, BinAction::Take(3))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<BinError>().unwrap(),
        BinError::Insufficient {
            requested: 3,
            available: 2
        }
    );
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 2);

    assert!(matches!(
        client.perform_action(99, BinAction::PutBack(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_takes_never_oversell() {
    let (actor, client) = ResourceActor::<StockBin>::new(64);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("D-1", 10)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, BinAction::Take(1)).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 10);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}

#[tokio::test]
async fn find_returns_matches_in_id_order() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    for (sku, units) in [("E-1", 0), ("E-2", 4), ("E-3", 0), ("E-4", 1)] {
        client.create(bin(sku, units)).await.unwrap();
    }

    let empty = client
        .find(Filter::new(|b: &StockBin| b.units == 0))
        .await
        .unwrap();
    let ids: Vec<u32> = empty.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert_eq!(client.find(Filter::all()).await.unwrap().len(), 4);
}

#[tokio::test]
async fn client_reports_closed_actor() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    drop(actor);

    assert!(matches!(
        client.create(bin("F-1", 1)).await,
        Err(FrameworkError::ActorClosed)
    ));
}
