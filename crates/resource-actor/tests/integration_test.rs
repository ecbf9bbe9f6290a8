use resource_actor::mock::{create_mock_client, expect_action, MockClient};
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Pallet {
    id: u32,
    label: String,
    loaded: bool,
}

#[derive(Debug)]
struct PalletCreate {
    label: String,
}

#[derive(Debug)]
struct PalletUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum PalletAction {
    Load,
    Unload,
}

#[derive(Debug, thiserror::Error)]
enum PalletError {
    #[error("Label must not be empty")]
    EmptyLabel,
    #[error("Pallet {0} is not loaded")]
    NotLoaded(u32),
    #[error("Pallet {0} is locked")]
    Locked(u32),
}

#[async_trait]
impl ActorEntity for Pallet {
    type Id = u32;
    type Create = PalletCreate;
    type Update = PalletUpdate;
    type Action = PalletAction;
    type ActionResult = bool;
    type Context = ();
    type Error = PalletError;

    fn from_create_params(id: u32, params: PalletCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(PalletError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            loaded: false,
        })
    }

    async fn on_update(
        &mut self,
        update: PalletUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(PalletError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.loaded {
            return Err(PalletError::Locked(self.id));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PalletAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            PalletAction::Load => {
                let changed = !self.loaded;
                self.loaded = true;
                Ok(changed)
            }
            PalletAction::Unload => {
                if !self.loaded {
                    return Err(PalletError::NotLoaded(self.id));
                }
                self.loaded = false;
                Ok(true)
            }
        }
    }
}

fn create(label: &str) -> PalletCreate {
    PalletCreate {
        label: label.into(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Pallet>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(create("P-01")).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    assert!(client.perform_action(id, PalletAction::Load).await.unwrap());
    assert!(!client.perform_action(id, PalletAction::Load).await.unwrap());
    let pallet: Pallet = client.get(id).await.unwrap().unwrap();
    assert!(pallet.loaded);

    // 3. Delete is refused while loaded
    let err = client.delete(id).await.unwrap_err();
    assert_eq!(err.to_string(), "Pallet 1 is locked");
    assert!(client.get(id).await.unwrap().is_some());

    // 4. Update
    let updated = client
        .update(
            id,
            PalletUpdate {
                label: Some("P-02".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "P-02");

    // 5. Delete
    client.perform_action(id, PalletAction::Unload).await.unwrap();
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_creation_order() {
    let (actor, client) = ResourceActor::<Pallet>::new(10);
    tokio::spawn(actor.run(()));

    for label in ["A", "B", "C"] {
        client.create(create(label)).await.unwrap();
    }
    client.delete(2).await.unwrap();

    let labels: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(labels, vec!["A", "C"]);

    // Ids are never reused
    assert_eq!(client.create(create("D")).await.unwrap(), 4);
}

#[tokio::test]
async fn test_entity_errors_keep_their_type() {
    let (actor, client) = ResourceActor::<Pallet>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(create("")).await.unwrap_err();
    match err {
        FrameworkError::EntityError(inner) => {
            assert!(matches!(
                inner.downcast_ref::<PalletError>(),
                Some(PalletError::EmptyLabel)
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let id = client.create(create("P")).await.unwrap();
    let err = client
        .perform_action(id, PalletAction::Unload)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Pallet 1 is not loaded");
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (actor, client) = ResourceActor::<Pallet>::new(10);
    tokio::spawn(actor.run(()));

    assert!(client.get(42).await.unwrap().is_none());
    assert!(client
        .perform_action(42, PalletAction::Load)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(client.delete(42).await.unwrap_err().is_not_found());
    assert!(client
        .update(42, PalletUpdate { label: None })
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_closed_actor_reports_closed() {
    let (actor, client) = ResourceActor::<Pallet>::new(10);
    drop(actor);

    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}

#[tokio::test]
async fn test_mock_client_scripted_replies() {
    let mut mock = MockClient::<Pallet>::new();
    mock.expect_list().return_ok(vec![Pallet {
        id: 7,
        label: "X".into(),
        loaded: false,
    }]);
    mock.expect_action(7).return_ok(true);
    mock.expect_delete(7)
        .return_err(FrameworkError::NotFound("7".into()));

    let client = mock.client();
    assert_eq!(client.list().await.unwrap().len(), 1);
    assert!(client.perform_action(7, PalletAction::Load).await.unwrap());
    assert!(client.delete(7).await.unwrap_err().is_not_found());
    mock.verify();
}

#[tokio::test]
async fn test_manual_mock_inspects_payload() {
    let (client, mut receiver) = create_mock_client::<Pallet>(4);

    let call = tokio::spawn(async move { client.perform_action(3, PalletAction::Unload).await });

    let (id, action, respond_to) = expect_action(&mut receiver).await.unwrap();
    assert_eq!(id, 3);
    assert!(matches!(action, PalletAction::Unload));
    respond_to.send(Ok(false)).unwrap();

    assert!(!call.await.unwrap().unwrap());
}
