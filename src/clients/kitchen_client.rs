use crate::actor::KitchenRequest;
use crate::manager::KitchenError;
use crate::model::{Action, Order, StorageKind};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Cloneable async handle to the [`KitchenActor`](crate::actor::KitchenActor).
///
/// Every clone feeds the same queue; the kitchen shuts down once all clones
/// are dropped.
#[derive(Debug, Clone)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn place(&self, order: Order) -> Result<Action, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Place { order, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn move_order(&self, id: &str, source: StorageKind, target: StorageKind) -> Result<bool, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Move {
            id: id.to_string(),
            source,
            target,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn pickup(&self, id: &str) -> Result<Option<Order>, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Pickup {
            id: id.to_string(),
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn discard(&self, id: &str) -> Result<bool, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Discard {
            id: id.to_string(),
            respond_to,
        })
        .await
    }

    pub async fn exists(&self, id: &str) -> Result<bool, KitchenError> {
        self.request(|respond_to| KitchenRequest::Exists {
            id: id.to_string(),
            respond_to,
        })
        .await
    }

    pub async fn location_of(&self, id: &str) -> Result<Option<StorageKind>, KitchenError> {
        self.request(|respond_to| KitchenRequest::Locate {
            id: id.to_string(),
            respond_to,
        })
        .await
    }

    /// Every action emitted so far, in emission order.
    pub async fn history(&self) -> Result<Vec<Action>, KitchenError> {
        self.request(|respond_to| KitchenRequest::History {
            order_id: None,
            respond_to,
        })
        .await
    }

    pub async fn history_for(&self, id: &str) -> Result<Vec<Action>, KitchenError> {
        self.request(|respond_to| KitchenRequest::History {
            order_id: Some(id.to_string()),
            respond_to,
        })
        .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, KitchenError>>) -> KitchenRequest,
    ) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| KitchenError::ActorClosed)?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }
}
