//! Messages exchanged between [`KitchenClient`](crate::clients::KitchenClient) and
//! [`KitchenActor`](crate::actor::KitchenActor).

use crate::manager::KitchenError;
use crate::model::{Action, Order, StorageKind};
use tokio::sync::oneshot;

/// One-shot response channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

/// A request to the kitchen actor.
///
/// Transitions (`Place`, `Move`, `Pickup`, `Discard`) and queries (`Exists`,
/// `Locate`, `History`) share one queue, so a query always sees the state
/// between two whole transitions.
#[derive(Debug)]
pub enum KitchenRequest {
    Place {
        order: Order,
        respond_to: Response<Action>,
    },
    Move {
        id: String,
        source: StorageKind,
        target: StorageKind,
        respond_to: Response<bool>,
    },
    Pickup {
        id: String,
        respond_to: Response<Option<Order>>,
    },
    Discard {
        id: String,
        respond_to: Response<bool>,
    },
    Exists {
        id: String,
        respond_to: Response<bool>,
    },
    Locate {
        id: String,
        respond_to: Response<Option<StorageKind>>,
    },
    /// Full history when `order_id` is `None`, otherwise that order's actions.
    History {
        order_id: Option<String>,
        respond_to: Response<Vec<Action>>,
    },
}
