//! # Kitchen Actor
//!
//! The actor owns the [`OrderManager`] and the receiving end of the request
//! channel. Requests are handled one at a time, in arrival order, so the
//! manager never sees two transitions interleave and needs no lock of its own.

use crate::actor::KitchenRequest;
use crate::clients::KitchenClient;
use crate::manager::{KitchenError, OrderManager};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Server half of the kitchen.
///
/// Create it with [`KitchenActor::new`], then spawn [`KitchenActor::run`] on
/// the runtime and talk to it through the returned [`KitchenClient`].
///
/// ```rust,ignore
/// let (actor, client) = KitchenActor::new(32, manager);
/// let handle = tokio::spawn(actor.run());
/// client.place(order).await?;
/// ```
///
/// The loop ends when every client has been dropped, or right after a fatal
/// error has been reported to the caller that triggered it.
#[derive(Debug)]
pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    manager: OrderManager,
}

impl KitchenActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request queue; callers wait when it is full.
    pub fn new(buffer_size: usize, manager: OrderManager) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, manager };
        (actor, KitchenClient::new(sender))
    }

    pub async fn run(mut self) {
        info!(policy = %self.manager.policy(), "Kitchen actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                KitchenRequest::Place { order, respond_to } => {
                    let result = self.manager.place(order);
                    if let Some(fatal) = fatal_error(&result) {
                        error!(error = %fatal, "Placement failed, stopping kitchen");
                        let _ = respond_to.send(result);
                        break;
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Move {
                    id,
                    source,
                    target,
                    respond_to,
                } => {
                    let result = self.manager.move_order(&id, source, target);
                    if let Some(fatal) = fatal_error(&result) {
                        error!(order_id = %id, error = %fatal, "Move failed, stopping kitchen");
                        let _ = respond_to.send(result);
                        break;
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Pickup { id, respond_to } => {
                    let order = self.manager.pickup(&id);
                    debug!(order_id = %id, found = order.is_some(), "Pickup");
                    let _ = respond_to.send(Ok(order));
                }
                KitchenRequest::Discard { id, respond_to } => {
                    let discarded = self.manager.discard(&id);
                    debug!(order_id = %id, found = discarded, "Discard");
                    let _ = respond_to.send(Ok(discarded));
                }
                KitchenRequest::Exists { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.manager.exists(&id)));
                }
                KitchenRequest::Locate { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.manager.location_of(&id)));
                }
                KitchenRequest::History { order_id, respond_to } => {
                    let history = match order_id {
                        Some(id) => self.manager.history_for(&id),
                        None => self.manager.history(),
                    };
                    let _ = respond_to.send(Ok(history));
                }
            }
        }

        info!(actions = self.manager.history().len(), "Kitchen actor shutdown");
    }
}

fn fatal_error<T>(result: &Result<T, KitchenError>) -> Option<&KitchenError> {
    result.as_ref().err().filter(|e| e.is_fatal())
}
