//! # Mock Kitchen
//!
//! Utilities for testing code that drives a [`KitchenClient`] without
//! spinning up a real [`KitchenActor`](crate::actor::KitchenActor).
//!
//! [`create_mock_client`] returns a client whose requests land on a receiver
//! the test owns. The `expect_*` helpers pull the next request off that
//! receiver and hand back its payload plus the responder, so the test decides
//! what the "kitchen" answers and when.

use crate::actor::{KitchenRequest, Response};
use crate::clients::KitchenClient;
use crate::model::{Action, Order};
use tokio::sync::mpsc;

/// Creates a client wired to a receiver the caller controls.
pub fn create_mock_client(buffer_size: usize) -> (KitchenClient, mpsc::Receiver<KitchenRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (KitchenClient::new(sender), receiver)
}

/// Next message must be a `Place` request.
pub async fn expect_place(receiver: &mut mpsc::Receiver<KitchenRequest>) -> Option<(Order, Response<Action>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Place { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}

/// Next message must be a `Pickup` request.
pub async fn expect_pickup(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(String, Response<Option<Order>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Pickup { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a `History` request.
pub async fn expect_history(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(Option<String>, Response<Vec<Action>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::History { order_id, respond_to }) => Some((order_id, respond_to)),
        _ => None,
    }
}
