use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The four transitions an order can go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Place,
    Move,
    Pickup,
    Discard,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Place => "place",
            ActionKind::Move => "move",
            ActionKind::Pickup => "pickup",
            ActionKind::Discard => "discard",
        };
        f.write_str(name)
    }
}

/// An immutable record of one kitchen transition.
///
/// Serializes as `{"timestamp": <micros>, "id": <order id>, "action": "place"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub timestamp: Timestamp,
    #[serde(rename = "id")]
    pub order_id: String,
    #[serde(rename = "action")]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(timestamp: Timestamp, order_id: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            timestamp,
            order_id: order_id.into(),
            kind,
        }
    }
}
