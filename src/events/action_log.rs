use crate::model::Action;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::info;

/// Consumer of emitted [`Action`]s.
///
/// Implementations must accept concurrent calls and preserve emission order.
pub trait EventSink: Send + Sync + Debug {
    fn record(&self, action: Action);

    /// Every recorded action, in emission order.
    fn history(&self) -> Vec<Action>;

    /// Recorded actions for one order, in emission order.
    fn history_for(&self, order_id: &str) -> Vec<Action>;
}

#[derive(Debug, Default)]
struct LogState {
    all: Vec<Action>,
    by_order: HashMap<String, Vec<Action>>,
}

/// In-memory [`EventSink`] that also reports each action through `tracing`.
///
/// The global list and the per-order index live under one lock so the two
/// views always agree.
#[derive(Debug, Default)]
pub struct ActionLog {
    state: Mutex<LogState>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().all.is_empty()
    }
}

impl EventSink for ActionLog {
    fn record(&self, action: Action) {
        let mut state = self.state.lock();
        info!(order_id = %action.order_id, action = %action.kind, timestamp = action.timestamp, "Action");
        state
            .by_order
            .entry(action.order_id.clone())
            .or_default()
            .push(action.clone());
        state.all.push(action);
    }

    fn history(&self) -> Vec<Action> {
        self.state.lock().all.clone()
    }

    fn history_for(&self, order_id: &str) -> Vec<Action> {
        self.state
            .lock()
            .by_order
            .get(order_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionKind;
    use std::sync::Arc;

    #[test]
    fn test_history_keeps_emission_order() {
        let log = ActionLog::new();
        log.record(Action::new(20, "a", ActionKind::Place));
        log.record(Action::new(10, "b", ActionKind::Place));
        log.record(Action::new(10, "a", ActionKind::Pickup));

        let kinds: Vec<_> = log.history().iter().map(|a| (a.order_id.clone(), a.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("a".to_string(), ActionKind::Place),
                ("b".to_string(), ActionKind::Place),
                ("a".to_string(), ActionKind::Pickup),
            ]
        );
        assert_eq!(log.history_for("a").len(), 2);
        assert!(log.history_for("zzz").is_empty());
    }

    #[test]
    fn test_concurrent_appends() {
        let log = Arc::new(ActionLog::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.record(Action::new(i, format!("o{t}"), ActionKind::Move));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), 100);
        for t in 0..4 {
            let timestamps: Vec<_> = log.history_for(&format!("o{t}")).iter().map(|a| a.timestamp).collect();
            assert_eq!(timestamps, (0..25).collect::<Vec<_>>());
        }
    }
}
