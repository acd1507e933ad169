use serde::{Deserialize, Serialize};

/// Server-assigned order identifier. Monotonic per store, starting at 1.
pub type OrderId = i64;

/// A persisted order: one item requested by one agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// Opaque agent identifier. Never checked against a registry.
    pub agent_id: String,
    pub item: String,
}

/// A validated order that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub agent_id: String,
    pub item: String,
}

impl NewOrder {
    /// Attach the id assigned by the store.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            agent_id: self.agent_id,
            item: self.item,
        }
    }
}
