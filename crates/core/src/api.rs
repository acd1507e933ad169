use serde::{Deserialize, Serialize};

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/orders/health";
/// Path orders are created at. The trailing slash is part of the contract.
pub const CREATE_ORDER_PATH: &str = "/orders/";
/// Route template for listing one agent's orders.
pub const ORDERS_BY_AGENT_ROUTE: &str = "/orders/agent_id/{agent_id}";

/// Wire payload for `POST /orders/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub agent_id: String,
    pub item: String,
}

/// Client-side intent: what to order. The agent id is supplied separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrder {
    pub item: String,
}

impl CreateOrder {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }

    /// Build the wire request for `agent_id`.
    pub fn for_agent(&self, agent_id: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            agent_id: agent_id.to_string(),
            item: self.item.clone(),
        }
    }
}

/// Health response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
        }
    }
}
