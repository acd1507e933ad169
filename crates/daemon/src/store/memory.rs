use std::sync::Mutex;

use anyhow::anyhow;
use order_core::{NewOrder, Order, OrderId};

use super::OrderStore;

/// In-memory store for tests and throwaway runs. Not durable.
#[derive(Default)]
pub struct InMemoryOrderStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: OrderId,
    orders: Vec<Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("order store lock poisoned"))
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, new: NewOrder) -> anyhow::Result<Order> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let order = new.into_order(inner.last_id);
        inner.orders.push(order.clone());
        Ok(order)
    }

    fn list_by_agent(&self, agent_id: &str) -> anyhow::Result<Vec<Order>> {
        let inner = self.lock()?;
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.agent_id == agent_id)
            .cloned()
            .collect())
    }

    fn count(&self) -> anyhow::Result<u64> {
        Ok(self.lock()?.orders.len() as u64)
    }
}
