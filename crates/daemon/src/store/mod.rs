use order_core::{NewOrder, Order};

mod memory;
mod sqlite;

pub use memory::InMemoryOrderStore;
pub use sqlite::SqliteOrderStore;

/// Persistence for orders. Orders are insert-only.
pub trait OrderStore: Send + Sync {
    /// Persist `new` and return it with a fresh, unique id.
    fn create(&self, new: NewOrder) -> anyhow::Result<Order>;

    /// All orders placed by `agent_id`, oldest first. Unknown agents yield an empty list.
    fn list_by_agent(&self, agent_id: &str) -> anyhow::Result<Vec<Order>>;

    fn count(&self) -> anyhow::Result<u64>;
}
