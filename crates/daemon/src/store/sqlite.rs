use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use order_core::{NewOrder, Order, OrderId};
use rusqlite::{params, Connection};

use super::OrderStore;

/// SQLite-backed store. Id uniqueness comes from `AUTOINCREMENT`.
pub struct SqliteOrderStore {
    conn: Mutex<Connection>,
}

impl SqliteOrderStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("open sqlite db {}", db_path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(include_str!("../../migrations/0001_init.sql"))
            .context("applying schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("sqlite connection lock poisoned"))
    }
}

impl OrderStore for SqliteOrderStore {
    fn create(&self, new: NewOrder) -> Result<Order> {
        let conn = self.conn()?;
        let id: OrderId = conn
            .query_row(
                "INSERT INTO orders(agent_id, item) VALUES (?1, ?2) RETURNING id",
                params![new.agent_id, new.item],
                |r| r.get(0),
            )
            .context("inserting order")?;
        Ok(new.into_order(id))
    }

    fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Order>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, agent_id, item FROM orders WHERE agent_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![agent_id], |r| {
            Ok(Order {
                id: r.get(0)?,
                agent_id: r.get(1)?,
                item: r.get(2)?,
            })
        })?;

        let mut orders = vec![];
        for row in rows {
            orders.push(row?);
        }
        Ok(orders)
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(1) FROM orders", [], |r| r.get(0))?;
        Ok(n as u64)
    }
}
