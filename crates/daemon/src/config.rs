use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::store::{InMemoryOrderStore, OrderStore, SqliteOrderStore};

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    pub store: StoreConfig,
}

/// Which order store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Sqlite { db_path: PathBuf },
}

impl StoreConfig {
    pub fn open(&self) -> anyhow::Result<Arc<dyn OrderStore>> {
        let store: Arc<dyn OrderStore> = match self {
            Self::InMemory => Arc::new(InMemoryOrderStore::new()),
            Self::Sqlite { db_path } => Arc::new(SqliteOrderStore::open(db_path)?),
        };
        tracing::info!(store = ?self, "order store ready");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_each_store_kind() {
        let store = StoreConfig::InMemory.open().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::Sqlite {
            db_path: dir.path().join("orders.db"),
        };
        let store = config.open().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(dir.path().join("orders.db").exists());
    }
}
