//! Persistence of geo records.
//!
//! - [`RecordStore`]: the async storage trait the service is written against
//! - [`SqliteRecordStore`]: durable store on a SQLite file with an R*Tree spatial index
//! - [`MemoryRecordStore`]: process-local store with an `rstar` spatial index
//!
//! [`open_store`] picks the backend from a [`StoreConfig`].

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::StoreError;
pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;

use crate::config::{StoreBackend, StoreConfig};
use anyhow::Result;
use std::sync::Arc;

pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
	let store: Arc<dyn RecordStore> = match config.backend {
		StoreBackend::Sqlite => Arc::new(SqliteRecordStore::open_path(&config.path, &config.table)?),
		StoreBackend::Memory => Arc::new(MemoryRecordStore::new()),
	};
	log::info!("opened store {}", store.describe());
	Ok(store)
}
