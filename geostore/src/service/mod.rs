//! Record use cases on top of a [`RecordStore`].
//!
//! The service is stateless: it decodes caller payloads, delegates to the store
//! and encodes what comes back. Uniqueness is left to the store, so there is no
//! check-then-insert here.

mod error;

pub use error::ServiceError;

use crate::store::RecordStore;
use geostore_geometry::codec::{
	RecordView,
	wire::{decode, encode},
};
use log::debug;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RecordService {
	store: Arc<dyn RecordStore>,
}

impl RecordService {
	pub fn new(store: Arc<dyn RecordStore>) -> Self {
		RecordService { store }
	}

	/// Validates `payload` and persists it. Invalid payloads never reach the store.
	pub async fn create(&self, payload: &Value) -> Result<RecordView, ServiceError> {
		let record = decode(payload)?;
		debug!("create {} '{}'", record.geometry.type_name(), record.id);
		self.store.insert(&record).await?;
		Ok(encode(&record))
	}

	pub async fn get_one(&self, id: &str) -> Result<RecordView, ServiceError> {
		debug!("get '{id}'");
		match self.store.find_by_id(id).await? {
			Some(record) => Ok(encode(&record)),
			None => Err(ServiceError::NotFound { id: id.to_string() }),
		}
	}

	pub async fn get_all(&self) -> Result<Vec<RecordView>, ServiceError> {
		let records = self.store.find_all().await?;
		debug!("get all: {} records", records.len());
		Ok(records.iter().map(encode).collect())
	}

	pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
		debug!("delete '{id}'");
		if self.store.delete_by_id(id).await? == 0 {
			return Err(ServiceError::NotFound { id: id.to_string() });
		}
		Ok(())
	}
}
