use super::StoreError;
use async_trait::async_trait;
use geostore_geometry::GeoRecord;
use std::fmt::Debug;

/// Durable storage of [`GeoRecord`]s keyed by their id.
///
/// Implementations must make `insert` and `delete_by_id` atomic per record:
/// two concurrent inserts of the same id yield exactly one `DuplicateId`, and
/// two concurrent deletes of the same id yield exactly one non-zero count.
#[async_trait]
pub trait RecordStore: Debug + Send + Sync {
	/// Short human-readable description, used in logs.
	fn describe(&self) -> String;

	/// Persists a new record. Fails with [`StoreError::DuplicateId`] if the id is taken.
	async fn insert(&self, record: &GeoRecord) -> Result<(), StoreError>;

	async fn find_by_id(&self, id: &str) -> Result<Option<GeoRecord>, StoreError>;

	/// Every stored record, in no particular order. Each call queries again.
	async fn find_all(&self) -> Result<Vec<GeoRecord>, StoreError>;

	/// Deletes at most one record and returns how many were removed.
	async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError>;

	/// Provisions the bounding-box index over record geometries.
	///
	/// Safe to call repeatedly; an existing index is kept and only back-filled.
	async fn ensure_spatial_index(&self) -> Result<(), StoreError>;

	/// Number of entries in the spatial index, or `None` if it was never provisioned.
	async fn spatial_index_len(&self) -> Result<Option<usize>, StoreError>;
}
