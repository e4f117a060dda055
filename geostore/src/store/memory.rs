//! In-process [`RecordStore`] backed by a hash map and an R-tree.
//!
//! Documents are kept in their persisted layout, so reads go through the same
//! conversion as the SQLite store and a malformed document surfaces as
//! [`StoreError::CorruptDocument`].

use super::{RecordStore, StoreError};
use async_trait::async_trait;
use geostore_geometry::{GeoRecord, codec::StoredDocument};
use log::debug;
use parking_lot::RwLock;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
struct IndexEntry {
	id: String,
	envelope: AABB<[f64; 2]>,
}

impl IndexEntry {
	fn from_document(document: &StoredDocument) -> Result<Self, StoreError> {
		let [x_min, y_min, x_max, y_max] = document
			.bounds()
			.map_err(|err| StoreError::corrupt(&document.id, &err))?;
		Ok(IndexEntry {
			id: document.id.clone(),
			envelope: AABB::from_corners([x_min, y_min], [x_max, y_max]),
		})
	}
}

impl RTreeObject for IndexEntry {
	type Envelope = AABB<[f64; 2]>;

	fn envelope(&self) -> Self::Envelope {
		self.envelope
	}
}

#[derive(Debug, Default)]
struct Inner {
	documents: HashMap<String, StoredDocument>,
	index: Option<RTree<IndexEntry>>,
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	inner: RwLock<Inner>,
}

impl MemoryRecordStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores a document as-is, bypassing record validation.
	#[cfg(test)]
	pub(crate) fn put_document(&self, document: StoredDocument) {
		self.inner.write().documents.insert(document.id.clone(), document);
	}
}

fn to_record(document: StoredDocument) -> Result<GeoRecord, StoreError> {
	let id = document.id.clone();
	GeoRecord::try_from(document).map_err(|err| StoreError::corrupt(&id, &err))
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
	fn describe(&self) -> String {
		String::from("memory")
	}

	async fn insert(&self, record: &GeoRecord) -> Result<(), StoreError> {
		let document = StoredDocument::from(record);
		let entry = IndexEntry::from_document(&document)?;
		let mut inner = self.inner.write();
		if inner.documents.contains_key(&document.id) {
			return Err(StoreError::DuplicateId(document.id));
		}
		if let Some(index) = inner.index.as_mut() {
			index.insert(entry);
		}
		inner.documents.insert(document.id.clone(), document);
		Ok(())
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<GeoRecord>, StoreError> {
		let document = self.inner.read().documents.get(id).cloned();
		document.map(to_record).transpose()
	}

	async fn find_all(&self) -> Result<Vec<GeoRecord>, StoreError> {
		let documents: Vec<StoredDocument> = self.inner.read().documents.values().cloned().collect();
		documents.into_iter().map(to_record).collect()
	}

	async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
		let mut inner = self.inner.write();
		let Some(document) = inner.documents.remove(id) else {
			return Ok(0);
		};
		// documents that never had valid bounds were never indexed
		if let (Some(index), Ok(entry)) = (inner.index.as_mut(), IndexEntry::from_document(&document)) {
			index.remove(&entry);
		}
		Ok(1)
	}

	async fn ensure_spatial_index(&self) -> Result<(), StoreError> {
		let mut inner = self.inner.write();
		if inner.index.is_none() {
			let entries = inner
				.documents
				.values()
				.map(IndexEntry::from_document)
				.collect::<Result<Vec<_>, _>>()?;
			debug!("building spatial index over {} documents", entries.len());
			inner.index = Some(RTree::bulk_load(entries));
		}
		Ok(())
	}

	async fn spatial_index_len(&self) -> Result<Option<usize>, StoreError> {
		Ok(self.inner.read().index.as_ref().map(RTree::size))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use geostore_geometry::{Geometry, codec::StoredGeometry};
	use pretty_assertions::assert_eq;
	use std::sync::Arc;

	fn base() -> GeoRecord {
		GeoRecord::new("p1", "Base", Geometry::new_point(35.0, 32.0))
	}

	fn zone() -> GeoRecord {
		GeoRecord::new(
			"g1",
			"Zone",
			Geometry::new_polygon(vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]),
		)
	}

	#[tokio::test]
	async fn insert_find_delete() {
		let store = MemoryRecordStore::new();
		store.insert(&base()).await.unwrap();
		assert_eq!(store.find_by_id("p1").await.unwrap(), Some(base()));
		assert_eq!(store.find_by_id("nope").await.unwrap(), None);
		assert_eq!(store.delete_by_id("p1").await.unwrap(), 1);
		assert_eq!(store.delete_by_id("p1").await.unwrap(), 0);
		assert_eq!(store.find_by_id("p1").await.unwrap(), None);
	}

	#[tokio::test]
	async fn duplicate_id_is_rejected() {
		let store = MemoryRecordStore::new();
		store.insert(&base()).await.unwrap();
		let other = GeoRecord::new("p1", "Other", Geometry::new_point(1.0, 1.0));
		let err = store.insert(&other).await.unwrap_err();
		assert!(matches!(err, StoreError::DuplicateId(id) if id == "p1"));
		assert_eq!(store.find_by_id("p1").await.unwrap(), Some(base()));
	}

	#[tokio::test]
	async fn find_all_returns_everything() {
		let store = MemoryRecordStore::new();
		assert_eq!(store.find_all().await.unwrap(), vec![]);
		store.insert(&base()).await.unwrap();
		store.insert(&zone()).await.unwrap();
		let mut ids: Vec<String> = store.find_all().await.unwrap().into_iter().map(|r| r.id).collect();
		ids.sort();
		assert_eq!(ids, vec!["g1", "p1"]);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_inserts_yield_one_winner() {
		let store = Arc::new(MemoryRecordStore::new());
		let tasks: Vec<_> = (0..8)
			.map(|_| {
				let store = store.clone();
				tokio::spawn(async move { store.insert(&base()).await })
			})
			.collect();
		let mut won = 0;
		for task in tasks {
			match task.await.unwrap() {
				Ok(()) => won += 1,
				Err(StoreError::DuplicateId(_)) => {}
				Err(err) => panic!("unexpected error: {err}"),
			}
		}
		assert_eq!(won, 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_deletes_remove_once() {
		let store = Arc::new(MemoryRecordStore::new());
		store.ensure_spatial_index().await.unwrap();
		for _ in 0..20 {
			store.insert(&base()).await.unwrap();
			let tasks: Vec<_> = (0..8)
				.map(|_| {
					let store = store.clone();
					tokio::spawn(async move { store.delete_by_id("p1").await })
				})
				.collect();
			let mut deleted = 0;
			for task in tasks {
				deleted += task.await.unwrap().unwrap();
			}
			assert_eq!(deleted, 1);
		}
		assert_eq!(store.spatial_index_len().await.unwrap(), Some(0));
	}

	#[tokio::test]
	async fn spatial_index_is_idempotent_and_maintained() {
		let store = MemoryRecordStore::new();
		store.insert(&base()).await.unwrap();
		assert_eq!(store.spatial_index_len().await.unwrap(), None);

		store.ensure_spatial_index().await.unwrap();
		store.ensure_spatial_index().await.unwrap();
		assert_eq!(store.spatial_index_len().await.unwrap(), Some(1));

		store.insert(&zone()).await.unwrap();
		assert_eq!(store.spatial_index_len().await.unwrap(), Some(2));

		store.delete_by_id("p1").await.unwrap();
		assert_eq!(store.spatial_index_len().await.unwrap(), Some(1));
	}

	#[tokio::test]
	async fn corrupt_document_is_reported() {
		let store = MemoryRecordStore::new();
		store.put_document(StoredDocument {
			id: "bad".into(),
			name: "Open".into(),
			geometry: StoredGeometry::Polygon {
				coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
			},
		});
		let err = store.find_by_id("bad").await.unwrap_err();
		assert!(matches!(err, StoreError::CorruptDocument { ref id, .. } if id == "bad"));
		assert!(store.find_all().await.is_err());

		let err = store.ensure_spatial_index().await.unwrap_err();
		assert_eq!(
			err.to_string(),
			"stored document 'bad' is corrupt: invalid geometry in document 'bad': invalid exterior ring: Ring must be closed"
		);
		assert_eq!(store.spatial_index_len().await.unwrap(), None);
		assert_eq!(store.delete_by_id("bad").await.unwrap(), 1);
	}
}
