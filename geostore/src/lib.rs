//! # GeoStore
//!
//! A small HTTP service storing named geographic points and single-ring polygons.
//!
//! - [`config`]: YAML configuration with command line overrides
//! - [`store`]: the [`store::RecordStore`] trait with SQLite and in-memory backends
//! - [`service`]: create, fetch, list and delete records by id
//! - [`server`]: the axum-based HTTP server
//!
//! ```rust
//! use geostore::{service::RecordService, store::MemoryRecordStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = RecordService::new(Arc::new(MemoryRecordStore::new()));
//!     service.create(&json!({"id": "p1", "name": "Base", "lat": 32.0, "lon": 35.0})).await.unwrap();
//!     assert_eq!(service.get_all().await.unwrap().len(), 1);
//! }
//! ```

pub mod config;
pub mod server;
pub mod service;
pub mod store;
