//! Geometry model and codecs for GeoStore records.
//!
//! A [`GeoRecord`] carries either a point or a single-ring polygon. Inside this
//! crate, and everywhere a record is held or persisted, coordinates are in
//! (longitude, latitude) order. Callers use (latitude, longitude); the swap is
//! done by [`codec::wire`] and nowhere else.
//!
//! ```rust
//! use geostore_geometry::codec::wire::{decode, encode};
//! use serde_json::json;
//!
//! let record = decode(&json!({"id": "g1", "name": "Zone", "coordinates": [[1, 1], [1, 2], [2, 2]]})).unwrap();
//! let view = serde_json::to_value(encode(&record)).unwrap();
//! assert_eq!(view["coordinates"], json!([[1.0, 1.0], [1.0, 2.0], [2.0, 2.0], [1.0, 1.0]]));
//! ```

pub mod codec;
mod geometry;
mod record;
mod types;

pub use geometry::*;
pub use record::*;
pub use types::*;
