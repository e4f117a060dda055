//! Conversions between [`GeoRecord`](crate::GeoRecord) and its two external shapes:
//! the caller-facing JSON ([`wire`]) and the persisted document ([`storage`]).

mod error;
pub mod storage;
pub mod wire;

pub use error::DecodeError;
pub use storage::{StoredDocument, StoredGeometry};
pub use wire::RecordView;
