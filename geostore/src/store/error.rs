use r2d2_sqlite::rusqlite;

/// Failures of a [`RecordStore`](super::RecordStore).
///
/// Absence of a record is not an error: lookups return `Ok(None)` and deletes
/// return a count of zero.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
	#[error("a record with id '{0}' already exists")]
	DuplicateId(String),

	#[error("store unavailable: {message}")]
	Unavailable { message: String },

	#[error("stored document '{id}' is corrupt: {message}")]
	CorruptDocument { id: String, message: String },
}

impl StoreError {
	pub fn unavailable(message: impl std::fmt::Display) -> Self {
		StoreError::Unavailable {
			message: message.to_string(),
		}
	}

	pub(crate) fn corrupt(id: &str, err: &anyhow::Error) -> Self {
		StoreError::CorruptDocument {
			id: id.to_string(),
			message: format!("{err:#}"),
		}
	}
}

impl From<rusqlite::Error> for StoreError {
	fn from(error: rusqlite::Error) -> Self {
		StoreError::unavailable(format!("sqlite: {error}"))
	}
}

impl From<r2d2::Error> for StoreError {
	fn from(error: r2d2::Error) -> Self {
		StoreError::unavailable(format!("connection pool: {error}"))
	}
}

impl From<tokio::task::JoinError> for StoreError {
	fn from(error: tokio::task::JoinError) -> Self {
		StoreError::unavailable(format!("store task failed: {error}"))
	}
}
