use crate::store::StoreError;
use axum::http::StatusCode;
use geostore_geometry::codec::DecodeError;

/// Outcome of a failed [`RecordService`](super::RecordService) operation.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
	#[error(transparent)]
	InvalidInput(#[from] DecodeError),

	#[error("GeoLocation with Id {id} already exists")]
	Conflict { id: String },

	#[error("GeoLocation with Id {id} not found")]
	NotFound { id: String },

	#[error(transparent)]
	Store(StoreError),
}

impl From<StoreError> for ServiceError {
	fn from(error: StoreError) -> Self {
		match error {
			StoreError::DuplicateId(id) => ServiceError::Conflict { id },
			other => ServiceError::Store(other),
		}
	}
}

impl ServiceError {
	#[must_use]
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
			ServiceError::Conflict { .. } => StatusCode::CONFLICT,
			ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
			ServiceError::Store(StoreError::CorruptDocument { .. } | StoreError::DuplicateId(_)) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
			ServiceError::Store(StoreError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ServiceError::InvalidInput(DecodeError::UnrecognizedGeometry), 400)]
	#[case(ServiceError::Conflict { id: "a".into() }, 409)]
	#[case(ServiceError::NotFound { id: "a".into() }, 404)]
	#[case(ServiceError::Store(StoreError::unavailable("down")), 503)]
	#[case(ServiceError::Store(StoreError::CorruptDocument { id: "a".into(), message: "x".into() }), 500)]
	fn status_codes(#[case] error: ServiceError, #[case] status: u16) {
		assert_eq!(error.status_code().as_u16(), status);
	}

	#[test]
	fn duplicate_becomes_conflict() {
		let error = ServiceError::from(StoreError::DuplicateId("p1".into()));
		assert!(matches!(error, ServiceError::Conflict { ref id } if id == "p1"));
		assert_eq!(error.to_string(), "GeoLocation with Id p1 already exists");
	}

	#[test]
	fn not_found_message() {
		let error = ServiceError::NotFound { id: "missing".into() };
		assert_eq!(error.to_string(), "GeoLocation with Id missing not found");
	}

	#[test]
	fn decode_errors_are_transparent() {
		let error = ServiceError::from(DecodeError::DegenerateGeometry { vertices: 2 });
		assert_eq!(
			error.to_string(),
			"polygon ring is degenerate: 2 distinct vertices, at least 3 required"
		);
	}
}
