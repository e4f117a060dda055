/// Reasons a caller payload cannot become a [`GeoRecord`](crate::GeoRecord).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
	#[error("invalid payload: {message}")]
	InvalidPayload { message: String },

	#[error("payload is neither a point (has 'lat') nor a polygon (has 'coordinates')")]
	UnrecognizedGeometry,

	#[error("polygon ring is degenerate: {vertices} distinct vertices, at least 3 required")]
	DegenerateGeometry { vertices: usize },
}

impl DecodeError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		DecodeError::InvalidPayload {
			message: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages() {
		assert_eq!(
			DecodeError::invalid("field 'name' is missing").to_string(),
			"invalid payload: field 'name' is missing"
		);
		assert_eq!(
			DecodeError::DegenerateGeometry { vertices: 2 }.to_string(),
			"polygon ring is degenerate: 2 distinct vertices, at least 3 required"
		);
	}
}
