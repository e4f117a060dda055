use crate::Geometry;

/// A named geometry identified by a caller-supplied id.
///
/// Values of this type are always fully validated: they are produced by
/// [`crate::codec::wire::decode`] or by reading a stored document back.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoRecord {
	pub id: String,
	pub name: String,
	pub geometry: Geometry,
}

impl GeoRecord {
	pub fn new(id: impl Into<String>, name: impl Into<String>, geometry: Geometry) -> Self {
		GeoRecord {
			id: id.into(),
			name: name.into(),
			geometry,
		}
	}
}
