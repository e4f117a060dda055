use super::{GeometryTrait, RingGeometry};
use anyhow::{Context, Result};
use std::fmt::Debug;

/// A polygon described by a single exterior ring. Holes are not supported.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub RingGeometry);

impl PolygonGeometry {
	#[must_use]
	pub fn new(exterior: RingGeometry) -> Self {
		Self(exterior)
	}

	#[must_use]
	pub fn exterior(&self) -> &RingGeometry {
		&self.0
	}

	pub fn into_exterior(self) -> RingGeometry {
		self.0
	}
}

impl GeometryTrait for PolygonGeometry {
	fn verify(&self) -> Result<()> {
		self.0.verify().context("invalid exterior ring")
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		self.0.compute_bounds()
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entry(&self.0).finish()
	}
}

impl<T> From<T> for PolygonGeometry
where
	RingGeometry: From<T>,
{
	fn from(value: T) -> Self {
		Self(RingGeometry::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verify_reports_ring_problem() {
		let polygon = PolygonGeometry::from(&[[0, 0], [1, 0], [1, 1]]);
		let err = polygon.verify().unwrap_err();
		assert_eq!(format!("{err:#}"), "invalid exterior ring: Ring must have at least 4 points");
	}

	#[test]
	fn bounds_follow_exterior() {
		let polygon = PolygonGeometry::from(&[[1, 1], [2, 1], [2, 3], [1, 1]]);
		assert_eq!(polygon.compute_bounds(), Some([1.0, 1.0, 2.0, 3.0]));
		assert_eq!(polygon.exterior().len(), 4);
	}

	#[test]
	fn debug_format() {
		let polygon = PolygonGeometry::from(&[[0, 0], [1, 0], [1, 1], [0, 0]]);
		assert_eq!(
			format!("{polygon:?}"),
			"[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]"
		);
	}
}
