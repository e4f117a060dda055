use super::*;
use anyhow::Result;
use std::fmt::Debug;

/// The geometry a record carries. The set of shapes is closed: every consumer
/// matches on both variants and there is no fallback arm.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	Polygon(PolygonGeometry),
}

impl Geometry {
	/// Builds a point from storage-ordered components.
	pub fn new_point(lon: f64, lat: f64) -> Self {
		Self::Point(PointGeometry::new(Coordinates::new(lon, lat)))
	}

	/// Builds a polygon from a storage-ordered ring of `[lon, lat]` pairs.
	pub fn new_polygon(ring: Vec<[f64; 2]>) -> Self {
		Self::Polygon(PolygonGeometry::from(ring))
	}

	/// The GeoJSON type name of this geometry.
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::Polygon(_) => "Polygon",
		}
	}

	pub fn verify(&self) -> Result<()> {
		match self {
			Geometry::Point(g) => g.verify(),
			Geometry::Polygon(g) => g.verify(),
		}
	}

	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
		}
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::Polygon(g) => g,
		};
		f.debug_tuple(self.type_name()).field(inner).finish()
	}
}
