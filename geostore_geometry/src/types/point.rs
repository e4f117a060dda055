use super::{Coordinates, GeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A single position, stored as (longitude, latitude).
#[derive(Clone, Copy, PartialEq)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}

	#[must_use]
	pub fn lon(&self) -> f64 {
		self.0.x()
	}

	#[must_use]
	pub fn lat(&self) -> f64 {
		self.0.y()
	}

	#[must_use]
	pub fn as_coord(&self) -> &Coordinates {
		&self.0
	}
}

impl GeometryTrait for PointGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(
			self.0.x().is_finite() && self.0.y().is_finite(),
			"Point coordinates must be finite"
		);
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		Some([self.0.x(), self.0.y(), self.0.x(), self.0.y()])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<T> From<T> for PointGeometry
where
	Coordinates: From<T>,
{
	fn from(value: T) -> Self {
		Self(Coordinates::from(value))
	}
}
