use super::{Coordinates, GeometryTrait};
use anyhow::{Result, ensure};
use std::{collections::HashSet, fmt::Debug};

/// An ordered sequence of (longitude, latitude) pairs bounding a polygon.
///
/// A ring is *closed* when its first and last vertex are bit-for-bit identical.
/// A valid ring is closed, has at least 4 pairs and at least 3 distinct vertices.
#[derive(Clone, PartialEq, Default)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Coordinates] {
		&self.0
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn push(&mut self, c: Coordinates) {
		self.0.push(c);
	}

	/// A single vertex is not a closed ring.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		match self.0.as_slice() {
			[first, .., last] => first.is_identical(last),
			_ => false,
		}
	}

	/// Appends a copy of the first vertex unless the ring is already closed.
	///
	/// Returns `true` if a vertex was appended.
	pub fn close(&mut self) -> bool {
		match self.0.first() {
			Some(first) if !self.is_closed() => {
				let first = *first;
				self.0.push(first);
				true
			}
			_ => false,
		}
	}

	/// Number of distinct vertices, not counting the closing duplicate of a closed ring.
	#[must_use]
	pub fn distinct_vertices(&self) -> usize {
		let open = if self.is_closed() {
			&self.0[..self.0.len() - 1]
		} else {
			&self.0[..]
		};
		open.iter().map(Coordinates::bit_key).collect::<HashSet<_>>().len()
	}

	pub fn into_inner(self) -> Vec<Coordinates> {
		self.0
	}
}

impl GeometryTrait for RingGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 4, "Ring must have at least 4 points");
		ensure!(self.is_closed(), "Ring must be closed");
		ensure!(
			self.distinct_vertices() >= 3,
			"Ring must have at least 3 distinct vertices"
		);
		ensure!(
			self.0.iter().all(|c| c.x().is_finite() && c.y().is_finite()),
			"Ring coordinates must be finite"
		);
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		if self.0.is_empty() {
			return None;
		}

		let mut x_min = f64::MAX;
		let mut y_min = f64::MAX;
		let mut x_max = f64::MIN;
		let mut y_max = f64::MIN;

		for coord in &self.0 {
			x_min = x_min.min(coord.x());
			y_min = y_min.min(coord.y());
			x_max = x_max.max(coord.x());
			y_max = y_max.max(coord.y());
		}

		Some([x_min, y_min, x_max, y_max])
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

impl<T> From<Vec<T>> for RingGeometry
where
	Coordinates: From<T>,
{
	fn from(value: Vec<T>) -> Self {
		Self(value.into_iter().map(Coordinates::from).collect())
	}
}

impl<'a, T, const N: usize> From<&'a [T; N]> for RingGeometry
where
	Coordinates: From<&'a T>,
{
	fn from(value: &'a [T; N]) -> Self {
		Self(value.iter().map(Coordinates::from).collect())
	}
}
