use std::fmt::Debug;

/// A coordinate pair in storage axis order: `x` is the longitude, `y` the latitude.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	/// Longitude in degrees.
	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	/// Latitude in degrees.
	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	/// Compares both components bit for bit, so `0.0` and `-0.0` are different vertices.
	#[must_use]
	pub fn is_identical(&self, other: &Coordinates) -> bool {
		self.0[0].to_bits() == other.0[0].to_bits() && self.0[1].to_bits() == other.0[1].to_bits()
	}

	pub(crate) fn bit_key(&self) -> (u64, u64) {
		(self.0[0].to_bits(), self.0[1].to_bits())
	}

	#[must_use]
	pub fn as_array(&self) -> [f64; 2] {
		self.0
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates([value[0].into(), value[1].into()])
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new(34.8, 31.5);
		assert_eq!(c.x(), 34.8);
		assert_eq!(c.y(), 31.5);
		assert_eq!(c.as_array(), [34.8, 31.5]);
	}

	#[test]
	fn debug_formats_like_array() {
		assert_eq!(format!("{:?}", Coordinates::new(1.0, 2.0)), "[1.0, 2.0]");
	}

	#[test]
	fn identical_is_bitwise() {
		let a = Coordinates::new(0.0, 1.0);
		let b = Coordinates::new(-0.0, 1.0);
		assert_eq!(a, b);
		assert!(!a.is_identical(&b));
		assert!(a.is_identical(&Coordinates::new(0.0, 1.0)));
	}

	#[test]
	fn conversions() {
		assert_eq!(Coordinates::from(&[1, 2]), Coordinates::new(1.0, 2.0));
		assert_eq!(Coordinates::from((3.0, 4.0)), Coordinates::new(3.0, 4.0));
		let arr: [f64; 2] = Coordinates::new(5.0, 6.0).into();
		assert_eq!(arr, [5.0, 6.0]);
	}
}
