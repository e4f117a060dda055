use anyhow::Result;
use std::fmt::Debug;

/// Shared behaviour of the geometry primitives a record can carry.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Checks structural validity, e.g. that a ring is closed and has enough vertices.
	fn verify(&self) -> Result<()>;

	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` for an empty geometry.
	fn compute_bounds(&self) -> Option<[f64; 4]>;
}
