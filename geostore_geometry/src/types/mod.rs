// Geometry primitives a record can carry. Every pair is held in storage axis
// order (longitude, latitude); conversions to and from caller order live in
// `crate::codec::wire` only.

mod coordinates;
mod point;
mod polygon;
mod ring;
mod traits;

pub use coordinates::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
