//! Conversion between [`GeoRecord`] and the persisted document layout.
//!
//! One document per record:
//!
//! ```json
//! {"_id": "g1", "name": "Zone", "geometry": {"type": "Polygon", "coordinates": [[[1, 1], [2, 1], [2, 2], [1, 1]]]}}
//! ```
//!
//! The geometry is GeoJSON and therefore longitude first, the same order the
//! model uses, so no axes are swapped here.

use crate::{Coordinates, GeoRecord, Geometry, GeometryTrait, PointGeometry, PolygonGeometry, RingGeometry};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
	#[serde(rename = "_id")]
	pub id: String,
	pub name: String,
	pub geometry: StoredGeometry,
}

/// GeoJSON geometry object, tagged by its `type` member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoredGeometry {
	Point { coordinates: [f64; 2] },
	Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl StoredDocument {
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).context("serializing stored document")
	}

	pub fn from_json(text: &str) -> Result<Self> {
		serde_json::from_str(text).context("parsing stored document")
	}

	/// Bounding box of the geometry as `[x_min, y_min, x_max, y_max]`.
	///
	/// Fails with the verification error when the geometry is invalid.
	pub fn bounds(&self) -> Result<[f64; 4]> {
		self
			.geometry
			.to_geometry()
			.with_context(|| format!("invalid geometry in document '{}'", self.id))?
			.compute_bounds()
			.with_context(|| format!("geometry of document '{}' has no bounding box", self.id))
	}
}

impl StoredGeometry {
	fn to_geometry(&self) -> Result<Geometry> {
		let geometry = match self {
			StoredGeometry::Point { coordinates } => {
				Geometry::Point(PointGeometry::new(Coordinates::from(*coordinates)))
			}
			StoredGeometry::Polygon { coordinates } => {
				ensure!(
					coordinates.len() == 1,
					"polygon must have exactly one ring, found {}",
					coordinates.len()
				);
				Geometry::Polygon(PolygonGeometry::new(RingGeometry::from(coordinates[0].clone())))
			}
		};
		geometry.verify()?;
		Ok(geometry)
	}
}

impl From<&Geometry> for StoredGeometry {
	fn from(geometry: &Geometry) -> Self {
		match geometry {
			Geometry::Point(point) => StoredGeometry::Point {
				coordinates: point.as_coord().as_array(),
			},
			Geometry::Polygon(polygon) => StoredGeometry::Polygon {
				coordinates: vec![polygon.exterior().as_slice().iter().map(Coordinates::as_array).collect()],
			},
		}
	}
}

impl From<&GeoRecord> for StoredDocument {
	fn from(record: &GeoRecord) -> Self {
		StoredDocument {
			id: record.id.clone(),
			name: record.name.clone(),
			geometry: StoredGeometry::from(&record.geometry),
		}
	}
}

impl TryFrom<StoredDocument> for GeoRecord {
	type Error = anyhow::Error;

	fn try_from(document: StoredDocument) -> Result<Self> {
		let geometry = document
			.geometry
			.to_geometry()
			.with_context(|| format!("invalid geometry in document '{}'", document.id))?;
		Ok(GeoRecord {
			id: document.id,
			name: document.name,
			geometry,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn zone() -> GeoRecord {
		GeoRecord::new(
			"g1",
			"Zone",
			Geometry::new_polygon(vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]]),
		)
	}

	#[test]
	fn point_layout() {
		let record = GeoRecord::new("p1", "Base", Geometry::new_point(35.0, 32.0));
		assert_eq!(
			StoredDocument::from(&record).to_json().unwrap(),
			r#"{"_id":"p1","name":"Base","geometry":{"type":"Point","coordinates":[35.0,32.0]}}"#
		);
	}

	#[test]
	fn polygon_layout() {
		assert_eq!(
			StoredDocument::from(&zone()).to_json().unwrap(),
			r#"{"_id":"g1","name":"Zone","geometry":{"type":"Polygon","coordinates":[[[1.0,1.0],[2.0,1.0],[2.0,2.0],[1.0,2.0],[1.0,1.0]]]}}"#
		);
	}

	#[test]
	fn document_back_to_record() {
		let text = StoredDocument::from(&zone()).to_json().unwrap();
		let record = GeoRecord::try_from(StoredDocument::from_json(&text).unwrap()).unwrap();
		assert_eq!(record, zone());
	}

	#[test]
	fn bounds() {
		assert_eq!(StoredDocument::from(&zone()).bounds().unwrap(), [1.0, 1.0, 2.0, 2.0]);
	}

	#[test]
	fn bounds_of_invalid_geometry_keeps_the_cause() {
		let document = StoredDocument {
			id: "o".into(),
			name: "Open".into(),
			geometry: StoredGeometry::Polygon {
				coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
			},
		};
		assert_eq!(
			format!("{:#}", document.bounds().unwrap_err()),
			"invalid geometry in document 'o': invalid exterior ring: Ring must be closed"
		);
	}

	#[test]
	fn unknown_geometry_type_is_rejected() {
		let text = r#"{"_id":"l","name":"Line","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}"#;
		assert!(StoredDocument::from_json(text).is_err());
	}

	#[test]
	fn open_ring_in_storage_is_rejected() {
		let text = r#"{"_id":"o","name":"Open","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1]]]}}"#;
		let document = StoredDocument::from_json(text).unwrap();
		let err = GeoRecord::try_from(document).unwrap_err();
		assert_eq!(
			format!("{err:#}"),
			"invalid geometry in document 'o': invalid exterior ring: Ring must be closed"
		);
	}

	#[test]
	fn holes_are_rejected() {
		let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
		let document = StoredDocument {
			id: "h".into(),
			name: "Holes".into(),
			geometry: StoredGeometry::Polygon {
				coordinates: vec![ring.clone(), ring],
			},
		};
		assert!(GeoRecord::try_from(document).is_err());
	}
}
