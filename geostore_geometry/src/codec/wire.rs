//! Conversion between [`GeoRecord`] and the caller-facing JSON shape.
//!
//! Callers speak latitude first:
//!
//! - a point is `{"id", "name", "lat", "lon"}`
//! - a polygon is `{"id", "name", "coordinates": [[lat, lon], ...]}`
//!
//! Records hold longitude first. [`to_storage_order`] and [`to_wire_order`] are
//! the only places in the workspace that swap the axes.
//!
//! The shape of an untyped payload is sniffed structurally: a `lat` key makes it
//! a point, otherwise a `coordinates` key makes it a polygon.

use super::DecodeError;
use crate::{Coordinates, GeoRecord, Geometry, PointGeometry, PolygonGeometry, RingGeometry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

/// Caller-facing representation of a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordView {
	Point {
		id: String,
		name: String,
		lat: f64,
		lon: f64,
	},
	Polygon {
		id: String,
		name: String,
		coordinates: Vec<[f64; 2]>,
	},
}

impl RecordView {
	pub fn id(&self) -> &str {
		match self {
			RecordView::Point { id, .. } | RecordView::Polygon { id, .. } => id,
		}
	}
}

/// Validates an untyped payload and normalizes it into a [`GeoRecord`].
///
/// Polygon rings are closed by appending a copy of the first vertex when the
/// caller left them open.
pub fn decode(input: &Value) -> Result<GeoRecord, DecodeError> {
	let object = input
		.as_object()
		.ok_or_else(|| DecodeError::invalid("payload must be a JSON object"))?;

	if object.contains_key("lat") {
		decode_point(object)
	} else if object.contains_key("coordinates") {
		decode_polygon(object)
	} else {
		Err(DecodeError::UnrecognizedGeometry)
	}
}

/// Converts a record back into the caller's axis order.
///
/// The closing vertex of a polygon ring is emitted as well.
pub fn encode(record: &GeoRecord) -> RecordView {
	let id = record.id.clone();
	let name = record.name.clone();
	match &record.geometry {
		Geometry::Point(point) => {
			let [lat, lon] = to_wire_order(point.as_coord());
			RecordView::Point { id, name, lat, lon }
		}
		Geometry::Polygon(polygon) => RecordView::Polygon {
			id,
			name,
			coordinates: polygon.exterior().as_slice().iter().map(to_wire_order).collect(),
		},
	}
}

/// `(lat, lon)` as received from a caller → stored `(lon, lat)`.
pub fn to_storage_order(lat: f64, lon: f64) -> Coordinates {
	Coordinates::new(lon, lat)
}

/// Stored `(lon, lat)` → `[lat, lon]` as sent to a caller.
pub fn to_wire_order(c: &Coordinates) -> [f64; 2] {
	[c.y(), c.x()]
}

fn decode_point(object: &JsonObject) -> Result<GeoRecord, DecodeError> {
	let (id, name) = decode_identity(object)?;
	let lat = required_number(object, "lat")?;
	let lon = required_number(object, "lon")?;
	check_position(lat, lon, "")?;

	log::trace!("decoded point '{id}' at lat={lat} lon={lon}");

	Ok(GeoRecord::new(
		id,
		name,
		Geometry::Point(PointGeometry::new(to_storage_order(lat, lon))),
	))
}

fn decode_polygon(object: &JsonObject) -> Result<GeoRecord, DecodeError> {
	let (id, name) = decode_identity(object)?;

	let pairs = object
		.get("coordinates")
		.and_then(Value::as_array)
		.ok_or_else(|| DecodeError::invalid("field 'coordinates' must be an array of [lat, lon] pairs"))?;

	if pairs.is_empty() {
		return Err(DecodeError::invalid("field 'coordinates' must not be empty"));
	}

	let mut ring = RingGeometry::new();
	for (index, pair) in pairs.iter().enumerate() {
		let [lat, lon] = decode_pair(pair, index)?;
		ring.push(to_storage_order(lat, lon));
	}

	if pairs.len() < 3 {
		return Err(DecodeError::DegenerateGeometry {
			vertices: ring.distinct_vertices(),
		});
	}

	if ring.close() {
		log::trace!("closed ring of polygon '{id}'");
	}

	let vertices = ring.distinct_vertices();
	if vertices < 3 {
		return Err(DecodeError::DegenerateGeometry { vertices });
	}

	Ok(GeoRecord::new(id, name, Geometry::Polygon(PolygonGeometry::new(ring))))
}

fn decode_identity(object: &JsonObject) -> Result<(String, String), DecodeError> {
	Ok((
		required_string(object, "id")?,
		required_string(object, "name")?,
	))
}

fn decode_pair(pair: &Value, index: usize) -> Result<[f64; 2], DecodeError> {
	let values = match pair.as_array() {
		Some(values) if values.len() == 2 => values,
		_ => {
			return Err(DecodeError::invalid(format!(
				"coordinates[{index}] must be a [lat, lon] pair"
			)));
		}
	};

	let lat = values[0]
		.as_f64()
		.ok_or_else(|| DecodeError::invalid(format!("coordinates[{index}][0] must be a number")))?;
	let lon = values[1]
		.as_f64()
		.ok_or_else(|| DecodeError::invalid(format!("coordinates[{index}][1] must be a number")))?;

	check_position(lat, lon, &format!("coordinates[{index}]: "))?;
	Ok([lat, lon])
}

fn check_position(lat: f64, lon: f64, prefix: &str) -> Result<(), DecodeError> {
	if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
		return Err(DecodeError::invalid(format!(
			"{prefix}latitude {lat} is outside [-90, 90]"
		)));
	}
	if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
		return Err(DecodeError::invalid(format!(
			"{prefix}longitude {lon} is outside [-180, 180]"
		)));
	}
	Ok(())
}

fn required_string(object: &JsonObject, key: &str) -> Result<String, DecodeError> {
	match object.get(key) {
		None | Some(Value::Null) => Err(DecodeError::invalid(format!("field '{key}' is missing"))),
		Some(Value::String(s)) if s.is_empty() => {
			Err(DecodeError::invalid(format!("field '{key}' must not be empty")))
		}
		Some(Value::String(s)) => Ok(s.clone()),
		Some(_) => Err(DecodeError::invalid(format!("field '{key}' must be a string"))),
	}
}

fn required_number(object: &JsonObject, key: &str) -> Result<f64, DecodeError> {
	match object.get(key) {
		None | Some(Value::Null) => Err(DecodeError::invalid(format!("field '{key}' is missing"))),
		Some(value) => value
			.as_f64()
			.ok_or_else(|| DecodeError::invalid(format!("field '{key}' must be a number"))),
	}
}
