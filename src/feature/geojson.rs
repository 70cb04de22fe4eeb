//! GeoJSON reading and writing for features and collections.
//!
//! Features read from GeoJSON go through the feature factory, so the id
//! sentinel and `properties.id` injection apply on import.

use geo::{GeometryCollection, LineString, MultiLineString, MultiPoint};
use serde_json::{json, Map, Value};

use super::{Feature, FeatureCollection, FeatureId, Properties};
use crate::error::{FormatError, Result};
use crate::geometry::{empty_multi_polygon, Coord, Geometry, MultiPolygon, Point, Polygon};

impl Feature {
    /// Reads a GeoJSON `Feature` object.
    ///
    /// A `null` geometry yields an empty multi-polygon.
    ///
    /// The result is built with [`Feature::new`], so this is not an exact
    /// inverse of [`Feature::to_geojson`] for features built with
    /// [`Feature::from_parts`]: an id without a matching `properties.id`
    /// gains one on import.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the object is not a well-formed feature.
    pub fn from_geojson(value: &Value) -> Result<Self> {
        let object = as_object(value, "feature")?;
        expect_type(object, "Feature")?;

        let geometry = match object.get("geometry") {
            None => return Err(FormatError::MissingField("geometry").into()),
            Some(Value::Null) => Geometry::MultiPolygon(empty_multi_polygon()),
            Some(geometry) => geometry_from_geojson(geometry)?,
        };

        let properties = match object.get("properties") {
            None | Some(Value::Null) => Properties::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(FormatError::InvalidType {
                    field: "properties",
                    expected: "object",
                }
                .into())
            }
        };

        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(FeatureId::Text(s.clone())),
            Some(Value::Number(n)) => Some(FeatureId::Number(
                n.as_i64()
                    .ok_or_else(|| FormatError::InvalidId(n.to_string()))?,
            )),
            Some(other) => return Err(FormatError::InvalidId(other.to_string()).into()),
        };

        Ok(Self::new(&geometry, properties, id))
    }

    /// Writes the feature as a GeoJSON `Feature` object.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_owned(), Value::from("Feature"));
        if let Some(id) = &self.id {
            object.insert("id".to_owned(), id.to_value());
        }
        object.insert("geometry".to_owned(), geometry_to_geojson(&self.geometry));
        object.insert(
            "properties".to_owned(),
            Value::Object(self.properties.clone()),
        );
        Value::Object(object)
    }
}

impl FeatureCollection {
    /// Reads a GeoJSON `FeatureCollection` object.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the collection or any feature is malformed.
    pub fn from_geojson(value: &Value) -> Result<Self> {
        let object = as_object(value, "feature collection")?;
        expect_type(object, "FeatureCollection")?;
        let features = object
            .get("features")
            .ok_or(FormatError::MissingField("features"))?;
        as_array(features, "features")?
            .iter()
            .map(Feature::from_geojson)
            .collect()
    }

    /// Parses a GeoJSON `FeatureCollection` document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a feature collection.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_geojson(&value)
    }

    /// Writes the collection as a GeoJSON `FeatureCollection` object.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": self.features.iter().map(Feature::to_geojson).collect::<Vec<_>>(),
        })
    }
}

/// Reads a GeoJSON geometry object.
///
/// # Errors
///
/// Returns [`FormatError`] for unknown geometry types or malformed
/// coordinates.
pub fn geometry_from_geojson(value: &Value) -> Result<Geometry> {
    let object = as_object(value, "geometry")?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingField("type"))?;

    if kind == "GeometryCollection" {
        let members = object
            .get("geometries")
            .ok_or(FormatError::MissingField("geometries"))?;
        let geometries = as_array(members, "geometries")?
            .iter()
            .map(geometry_from_geojson)
            .collect::<Result<Vec<_>>>()?;
        return Ok(Geometry::GeometryCollection(GeometryCollection(geometries)));
    }

    let coords = object
        .get("coordinates")
        .ok_or(FormatError::MissingField("coordinates"))?;
    let geometry = match kind {
        "Point" => Geometry::Point(Point::from(position(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint::new(
            positions(coords)?.into_iter().map(Point::from).collect(),
        )),
        "LineString" => Geometry::LineString(LineString::new(positions(coords)?)),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString::new(
            as_array(coords, "coordinates")?
                .iter()
                .map(|line| positions(line).map(LineString::new))
                .collect::<Result<Vec<_>>>()?,
        )),
        "Polygon" => Geometry::Polygon(polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon::new(
            as_array(coords, "coordinates")?
                .iter()
                .map(polygon)
                .collect::<Result<Vec<_>>>()?,
        )),
        other => return Err(FormatError::UnsupportedGeometry(other.to_owned()).into()),
    };
    Ok(geometry)
}

/// Writes a geometry as a GeoJSON geometry object.
///
/// `Line`, `Rect` and `Triangle` have no GeoJSON type of their own and are
/// written as `LineString` and `Polygon`.
#[must_use]
pub fn geometry_to_geojson(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Point(p) => json!({ "type": "Point", "coordinates": coord_value(p.0) }),
        Geometry::MultiPoint(mp) => json!({
            "type": "MultiPoint",
            "coordinates": mp.iter().map(|p| coord_value(p.0)).collect::<Vec<_>>(),
        }),
        Geometry::Line(line) => json!({
            "type": "LineString",
            "coordinates": [coord_value(line.start), coord_value(line.end)],
        }),
        Geometry::LineString(ls) => json!({ "type": "LineString", "coordinates": ring_value(ls) }),
        Geometry::MultiLineString(mls) => json!({
            "type": "MultiLineString",
            "coordinates": mls.iter().map(ring_value).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(p) => json!({ "type": "Polygon", "coordinates": polygon_value(p) }),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.iter().map(polygon_value).collect::<Vec<_>>(),
        }),
        Geometry::GeometryCollection(gc) => json!({
            "type": "GeometryCollection",
            "geometries": gc.iter().map(geometry_to_geojson).collect::<Vec<_>>(),
        }),
        Geometry::Rect(rect) => {
            json!({ "type": "Polygon", "coordinates": polygon_value(&rect.to_polygon()) })
        }
        Geometry::Triangle(tri) => {
            json!({ "type": "Polygon", "coordinates": polygon_value(&tri.to_polygon()) })
        }
    }
}

fn as_object<'a>(value: &'a Value, field: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        FormatError::InvalidType {
            field,
            expected: "object",
        }
        .into()
    })
}

fn as_array<'a>(value: &'a Value, field: &'static str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        FormatError::InvalidType {
            field,
            expected: "array",
        }
        .into()
    })
}

fn expect_type(object: &Map<String, Value>, expected: &'static str) -> Result<()> {
    match object.get("type").and_then(Value::as_str) {
        Some(kind) if kind == expected => Ok(()),
        Some(_) => Err(FormatError::InvalidType {
            field: "type",
            expected,
        }
        .into()),
        None => Err(FormatError::MissingField("type").into()),
    }
}

/// A position is `[x, y, ...]`; further ordinates are ignored.
fn position(value: &Value) -> Result<Coord> {
    let invalid = || FormatError::InvalidCoordinate(value.to_string());
    let ordinates = value.as_array().ok_or_else(invalid)?;
    match ordinates.as_slice() {
        [x, y, ..] => {
            let x = x.as_f64().ok_or_else(invalid)?;
            let y = y.as_f64().ok_or_else(invalid)?;
            Ok(Coord { x, y })
        }
        _ => Err(invalid().into()),
    }
}

fn positions(value: &Value) -> Result<Vec<Coord>> {
    as_array(value, "coordinates")?
        .iter()
        .map(position)
        .collect()
}

fn polygon(value: &Value) -> Result<Polygon> {
    let mut rings = as_array(value, "coordinates")?
        .iter()
        .map(|ring| positions(ring).map(LineString::new))
        .collect::<Result<Vec<_>>>()?;
    if rings.is_empty() {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    }
    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, rings))
}

fn coord_value(c: Coord) -> Value {
    json!([c.x, c.y])
}

fn ring_value(ring: &LineString<f64>) -> Value {
    Value::Array(ring.coords().map(|c| coord_value(*c)).collect())
}

fn polygon_value(polygon: &Polygon) -> Value {
    let mut rings = vec![ring_value(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_value));
    Value::Array(rings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BoundaryError;

    fn square_feature(id: Value) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[5.0, 5.0], [10.0, 5.0], [10.0, 10.0], [5.0, 10.0], [5.0, 5.0]]],
            },
            "properties": { "name": "A" },
        })
    }

    #[test]
    fn reads_polygon_feature_through_factory() {
        let feature = Feature::from_geojson(&square_feature(json!(-1))).unwrap();
        assert_eq!(feature.id, Some(FeatureId::Number(0)));
        assert_eq!(feature.properties.get("id"), Some(&json!(0)));
        assert_eq!(feature.properties.get("name"), Some(&json!("A")));
        let multi = feature.multi_polygon().unwrap();
        assert_eq!(multi.0.len(), 1);
        assert_eq!(multi.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn reads_string_id() {
        let feature = Feature::from_geojson(&square_feature(json!("zone-7"))).unwrap();
        assert_eq!(feature.id, Some(FeatureId::Text("zone-7".to_owned())));
    }

    #[test]
    fn null_geometry_is_empty() {
        let value = json!({ "type": "Feature", "geometry": null, "properties": null });
        let feature = Feature::from_geojson(&value).unwrap();
        assert_eq!(feature.geometry, Geometry::MultiPolygon(empty_multi_polygon()));
        assert!(feature.properties.is_empty());
        assert!(feature.id.is_none());
    }

    #[test]
    fn missing_geometry_is_an_error() {
        let value = json!({ "type": "Feature", "properties": {} });
        let err = Feature::from_geojson(&value).unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::Format(FormatError::MissingField("geometry"))
        ));
    }

    #[test]
    fn fractional_id_is_rejected() {
        let err = Feature::from_geojson(&square_feature(json!(1.5))).unwrap_err();
        assert!(matches!(err, BoundaryError::Format(FormatError::InvalidId(_))));
    }

    #[test]
    fn short_position_is_rejected() {
        let value = json!({ "type": "Point", "coordinates": [1.0] });
        let err = geometry_from_geojson(&value).unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::Format(FormatError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn unknown_geometry_type_is_rejected() {
        let value = json!({ "type": "Circle", "coordinates": [0.0, 0.0] });
        let err = geometry_from_geojson(&value).unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::Format(FormatError::UnsupportedGeometry(_))
        ));
    }

    #[test]
    fn reads_non_polygonal_geometry() {
        let point = geometry_from_geojson(&json!({ "type": "Point", "coordinates": [1.0, 2.0, 3.0] }))
            .unwrap();
        assert_eq!(point, Geometry::Point(Point::new(1.0, 2.0)));

        let collection = geometry_from_geojson(&json!({
            "type": "GeometryCollection",
            "geometries": [{ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }],
        }))
        .unwrap();
        assert!(matches!(collection, Geometry::GeometryCollection(ref gc) if gc.0.len() == 1));
    }

    #[test]
    fn polygon_holes_are_kept() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]],
            ],
        });
        let Geometry::Polygon(polygon) = geometry_from_geojson(&value).unwrap() else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.interiors().len(), 1);
        assert_eq!(geometry_to_geojson(&Geometry::Polygon(polygon)), value);
    }

    #[test]
    fn writes_feature() {
        let feature = Feature::from_geojson(&square_feature(json!(3))).unwrap();
        let written = feature.to_geojson();
        assert_eq!(written["type"], json!("Feature"));
        assert_eq!(written["id"], json!(3));
        assert_eq!(written["geometry"]["type"], json!("MultiPolygon"));
        assert_eq!(written["properties"]["name"], json!("A"));
        assert_eq!(Feature::from_geojson(&written).unwrap(), feature);
    }

    #[test]
    fn reimported_remnant_gains_property_id() {
        let exterior = LineString::from(vec![(5.0, 5.0), (7.5, 5.0), (7.5, 10.0), (5.0, 10.0), (5.0, 5.0)]);
        let mut properties = Properties::new();
        properties.insert("name".to_owned(), json!("A"));
        let remnant = Feature::from_parts(
            MultiPolygon::new(vec![Polygon::new(exterior, vec![])]),
            properties,
            Some(FeatureId::Number(4)),
        );
        assert!(!remnant.properties.contains_key("id"));

        let reimported = Feature::from_geojson(&remnant.to_geojson()).unwrap();
        assert_eq!(reimported.id, remnant.id);
        assert_eq!(reimported.geometry, remnant.geometry);
        assert_eq!(reimported.properties.get("id"), Some(&json!(4)));
        assert_eq!(reimported.properties.get("name"), Some(&json!("A")));
        assert_ne!(reimported, remnant);
    }

    #[test]
    fn anonymous_feature_omits_id() {
        let feature = Feature::anonymous(empty_multi_polygon());
        let written = feature.to_geojson();
        assert!(written.get("id").is_none());
    }

    #[test]
    fn reads_collection_text() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [square_feature(json!(1)), square_feature(json!(2))],
        })
        .to_string();
        let collection = FeatureCollection::from_geojson_str(&text).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection[1].id, Some(FeatureId::Number(2)));
        assert_eq!(collection.to_geojson()["features"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn invalid_json_text() {
        let err = FeatureCollection::from_geojson_str("{ not json").unwrap_err();
        assert!(matches!(err, BoundaryError::Json(_)));
    }

    #[test]
    fn wrong_document_type() {
        let err = FeatureCollection::from_geojson(&square_feature(json!(1))).unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::Format(FormatError::InvalidType { field: "type", .. })
        ));
    }
}
