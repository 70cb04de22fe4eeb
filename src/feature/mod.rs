mod geojson;

pub use geojson::{geometry_from_geojson, geometry_to_geojson};

use std::fmt;
use std::ops::Deref;

use serde_json::Value;

use crate::geometry::{empty_multi_polygon, normalize, Geometry, MultiPolygon};

/// Identifier value a caller passes to mean "no identifier yet".
pub const SENTINEL_ID: i64 = -1;

/// Free-form property bag attached to a feature.
pub type Properties = serde_json::Map<String, Value>;

/// Identifier of a boundary feature.
///
/// Uniqueness is the caller's concern. Numeric ids order before text ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureId {
    Number(i64),
    Text(String),
}

impl FeatureId {
    /// Maps the `-1` sentinel to `0` and leaves everything else alone.
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            Self::Number(SENTINEL_ID) => Self::Number(0),
            other => other,
        }
    }

    /// JSON representation, as stored in a property bag.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A geometry with an identifier and a property bag.
///
/// Features are values: editing operations build new features instead of
/// mutating their inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    /// Builds a feature through the factory rules.
    ///
    /// Non-polygonal geometry is replaced by an empty multi-polygon, the `-1`
    /// sentinel id becomes `0`, and the id is injected into `properties` as
    /// `"id"` unless the bag already defines one.
    #[must_use]
    pub fn new(geometry: &Geometry, mut properties: Properties, id: Option<FeatureId>) -> Self {
        let geometry =
            Geometry::MultiPolygon(normalize(geometry).unwrap_or_else(empty_multi_polygon));
        let id = id.map(FeatureId::resolve);
        if let Some(id) = &id {
            properties.entry("id").or_insert_with(|| id.to_value());
        }
        Self {
            id,
            geometry,
            properties,
        }
    }

    /// Wraps an already canonical geometry without touching id or properties.
    ///
    /// Used for features derived by the editing operations, which carry
    /// either an inherited identity or none at all.
    #[must_use]
    pub fn from_parts(multi: MultiPolygon, properties: Properties, id: Option<FeatureId>) -> Self {
        Self {
            id,
            geometry: Geometry::MultiPolygon(multi),
            properties,
        }
    }

    /// Feature with no identity and an empty property bag.
    #[must_use]
    pub fn anonymous(multi: MultiPolygon) -> Self {
        Self::from_parts(multi, Properties::new(), None)
    }

    /// The geometry in canonical multi-polygon form, if it is polygonal.
    #[must_use]
    pub fn multi_polygon(&self) -> Option<MultiPolygon> {
        normalize(&self.geometry)
    }

    /// Returns `true` when the property named `key` is truthy.
    #[must_use]
    pub fn is_fixed(&self, key: &str) -> bool {
        self.properties.get(key).is_some_and(is_truthy)
    }
}

/// Builds a feature; see [`Feature::new`].
#[must_use]
pub fn make_feature(geometry: &Geometry, properties: Properties, id: Option<FeatureId>) -> Feature {
    Feature::new(geometry, properties, id)
}

/// JavaScript truthiness of a JSON value.
///
/// `false`, `null`, `0`, `NaN` and `""` are falsy; arrays and objects are
/// always truthy, even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Ordered sequence of features.
///
/// Neither id uniqueness nor non-overlap is enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl Deref for FeatureCollection {
    type Target = [Feature];

    fn deref(&self) -> &Self::Target {
        &self.features
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
