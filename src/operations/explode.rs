use crate::feature::{Feature, FeatureId, Properties};
use crate::geometry::MultiPolygon;

/// Splits a multi-part feature into one feature per polygon.
///
/// The first part keeps the feature's id and properties; every later part
/// becomes a new feature with no id and no properties. A feature whose
/// geometry is not polygonal is returned unchanged, and an empty
/// multi-polygon yields no features.
#[must_use]
pub fn explode(feature: &Feature) -> Vec<Feature> {
    match feature.multi_polygon() {
        Some(multi) => split_parts(multi, feature.properties.clone(), feature.id.clone()),
        None => vec![feature.clone()],
    }
}

pub(crate) fn split_parts(
    multi: MultiPolygon,
    properties: Properties,
    id: Option<FeatureId>,
) -> Vec<Feature> {
    let mut parts = multi.0.into_iter();
    let Some(first) = parts.next() else {
        return Vec::new();
    };
    std::iter::once(Feature::from_parts(
        MultiPolygon::new(vec![first]),
        properties,
        id,
    ))
    .chain(parts.map(|polygon| Feature::anonymous(MultiPolygon::new(vec![polygon]))))
    .collect()
}
