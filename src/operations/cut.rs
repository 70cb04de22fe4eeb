use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::explode::split_parts;
use super::order::order_parts;
use crate::feature::Feature;
use crate::geometry::{empty_multi_polygon, normalize, GeoOps, Geometry, MultiPolygon, PolygonOps};

/// Property that marks a feature as immutable by default.
pub const DEFAULT_FIXED_KEY: &str = "isFixed";

/// Which remnant of an eroded feature keeps the feature's identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryRemnant {
    /// The first polygon produced by the difference primitive.
    #[default]
    Positional,
    /// The leftmost remnant by centroid, then bottom-most.
    LeftToRight,
}

/// Parameters controlling a [`Cut`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutParams {
    /// Property whose truthy value protects a feature from erosion.
    pub fixed_key: String,
    /// How the identity-keeping remnant is chosen.
    pub primary_remnant: PrimaryRemnant,
}

impl Default for CutParams {
    fn default() -> Self {
        Self {
            fixed_key: DEFAULT_FIXED_KEY.to_owned(),
            primary_remnant: PrimaryRemnant::default(),
        }
    }
}

/// Carves a cutter geometry out of a set of source features.
///
/// For every source the cutter overlaps:
/// 1. a fixed source is kept as is;
/// 2. otherwise the overlap is subtracted and each disjoint remnant becomes
///    its own feature, the primary remnant inheriting id and properties;
/// 3. the overlap itself is appended as a new feature with no id and no
///    properties.
///
/// Sources the cutter misses pass through untouched. Output keeps source
/// order, with everything derived from one source kept contiguous.
pub struct Cut<'a, O = GeoOps> {
    sources: &'a [Feature],
    cutter: &'a Geometry,
    params: CutParams,
    ops: O,
}

impl<'a> Cut<'a> {
    /// Creates a new `Cut` operation with default parameters.
    #[must_use]
    pub fn new(sources: &'a [Feature], cutter: &'a Geometry) -> Self {
        Self {
            sources,
            cutter,
            params: CutParams::default(),
            ops: GeoOps,
        }
    }
}

impl<'a, O: PolygonOps> Cut<'a, O> {
    /// Sets custom cut parameters.
    #[must_use]
    pub fn with_params(mut self, params: CutParams) -> Self {
        self.params = params;
        self
    }

    /// Uses a different set of geometric primitives.
    #[must_use]
    pub fn with_ops<P: PolygonOps>(self, ops: P) -> Cut<'a, P> {
        Cut {
            sources: self.sources,
            cutter: self.cutter,
            params: self.params,
            ops,
        }
    }

    /// Executes the cut.
    ///
    /// Returns `None` when there is nothing to do: the cutter is not
    /// polygonal, overlaps no source, or the result equals the input.
    #[must_use]
    pub fn execute(&self) -> Option<Vec<Feature>> {
        let Some(cutter) = normalize(self.cutter) else {
            debug!("cutter is not polygonal");
            return None;
        };

        let overlaps: Vec<Option<MultiPolygon>> = self
            .sources
            .iter()
            .map(|source| {
                source
                    .multi_polygon()
                    .and_then(|shape| self.ops.intersection(&cutter, &shape))
            })
            .collect();

        let overlapping = overlaps.iter().filter(|o| o.is_some()).count();
        if overlapping == 0 {
            debug!(sources = self.sources.len(), "cutter overlaps no source");
            return None;
        }
        debug!(sources = self.sources.len(), overlapping, "cutting");

        let output: Vec<Feature> = self
            .sources
            .iter()
            .zip(overlaps)
            .flat_map(|(source, overlap)| match overlap {
                Some(overlap) => self.carve(source, overlap),
                None => vec![source.clone()],
            })
            .collect();

        if output.as_slice() == self.sources {
            debug!("cut left every source unchanged");
            return None;
        }
        Some(output)
    }

    /// Features replacing one overlapped source: its remnants, then the
    /// overlap.
    fn carve(&self, source: &Feature, overlap: MultiPolygon) -> Vec<Feature> {
        if source.is_fixed(&self.params.fixed_key) {
            trace!(id = ?source.id, "fixed source keeps its shape");
            return vec![source.clone(), Feature::anonymous(overlap)];
        }

        let remainder = source
            .multi_polygon()
            .and_then(|shape| self.ops.difference(&shape, &overlap))
            .unwrap_or_else(empty_multi_polygon);
        let remainder = match self.params.primary_remnant {
            PrimaryRemnant::Positional => remainder,
            PrimaryRemnant::LeftToRight => order_parts(remainder, &self.ops),
        };

        let mut pieces = split_parts(remainder, source.properties.clone(), source.id.clone());
        trace!(id = ?source.id, remnants = pieces.len(), "eroded source");
        pieces.push(Feature::anonymous(overlap));
        pieces
    }
}

/// Cuts `cutter` out of `sources` with default parameters; see [`Cut`].
#[must_use]
pub fn cut(sources: &[Feature], cutter: &Geometry) -> Option<Vec<Feature>> {
    Cut::new(sources, cutter).execute()
}
