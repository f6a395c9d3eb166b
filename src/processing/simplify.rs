use crate::{
    data::hydrography::RiverFeature,
    processing::classify::ClassifiedRivers,
};
use geo::Simplify;
use serde::{Deserialize, Serialize};

/// Douglas-Peucker tolerances, in coordinate units, per river class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Simplification {
    pub primary_tolerance: f64,
    pub secondary_tolerance: f64,
}

impl Default for Simplification {
    fn default() -> Self {
        Self {
            primary_tolerance: crate::core::constants::PRIMARY_TOLERANCE,
            secondary_tolerance: crate::core::constants::SECONDARY_TOLERANCE,
        }
    }
}

/// Simplifies every feature's geometry at `tolerance`, keeping attributes.
pub fn simplify_features(features: Vec<RiverFeature>, tolerance: f64) -> Vec<RiverFeature> {
    features
        .into_iter()
        .map(|feature| RiverFeature {
            geometry: feature.geometry.simplify(&tolerance),
            attributes: feature.attributes,
        })
        .collect()
}

/// Simplifies each class at its own tolerance.
pub fn simplify_classified(
    classified: ClassifiedRivers,
    simplification: &Simplification,
) -> ClassifiedRivers {
    let vertices_before: usize = classified
        .primary
        .iter()
        .chain(&classified.secondary)
        .map(RiverFeature::vertex_count)
        .sum();

    let simplified = ClassifiedRivers {
        primary: simplify_features(classified.primary, simplification.primary_tolerance),
        secondary: simplify_features(classified.secondary, simplification.secondary_tolerance),
        name_field: classified.name_field,
    };

    let vertices_after: usize = simplified
        .primary
        .iter()
        .chain(&simplified.secondary)
        .map(RiverFeature::vertex_count)
        .sum();
    log::debug!(
        "simplification: {} -> {} vertices",
        vertices_before,
        vertices_after
    );

    simplified
}
