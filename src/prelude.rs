//! Prelude module for common rivermap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use rivermap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::PipelineConfig,
    geo::{LatLng, LatLngBounds},
    map::Map,
};

pub use crate::data::{
    boundary::{Boundary, BoundaryProvider, GeoJsonFileProvider, Region},
    geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry, Properties},
    hydrography::{RiverDataset, RiverFeature},
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    composer::LayerComposer,
    manager::LayerManager,
    pane::StackingPlane,
    style::{LinearColormap, PathStyle, StyleRule, Tooltip},
    tile::TileLayer,
    vector::VectorLayer,
};

pub use crate::processing::{
    classify::{ClassifiedRivers, NamePatternClassifier, RiverClassifier},
    filter::LengthFilterOutcome,
    simplify::Simplification,
};

pub use crate::ui::{
    controls::{Control, Position},
    legend::{Legend, LegendEntry, Swatch},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
