//! # rivermap
//!
//! Builds a layered hydrography map for a single state: river lines are
//! discovered on disk, clipped to the state boundary, filtered by length,
//! split into primary and secondary networks and rendered, together with a
//! regional overlay and an outside-the-state shadow mask, into one
//! self-contained Leaflet document.
//!
//! The crate is organised the way the data flows:
//! [`data`] (sources) -> [`processing`] (filter, classify, simplify) ->
//! [`layers`] (stacked, styled layers) -> [`crate::core::map`] + [`rendering`]
//! (the map shell and its HTML serialization). [`pipeline::run`] wires the
//! stages together.

pub mod core;
pub mod data;
pub mod error;
pub mod layers;
pub mod pipeline;
pub mod prelude;
pub mod processing;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::PipelineConfig,
    geo::{LatLng, LatLngBounds},
    map::Map,
};

pub use data::{
    boundary::{Boundary, BoundaryProvider, GeoJsonFileProvider, Region},
    hydrography::{RiverDataset, RiverFeature},
};

#[cfg(feature = "ibge")]
pub use data::boundary::IbgeProvider;

pub use layers::{
    base::LayerTrait, composer::LayerComposer, manager::LayerManager, pane::StackingPlane,
    tile::TileLayer, vector::VectorLayer,
};

pub use processing::classify::{ClassifiedRivers, NamePatternClassifier, RiverClassifier};

pub use pipeline::{run, PipelineReport};

pub use error::{Error, MapError, Result};
