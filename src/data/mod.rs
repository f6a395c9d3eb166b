//! Input side of the pipeline: dataset discovery, loading and reprojection.

pub mod boundary;
pub mod conversion;
pub mod discovery;
pub mod geojson;
pub mod hydrography;

pub use boundary::{Boundary, BoundaryProvider, GeoJsonFileProvider, Region};
#[cfg(feature = "ibge")]
pub use boundary::IbgeProvider;
pub use hydrography::{RiverDataset, RiverFeature};
