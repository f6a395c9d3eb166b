//! Run configuration for the hydrography map pipeline
//!
//! Everything the pipeline needs to know (where to read, where to write,
//! thresholds, tolerances, colors, branding) lives in [`PipelineConfig`].
//! Defaults reproduce the Rio Grande do Sul map; a JSON file may override
//! any subset of fields.

use crate::{
    core::{constants, geo::LatLng},
    layers::style::parse_hex_color,
    processing::simplify::Simplification,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory searched recursively for the hydrography dataset
    pub input_dir: PathBuf,
    /// Destination of the rendered HTML document
    pub output_path: PathBuf,
    /// Region fill ramp as `#rrggbb` strings, lowest region code first
    pub palette: Vec<String>,
    /// Rivers with planar length at or below this (degrees) are dropped
    pub length_threshold: f64,
    /// Douglas-Peucker tolerance for the primary network
    pub primary_tolerance: f64,
    /// Douglas-Peucker tolerance for the secondary network
    pub secondary_tolerance: f64,
    /// Flag image shown in the legend
    pub flag_url: String,
    /// Case-insensitive substring marking a primary river
    pub name_pattern: String,
    /// Name attribute candidates, probed in order
    pub name_fields: Vec<String>,
    /// File name fragments identifying the hydrography dataset
    pub hydrography_keywords: Vec<String>,
    /// Federative unit passed to the boundary provider
    pub state_code: String,
    /// Boundary vintage
    pub reference_year: u16,
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let (lat, lng) = constants::DEFAULT_CENTER;
        Self {
            input_dir: PathBuf::from(constants::DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            palette: constants::DEFAULT_REGION_PALETTE
                .iter()
                .map(|c| c.to_string())
                .collect(),
            length_threshold: constants::MIN_RIVER_LENGTH,
            primary_tolerance: constants::PRIMARY_TOLERANCE,
            secondary_tolerance: constants::SECONDARY_TOLERANCE,
            flag_url: constants::DEFAULT_FLAG_URL.to_string(),
            name_pattern: constants::PRIMARY_NAME_PATTERN.to_string(),
            name_fields: constants::NAME_FIELD_CANDIDATES
                .iter()
                .map(|f| f.to_string())
                .collect(),
            hydrography_keywords: constants::HYDROGRAPHY_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            state_code: constants::DEFAULT_STATE_CODE.to_string(),
            reference_year: constants::DEFAULT_REFERENCE_YEAR,
            center: LatLng::new(lat, lng),
            zoom: constants::DEFAULT_ZOOM,
        }
    }
}

impl PipelineConfig {
    /// Loads a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            MapError::Config(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.length_threshold > 0.0) {
            return Err(MapError::Config(format!(
                "length_threshold must be positive, got {}",
                self.length_threshold
            )));
        }
        for (name, value) in [
            ("primary_tolerance", self.primary_tolerance),
            ("secondary_tolerance", self.secondary_tolerance),
        ] {
            if !(value > 0.0) {
                return Err(MapError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(MapError::Config("palette needs at least one color".into()));
        }
        for color in &self.palette {
            if parse_hex_color(color).is_none() {
                return Err(MapError::Config(format!("invalid palette color {:?}", color)));
            }
        }
        if self.name_pattern.is_empty() {
            return Err(MapError::Config("name_pattern must not be empty".into()));
        }
        if self.name_fields.is_empty() {
            return Err(MapError::Config("name_fields must not be empty".into()));
        }
        if self.hydrography_keywords.is_empty() {
            return Err(MapError::Config(
                "hydrography_keywords must not be empty".into(),
            ));
        }
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center {:?} is outside EPSG:4326",
                self.center
            )));
        }
        Ok(())
    }

    pub fn simplification(&self) -> Simplification {
        Simplification {
            primary_tolerance: self.primary_tolerance,
            secondary_tolerance: self.secondary_tolerance,
        }
    }
}
