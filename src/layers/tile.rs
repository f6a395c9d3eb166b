use crate::{
    core::constants,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::html::script_json,
    Result,
};
use serde::{Deserialize, Serialize};

/// Leaflet tile layer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    /// Attribution text
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    pub max_zoom: u8,
    pub min_zoom: u8,
    /// Available subdomains for `{s}` in the template
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdomains: Vec<String>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            attribution: "© OpenStreetMap contributors".to_string(),
            tile_size: 256,
            max_zoom: 18,
            min_zoom: 0,
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }
    }
}

/// A raster basemap served from a `{z}/{x}/{y}` template.
#[derive(Debug, Clone)]
pub struct TileLayer {
    properties: LayerProperties,
    url_template: String,
    options: TileLayerOptions,
}

impl TileLayer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url_template: impl Into<String>,
        options: TileLayerOptions,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            url_template: url_template.into(),
            options,
        }
    }

    /// Esri World Imagery, listed as `Satélite`.
    pub fn satellite() -> Self {
        let options = TileLayerOptions {
            attribution: constants::SATELLITE_ATTRIBUTION.to_string(),
            max_zoom: 19,
            subdomains: vec![], // ArcGIS doesn't use subdomains
            ..TileLayerOptions::default()
        };
        Self::new("satelite", "Satélite", constants::SATELLITE_TILE_URL, options)
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);

    fn to_js(&self) -> Result<String> {
        Ok(format!(
            "L.tileLayer({}, {})",
            script_json(&self.url_template)?,
            script_json(&self.options)?
        ))
    }
}
