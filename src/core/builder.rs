//! Map builder for fluent API configuration
//!
//! Collects the view, the base layer, the overlays, controls and legend and
//! assembles them into a [`Map`] in one validated step.

use crate::{
    core::{
        geo::LatLng,
        map::{Map, MapOptions},
    },
    layers::{manager::LayerManager, tile::TileLayer},
    ui::{controls::Control, legend::Legend},
    MapError, Result,
};

/// Builder for creating and configuring Map instances
#[derive(Default)]
pub struct MapBuilder {
    /// View and document options
    map_options: MapOptions,
    /// Base layer, added beneath every overlay
    tile_layer: Option<TileLayer>,
    /// Overlays, already ordered by plane
    layers: Option<LayerManager>,
    controls: Vec<Control>,
    legend: Option<Legend>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: u8) -> Self {
        self.map_options.center = center;
        self.map_options.zoom = zoom;
        self
    }

    /// Set the base layer
    pub fn with_tile_layer(mut self, layer: TileLayer) -> Self {
        self.tile_layer = Some(layer);
        self
    }

    /// Set the overlays
    pub fn with_layers(mut self, layers: LayerManager) -> Self {
        self.layers = Some(layers);
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Build the configured map
    pub fn build(self) -> Result<Map> {
        let center = self.map_options.center;
        if !center.is_valid() {
            return Err(MapError::Config(format!(
                "map center out of range: {}, {}",
                center.lat, center.lng
            )));
        }

        let mut map = Map::new(self.map_options);
        if let Some(tile_layer) = self.tile_layer {
            map.add_layer(Box::new(tile_layer))?;
        }
        if let Some(layers) = self.layers {
            for layer in layers.into_layers() {
                map.add_layer(layer)?;
            }
        }
        for control in self.controls {
            map.add_control(control);
        }
        if let Some(legend) = self.legend {
            map.set_legend(legend);
        }
        Ok(map)
    }
}
