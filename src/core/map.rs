use crate::{
    core::{constants, geo::LatLng},
    layers::{base::LayerTrait, manager::LayerManager, pane::StackingPlane},
    rendering::html,
    ui::{controls::Control, legend::Legend},
    Result,
};
use std::{collections::BTreeSet, path::Path};

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    /// Draw vectors on a canvas instead of SVG; much faster for dense
    /// river networks
    pub prefer_canvas: bool,
    /// Document title
    pub title: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        let (lat, lng) = constants::DEFAULT_CENTER;
        Self {
            center: LatLng::new(lat, lng),
            zoom: constants::DEFAULT_ZOOM,
            prefer_canvas: true,
            title: "Hidrografia do Rio Grande do Sul".to_string(),
        }
    }
}

/// The map document: view options, layers in render order, controls and an
/// optional legend. Built by [`MapBuilder`](crate::core::builder::MapBuilder)
/// and serialized with [`Map::to_html`].
pub struct Map {
    options: MapOptions,
    layers: LayerManager,
    controls: Vec<Control>,
    legend: Option<Legend>,
}

impl Map {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            layers: LayerManager::new(),
            controls: Vec::new(),
            legend: None,
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layers.add_layer(layer)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn list_layers(&self) -> &[String] {
        self.layers.list_layers()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Stacking planes used by at least one layer, lowest first.
    pub fn panes(&self) -> Vec<StackingPlane> {
        self.layers
            .layers()
            .iter()
            .filter_map(|l| l.pane())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn to_html(&self) -> Result<String> {
        html::render_document(self)
    }

    /// Renders and writes the document. On failure nothing is left at
    /// `path` that was not there before.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let document = self.to_html()?;
        html::write_document(path.as_ref(), &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::geojson::{GeoJsonFeature, GeoJsonGeometry, Properties},
        layers::{style::PathStyle, style::StyleRule, tile::TileLayer, vector::VectorLayer},
    };
    use geo::{line_string, MultiLineString};

    fn sample_map() -> Map {
        let mut map = Map::new(MapOptions::default());
        map.add_layer(Box::new(TileLayer::satellite())).unwrap();
        map.add_layer(Box::new(
            VectorLayer::new("borda", "Borda", StackingPlane::Border)
                .listed(false)
                .interactive(false),
        ))
        .unwrap();
        let line = MultiLineString::new(vec![line_string![(x: -53.0, y: -30.0), (x: -52.9, y: -30.1)]]);
        map.add_layer(Box::new(
            VectorLayer::new("rede_secundaria", "Rede Secundária", StackingPlane::SecondaryRivers)
                .with_features(Some(GeoJsonFeature::new(
                    GeoJsonGeometry::from(&line),
                    Properties::new(),
                )))
                .with_style(StyleRule::Fixed(PathStyle::new().color("#00BFFF")))
                .shown(false),
        ))
        .unwrap();
        map.add_control(Control::layer_control());
        map.add_control(Control::fullscreen());
        map
    }

    #[test]
    fn test_panes_follow_layers() {
        let map = sample_map();
        assert_eq!(
            map.panes(),
            vec![StackingPlane::SecondaryRivers, StackingPlane::Border]
        );
        assert_eq!(map.list_layers(), ["satelite", "rede_secundaria", "borda"]);
    }

    #[test]
    fn test_document_structure() {
        let html = sample_map().to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(constants::LEAFLET_JS));
        assert!(html.contains(constants::FULLSCREEN_JS));
        assert!(html.contains(r#""preferCanvas":true"#));
        assert!(html.contains("function rivermapStyle"));

        // panes are created lowest first with their z-index
        let secondary = html.find("style.zIndex = 400").unwrap();
        let border = html.find("style.zIndex = 500").unwrap();
        assert!(secondary < border);

        // base layer in the switcher, hidden overlay listed but not added
        assert!(html.contains(r#"baseLayers["Satélite"] = layer_0;"#));
        assert!(html.contains(r#"overlays["Rede Secundária"] = layer_1;"#));
        assert!(!html.contains("layer_1.addTo(map);"));
        assert!(html.contains("layer_2.addTo(map);"));
        assert!(!html.contains(r#"overlays["Borda"]"#));
        assert!(html.contains("L.control.layers(baseLayers, overlays"));
    }

    #[test]
    fn test_save_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapa.html");
        let map = sample_map();
        map.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), map.to_html().unwrap());
    }
}
