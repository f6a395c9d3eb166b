use crate::{
    data::geojson::{FeatureCollection, GeoJsonFeature},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        pane::StackingPlane,
        style::{PathStyle, StyleRule, Tooltip},
    },
    rendering::html::script_json,
    Result,
};
use serde_json::Value;

/// Feature property carrying the evaluated path style.
pub const STYLE_PROPERTY: &str = "_style";
/// Feature property carrying the rendered tooltip HTML.
pub const TOOLTIP_PROPERTY: &str = "_tooltip";

/// A GeoJSON overlay bound to one stacking plane.
///
/// Styles and tooltips are evaluated per feature when the layer is
/// serialized and travel with the features, so the browser only has to
/// read them back.
#[derive(Debug, Clone)]
pub struct VectorLayer {
    properties: LayerProperties,
    features: FeatureCollection,
    style: StyleRule,
    tooltip: Option<Tooltip>,
}

impl VectorLayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, plane: StackingPlane) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Vector).on_plane(plane),
            features: FeatureCollection::new(Vec::new()),
            style: StyleRule::Fixed(PathStyle::default()),
            tooltip: None,
        }
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = GeoJsonFeature>) -> Self {
        self.features = FeatureCollection::new(features.into_iter().collect());
        self
    }

    pub fn with_style(mut self, style: StyleRule) -> Self {
        self.style = style;
        self
    }

    pub fn with_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Whether the layer is on when the map opens.
    pub fn shown(mut self, shown: bool) -> Self {
        self.properties.visible = shown;
        self
    }

    /// Whether the layer is listed in the layer control.
    pub fn listed(mut self, listed: bool) -> Self {
        self.properties.control = listed;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.properties.interactive = interactive;
        self
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Style of the feature at `index`.
    pub fn feature_style(&self, index: usize) -> Option<PathStyle> {
        let feature = self.features.features.get(index)?;
        Some(self.style.apply(&feature.properties.clone().unwrap_or_default()))
    }

    /// The features with `_style` and, when a tooltip is configured,
    /// `_tooltip` added to their properties.
    pub fn styled_collection(&self) -> Result<FeatureCollection> {
        let features = self
            .features
            .features
            .iter()
            .map(|feature| -> Result<GeoJsonFeature> {
                let mut feature = feature.clone();
                let mut properties = feature.properties.take().unwrap_or_default();
                let style = serde_json::to_value(self.style.apply(&properties))?;
                let tooltip = self
                    .tooltip
                    .as_ref()
                    .and_then(|t| t.render(&properties))
                    .map(Value::String);

                properties.insert(STYLE_PROPERTY.to_string(), style);
                if let Some(tooltip) = tooltip {
                    properties.insert(TOOLTIP_PROPERTY.to_string(), tooltip);
                }
                feature.properties = Some(properties);
                Ok(feature)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureCollection::new(features))
    }
}

impl LayerTrait for VectorLayer {
    crate::impl_layer_trait!(properties);

    fn to_js(&self) -> Result<String> {
        let mut options = serde_json::Map::new();
        if let Some(pane) = self.properties.pane {
            options.insert("pane".into(), Value::from(pane.pane_name()));
        }
        options.insert("interactive".into(), Value::from(self.properties.interactive));

        Ok(format!(
            "L.geoJSON({}, Object.assign({}, {{style: rivermapStyle, onEachFeature: rivermapTooltip}}))",
            script_json(&self.styled_collection()?)?,
            script_json(&options)?
        ))
    }
}
