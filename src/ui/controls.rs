use crate::{rendering::html::script_json, Result};
use serde::Serialize;

/// Corner a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    TopRight,
}

impl Position {
    /// Leaflet's position string.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "topleft",
            Position::TopRight => "topright",
        }
    }
}

/// A Leaflet control added to the map after its layers.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Base layer radio buttons and overlay checkboxes
    LayerControl { collapsed: bool, position: Position },
    /// Fullscreen toggle button
    Fullscreen { position: Position },
}

impl Control {
    /// Uncollapsed, top-right.
    pub fn layer_control() -> Self {
        Control::LayerControl {
            collapsed: false,
            position: Position::TopRight,
        }
    }

    pub fn fullscreen() -> Self {
        Control::Fullscreen {
            position: Position::TopLeft,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Control::LayerControl { position, .. } | Control::Fullscreen { position } => *position,
        }
    }

    /// Constructor expression. `base_layers` and `overlays` name the JS
    /// objects mapping control labels to layers.
    pub fn to_js(&self, base_layers: &str, overlays: &str) -> Result<String> {
        match self {
            Control::LayerControl {
                collapsed,
                position,
            } => Ok(format!(
                "L.control.layers({}, {}, {})",
                base_layers,
                overlays,
                script_json(&serde_json::json!({
                    "collapsed": collapsed,
                    "position": position.as_str(),
                }))?
            )),
            Control::Fullscreen { position } => Ok(format!(
                "L.control.fullscreen({})",
                script_json(&serde_json::json!({
                    "position": position.as_str(),
                    "title": "Full Screen",
                    "titleCancel": "Exit Full Screen",
                    "forceSeparateButton": false,
                }))?
            )),
        }
    }
}
