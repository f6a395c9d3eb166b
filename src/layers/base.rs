use crate::{layers::pane::StackingPlane, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Vector,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Vector => write!(f, "vector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: String,
    /// Label in the layer control
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub pane: Option<StackingPlane>,
    /// Shown when the map opens
    pub visible: bool,
    /// Listed in the layer control
    pub control: bool,
    /// Receives pointer events (tooltips)
    pub interactive: bool,
}

impl LayerProperties {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layer_type,
            z_index: 0,
            pane: None,
            visible: true,
            control: true,
            interactive: true,
        }
    }

    /// Binds the layer to `plane`, taking the plane's z-index.
    pub fn on_plane(mut self, plane: StackingPlane) -> Self {
        self.pane = Some(plane);
        self.z_index = plane.z_index();
        self
    }
}

/// A map layer that can emit its Leaflet constructor.
pub trait LayerTrait: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn layer_type(&self) -> LayerType;

    fn z_index(&self) -> i32;

    fn is_visible(&self) -> bool;

    fn in_control(&self) -> bool;

    fn is_interactive(&self) -> bool;

    fn pane(&self) -> Option<StackingPlane>;

    /// JavaScript expression constructing the Leaflet layer (not yet added
    /// to a map).
    fn to_js(&self) -> Result<String>;

    fn as_any(&self) -> &dyn std::any::Any;
}
