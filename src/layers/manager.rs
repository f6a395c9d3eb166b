use crate::{layers::base::LayerTrait, prelude::HashMap, MapError, Result};

/// Holds the map's layers in render order.
///
/// Layers are kept sorted by z-index; layers with equal z-index keep their
/// insertion order.
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Layer IDs, lowest z-index first
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer at its z-ordered position. Layer IDs must be unique.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Config(format!("duplicate layer id {:?}", layer_id)));
        }
        let z_index = layer.z_index();

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.layers.insert(layer_id.clone(), layer);
        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Layer IDs in render order.
    pub fn list_layers(&self) -> &[String] {
        &self.render_order
    }

    /// All layers in render order.
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Consumes the manager, yielding its layers in render order.
    pub fn into_layers(mut self) -> Vec<Box<dyn LayerTrait>> {
        let order = std::mem::take(&mut self.render_order);
        order
            .iter()
            .filter_map(|id| self.layers.remove(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
