//! Builds the five overlay layers of the hydrography map.

use crate::{
    core::geo::LatLngBounds,
    data::{
        boundary::{Boundary, Region, REGION_CODE_FIELD, REGION_NAME_FIELD},
        geojson::{GeoJsonFeature, GeoJsonGeometry, Properties},
        hydrography::RiverFeature,
    },
    layers::{
        manager::LayerManager,
        pane::StackingPlane,
        style::{LinearColormap, PathStyle, StyleRule, Tooltip},
        vector::VectorLayer,
    },
    processing::classify::ClassifiedRivers,
    Result,
};
use geo::{BooleanOps, MultiPolygon};

pub const MASK_LAYER_ID: &str = "sombra";
pub const REGIONS_LAYER_ID: &str = "regioes";
pub const SECONDARY_LAYER_ID: &str = "rede_secundaria";
pub const PRIMARY_LAYER_ID: &str = "rede_principal";
pub const BORDER_LAYER_ID: &str = "borda";

pub const SECONDARY_COLOR: &str = "#00BFFF";
pub const PRIMARY_COLOR: &str = "#1E90FF";

/// The world rectangle minus the boundary.
pub fn shadow_mask(boundary: &Boundary) -> MultiPolygon<f64> {
    let world = MultiPolygon::new(vec![LatLngBounds::world().to_polygon()]);
    world.difference(boundary.shape())
}

/// Turns loaded and classified data into styled layers, one per plane.
#[derive(Debug, Clone)]
pub struct LayerComposer {
    palette: Vec<String>,
}

impl LayerComposer {
    /// `palette` is the region fill ramp, lowest region code first.
    pub fn new(palette: Vec<String>) -> Self {
        Self { palette }
    }

    pub fn mask_layer(&self, boundary: &Boundary) -> VectorLayer {
        let mask = shadow_mask(boundary);
        VectorLayer::new(MASK_LAYER_ID, "Sombra", StackingPlane::ShadowMask)
            .with_features(Some(GeoJsonFeature::new(
                GeoJsonGeometry::from(&mask),
                Properties::new(),
            )))
            .with_style(StyleRule::Fixed(
                PathStyle::new()
                    .fill_color("black")
                    .color("none")
                    .fill_opacity(0.65),
            ))
            .interactive(false)
            .listed(false)
    }

    /// Region fills follow the palette from the lowest to the highest
    /// region code.
    pub fn region_layer(&self, regions: &[Region]) -> Result<VectorLayer> {
        let (vmin, vmax) = regions
            .iter()
            .map(|r| r.code as f64)
            .fold(None, |range: Option<(f64, f64)>, code| match range {
                None => Some((code, code)),
                Some((lo, hi)) => Some((lo.min(code), hi.max(code))),
            })
            .unwrap_or((0.0, 0.0));
        let colormap = LinearColormap::from_hex(&self.palette, vmin, vmax)?;

        Ok(
            VectorLayer::new(REGIONS_LAYER_ID, "Divisão Regional", StackingPlane::Regions)
                .with_features(regions.iter().map(Region::to_geojson))
                .with_style(StyleRule::Gradient {
                    field: REGION_CODE_FIELD.to_string(),
                    colormap,
                    base: PathStyle::new().color("white").weight(1.5).fill_opacity(0.4),
                })
                .with_tooltip(Tooltip::new(REGION_NAME_FIELD, "Região:")),
        )
    }

    pub fn secondary_layer(&self, rivers: &[RiverFeature]) -> VectorLayer {
        VectorLayer::new(
            SECONDARY_LAYER_ID,
            "Rede Secundária",
            StackingPlane::SecondaryRivers,
        )
        .with_features(rivers.iter().map(RiverFeature::to_geojson))
        .with_style(StyleRule::Fixed(
            PathStyle::new()
                .color(SECONDARY_COLOR)
                .weight(1.0)
                .opacity(0.8),
        ))
        .shown(false)
    }

    pub fn primary_layer(&self, rivers: &[RiverFeature], name_field: &str) -> VectorLayer {
        VectorLayer::new(PRIMARY_LAYER_ID, "Rede Principal", StackingPlane::PrimaryRivers)
            .with_features(rivers.iter().map(RiverFeature::to_geojson))
            .with_style(StyleRule::Fixed(
                PathStyle::new()
                    .color(PRIMARY_COLOR)
                    .weight(2.0)
                    .opacity(1.0),
            ))
            .with_tooltip(Tooltip::new(name_field, "Rio:"))
    }

    pub fn border_layer(&self, boundary: &Boundary) -> VectorLayer {
        VectorLayer::new(BORDER_LAYER_ID, "Borda", StackingPlane::Border)
            .with_features(Some(boundary.to_geojson()))
            .with_style(StyleRule::Fixed(
                PathStyle::new().color("white").weight(2.5).fill(false),
            ))
            .interactive(false)
            .listed(false)
    }

    /// All five overlays in a manager, lowest plane first.
    pub fn compose(
        &self,
        boundary: &Boundary,
        regions: &[Region],
        rivers: &ClassifiedRivers,
    ) -> Result<LayerManager> {
        let mut manager = LayerManager::new();
        manager.add_layer(Box::new(self.mask_layer(boundary)))?;
        manager.add_layer(Box::new(self.region_layer(regions)?))?;
        manager.add_layer(Box::new(self.secondary_layer(&rivers.secondary)))?;
        manager.add_layer(Box::new(
            self.primary_layer(&rivers.primary, &rivers.name_field),
        ))?;
        manager.add_layer(Box::new(self.border_layer(boundary)))?;
        log::debug!("composed {} layers", manager.len());
        Ok(manager)
    }
}
