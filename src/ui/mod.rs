//! Map chrome: the layer and fullscreen controls and the legend overlay.

pub mod controls;
pub mod legend;

pub use controls::{Control, Position};
pub use legend::{Legend, LegendEntry, Swatch};
