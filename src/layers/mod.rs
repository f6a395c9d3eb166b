//! Map layers: stacking planes, styles and the five-layer composition.

pub mod base;
pub mod composer;
pub mod macros;
pub mod manager;
pub mod pane;
pub mod style;
pub mod tile;
pub mod vector;
