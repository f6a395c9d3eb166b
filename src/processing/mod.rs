//! Length filtering, primary/secondary classification and per-class
//! simplification of river features.

pub mod classify;
pub mod filter;
pub mod simplify;

pub use classify::{classify, ClassifiedRivers, NamePatternClassifier, RiverClassifier};
pub use filter::{filter_by_length, LengthFilterOutcome};
pub use simplify::{simplify_classified, Simplification};
