use serde::Serialize;
use std::fmt;

/// The five drawing planes of the map, lowest first.
///
/// Every overlay layer is bound to exactly one plane; the plane's z-index
/// decides what is drawn on top regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StackingPlane {
    ShadowMask,
    Regions,
    SecondaryRivers,
    PrimaryRivers,
    Border,
}

impl StackingPlane {
    pub const ALL: [StackingPlane; 5] = [
        StackingPlane::ShadowMask,
        StackingPlane::Regions,
        StackingPlane::SecondaryRivers,
        StackingPlane::PrimaryRivers,
        StackingPlane::Border,
    ];

    pub fn z_index(self) -> i32 {
        match self {
            StackingPlane::ShadowMask => 200,
            StackingPlane::Regions => 300,
            StackingPlane::SecondaryRivers => 400,
            StackingPlane::PrimaryRivers => 450,
            StackingPlane::Border => 500,
        }
    }

    /// Leaflet pane name.
    pub fn pane_name(self) -> &'static str {
        match self {
            StackingPlane::ShadowMask => "pane_sombra",
            StackingPlane::Regions => "pane_regioes",
            StackingPlane::SecondaryRivers => "pane_sec",
            StackingPlane::PrimaryRivers => "pane_princ",
            StackingPlane::Border => "pane_borda",
        }
    }
}

impl fmt::Display for StackingPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pane_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planes_strictly_increase() {
        let z: Vec<i32> = StackingPlane::ALL.iter().map(|p| p.z_index()).collect();
        assert_eq!(z, vec![200, 300, 400, 450, 500]);
        assert!(StackingPlane::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pane_names_are_distinct() {
        let mut names: Vec<&str> = StackingPlane::ALL.iter().map(|p| p.pane_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
        assert_eq!(StackingPlane::Border.to_string(), "pane_borda");
    }
}
