use crate::data::hydrography::RiverFeature;

/// Features that survived the length filter, plus the counts around it.
#[derive(Debug, Clone)]
pub struct LengthFilterOutcome {
    pub kept: Vec<RiverFeature>,
    pub before: usize,
    pub after: usize,
}

impl LengthFilterOutcome {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

/// Keeps features strictly longer than `threshold` (planar, coordinate units).
pub fn filter_by_length(features: Vec<RiverFeature>, threshold: f64) -> LengthFilterOutcome {
    let before = features.len();
    let kept: Vec<RiverFeature> = features
        .into_iter()
        .filter(|feature| feature.length() > threshold)
        .collect();
    let after = kept.len();

    log::debug!("length filter > {}: {} -> {}", threshold, before, after);
    LengthFilterOutcome {
        kept,
        before,
        after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::Properties;
    use geo::{line_string, MultiLineString};

    fn horizontal(length: f64) -> RiverFeature {
        RiverFeature::new(
            MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: length, y: 0.0)]]),
            Properties::new(),
        )
    }

    #[test]
    fn test_threshold_is_strict() {
        let outcome = filter_by_length(
            vec![horizontal(0.02), horizontal(0.015), horizontal(0.01), horizontal(0.016)],
            0.015,
        );
        assert_eq!(outcome.before, 4);
        assert_eq!(outcome.after, 2);
        assert_eq!(outcome.removed(), 2);
        assert!(outcome.kept.iter().all(|f| f.length() > 0.015));
    }

    #[test]
    fn test_multi_part_length_is_summed() {
        let feature = RiverFeature::new(
            MultiLineString::new(vec![
                line_string![(x: 0.0, y: 0.0), (x: 0.01, y: 0.0)],
                line_string![(x: 1.0, y: 0.0), (x: 1.01, y: 0.0)],
            ]),
            Properties::new(),
        );
        let outcome = filter_by_length(vec![feature], 0.015);
        assert_eq!(outcome.after, 1);
    }

    #[test]
    fn test_empty_input() {
        let outcome = filter_by_length(Vec::new(), 0.015);
        assert_eq!((outcome.before, outcome.after), (0, 0));
    }
}
