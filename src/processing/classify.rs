//! Primary/secondary split of the filtered river network.

use crate::{data::hydrography::RiverFeature, MapError, Result};
use fxhash::FxHashSet;

/// Decides whether a river belongs to the primary network from its name.
pub trait RiverClassifier {
    fn is_primary(&self, name: Option<&str>) -> bool;
}

/// Primary when the name contains `pattern`, compared case-insensitively.
/// Missing names are never primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePatternClassifier {
    pattern: String,
}

impl NamePatternClassifier {
    pub fn new(pattern: impl AsRef<str>) -> Self {
        Self {
            pattern: pattern.as_ref().to_lowercase(),
        }
    }
}

impl Default for NamePatternClassifier {
    fn default() -> Self {
        Self::new(crate::core::constants::PRIMARY_NAME_PATTERN)
    }
}

impl RiverClassifier for NamePatternClassifier {
    fn is_primary(&self, name: Option<&str>) -> bool {
        name.map(|n| n.to_lowercase().contains(&self.pattern))
            .unwrap_or(false)
    }
}

impl<F> RiverClassifier for F
where
    F: Fn(Option<&str>) -> bool,
{
    fn is_primary(&self, name: Option<&str>) -> bool {
        self(name)
    }
}

/// Two disjoint partitions of the filtered rivers.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedRivers {
    pub primary: Vec<RiverFeature>,
    pub secondary: Vec<RiverFeature>,
    /// Attribute the classification read names from
    pub name_field: String,
}

impl ClassifiedRivers {
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// First of `candidates` present in `columns`.
pub fn resolve_name_field<S: AsRef<str>>(columns: &[String], candidates: &[S]) -> Result<String> {
    candidates
        .iter()
        .map(|candidate| candidate.as_ref())
        .find(|candidate| columns.iter().any(|c| c == *candidate))
        .map(str::to_string)
        .ok_or_else(|| MapError::SchemaMismatch {
            candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
        })
}

/// Splits `features` into primary and secondary sets.
///
/// The primary indices are computed once; the secondary set is every other
/// index, so the two sets partition the input exactly.
pub fn classify<S: AsRef<str>>(
    features: Vec<RiverFeature>,
    columns: &[String],
    candidates: &[S],
    classifier: &dyn RiverClassifier,
) -> Result<ClassifiedRivers> {
    let name_field = resolve_name_field(columns, candidates)?;
    log::debug!("classifying by {:?}", name_field);

    let primary_index: FxHashSet<usize> = features
        .iter()
        .enumerate()
        .filter(|(_, feature)| classifier.is_primary(feature.name(&name_field)))
        .map(|(index, _)| index)
        .collect();

    let mut classified = ClassifiedRivers {
        primary: Vec::with_capacity(primary_index.len()),
        secondary: Vec::with_capacity(features.len() - primary_index.len()),
        name_field,
    };
    for (index, feature) in features.into_iter().enumerate() {
        if primary_index.contains(&index) {
            classified.primary.push(feature);
        } else {
            classified.secondary.push(feature);
        }
    }

    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::Properties;
    use geo::{line_string, MultiLineString};
    use serde_json::{json, Value};

    fn river(field: &str, name: Value) -> RiverFeature {
        let mut attributes = Properties::new();
        attributes.insert(field.to_string(), name);
        RiverFeature::new(
            MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 0.02, y: 0.0)]]),
            attributes,
        )
    }

    #[test]
    fn test_pattern_is_case_insensitive_substring() {
        let classifier = NamePatternClassifier::default();
        assert!(classifier.is_primary(Some("Rio Jacuí")));
        assert!(classifier.is_primary(Some("RIO URUGUAI")));
        assert!(classifier.is_primary(Some("Arroio do rio Pardo")));
        assert!(!classifier.is_primary(Some("Rio")));
        assert!(!classifier.is_primary(Some("Riozinho")));
        assert!(!classifier.is_primary(Some("Sanga Funda")));
        assert!(!classifier.is_primary(None));
    }

    #[test]
    fn test_resolve_prefers_first_candidate() {
        let columns = vec!["geodenom".to_string(), "nome".to_string()];
        assert_eq!(resolve_name_field(&columns, &["nome", "geodenom"]).unwrap(), "nome");

        let columns = vec!["geodenom".to_string()];
        assert_eq!(
            resolve_name_field(&columns, &["nome", "geodenom"]).unwrap(),
            "geodenom"
        );
    }

    #[test]
    fn test_resolve_without_candidates_is_schema_mismatch() {
        let columns = vec!["id".to_string()];
        let err = resolve_name_field(&columns, &["nome", "geodenom"]).unwrap_err();
        match err {
            MapError::SchemaMismatch { candidates } => {
                assert_eq!(candidates, vec!["nome", "geodenom"])
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_classification_partitions_input() {
        let features = vec![
            river("nome", json!("Rio Taquari")),
            river("nome", json!("Arroio Grande")),
            river("nome", Value::Null),
            river("nome", json!("rio dos Sinos")),
            river("nome", json!(42)),
        ];
        let columns = vec!["nome".to_string()];

        let classified = classify(
            features,
            &columns,
            &["nome", "geodenom"],
            &NamePatternClassifier::default(),
        )
        .unwrap();

        assert_eq!(classified.name_field, "nome");
        assert_eq!(classified.len(), 5);
        let primary: Vec<_> = classified
            .primary
            .iter()
            .filter_map(|f| f.name("nome"))
            .collect();
        assert_eq!(primary, vec!["Rio Taquari", "rio dos Sinos"]);
        assert_eq!(classified.secondary.len(), 3);
    }

    #[test]
    fn test_closure_classifier() {
        let columns = vec!["geodenom".to_string()];
        let features = vec![
            river("geodenom", json!("Lagoa")),
            river("geodenom", json!("Canal")),
        ];
        let everything_primary = |_: Option<&str>| true;
        let classified = classify(features, &columns, &["nome", "geodenom"], &everything_primary)
            .unwrap();
        assert_eq!(classified.primary.len(), 2);
        assert!(classified.secondary.is_empty());
    }
}
