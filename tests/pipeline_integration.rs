use geo::{polygon, MultiPolygon};
use rivermap::{
    run, Boundary, BoundaryProvider, MapError, PipelineConfig, Region, Result,
};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

/// Serves a fixed square around the test rivers without touching the
/// network.
struct StaticProvider {
    shape: MultiPolygon<f64>,
}

impl StaticProvider {
    fn square() -> Self {
        Self {
            shape: MultiPolygon::new(vec![polygon![
                (x: -54.0, y: -31.0),
                (x: -52.0, y: -31.0),
                (x: -52.0, y: -29.0),
                (x: -54.0, y: -29.0),
            ]]),
        }
    }
}

impl BoundaryProvider for StaticProvider {
    fn boundary(&self) -> Result<Boundary> {
        Boundary::new(self.shape.clone())
    }

    fn regions(&self) -> Result<Vec<Region>> {
        Ok(vec![Region {
            code: 4301,
            name: "Noroeste Rio-grandense".into(),
            geometry: self.shape.clone(),
        }])
    }
}

/// A horizontal river of `length` degrees starting at (-53.5, `lat`).
fn river(properties: Value, lat: f64, length: f64) -> Value {
    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": {
            "type": "LineString",
            "coordinates": [[-53.5, lat], [-53.5 + length, lat]]
        }
    })
}

fn write_dataset(dir: &Path, features: Vec<Value>) {
    let nested = dir.join("dados_rios_rs_v2023");
    std::fs::create_dir_all(&nested).unwrap();
    let collection = json!({"type": "FeatureCollection", "features": features});
    std::fs::write(
        nested.join("trecho_drenagem.geojson"),
        serde_json::to_string(&collection).unwrap(),
    )
    .unwrap();
}

fn config_for(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        input_dir: dir.path().to_path_buf(),
        output_path: dir.path().join("out").join("mapa.html"),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_rivers_are_classified_and_rendered() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        vec![
            river(json!({"nome": "Rio Teste"}), -30.0, 0.02),
            river(json!({"nome": "Sanga Pequena"}), -30.1, 0.02),
            river(json!({"nome": "Rio Curto"}), -30.2, 0.01),
        ],
    );
    let config = config_for(&dir);

    let report = run(&config, &StaticProvider::square()).unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(report.filtered, 2);
    assert_eq!(report.primary, 1);
    assert_eq!(report.secondary, 1);
    assert_eq!(report.name_field, "nome");
    assert!(report.dataset.ends_with("trecho_drenagem.geojson"));

    let html = std::fs::read_to_string(&report.output_path).unwrap();
    assert!(html.contains("Rio Teste"));
    assert!(html.contains("Sanga Pequena"));
    assert!(!html.contains("Rio Curto"));
    assert!(html.contains("Noroeste Rio-grandense"));
    assert!(html.contains("RIO GRANDE DO SUL"));
}

#[test]
fn test_empty_directory_is_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    let result = run(&config, &StaticProvider::square());

    assert!(matches!(result, Err(MapError::MissingInput(_))));
    assert!(!config.output_path.exists());
}

#[test]
fn test_unnamed_river_is_secondary() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        vec![river(json!({"nome": null}), -30.0, 0.05)],
    );

    let report = run(&config_for(&dir), &StaticProvider::square()).unwrap();

    assert_eq!(report.filtered, 1);
    assert_eq!(report.primary, 0);
    assert_eq!(report.secondary, 1);
}

#[test]
fn test_legacy_name_field_is_used() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        vec![
            river(json!({"geodenom": "RIO JACUÍ"}), -30.0, 0.05),
            river(json!({"geodenom": "Arroio Grande"}), -30.1, 0.05),
        ],
    );

    let report = run(&config_for(&dir), &StaticProvider::square()).unwrap();

    assert_eq!(report.name_field, "geodenom");
    assert_eq!(report.primary, 1);
    assert_eq!(report.secondary, 1);
}

#[test]
fn test_missing_name_field_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        vec![river(json!({"codigo": 7}), -30.0, 0.05)],
    );
    let config = config_for(&dir);

    let result = run(&config, &StaticProvider::square());

    assert!(matches!(result, Err(MapError::SchemaMismatch { .. })));
    assert!(!config.output_path.exists());
}

#[test]
fn test_rivers_outside_boundary_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        vec![
            river(json!({"nome": "Rio Teste"}), -30.0, 0.05),
            river(json!({"nome": "Rio Uruguai"}), -35.0, 0.05),
        ],
    );

    let report = run(&config_for(&dir), &StaticProvider::square()).unwrap();

    assert_eq!(report.loaded, 1);
    assert_eq!(report.primary, 1);
}
