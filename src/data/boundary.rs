//! State outline and meso-region polygons, and the providers that load them.

use crate::{
    core::geo::LatLngBounds,
    data::geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry, Properties},
    MapError, Result,
};
use geo::MultiPolygon;
use serde_json::Value;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Region attribute holding the numeric meso-region code.
pub const REGION_CODE_FIELD: &str = "code_meso";
/// Region attribute holding the display name.
pub const REGION_NAME_FIELD: &str = "name_meso";

/// The state outline in EPSG:4326.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    shape: MultiPolygon<f64>,
    bounds: LatLngBounds,
}

impl Boundary {
    /// Fails with [`MapError::InvalidGeometry`] when `shape` has no coordinates.
    pub fn new(shape: MultiPolygon<f64>) -> Result<Self> {
        let bounds = LatLngBounds::of_multi_polygon(&shape)
            .ok_or_else(|| MapError::InvalidGeometry("boundary has no polygons".into()))?;
        Ok(Self { shape, bounds })
    }

    /// Merges every areal feature of `collection` into one outline.
    pub fn from_collection(collection: &FeatureCollection) -> Result<Self> {
        let polygons: Vec<_> = collection
            .features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .filter_map(GeoJsonGeometry::to_multi_polygon)
            .flat_map(|shape| shape.0)
            .collect();
        Self::new(MultiPolygon::new(polygons))
    }

    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }

    pub fn to_geojson(&self) -> GeoJsonFeature {
        GeoJsonFeature::new(GeoJsonGeometry::from(&self.shape), Properties::new())
    }
}

/// A meso-region of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub code: i64,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    /// Feature carrying `code_meso` and `name_meso`, the schema the region
    /// layer styles and tooltips read.
    pub fn to_geojson(&self) -> GeoJsonFeature {
        let mut properties = Properties::new();
        properties.insert(REGION_CODE_FIELD.into(), Value::from(self.code));
        properties.insert(REGION_NAME_FIELD.into(), Value::from(self.name.clone()));
        GeoJsonFeature::new(GeoJsonGeometry::from(&self.geometry), properties)
    }

    /// Reads regions from features carrying `code_field` and `name_field`.
    /// Codes may be JSON numbers or numeric strings.
    pub fn from_collection(
        collection: &FeatureCollection,
        code_field: &str,
        name_field: &str,
    ) -> Result<Vec<Self>> {
        collection
            .features
            .iter()
            .map(|feature| {
                let code = feature
                    .property(code_field)
                    .and_then(code_value)
                    .ok_or_else(|| {
                        MapError::UpstreamData(format!("region without a valid {}", code_field))
                    })?;
                let name = feature
                    .property(name_field)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let geometry = feature
                    .geometry
                    .as_ref()
                    .and_then(GeoJsonGeometry::to_multi_polygon)
                    .ok_or_else(|| {
                        MapError::UpstreamData(format!("region {} is not a polygon", code))
                    })?;
                Ok(Region {
                    code,
                    name,
                    geometry,
                })
            })
            .collect()
    }
}

fn code_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Source of the state outline and its meso-regions.
pub trait BoundaryProvider {
    fn boundary(&self) -> Result<Boundary>;
    fn regions(&self) -> Result<Vec<Region>>;
}

/// Reads `boundary.geojson` and `regions.geojson` from a directory.
#[derive(Debug, Clone)]
pub struct GeoJsonFileProvider {
    dir: PathBuf,
}

impl GeoJsonFileProvider {
    pub const BOUNDARY_FILE: &'static str = "boundary.geojson";
    pub const REGIONS_FILE: &'static str = "regions.geojson";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, file: &str) -> Result<FeatureCollection> {
        let path = self.dir.join(file);
        if !path.is_file() {
            return Err(MapError::MissingInput(path));
        }
        read_collection(&path)
    }
}

fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let collection = FeatureCollection::from_reader(BufReader::new(File::open(path)?))?;
    if collection.is_empty() {
        return Err(MapError::UpstreamData(format!(
            "{} has no features",
            path.display()
        )));
    }
    Ok(collection)
}

impl BoundaryProvider for GeoJsonFileProvider {
    fn boundary(&self) -> Result<Boundary> {
        Boundary::from_collection(&self.read(Self::BOUNDARY_FILE)?)
    }

    fn regions(&self) -> Result<Vec<Region>> {
        Region::from_collection(
            &self.read(Self::REGIONS_FILE)?,
            REGION_CODE_FIELD,
            REGION_NAME_FIELD,
        )
    }
}

#[cfg(feature = "ibge")]
pub use ibge::IbgeProvider;

#[cfg(feature = "ibge")]
mod ibge {
    use super::*;
    use fxhash::FxHashMap;
    use reqwest::blocking::Client;
    use serde::Deserialize;

    const MALHAS_URL: &str = "https://servicodados.ibge.gov.br/api/v3/malhas/estados";
    const LOCALIDADES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades/estados";

    /// Meso-region code property in IBGE meshes.
    const IBGE_CODE_FIELD: &str = "codarea";

    #[derive(Debug, Deserialize)]
    struct Localidade {
        id: i64,
        nome: String,
    }

    /// Blocking client for the IBGE malhas (geometry) and localidades
    /// (names) services.
    pub struct IbgeProvider {
        client: Client,
        state: String,
        year: u16,
    }

    impl IbgeProvider {
        pub fn new(state: impl Into<String>, year: u16) -> Result<Self> {
            let client = Client::builder()
                .user_agent(concat!("rivermap/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(upstream)?;
            Ok(Self {
                client,
                state: state.into(),
                year,
            })
        }

        fn mesh_url(&self, by_region: bool) -> String {
            let mut url = format!(
                "{}/{}?formato=application/vnd.geo+json&qualidade=intermediaria&periodo={}",
                MALHAS_URL, self.state, self.year
            );
            if by_region {
                url.push_str("&intrarregiao=mesorregiao");
            }
            url
        }

        fn names_url(&self) -> String {
            format!("{}/{}/mesorregioes", LOCALIDADES_URL, self.state)
        }

        fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
            log::debug!("GET {}", url);
            let response = self.client.get(url).send().map_err(upstream)?;
            if !response.status().is_success() {
                return Err(MapError::UpstreamData(format!(
                    "HTTP {} from {}",
                    response.status(),
                    url
                )));
            }
            response.json().map_err(upstream)
        }

        fn mesh(&self, by_region: bool) -> Result<FeatureCollection> {
            let collection: FeatureCollection = self.get(&self.mesh_url(by_region))?;
            if collection.is_empty() {
                return Err(MapError::UpstreamData(format!(
                    "empty mesh for {} ({})",
                    self.state, self.year
                )));
            }
            Ok(collection)
        }
    }

    fn upstream(e: reqwest::Error) -> MapError {
        MapError::UpstreamData(e.to_string())
    }

    /// Attaches localidades names to mesh regions by code. Regions missing
    /// from the name list keep an empty name.
    fn join_names(
        mesh: &FeatureCollection,
        names: Vec<Localidade>,
    ) -> Result<Vec<Region>> {
        let names: FxHashMap<i64, String> = names.into_iter().map(|l| (l.id, l.nome)).collect();
        let mut regions = Region::from_collection(mesh, IBGE_CODE_FIELD, REGION_NAME_FIELD)?;
        for region in &mut regions {
            match names.get(&region.code) {
                Some(name) => region.name = name.clone(),
                None => log::warn!("no name for meso-region {}", region.code),
            }
        }
        regions.sort_by_key(|r| r.code);
        Ok(regions)
    }

    impl BoundaryProvider for IbgeProvider {
        fn boundary(&self) -> Result<Boundary> {
            Boundary::from_collection(&self.mesh(false)?)
        }

        fn regions(&self) -> Result<Vec<Region>> {
            let mesh = self.mesh(true)?;
            let names: Vec<Localidade> = self.get(&self.names_url())?;
            join_names(&mesh, names)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#;

    fn write_provider_dir(regions: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(GeoJsonFileProvider::BOUNDARY_FILE),
            format!(
                r#"{{"type": "FeatureCollection", "features": [{{"type": "Feature", "properties": {{}}, "geometry": {}}}]}}"#,
                SQUARE
            ),
        )
        .unwrap();
        std::fs::write(dir.path().join(GeoJsonFileProvider::REGIONS_FILE), regions).unwrap();
        dir
    }

    #[test]
    fn test_file_provider_reads_boundary_and_regions() {
        let dir = write_provider_dir(&format!(
            r#"{{"type": "FeatureCollection", "features": [
                {{"type": "Feature", "properties": {{"code_meso": 4305, "name_meso": "Centro Oriental"}}, "geometry": {0}}},
                {{"type": "Feature", "properties": {{"code_meso": "4301", "name_meso": "Noroeste"}}, "geometry": {0}}}
            ]}}"#,
            SQUARE
        ));
        let provider = GeoJsonFileProvider::new(dir.path());

        let boundary = provider.boundary().unwrap();
        assert_eq!(boundary.shape().0.len(), 1);
        assert_eq!(boundary.bounds().north_east.lat, 1.0);

        let regions = provider.regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].code, 4305);
        assert_eq!(regions[1].code, 4301);
        assert_eq!(regions[1].name, "Noroeste");
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let provider = GeoJsonFileProvider::new(dir.path());
        assert!(matches!(provider.boundary(), Err(MapError::MissingInput(_))));
    }

    #[test]
    fn test_empty_collection_is_upstream_error() {
        let dir = write_provider_dir(r#"{"type": "FeatureCollection", "features": []}"#);
        let provider = GeoJsonFileProvider::new(dir.path());
        assert!(matches!(provider.regions(), Err(MapError::UpstreamData(_))));
    }

    #[test]
    fn test_boundary_without_polygons_is_invalid() {
        assert!(matches!(
            Boundary::new(MultiPolygon::new(vec![])),
            Err(MapError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_region_feature_schema() {
        let region = Region {
            code: 4301,
            name: "Noroeste".into(),
            geometry: Boundary::from_collection(
                &format!(
                    r#"{{"type": "FeatureCollection", "features": [{{"type": "Feature", "properties": null, "geometry": {}}}]}}"#,
                    SQUARE
                )
                .parse::<FeatureCollection>()
                .unwrap(),
            )
            .unwrap()
            .shape()
            .clone(),
        };
        let feature = region.to_geojson();
        assert_eq!(feature.property(REGION_CODE_FIELD), Some(&Value::from(4301)));
        assert_eq!(
            feature.property(REGION_NAME_FIELD).and_then(Value::as_str),
            Some("Noroeste")
        );
    }
}
