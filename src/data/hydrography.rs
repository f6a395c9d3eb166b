//! River line features and the loader that brings them into EPSG:4326,
//! clipped to the state boundary.

use crate::{
    core::geo::LatLngBounds,
    data::{
        boundary::Boundary,
        conversion::CoordinateSystem,
        geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry, Properties},
    },
    Result,
};
use geo::{BooleanOps, BoundingRect, CoordsIter, EuclideanLength, LineString, MultiLineString};
use serde_json::Value;
use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;
use std::{fs::File, io::BufReader, path::Path};

/// One river (or river stretch) with its source attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverFeature {
    pub geometry: MultiLineString<f64>,
    pub attributes: Properties,
}

impl RiverFeature {
    pub fn new(geometry: MultiLineString<f64>, attributes: Properties) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Planar length in coordinate units (degrees once in EPSG:4326).
    pub fn length(&self) -> f64 {
        self.geometry.euclidean_length()
    }

    /// The string value of `field`; `None` when absent, null or not a string.
    pub fn name(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(Value::as_str)
    }

    pub fn vertex_count(&self) -> usize {
        self.geometry.coords_count()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.bounding_rect().map(LatLngBounds::from)
    }

    pub fn to_geojson(&self) -> GeoJsonFeature {
        GeoJsonFeature::new(
            GeoJsonGeometry::from(&self.geometry),
            self.attributes.clone(),
        )
    }
}

/// River features of one dataset after reprojection and clipping.
#[derive(Debug, Clone, Default)]
pub struct RiverDataset {
    pub features: Vec<RiverFeature>,
    /// Attribute names present in the source, first-seen order
    pub columns: Vec<String>,
    /// Features dropped because their geometry was not lineal
    pub non_lineal: usize,
    /// Features dropped because nothing of them lies inside the boundary
    pub outside_boundary: usize,
}

impl RiverDataset {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    fn note_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}

/// Loads the river dataset at `path`, reprojects it to EPSG:4326 and clips
/// it to `boundary`.
///
/// Shapefiles only carry the attributes listed in `fields` (looked up as
/// given, then upper-cased); GeoJSON keeps every property.
pub fn load_rivers<S: AsRef<str>>(
    path: &Path,
    boundary: &Boundary,
    fields: &[S],
) -> Result<RiverDataset> {
    let is_shapefile = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("shp"))
        .unwrap_or(false);

    let raw = if is_shapefile {
        read_shapefile(path, fields)?
    } else {
        read_geojson(path)?
    };
    log::debug!(
        "read {} lineal features from {} ({} non-lineal skipped)",
        raw.features.len(),
        path.display(),
        raw.non_lineal
    );

    Ok(clip_to_boundary(raw, boundary))
}

/// Bounding-box pre-filter followed by an exact clip against the boundary.
pub fn clip_to_boundary(raw: RiverDataset, boundary: &Boundary) -> RiverDataset {
    let bounds = boundary.bounds();
    let mut clipped = RiverDataset {
        features: Vec::with_capacity(raw.features.len()),
        columns: raw.columns,
        non_lineal: raw.non_lineal,
        outside_boundary: 0,
    };

    for feature in raw.features {
        let inside_box = feature
            .bounds()
            .map(|b| bounds.intersects(&b))
            .unwrap_or(false);
        if !inside_box {
            clipped.outside_boundary += 1;
            continue;
        }

        let geometry: MultiLineString<f64> = boundary
            .shape()
            .clip(&feature.geometry, false)
            .into_iter()
            .filter(|line| line.0.len() >= 2)
            .collect();
        if geometry.0.is_empty() {
            clipped.outside_boundary += 1;
            continue;
        }

        clipped
            .features
            .push(RiverFeature::new(geometry, feature.attributes));
    }

    log::debug!(
        "{} features inside boundary, {} outside",
        clipped.features.len(),
        clipped.outside_boundary
    );
    clipped
}

fn read_geojson(path: &Path) -> Result<RiverDataset> {
    let collection = FeatureCollection::from_reader(BufReader::new(File::open(path)?))?;
    let mut dataset = RiverDataset::default();

    for feature in collection.features {
        let properties = feature.properties.unwrap_or_default();
        for key in properties.keys() {
            dataset.note_column(key);
        }

        match feature
            .geometry
            .as_ref()
            .and_then(GeoJsonGeometry::to_multi_line_string)
        {
            Some(geometry) => dataset
                .features
                .push(RiverFeature::new(geometry, properties)),
            None => dataset.non_lineal += 1,
        }
    }

    Ok(dataset)
}

fn read_shapefile<S: AsRef<str>>(path: &Path, fields: &[S]) -> Result<RiverDataset> {
    let crs = CoordinateSystem::for_dataset(path)?;
    log::debug!("{} is in {:?}", path.display(), crs);

    let mut reader = shapefile::Reader::from_path(path)?;
    let mut dataset = RiverDataset::default();

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let parts: Vec<Vec<(f64, f64)>> = match shape {
            Shape::Polyline(line) => line
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| (p.x, p.y)).collect())
                .collect(),
            Shape::PolylineM(line) => line
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| (p.x, p.y)).collect())
                .collect(),
            Shape::PolylineZ(line) => line
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| (p.x, p.y)).collect())
                .collect(),
            _ => {
                dataset.non_lineal += 1;
                continue;
            }
        };

        let lines = parts
            .into_iter()
            .map(|part| {
                part.into_iter()
                    .map(|(x, y)| crs.to_wgs84(x, y))
                    .collect::<Result<LineString<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attributes = Properties::new();
        for field in fields {
            let field = field.as_ref();
            if let Some(value) = lookup_field(&record, field) {
                dataset.note_column(field);
                attributes.insert(field.to_string(), field_to_json(value));
            }
        }

        dataset
            .features
            .push(RiverFeature::new(MultiLineString::new(lines), attributes));
    }

    Ok(dataset)
}

/// dBASE field names are often stored upper-case.
fn lookup_field<'a>(record: &'a Record, field: &str) -> Option<&'a FieldValue> {
    record
        .get(field)
        .or_else(|| record.get(&field.to_ascii_uppercase()))
}

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Character(Some(s)) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
        FieldValue::Memo(s) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
        FieldValue::Numeric(Some(n)) => serde_json::json!(n),
        FieldValue::Integer(i) => serde_json::json!(i),
        FieldValue::Logical(Some(b)) => Value::Bool(*b),
        _ => Value::Null,
    }
}
