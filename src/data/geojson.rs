//! Minimal serde model of RFC 7946 GeoJSON plus conversions to `geo` types.
//!
//! Used both to read boundary and river datasets and to embed layer data in
//! the rendered document.

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Feature attributes. Keys are attribute names as found in the source.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A GeoJSON position. Extra ordinates (elevation, measure) are accepted on
/// input and dropped; output is always `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y, ..] => Ok(Self { x: *x, y: *y }),
            _ => Err(format!("position needs two ordinates, got {}", values.len())),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl From<Position> for Coord<f64> {
    fn from(p: Position) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<Coord<f64>> for Position {
    fn from(c: Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default)]
    pub kind: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl GeoJsonFeature {
    pub fn new(geometry: GeoJsonGeometry, properties: Properties) -> Self {
        Self {
            kind: FeatureTag::Feature,
            id: None,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }

    /// Looks up a property, treating a missing properties object as empty.
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

/// Root collection object; the only top-level shape the loaders accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: CollectionTag,
    pub features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoJsonFeature>) -> Self {
        Self {
            kind: CollectionTag::FeatureCollection,
            features,
        }
    }

    pub fn from_reader(reader: impl Read) -> crate::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl std::str::FromStr for FeatureCollection {
    type Err = crate::MapError;

    fn from_str(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

fn line_string(positions: &[Position]) -> LineString<f64> {
    positions.iter().copied().map(Coord::from).collect()
}

fn polygon(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(
        line_string(exterior),
        interiors.iter().map(|r| line_string(r)).collect(),
    ))
}

fn positions(line: &LineString<f64>) -> Vec<Position> {
    line.coords().copied().map(Position::from).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

impl GeoJsonGeometry {
    /// True for the two lineal geometry types.
    pub fn is_lineal(&self) -> bool {
        matches!(
            self,
            GeoJsonGeometry::LineString { .. } | GeoJsonGeometry::MultiLineString { .. }
        )
    }

    /// Lineal geometries as a multi-line; `None` for every other type.
    pub fn to_multi_line_string(&self) -> Option<MultiLineString<f64>> {
        match self {
            GeoJsonGeometry::LineString { coordinates } => {
                Some(MultiLineString::new(vec![line_string(coordinates)]))
            }
            GeoJsonGeometry::MultiLineString { coordinates } => Some(MultiLineString::new(
                coordinates.iter().map(|l| line_string(l)).collect(),
            )),
            _ => None,
        }
    }

    /// Areal geometries as a multi-polygon; `None` for every other type.
    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                polygon(coordinates).map(|p| MultiPolygon::new(vec![p]))
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => Some(MultiPolygon::new(
                coordinates.iter().filter_map(|p| polygon(p)).collect(),
            )),
            _ => None,
        }
    }
}

impl From<&MultiLineString<f64>> for GeoJsonGeometry {
    fn from(lines: &MultiLineString<f64>) -> Self {
        match lines.0.as_slice() {
            [single] => GeoJsonGeometry::LineString {
                coordinates: positions(single),
            },
            parts => GeoJsonGeometry::MultiLineString {
                coordinates: parts.iter().map(positions).collect(),
            },
        }
    }
}

impl From<&MultiPolygon<f64>> for GeoJsonGeometry {
    fn from(shape: &MultiPolygon<f64>) -> Self {
        match shape.0.as_slice() {
            [single] => GeoJsonGeometry::Polygon {
                coordinates: rings(single),
            },
            parts => GeoJsonGeometry::MultiPolygon {
                coordinates: parts.iter().map(rings).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"nome": "Rio Jacuí"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-53.0, -30.0], [-52.9, -30.1, 12.5]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": null,
                    "geometry": null
                }
            ]
        }
        "#;

        let collection: FeatureCollection = geojson_str.parse().unwrap();
        assert_eq!(collection.len(), 2);

        let first = &collection.features[0];
        assert_eq!(
            first.property("nome").and_then(|v| v.as_str()),
            Some("Rio Jacuí")
        );
        let lines = first.geometry.as_ref().unwrap().to_multi_line_string().unwrap();
        assert_eq!(lines.0.len(), 1);
        assert_eq!(lines.0[0].0.len(), 2);

        assert!(collection.features[1].geometry.is_none());
        assert!(collection.features[1].property("nome").is_none());
    }

    #[test]
    fn test_position_needs_two_ordinates() {
        let result: std::result::Result<GeoJsonGeometry, _> =
            serde_json::from_str(r#"{"type": "Point", "coordinates": [1.0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_lineal_geometry_is_rejected() {
        let point = GeoJsonGeometry::Point {
            coordinates: Position { x: 1.0, y: 2.0 },
        };
        assert!(!point.is_lineal());
        assert!(point.to_multi_line_string().is_none());
        assert!(point.to_multi_polygon().is_none());
    }

    #[test]
    fn test_single_part_geometries_serialize_as_simple_types() {
        let lines = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let value = serde_json::to_value(GeoJsonGeometry::from(&lines)).unwrap();
        assert_eq!(value["type"], "LineString");
        assert_eq!(value["coordinates"][1][0], 1.0);

        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let shape = MultiPolygon::new(vec![square.clone(), square]);
        let value = serde_json::to_value(GeoJsonGeometry::from(&shape)).unwrap();
        assert_eq!(value["type"], "MultiPolygon");
    }

    #[test]
    fn test_feature_serializes_type_tag() {
        let feature = GeoJsonFeature::new(
            GeoJsonGeometry::Point {
                coordinates: Position { x: 0.0, y: 0.0 },
            },
            Properties::new(),
        );
        let value = serde_json::to_value(FeatureCollection::new(vec![feature])).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert!(value["features"][0].get("id").is_none());
    }

    #[test]
    fn test_polygon_with_hole_round_trip_to_geo() {
        let json = r#"{"type": "Polygon", "coordinates": [
            [[0,0],[10,0],[10,10],[0,10],[0,0]],
            [[2,2],[3,2],[3,3],[2,2]]
        ]}"#;
        let geometry: GeoJsonGeometry = serde_json::from_str(json).unwrap();
        let shape = geometry.to_multi_polygon().unwrap();
        assert_eq!(shape.0.len(), 1);
        assert_eq!(shape.0[0].interiors().len(), 1);
    }
}
