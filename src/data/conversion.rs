//! Source coordinate systems and their conversion to EPSG:4326.
//!
//! Shapefiles carry their CRS as ESRI WKT in a sibling `.prj`. Only the
//! systems Brazilian hydrography is published in are understood:
//! geographic (SIRGAS 2000, WGS 84, SAD69), Web Mercator and UTM.

use crate::{core::geo::LatLng, MapError, Result};
use geo::{coord, Coord};
use std::path::Path;

// WGS84 ellipsoid parameters
const A: f64 = 6378137.0;
const E2: f64 = 0.00669437999014;
const K0: f64 = 0.9996;

/// Coordinate reference system definitions
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSystem {
    /// Longitude/latitude degrees. The datum name is kept for logging only:
    /// at map scale SIRGAS 2000 and WGS 84 coincide.
    Geographic { datum: String },
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// Universal Transverse Mercator
    Utm { zone: u8, northern: bool },
}

impl CoordinateSystem {
    pub fn wgs84() -> Self {
        Self::Geographic {
            datum: "WGS 84".to_string(),
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Self::Geographic { .. })
    }

    /// Reads the `.prj` (or `.PRJ`) next to `dataset`. A missing file means
    /// geographic.
    pub fn for_dataset(dataset: &Path) -> Result<Self> {
        let prj = ["prj", "PRJ"]
            .iter()
            .map(|ext| dataset.with_extension(ext))
            .find(|candidate| candidate.is_file());
        match prj {
            Some(prj) => Self::from_wkt(&std::fs::read_to_string(&prj)?),
            None => {
                log::debug!("no .prj next to {}, assuming EPSG:4326", dataset.display());
                Ok(Self::wgs84())
            }
        }
    }

    /// Parses the outer object of an ESRI/OGC WKT string.
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        let wkt = wkt.trim();
        let upper = wkt.to_ascii_uppercase();
        let name = quoted_name(wkt).unwrap_or_default();

        if upper.starts_with("GEOGCS") || upper.starts_with("GEOGCRS") {
            return Ok(Self::Geographic { datum: name });
        }

        if !(upper.starts_with("PROJCS") || upper.starts_with("PROJCRS")) {
            return Err(MapError::UnsupportedCrs(truncate(wkt)));
        }

        let upper_name = name.to_ascii_uppercase();
        if upper_name.contains("UTM") {
            return parse_utm_zone(&upper_name)
                .ok_or_else(|| MapError::UnsupportedCrs(name.clone()));
        }

        if ["PSEUDO", "AUXILIARY_SPHERE", "WEB_MERCATOR", "3857", "900913"]
            .iter()
            .any(|marker| upper_name.contains(marker))
        {
            return Ok(Self::WebMercator);
        }

        Err(MapError::UnsupportedCrs(name))
    }

    /// Converts one source coordinate to EPSG:4326 (x = lng, y = lat).
    pub fn to_wgs84(&self, x: f64, y: f64) -> Result<Coord<f64>> {
        match self {
            Self::Geographic { .. } => Ok(coord! { x: x, y: y }),
            Self::WebMercator => Ok(LatLng::from_mercator(x, y).to_coord()),
            Self::Utm { zone, northern } => utm_to_wgs84(x, y, *zone, *northern),
        }
    }
}

fn quoted_name(wkt: &str) -> Option<String> {
    let start = wkt.find('"')? + 1;
    let len = wkt[start..].find('"')?;
    Some(wkt[start..start + len].to_string())
}

fn truncate(wkt: &str) -> String {
    wkt.chars().take(60).collect()
}

/// Accepts `..._UTM_ZONE_22S`, `... / UTM ZONE 22S` and `..._UTM_ZONE_22N`.
fn parse_utm_zone(upper_name: &str) -> Option<CoordinateSystem> {
    let rest = &upper_name[upper_name.find("ZONE")? + 4..];
    let rest = rest.trim_start_matches(|c: char| c == '_' || c == ' ');
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let zone: u8 = digits.parse().ok()?;
    if !(1..=60).contains(&zone) {
        return None;
    }
    let northern = match rest[digits.len()..].chars().next() {
        Some('S') => false,
        Some('N') => true,
        _ => !upper_name.contains("SOUTH"),
    };
    Some(CoordinateSystem::Utm { zone, northern })
}

/// UTM to WGS84 conversion (series expansion, sub-metre at map scale)
fn utm_to_wgs84(easting: f64, northing: f64, zone: u8, northern: bool) -> Result<Coord<f64>> {
    if !(1..=60).contains(&zone) {
        return Err(MapError::UnsupportedCrs(format!(
            "UTM zone must be 1-60, got {}",
            zone
        )));
    }

    let mut northing = northing;
    if !northern {
        northing -= 10000000.0;
    }

    let central_meridian = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();
    let ep2 = E2 / (1.0 - E2);

    let m = northing / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * E2 * E2 / 64.0 - 5.0 * E2 * E2 * E2 / 256.0));

    // Footpoint latitude
    let e1 = (1.0 - (1.0 - E2).sqrt()) / (1.0 + (1.0 - E2).sqrt());
    let lat_rad = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let n1 = A / (1.0 - E2 * lat_rad.sin().powi(2)).sqrt();
    let t1 = lat_rad.tan().powi(2);
    let c1 = ep2 * lat_rad.cos().powi(2);
    let r1 = A * (1.0 - E2) / (1.0 - E2 * lat_rad.sin().powi(2)).powf(1.5);
    let d = (easting - 500000.0) / (n1 * K0);

    let lat = lat_rad
        - (n1 * lat_rad.tan() / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4)
                    / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                    - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let lng = central_meridian
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                * d.powi(5)
                / 120.0)
            / lat_rad.cos();

    Ok(coord! { x: lng.to_degrees(), y: lat.to_degrees() })
}

/// Forward UTM projection, the inverse of [`utm_to_wgs84`]; fixtures use
/// it to produce projected coordinates.
#[cfg(test)]
pub(crate) fn wgs84_to_utm(lng: f64, lat: f64, zone: u8, northern: bool) -> (f64, f64) {
    let lat = lat.to_radians();
    let central_meridian = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();
    let ep2 = E2 / (1.0 - E2);

    let n = A / (1.0 - E2 * lat.sin().powi(2)).sqrt();
    let t = lat.tan().powi(2);
    let c = ep2 * lat.cos().powi(2);
    let a = lat.cos() * (lng.to_radians() - central_meridian);

    let m = A
        * ((1.0 - E2 / 4.0 - 3.0 * E2 * E2 / 64.0 - 5.0 * E2.powi(3) / 256.0) * lat
            - (3.0 * E2 / 8.0 + 3.0 * E2 * E2 / 32.0 + 45.0 * E2.powi(3) / 1024.0)
                * (2.0 * lat).sin()
            + (15.0 * E2 * E2 / 256.0 + 45.0 * E2.powi(3) / 1024.0) * (4.0 * lat).sin()
            - (35.0 * E2.powi(3) / 3072.0) * (6.0 * lat).sin());

    let easting = K0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + 500000.0;
    let mut northing = K0
        * (m + n
            * lat.tan()
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));
    if !northern {
        northing += 10000000.0;
    }
    (easting, northing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geographic_wkt() {
        let wkt = r#"GEOGCS["GCS_SIRGAS_2000",DATUM["D_SIRGAS_2000",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
        let crs = CoordinateSystem::from_wkt(wkt).unwrap();
        assert!(crs.is_geographic());
        assert_eq!(
            crs,
            CoordinateSystem::Geographic {
                datum: "GCS_SIRGAS_2000".to_string()
            }
        );
    }

    #[test]
    fn test_parse_utm_wkt() {
        let wkt = r#"PROJCS["SIRGAS_2000_UTM_Zone_22S",GEOGCS["GCS_SIRGAS_2000"],PROJECTION["Transverse_Mercator"]]"#;
        assert_eq!(
            CoordinateSystem::from_wkt(wkt).unwrap(),
            CoordinateSystem::Utm {
                zone: 22,
                northern: false
            }
        );

        let wkt = r#"PROJCS["WGS 84 / UTM zone 33N",GEOGCS["WGS 84"]]"#;
        assert_eq!(
            CoordinateSystem::from_wkt(wkt).unwrap(),
            CoordinateSystem::Utm {
                zone: 33,
                northern: true
            }
        );
    }

    #[test]
    fn test_parse_web_mercator_wkt() {
        let wkt = r#"PROJCS["WGS_1984_Web_Mercator_Auxiliary_Sphere",GEOGCS["GCS_WGS_1984"]]"#;
        assert_eq!(
            CoordinateSystem::from_wkt(wkt).unwrap(),
            CoordinateSystem::WebMercator
        );
    }

    #[test]
    fn test_unsupported_projection() {
        let wkt = r#"PROJCS["South_America_Albers_Equal_Area_Conic",GEOGCS["GCS_SIRGAS_2000"]]"#;
        assert!(matches!(
            CoordinateSystem::from_wkt(wkt),
            Err(MapError::UnsupportedCrs(_))
        ));
        assert!(CoordinateSystem::from_wkt("garbage").is_err());
    }

    #[test]
    fn test_geographic_is_identity() {
        let c = CoordinateSystem::wgs84().to_wgs84(-53.0, -30.5).unwrap();
        assert_eq!((c.x, c.y), (-53.0, -30.5));
    }

    #[test]
    fn test_web_mercator_to_wgs84() {
        let c = CoordinateSystem::WebMercator
            .to_wgs84(-5900000.0, -3570000.0)
            .unwrap();
        assert!((c.x - -53.0).abs() < 0.05);
        assert!((c.y - -30.5).abs() < 0.1);
    }

    #[test]
    fn test_utm_round_trip() {
        let (lng, lat) = (-51.2177, -30.0346); // Porto Alegre, zone 22S
        let (e, n) = wgs84_to_utm(lng, lat, 22, false);
        assert!(e > 400000.0 && e < 600000.0);

        let back = CoordinateSystem::Utm {
            zone: 22,
            northern: false,
        }
        .to_wgs84(e, n)
        .unwrap();
        assert!((back.x - lng).abs() < 1e-5);
        assert!((back.y - lat).abs() < 1e-5);
    }

    #[test]
    fn test_upper_case_prj_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("RIOS.PRJ"),
            r#"PROJCS["SIRGAS_2000_UTM_Zone_22S",GEOGCS["GCS_SIRGAS_2000"]]"#,
        )
        .unwrap();

        let crs = CoordinateSystem::for_dataset(&dir.path().join("RIOS.SHP")).unwrap();
        assert_eq!(
            crs,
            CoordinateSystem::Utm {
                zone: 22,
                northern: false
            }
        );
    }

    #[test]
    fn test_missing_prj_means_wgs84() {
        let dir = tempfile::tempdir().unwrap();
        let crs = CoordinateSystem::for_dataset(&dir.path().join("rios.shp")).unwrap();
        assert!(crs.is_geographic());
    }
}
