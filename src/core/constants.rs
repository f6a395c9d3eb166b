//! Defaults for the Rio Grande do Sul hydrography map.
//! Every value here is only a default: the pipeline reads them through
//! [`PipelineConfig`](crate::core::config::PipelineConfig).

/// Directory searched for the hydrography dataset.
pub const DEFAULT_INPUT_DIR: &str = "dados_rios_rs_v2023";

/// Where the rendered map is written.
pub const DEFAULT_OUTPUT_PATH: &str = "portfolio_mapa_rs_gold_v2.html";

/// State flag shown in the legend header.
pub const DEFAULT_FLAG_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/6/63/Bandeira_do_Rio_Grande_do_Sul.svg/200px-Bandeira_do_Rio_Grande_do_Sul.svg.png";

/// Region fill ramp, lowest meso-region code first.
pub const DEFAULT_REGION_PALETTE: [&str; 7] = [
    "#EF9A9A", "#CE93D8", "#90CAF9", "#80CBC4", "#E6EE9C", "#FFE082", "#FFAB91",
];

/// File name fragments that mark a drainage dataset (matched case-insensitively).
pub const HYDROGRAPHY_KEYWORDS: [&str; 2] = ["trecho_drenagem", "hidrografia"];

/// Extensions of geometry datasets the loader understands.
pub const DATASET_EXTENSIONS: [&str; 3] = ["shp", "geojson", "json"];

/// Name attribute, newest dataset vintage first.
pub const NAME_FIELD_CANDIDATES: [&str; 2] = ["nome", "geodenom"];

/// Substring that marks a named major river.
pub const PRIMARY_NAME_PATTERN: &str = "Rio ";

/// Rivers this short or shorter (degrees, about 1.6 km here) are dropped.
pub const MIN_RIVER_LENGTH: f64 = 0.015;

/// Douglas-Peucker tolerance for the primary network.
pub const PRIMARY_TOLERANCE: f64 = 0.0005;

/// Douglas-Peucker tolerance for the secondary network.
pub const SECONDARY_TOLERANCE: f64 = 0.002;

pub const DEFAULT_STATE_CODE: &str = "RS";
pub const DEFAULT_REFERENCE_YEAR: u16 = 2020;

pub const DEFAULT_CENTER: (f64, f64) = (-30.5, -53.0);
pub const DEFAULT_ZOOM: u8 = 7;

/// Esri World Imagery tiles. Note the `{y}/{x}` order.
pub const SATELLITE_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
pub const SATELLITE_ATTRIBUTION: &str = "Esri";

pub const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";
pub const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";
pub const FULLSCREEN_JS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.0/Control.FullScreen.min.js";
pub const FULLSCREEN_CSS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.0/Control.FullScreen.css";
