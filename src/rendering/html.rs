//! Serialization of a [`Map`] into one self-contained Leaflet document.

use crate::{
    core::{constants, map::Map},
    layers::base::LayerType,
    ui::controls::Control,
    MapError, Result,
};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON text safe to embed in an inline `<script>`: `</` cannot close the
/// element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

const PAGE_STYLE: &str = "html, body {width: 100%; height: 100%; margin: 0; padding: 0;}
#map {position: absolute; top: 0; bottom: 0; right: 0; left: 0;}";

/// Reads the style and tooltip that vector layers embed in each feature.
const FEATURE_HELPERS: &str = "function rivermapStyle(feature) {
    return (feature.properties && feature.properties._style) || {};
}
function rivermapTooltip(feature, layer) {
    if (feature.properties && feature.properties._tooltip) {
        layer.bindTooltip(feature.properties._tooltip, {sticky: true});
    }
}";

pub fn render_document(map: &Map) -> Result<String> {
    let options = map.options();
    let has_fullscreen = map
        .controls()
        .iter()
        .any(|c| matches!(c, Control::Fullscreen { .. }));

    let mut head = vec![
        format!(r#"<link rel="stylesheet" href="{}"/>"#, constants::LEAFLET_CSS),
        format!(r#"<script src="{}"></script>"#, constants::LEAFLET_JS),
    ];
    if has_fullscreen {
        head.push(format!(
            r#"<link rel="stylesheet" href="{}"/>"#,
            constants::FULLSCREEN_CSS
        ));
        head.push(format!(
            r#"<script src="{}"></script>"#,
            constants::FULLSCREEN_JS
        ));
    }

    let mut script = Vec::new();
    script.push(format!(
        "var map = L.map(\"map\", {});",
        script_json(&serde_json::json!({
            "center": options.center.to_array(),
            "zoom": options.zoom,
            "preferCanvas": options.prefer_canvas,
        }))?
    ));
    script.push(FEATURE_HELPERS.to_string());

    for plane in map.panes() {
        script.push(format!(
            "map.createPane({name});\nmap.getPane({name}).style.zIndex = {z};",
            name = script_json(plane.pane_name())?,
            z = plane.z_index()
        ));
    }

    script.push("var baseLayers = {};\nvar overlays = {};".to_string());
    for (index, layer) in map.layers().layers().into_iter().enumerate() {
        let var = format!("layer_{}", index);
        script.push(format!("var {} = {};", var, layer.to_js()?));
        if layer.is_visible() {
            script.push(format!("{}.addTo(map);", var));
        }
        if layer.in_control() {
            let group = match layer.layer_type() {
                LayerType::Tile => "baseLayers",
                LayerType::Vector => "overlays",
            };
            script.push(format!(
                "{}[{}] = {};",
                group,
                script_json(layer.name())?,
                var
            ));
        }
    }

    for control in map.controls() {
        script.push(format!(
            "{}.addTo(map);",
            control.to_js("baseLayers", "overlays")?
        ));
    }

    let legend = map.legend().map(|l| l.to_html()).unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{title}</title>
{head}
<style>
{style}
</style>
</head>
<body>
<div id="map"></div>
{legend}
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(&options.title),
        head = head.join("\n"),
        style = PAGE_STYLE,
        legend = legend,
        script = script.join("\n"),
    ))
}

/// Writes `contents` to a temporary sibling of `path` and renames it into
/// place, so `path` either keeps its old content or receives all of it.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let serialization = |source| MapError::Serialization {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(serialization)?;
    }

    let temp = temp_path(path);
    let written = fs::File::create(&temp).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(serialization(e));
    }

    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
