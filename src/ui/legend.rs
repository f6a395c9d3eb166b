//! Fixed-position legend card drawn over the map.

use crate::{
    layers::composer::{PRIMARY_COLOR, SECONDARY_COLOR},
    rendering::html::escape_html,
};

/// The color key shown next to a legend label.
#[derive(Debug, Clone, PartialEq)]
pub enum Swatch {
    /// A horizontal stroke `thickness` pixels high
    Line { color: String, thickness: u8 },
    /// A filled square
    Area { color: String },
    /// A round chip with a diagonal two-color gradient
    Gradient { from: String, to: String },
}

impl Swatch {
    fn to_html(&self) -> String {
        match self {
            Swatch::Line { color, thickness } => format!(
                r#"<span style="display:inline-block; width:15px; height:{}px; background:{}; margin-right:8px;"></span>"#,
                thickness,
                escape_html(color)
            ),
            Swatch::Area { color } => format!(
                r#"<span style="display:inline-block; width:12px; height:12px; background:{}; margin-right:8px; border:1px solid rgba(255,255,255,0.4);"></span>"#,
                escape_html(color)
            ),
            Swatch::Gradient { from, to } => format!(
                r#"<span style="display:inline-block; width:12px; height:12px; background:linear-gradient(45deg, {}, {}); border-radius:50%; margin-right:8px; border:1px solid #fff;"></span>"#,
                escape_html(from),
                escape_html(to)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    /// Small italic hint after the label
    pub note: Option<String>,
    pub swatch: Swatch,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, swatch: Swatch) -> Self {
        Self {
            label: label.into(),
            note: None,
            swatch,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub flag_url: String,
    pub title: String,
    pub subtitle: String,
    pub entries: Vec<LegendEntry>,
    pub source: String,
    pub author: String,
}

impl Legend {
    pub fn new(flag_url: impl Into<String>) -> Self {
        Self {
            flag_url: flag_url.into(),
            title: "RIO GRANDE DO SUL".to_string(),
            subtitle: "HIDROGRAFIA & SATÉLITE".to_string(),
            entries: Vec::new(),
            source: "FONTE: IBGE BC250".to_string(),
            author: "Jordano Zdanski Ficht".to_string(),
        }
    }

    /// One entry per overlay, top plane first. The region chip blends the
    /// first and last palette colors.
    pub fn for_layers<S: AsRef<str>>(flag_url: impl Into<String>, palette: &[S]) -> Self {
        let first = palette.first().map(|c| c.as_ref()).unwrap_or("#ffffff");
        let last = palette.last().map(|c| c.as_ref()).unwrap_or(first);

        Self::new(flag_url)
            .with_entry(LegendEntry::new(
                "Limite Estadual",
                Swatch::Line {
                    color: "#ffffff".into(),
                    thickness: 2,
                },
            ))
            .with_entry(LegendEntry::new(
                "Rios Principais",
                Swatch::Line {
                    color: PRIMARY_COLOR.into(),
                    thickness: 3,
                },
            ))
            .with_entry(
                LegendEntry::new(
                    "Rede Secundária",
                    Swatch::Line {
                        color: SECONDARY_COLOR.into(),
                        thickness: 1,
                    },
                )
                .with_note("(Menu)"),
            )
            .with_entry(LegendEntry::new(
                "Regiões (Transparente)",
                Swatch::Gradient {
                    from: first.to_string(),
                    to: last.to_string(),
                },
            ))
            .with_entry(LegendEntry::new(
                "Fora do Estado",
                Swatch::Area {
                    color: "rgba(0,0,0,0.65)".into(),
                },
            ))
    }

    pub fn with_entry(mut self, entry: LegendEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn to_html(&self) -> String {
        let entries: String = self
            .entries
            .iter()
            .map(|entry| {
                let note = entry
                    .note
                    .as_ref()
                    .map(|n| {
                        format!(
                            r#" <i style="font-size:10px; opacity:0.6; margin-left:5px">{}</i>"#,
                            escape_html(n)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    "\n        <div style=\"display:flex; align-items:center;\">{}{}{}</div>",
                    entry.swatch.to_html(),
                    escape_html(&entry.label),
                    note
                )
            })
            .collect();

        format!(
            r#"<div class="rivermap-legend" style="position: fixed; bottom: 30px; left: 30px; width: 300px; z-index: 9999;
    background: rgba(20, 20, 20, 0.8); backdrop-filter: blur(8px);
    padding: 15px; border-radius: 12px; border: 1px solid rgba(255,255,255,0.2);
    font-family: 'Segoe UI', sans-serif; color: white; box-shadow: 0 4px 15px rgba(0,0,0,0.5);">
    <div style="display:flex; align-items:center; margin-bottom:12px; border-bottom:1px solid rgba(255,255,255,0.2); padding-bottom:10px;">
        <img src="{flag}" style="height:40px; border-radius:4px; margin-right:15px;">
        <div>
            <h4 style="margin:0; font-weight:700; letter-spacing: -0.5px;">{title}</h4>
            <div style="font-size:10px; opacity:0.7; letter-spacing:1px; margin-top:2px;">{subtitle}</div>
        </div>
    </div>
    <div style="font-size:12px; line-height:1.9;">{entries}
    </div>
    <div style="margin-top:15px; font-size:10px; opacity:0.6; text-align:right; border-top:1px solid rgba(255,255,255,0.1); padding-top:5px;">
        {source}<br>
        <span style="color:#fff; font-weight:600;">{author}</span>
    </div>
</div>"#,
            flag = escape_html(&self.flag_url),
            title = escape_html(&self.title),
            subtitle = escape_html(&self.subtitle),
            entries = entries,
            source = escape_html(&self.source),
            author = escape_html(&self.author),
        )
    }
}
