//! Turns a finished [`Map`](crate::core::map::Map) into an HTML artifact.

pub mod html;

pub use html::{escape_html, render_document, script_json, write_document};
