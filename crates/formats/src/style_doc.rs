//! Declarative vector-tile style documents.
//!
//! Models the subset of the tiled-vector style grammar the watershed basemap
//! uses: sources, an optional sprite reference, and paint layers with
//! attribute filters and zoom-dependent stops. The document is hand-authored
//! data; nothing here evaluates styles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STYLE_DOC_VERSION: u8 = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleDocument {
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sprite atlas location; may be an embedded data URI (see `sprite`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    pub sources: BTreeMap<String, StyleSource>,
    pub layers: Vec<StyleLayer>,
}

impl StyleDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: STYLE_DOC_VERSION,
            name: Some(name.into()),
            sprite: None,
            glyphs: None,
            sources: BTreeMap::new(),
            layers: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, crate::FormatError> {
        serde_json::to_string(self).map_err(|e| crate::FormatError::Corrupt(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, crate::FormatError> {
        serde_json::from_str(json).map_err(|e| crate::FormatError::Corrupt(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub tiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
}

impl StyleSource {
    pub fn vector(url_template: impl Into<String>) -> Self {
        Self {
            kind: "vector".to_string(),
            tiles: vec![url_template.into()],
            minzoom: None,
            maxzoom: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    #[serde(rename = "source-layer")]
    pub source_layer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paint: BTreeMap<String, PaintValue>,
}

impl StyleLayer {
    pub fn line(id: impl Into<String>, source: impl Into<String>, source_layer: impl Into<String>) -> Self {
        Self::of_kind("line", id, source, source_layer)
    }

    pub fn fill(id: impl Into<String>, source: impl Into<String>, source_layer: impl Into<String>) -> Self {
        Self::of_kind("fill", id, source, source_layer)
    }

    fn of_kind(
        kind: &str,
        id: impl Into<String>,
        source: impl Into<String>,
        source_layer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.to_string(),
            source: source.into(),
            source_layer: source_layer.into(),
            filter: None,
            minzoom: None,
            maxzoom: None,
            paint: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_paint(mut self, key: impl Into<String>, value: PaintValue) -> Self {
        self.paint.insert(key.into(), value);
        self
    }
}

/// An attribute filter in the style grammar's array form,
/// e.g. `["==", "Symbol", 4]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Filter(pub Vec<Value>);

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self(vec!["==".into(), field.into(), value.into()])
    }
}

/// A paint property: either a constant or zoom-interpolated stops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PaintValue {
    Stops(Stops),
    Constant(Value),
}

impl PaintValue {
    pub fn constant(value: impl Into<Value>) -> Self {
        PaintValue::Constant(value.into())
    }

    pub fn stops(base: f64, stops: Vec<(f64, Value)>) -> Self {
        PaintValue::Stops(Stops {
            base: Some(base),
            stops,
        })
    }
}

/// Zoom-dependent interpolation stops: `(zoom, value)` pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stops {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    pub stops: Vec<(f64, Value)>,
}
