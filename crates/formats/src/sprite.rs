//! Embedded sprite and icon payloads as data URIs.
//!
//! The watershed basemap ships its sprite atlas inline with the style
//! document, and the click marker icon is an inline SVG. Both travel as
//! `data:` URIs so no extra asset fetch is required.

use base64::Engine as _;

use crate::FormatError;

const PNG_PREFIX: &str = "data:image/png;base64,";
const SVG_PREFIX: &str = "data:image/svg+xml;base64,";

pub fn png_data_uri(png_bytes: &[u8]) -> String {
    format!(
        "{PNG_PREFIX}{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes)
    )
}

pub fn svg_data_uri(svg: &str) -> String {
    format!(
        "{SVG_PREFIX}{}",
        base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
    )
}

/// Decodes the payload of a PNG or SVG data URI.
pub fn data_uri_bytes(uri: &str) -> Result<Vec<u8>, FormatError> {
    let payload = uri
        .strip_prefix(PNG_PREFIX)
        .or_else(|| uri.strip_prefix(SVG_PREFIX))
        .ok_or_else(|| FormatError::Corrupt("not an image data uri".to_string()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| FormatError::Corrupt(e.to_string()))
}
