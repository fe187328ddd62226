//! Building the geometry-identify request.
//!
//! The request is a plain HTTP GET against a fixed map-service endpoint.
//! Parameter encoding is deterministic: fixed pair order, standard
//! form-urlencoding.

use foundation::geo::{Coordinate, EPSG_WGS84, Extent};

/// The river-reach identify service.
pub const IDENTIFY_ENDPOINT: &str =
    "https://livefeeds3.arcgis.com/arcgis/rest/services/GEOGLOWS/GlobalWaterModel_Medium/MapServer/identify";

/// Pixel tolerance around the click point.
pub const TOLERANCE_PX: u32 = 5;

/// Spatial reference of the input geometry.
pub const INPUT_SR: u32 = EPSG_WGS84;

/// Fixed `width,height,dpi` descriptor the service scales tolerance by.
pub const IMAGE_DISPLAY: &str = "800,600,96";

/// Identifies one issued identify request.
///
/// Generations increase monotonically per controller; a response is applied
/// only if its generation is still the latest, which is how stale responses
/// from rapid clicking are discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Parameters of one identify query.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifyParams {
    pub geometry: Coordinate,
    pub map_extent: Extent,
}

impl IdentifyParams {
    pub fn new(geometry: Coordinate, map_extent: Extent) -> Self {
        Self {
            geometry,
            map_extent,
        }
    }

    /// Query pairs in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("f", "json".to_string()),
            ("tolerance", TOLERANCE_PX.to_string()),
            ("returnGeometry", "true".to_string()),
            ("geometryType", "esriGeometryPoint".to_string()),
            ("sr", INPUT_SR.to_string()),
            ("geometry", format!("{},{}", self.geometry.x, self.geometry.y)),
            ("mapExtent", self.map_extent.to_query_value()),
            ("imageDisplay", IMAGE_DISPLAY.to_string()),
        ]
    }

    pub fn query_string(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.query_pairs().iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(&form_urlencode(value));
        }
        out
    }

    /// The full request URL.
    pub fn url(&self) -> String {
        format!("{IDENTIFY_ENDPOINT}?{}", self.query_string())
    }
}

/// application/x-www-form-urlencoded escaping of a query value.
fn form_urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
