//! The identify response shape and reach extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::IdentifyError;

/// Attribute field carrying the matched river-reach identifier.
pub const RIVER_ID_ATTRIBUTE: &str = "TDX Hydro Link Number";

/// Key under which the identifier is handed to the host callback.
pub const RIVER_ID_KEY: &str = "River ID";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentifyResponse {
    /// Absent or empty means no reach was found near the click.
    #[serde(default)]
    pub results: Vec<IdentifyResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentifyResult {
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default)]
    pub geometry: Option<PathGeometry>,
}

/// Polyline geometry as the service returns it: one or more paths of
/// `[x, y]` vertex pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathGeometry {
    #[serde(default)]
    pub paths: Vec<Vec<[f64; 2]>>,
}

/// The reach extracted from the first identify result.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachMatch {
    pub river_id: Value,
    pub paths: Vec<Vec<[f64; 2]>>,
}

impl IdentifyResponse {
    pub fn parse(json: &str) -> Result<Self, IdentifyError> {
        serde_json::from_str(json).map_err(|e| IdentifyError::Malformed(e.to_string()))
    }

    /// The matched reach, or `None` when the service found nothing.
    ///
    /// A result missing the identifier attribute counts as not found; the
    /// widget has nothing to hand the host without it.
    pub fn first_match(&self) -> Option<ReachMatch> {
        let result = self.results.first()?;
        let river_id = result.attributes.get(RIVER_ID_ATTRIBUTE)?.clone();
        let paths = result
            .geometry
            .as_ref()
            .map(|g| g.paths.clone())
            .unwrap_or_default();
        Some(ReachMatch { river_id, paths })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_a_single_reach() {
        let body = r#"{"results":[{"attributes":{"TDX Hydro Link Number": 42},"geometry":{"paths":[[[0,0],[1,1]]]}}]}"#;
        let response = IdentifyResponse::parse(body).expect("parse");
        let reach = response.first_match().expect("match");
        assert_eq!(reach.river_id, json!(42));
        assert_eq!(reach.paths, vec![vec![[0.0, 0.0], [1.0, 1.0]]]);
    }

    #[test]
    fn empty_results_is_not_found() {
        let response = IdentifyResponse::parse(r#"{"results":[]}"#).expect("parse");
        assert!(response.first_match().is_none());
    }

    #[test]
    fn missing_results_field_is_not_found() {
        let response = IdentifyResponse::parse("{}").expect("parse");
        assert!(response.first_match().is_none());
    }

    #[test]
    fn missing_identifier_attribute_is_not_found() {
        let body = r#"{"results":[{"attributes":{"Stream Order": 3},"geometry":{"paths":[]}}]}"#;
        let response = IdentifyResponse::parse(body).expect("parse");
        assert!(response.first_match().is_none());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            IdentifyResponse::parse("not json"),
            Err(IdentifyError::Malformed(_))
        ));
    }

    #[test]
    fn geometry_may_be_absent() {
        let body = r#"{"results":[{"attributes":{"TDX Hydro Link Number": 7}}]}"#;
        let reach = IdentifyResponse::parse(body)
            .expect("parse")
            .first_match()
            .expect("match");
        assert!(reach.paths.is_empty());
    }
}
