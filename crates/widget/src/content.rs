//! The map content controller and the click-to-identify interaction flow.
//!
//! The controller owns the transient marker and reach-highlight overlays as
//! explicit fields, so the at-most-one invariant for each is enforced in one
//! place. The identify exchange is split in two: `on_click` places the
//! marker and returns a [`PendingIdentify`] carrying the request, and
//! `apply_identify` folds the response back in. The transport between the
//! two is the caller's job (async in the browser glue), which keeps the
//! controller synchronous and deterministic.
//!
//! Each pending request is tagged with a monotonically increasing
//! generation. A response is applied only while its generation is still the
//! latest; stale successes and stale not-founds are both discarded, so rapid
//! clicking can never delete or restyle a newer click's overlays.

use foundation::geo::Coordinate;
use identify::{Generation, IdentifyError, IdentifyParams, IdentifyResponse, RIVER_ID_KEY};
use layers::overlay::{MARKER_LAYER_NAME, REACH_LAYER_NAME, marker_overlay, reach_overlay};
use layers::{basemap, watersheds, z_order};
use map::{ClickSubscription, LayerId, Map};
use serde_json::Value;

/// Zoom below which reach geometry cannot be reliably resolved; clicks
/// below it recenter and zoom instead of querying.
pub const MIN_QUERY_ZOOM: f64 = 15.0;

pub const RIVER_NOT_FOUND_MESSAGE: &str =
    "River not found. Try to zoom in and be precise when clicking the map.";

/// Blocking user-facing notification, e.g. a browser alert.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Host callback receiving identified variables, keyed by display name.
pub trait VariableSink {
    fn update(&mut self, key: &str, value: Value);
}

/// What a click did.
#[derive(Debug)]
pub enum ClickOutcome {
    /// Below query zoom: the view was recentered and zoomed to the
    /// threshold; no request was issued.
    Zoomed,
    /// A marker was placed and an identify request should be sent.
    Query(PendingIdentify),
}

/// An identify request in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIdentify {
    pub generation: Generation,
    pub params: IdentifyParams,
    marker: LayerId,
}

impl PendingIdentify {
    pub fn url(&self) -> String {
        self.params.url()
    }
}

/// How a response was folded into the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Reach highlighted and the identifier handed to the sink.
    Resolved(Value),
    /// No reach near the click; marker removed, user notified.
    NotFound,
    /// Transport or parse failure; logged, map state left as-is.
    Failed,
    /// A newer click superseded this request; nothing was touched.
    Stale,
}

/// Attaches static layers and runs the identify flow against a shared map.
#[derive(Debug, Default)]
pub struct MapContent {
    hillshade: Option<LayerId>,
    watersheds: Option<LayerId>,
    marker: Option<LayerId>,
    highlight: Option<LayerId>,
    next_generation: u64,
    latest: Option<Generation>,
}

impl MapContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the hillshade and watershed layers and subscribes to clicks.
    ///
    /// Safe to call again after a re-render: layers already on the map are
    /// not duplicated, and the returned subscription releases itself on
    /// drop, so the previous one dies with the previous render.
    pub fn attach(&mut self, map: &mut Map) -> Result<ClickSubscription, formats::FormatError> {
        if !self.layer_alive(map, self.hillshade) {
            self.hillshade = Some(map.add_layer(
                basemap::HILLSHADE_NAME,
                z_order::HILLSHADE,
                basemap::hillshade(),
            ));
        }
        if !self.layer_alive(map, self.watersheds) {
            self.watersheds = Some(map.add_layer(
                watersheds::WATERSHEDS_LAYER_NAME,
                z_order::WATERSHEDS,
                watersheds::watershed_layer()?,
            ));
        }
        Ok(map.clicks().subscribe())
    }

    /// Handles one map click.
    pub fn on_click(&mut self, map: &mut Map, coordinate: Coordinate) -> ClickOutcome {
        let zoom = map.view().zoom();
        if zoom < MIN_QUERY_ZOOM {
            let view = map.view_mut();
            view.set_center(coordinate);
            view.set_zoom(MIN_QUERY_ZOOM);
            map.log_mut()
                .emit("click", format!("zoomed to query threshold from {zoom}"));
            return ClickOutcome::Zoomed;
        }

        let marker = self.set_marker(map, coordinate);
        let params = IdentifyParams::new(coordinate, map.view().calculate_extent());

        let generation = Generation(self.next_generation);
        self.next_generation += 1;
        self.latest = Some(generation);

        ClickOutcome::Query(PendingIdentify {
            generation,
            params,
            marker,
        })
    }

    /// Folds an identify outcome back into the map.
    pub fn apply_identify(
        &mut self,
        map: &mut Map,
        pending: &PendingIdentify,
        outcome: Result<IdentifyResponse, IdentifyError>,
        sink: &mut dyn VariableSink,
        notifier: &mut dyn Notifier,
    ) -> Resolution {
        if self.latest != Some(pending.generation) {
            map.log_mut().emit(
                "identify",
                format!("discarded stale response for generation {}", pending.generation.0),
            );
            return Resolution::Stale;
        }

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                map.log_mut().emit("identify", err.to_string());
                return Resolution::Failed;
            }
        };

        match response.first_match() {
            Some(reach) => {
                self.set_highlight(map, &reach.paths);
                sink.update(RIVER_ID_KEY, reach.river_id.clone());
                Resolution::Resolved(reach.river_id)
            }
            None => {
                // Remove the marker this request placed, and only that one.
                // With the generation check above the ids always agree; the
                // comparison keeps marker identity explicit.
                if self.marker == Some(pending.marker) {
                    self.clear_marker(map);
                }
                notifier.notify(RIVER_NOT_FOUND_MESSAGE);
                Resolution::NotFound
            }
        }
    }

    /// Replaces the marker overlay, returning the new layer id.
    fn set_marker(&mut self, map: &mut Map, coordinate: Coordinate) -> LayerId {
        self.clear_marker(map);
        let id = map.add_layer(MARKER_LAYER_NAME, z_order::MARKER, marker_overlay(coordinate));
        self.marker = Some(id);
        id
    }

    fn clear_marker(&mut self, map: &mut Map) {
        if let Some(id) = self.marker.take() {
            map.remove_layer(id);
        }
    }

    /// Replaces the reach-highlight overlay.
    fn set_highlight(&mut self, map: &mut Map, paths: &[Vec<[f64; 2]>]) {
        self.clear_highlight(map);
        self.highlight = Some(map.add_layer(
            REACH_LAYER_NAME,
            z_order::REACH_HIGHLIGHT,
            reach_overlay(paths),
        ));
    }

    fn clear_highlight(&mut self, map: &mut Map) {
        if let Some(id) = self.highlight.take() {
            map.remove_layer(id);
        }
    }

    fn layer_alive(&self, map: &Map, id: Option<LayerId>) -> bool {
        id.is_some_and(|id| map.contains_layer(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{build_map, default_shell_config};
    use map::{Geometry, LayerSource};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(String, Value)>,
    }

    impl VariableSink for RecordingSink {
        fn update(&mut self, key: &str, value: Value) {
            self.calls.push((key.to_string(), value));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn attached() -> (Map, MapContent) {
        let mut map = build_map(&default_shell_config(None));
        let mut content = MapContent::new();
        let _sub = content.attach(&mut map).expect("attach");
        (map, content)
    }

    fn query(content: &mut MapContent, map: &mut Map, x: f64, y: f64) -> PendingIdentify {
        match content.on_click(map, Coordinate::new(x, y)) {
            ClickOutcome::Query(pending) => pending,
            ClickOutcome::Zoomed => panic!("expected a query"),
        }
    }

    fn reach_response(id: i64, paths: serde_json::Value) -> IdentifyResponse {
        IdentifyResponse::parse(
            &json!({
                "results": [{
                    "attributes": {"TDX Hydro Link Number": id},
                    "geometry": {"paths": paths},
                }]
            })
            .to_string(),
        )
        .expect("parse")
    }

    #[test]
    fn attach_adds_hillshade_and_watersheds_once() {
        let mut map = build_map(&default_shell_config(None));
        let mut content = MapContent::new();
        let before = map.layer_count();

        let sub = content.attach(&mut map).expect("attach");
        assert_eq!(map.layer_count(), before + 2);
        assert!(map.find_layer_by_name(basemap::HILLSHADE_NAME).is_some());
        assert!(
            map.find_layer_by_name(watersheds::WATERSHEDS_LAYER_NAME)
                .is_some()
        );

        // Re-attach (a re-render) must not duplicate layers or leak the old
        // subscription.
        drop(sub);
        let _sub = content.attach(&mut map).expect("attach");
        assert_eq!(map.layer_count(), before + 2);
        assert_eq!(map.clicks().subscriber_count(), 1);
    }

    #[test]
    fn below_threshold_click_recenters_and_zooms() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(10.0);
        let before = map.layer_count();

        let clicked = Coordinate::new(-9_750_000.0, 5_500_000.0);
        let outcome = content.on_click(&mut map, clicked);

        assert!(matches!(outcome, ClickOutcome::Zoomed));
        assert_eq!(map.view().center(), clicked);
        assert_eq!(map.view().zoom(), MIN_QUERY_ZOOM);
        // No marker, no request.
        assert_eq!(map.layer_count(), before);
    }

    #[test]
    fn query_click_places_exactly_one_marker() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);

        query(&mut content, &mut map, 1.0, 2.0);
        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), 1);

        // Another click replaces, never accumulates.
        query(&mut content, &mut map, 3.0, 4.0);
        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), 1);
    }

    #[test]
    fn pending_request_carries_click_geometry_and_extent() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);

        let pending = query(&mut content, &mut map, 100.0, 200.0);
        assert_eq!(pending.params.geometry, Coordinate::new(100.0, 200.0));
        assert_eq!(pending.params.map_extent, map.view().calculate_extent());
        assert!(pending.url().contains("tolerance=5"));
    }

    #[test]
    fn resolved_reach_highlights_and_reports_the_river_id() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();

        let pending = query(&mut content, &mut map, 0.5, 0.5);
        let resolution = content.apply_identify(
            &mut map,
            &pending,
            Ok(reach_response(42, json!([[[0.0, 0.0], [1.0, 1.0]]]))),
            &mut sink,
            &mut notifier,
        );

        assert_eq!(resolution, Resolution::Resolved(json!(42)));
        assert_eq!(sink.calls, vec![("River ID".to_string(), json!(42))]);
        assert!(notifier.messages.is_empty());

        assert_eq!(map.overlay_count_named(REACH_LAYER_NAME), 1);
        let id = map.find_layer_by_name(REACH_LAYER_NAME).expect("highlight");
        match &map.layer(id).expect("record").source {
            LayerSource::Overlay { features, .. } => {
                assert_eq!(features.len(), 1);
                assert_eq!(
                    features[0].geometry,
                    Geometry::LineString(vec![
                        Coordinate::new(0.0, 0.0),
                        Coordinate::new(1.0, 1.0)
                    ])
                );
            }
            other => panic!("expected overlay, got {other:?}"),
        }
    }

    #[test]
    fn not_found_removes_the_marker_and_notifies() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();
        let markers_before = map.overlay_count_named(MARKER_LAYER_NAME);

        let pending = query(&mut content, &mut map, 0.5, 0.5);
        let resolution = content.apply_identify(
            &mut map,
            &pending,
            Ok(IdentifyResponse::default()),
            &mut sink,
            &mut notifier,
        );

        assert_eq!(resolution, Resolution::NotFound);
        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), markers_before);
        assert_eq!(notifier.messages, vec![RIVER_NOT_FOUND_MESSAGE.to_string()]);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn not_found_removes_the_marker_its_click_placed() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();

        let pending = query(&mut content, &mut map, 0.5, 0.5);
        let marker_id = map.find_layer_by_name(MARKER_LAYER_NAME).expect("marker");

        content.apply_identify(
            &mut map,
            &pending,
            Ok(IdentifyResponse::default()),
            &mut sink,
            &mut notifier,
        );
        assert!(!map.contains_layer(marker_id));
    }

    #[test]
    fn transport_failure_is_logged_and_leaves_the_marker() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();

        let pending = query(&mut content, &mut map, 0.5, 0.5);
        let resolution = content.apply_identify(
            &mut map,
            &pending,
            Err(IdentifyError::Transport("connection reset".to_string())),
            &mut sink,
            &mut notifier,
        );

        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), 1);
        assert!(sink.calls.is_empty());
        assert!(notifier.messages.is_empty());
        assert!(
            map.log()
                .records()
                .iter()
                .any(|r| r.kind == "identify" && r.message.contains("connection reset"))
        );
    }

    #[test]
    fn stale_responses_are_discarded() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();

        let first = query(&mut content, &mut map, 1.0, 1.0);
        let second = query(&mut content, &mut map, 2.0, 2.0);

        // First response arrives after the second click: ignored entirely,
        // even as a not-found that would otherwise delete a marker.
        let resolution = content.apply_identify(
            &mut map,
            &first,
            Ok(IdentifyResponse::default()),
            &mut sink,
            &mut notifier,
        );
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), 1);
        assert!(notifier.messages.is_empty());

        // The second click's own response still applies.
        let resolution = content.apply_identify(
            &mut map,
            &second,
            Ok(reach_response(7, json!([[[2.0, 2.0], [3.0, 3.0]]]))),
            &mut sink,
            &mut notifier,
        );
        assert_eq!(resolution, Resolution::Resolved(json!(7)));
    }

    #[test]
    fn repeated_resolved_clicks_do_not_accumulate_overlays() {
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(16.0);
        let mut sink = RecordingSink::default();
        let mut notifier = RecordingNotifier::default();

        for _ in 0..3 {
            let pending = query(&mut content, &mut map, 0.5, 0.5);
            content.apply_identify(
                &mut map,
                &pending,
                Ok(reach_response(42, json!([[[0.0, 0.0], [1.0, 1.0]]]))),
                &mut sink,
                &mut notifier,
            );
        }

        assert_eq!(map.overlay_count_named(MARKER_LAYER_NAME), 1);
        assert_eq!(map.overlay_count_named(REACH_LAYER_NAME), 1);
        assert_eq!(sink.calls.len(), 3);
    }

    #[test]
    fn threshold_scenario_from_web_mercator_click() {
        // Click at [-9750000, 5500000] with zoom 10 and threshold 15.
        let (mut map, mut content) = attached();
        map.view_mut().set_zoom(10.0);
        let outcome = content.on_click(&mut map, Coordinate::new(-9_750_000.0, 5_500_000.0));
        assert!(matches!(outcome, ClickOutcome::Zoomed));
        assert_eq!(
            map.view().center(),
            Coordinate::new(-9_750_000.0, 5_500_000.0)
        );
        assert_eq!(map.view().zoom(), 15.0);
    }
}
