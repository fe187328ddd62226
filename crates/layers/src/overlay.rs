//! Transient interaction overlays: the click marker and the highlighted
//! river reach.
//!
//! Both are ephemeral feature layers with a single-active invariant: the
//! content controller replaces the previous overlay rather than accumulating
//! them.

use foundation::geo::Coordinate;
use map::{Color, Feature, FeatureStyle, LayerSource, PointShape};

pub const MARKER_LAYER_NAME: &str = "Stream Marker";
pub const REACH_LAYER_NAME: &str = "Stream Segment";

/// Highlight stroke: dark blue, 3 px.
pub const REACH_STROKE_WIDTH: f32 = 3.0;

const MARKER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="40" height="40">
  <path d="M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9c-1.1 0-2-.9-2-2s.9-2 2-2 2 .9 2 2-.9 2-2 2z" fill="#007bff" stroke="white" stroke-width="1"/>
</svg>"##;

/// The pin icon as an inline data URI, anchored bottom-center so the tip
/// sits on the clicked coordinate.
pub fn marker_icon_data_uri() -> String {
    formats::svg_data_uri(MARKER_SVG)
}

/// A marker overlay at the clicked coordinate.
pub fn marker_overlay(coordinate: Coordinate) -> LayerSource {
    LayerSource::Overlay {
        features: vec![Feature::point(coordinate)],
        style: FeatureStyle::point(PointShape::Icon {
            href: marker_icon_data_uri(),
            anchor: [0.5, 1.0],
        }),
    }
}

/// A reach-highlight overlay built from an identify result's path arrays.
/// Each path becomes one line feature.
pub fn reach_overlay(paths: &[Vec<[f64; 2]>]) -> LayerSource {
    let features = paths
        .iter()
        .map(|path| {
            Feature::line(
                path.iter()
                    .map(|[x, y]| Coordinate::new(*x, *y))
                    .collect(),
            )
        })
        .collect();
    LayerSource::Overlay {
        features,
        style: FeatureStyle::stroked(Color::rgb8(0, 0, 139), REACH_STROKE_WIDTH),
    }
}
