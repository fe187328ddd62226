//! Thematic style catalog.
//!
//! Pure lookup tables mapping categorical/numeric dataset codes to paint
//! descriptors. Initialized as code, never mutated, shared by value. A
//! missing key yields `None`; handling that is the caller's job.

use map::{Color, FeatureStyle, PointShape};

const POINT_RADIUS: f32 = 5.0;
const SHAPE_RADIUS: f32 = 10.0;
const DIAMOND_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Marker geometry variants the drought-condition networks report in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConditionShape {
    Triangle,
    Diamond,
    Circle,
}

fn condition_point(shape: ConditionShape, fill: Color, stroke: Color) -> FeatureStyle {
    let shape = match shape {
        ConditionShape::Triangle => PointShape::Regular {
            points: 3,
            radius: SHAPE_RADIUS,
            angle_rad: 0.0,
        },
        ConditionShape::Diamond => PointShape::Regular {
            points: 4,
            radius: SHAPE_RADIUS,
            angle_rad: DIAMOND_ANGLE,
        },
        ConditionShape::Circle => PointShape::Circle {
            radius: POINT_RADIUS,
        },
    };
    FeatureStyle::point(shape)
        .with_fill(fill)
        .with_stroke(stroke, 2.0)
}

/// Observer-reported drought condition categories.
///
/// Labels are matched as reported ("Near Normal" also appears as
/// "Near normal" and "Near_Normal" across networks).
pub fn drought_condition_style(label: &str, shape: ConditionShape) -> Option<FeatureStyle> {
    let (fill, stroke) = match normalize_label(label).as_str() {
        "severely dry" => (Color::rgb8(186, 110, 110), Color::rgb8(130, 0, 0)),
        "moderately dry" => (Color::rgb8(234, 146, 146), Color::rgb8(250, 0, 0)),
        "mildly dry" => (Color::rgb8(232, 188, 112), Color::rgb8(230, 170, 45)),
        "near normal" => (Color::rgb8(221, 221, 221), Color::rgb8(187, 187, 187)),
        "mildly wet" => (Color::rgb8(113, 200, 105), Color::rgb8(0, 170, 0)),
        "moderately wet" => (Color::rgb8(111, 135, 232), Color::rgb8(0, 40, 255)),
        "severely wet" => (Color::rgb8(186, 121, 228), Color::rgb8(130, 0, 220)),
        _ => return None,
    };
    Some(condition_point(shape, fill, stroke))
}

/// Selection highlight for condition markers.
pub fn drought_condition_highlight(shape: ConditionShape) -> FeatureStyle {
    condition_point(shape, Color::rgb8(0, 255, 255), Color::rgb8(0, 245, 245))
}

fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_boundary = false;
    for c in label.chars() {
        if c == '_' || c == ' ' {
            if !out.is_empty() && !prev_boundary {
                out.push(' ');
            }
            prev_boundary = true;
            continue;
        }
        // Split CamelCase labels like "SeverelyDry".
        if c.is_ascii_uppercase() && !out.is_empty() && !prev_boundary {
            out.push(' ');
        }
        prev_boundary = false;
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Drought monitor severity class fills, D0 (abnormally dry) through D4
/// (exceptional drought).
pub fn drought_class_fill(class: u8) -> Option<FeatureStyle> {
    Some(FeatureStyle::filled(drought_class_color(class)?))
}

/// Outline-only variant for overlaying classes on another theme.
pub fn drought_class_outline(class: u8) -> Option<FeatureStyle> {
    Some(
        FeatureStyle::filled(Color::TRANSPARENT).with_stroke(drought_class_color(class)?, 2.0),
    )
}

/// Point variant for station-level class reports.
pub fn drought_class_point(class: u8) -> Option<FeatureStyle> {
    Some(
        FeatureStyle::point(PointShape::Circle {
            radius: POINT_RADIUS,
        })
        .with_fill(drought_class_color(class)?)
        .with_stroke(Color::rgb8(0, 0, 0), 1.0),
    )
}

fn drought_class_color(class: u8) -> Option<Color> {
    let c = match class {
        0 => Color::rgb8(255, 255, 0),
        1 => Color::rgb8(252, 211, 127),
        2 => Color::rgb8(255, 170, 0),
        3 => Color::rgb8(230, 0, 0),
        4 => Color::rgb8(115, 0, 0),
        _ => return None,
    };
    Some(c)
}

/// Streamflow percentile bins from the water-watch feed, 0 (no data ring)
/// through 7 (high flow).
pub fn waterwatch_style(bin: u8) -> Option<FeatureStyle> {
    let style = match bin {
        0 => FeatureStyle::point(PointShape::Circle {
            radius: POINT_RADIUS,
        })
        .with_fill(Color::TRANSPARENT)
        .with_stroke(Color::rgb8(0, 0, 0), 1.0),
        1 => waterwatch_dot(Color::rgb8(255, 0, 0)),
        2 => waterwatch_dot(Color::rgb8(177, 33, 33)),
        3 => waterwatch_dot(Color::rgb8(255, 164, 0)),
        4 => waterwatch_dot(Color::rgb8(0, 255, 0)),
        5 => waterwatch_dot(Color::rgb8(64, 223, 208)),
        6 => waterwatch_dot(Color::rgb8(0, 0, 255)),
        7 => waterwatch_dot(Color::rgb8(1, 1, 1)),
        _ => return None,
    };
    Some(style)
}

fn waterwatch_dot(fill: Color) -> FeatureStyle {
    FeatureStyle::point(PointShape::Circle {
        radius: POINT_RADIUS,
    })
    .with_fill(fill)
}

/// Precipitation outlook probability bins.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutlookLean {
    Above,
    Below,
    EqualChances,
}

/// Seasonal precipitation outlook fills, keyed by lean and probability
/// percent (33, 40, 50, 60, 70, 80, 90; equal-chances only defines 33).
pub fn precip_outlook_style(lean: OutlookLean, percent: u8) -> Option<FeatureStyle> {
    let fill = match (lean, percent) {
        (OutlookLean::Above, 33) => Color::rgb8(150, 207, 128),
        (OutlookLean::Above, 40) => Color::rgb8(179, 217, 171),
        (OutlookLean::Above, 50) => Color::rgb8(72, 174, 56),
        (OutlookLean::Above, 60) => Color::rgb8(57, 124, 94),
        (OutlookLean::Above, 70) => Color::rgb8(0, 142, 64),
        (OutlookLean::Above, 80) => Color::rgb8(40, 85, 61),
        (OutlookLean::Above, 90) => Color::rgb8(40, 85, 23),
        (OutlookLean::Below, 33) => Color::rgb8(240, 212, 147),
        (OutlookLean::Below, 40) => Color::rgb8(215, 166, 76),
        (OutlookLean::Below, 50) => Color::rgb8(186, 108, 50),
        (OutlookLean::Below, 60) => Color::rgb8(155, 80, 49),
        (OutlookLean::Below, 70) => Color::rgb8(147, 70, 57),
        (OutlookLean::Below, 80) => Color::rgb8(128, 64, 0),
        (OutlookLean::Below, 90) => Color::rgb8(80, 48, 48),
        (OutlookLean::EqualChances, 33) => Color::rgb8(175, 174, 175),
        _ => return None,
    };
    Some(FeatureStyle::filled(fill).with_stroke(Color::rgb8(192, 192, 192), 1.0))
}

/// Observation network colors for the stations layer.
pub fn station_network_style(network: &str) -> Option<FeatureStyle> {
    let (fill, stroke) = match network {
        "cocorahs" => (Color::rgb8(0, 255, 0), Color::rgb8(34, 139, 34)),
        "acis" => (Color::rgb8(255, 0, 0), Color::rgb8(178, 34, 34)),
        "hcdn" => (Color::rgb8(0, 0, 255), Color::rgb8(0, 0, 139)),
        "raws" => (Color::rgb8(255, 255, 0), Color::rgb8(218, 165, 32)),
        "scan" => (Color::rgb8(255, 0, 255), Color::rgb8(75, 0, 130)),
        "snotel" => (Color::rgb8(0, 255, 255), Color::rgb8(72, 209, 204)),
        "wells" => (Color::rgb8(255, 140, 0), Color::rgb8(204, 112, 0)),
        "reservoirs" => (Color::rgb8(0, 128, 0), Color::rgb8(0, 77, 0)),
        _ => return None,
    };
    Some(
        FeatureStyle::point(PointShape::Circle {
            radius: POINT_RADIUS,
        })
        .with_fill(fill)
        .with_stroke(stroke, 1.0),
    )
}

/// Trend direction markers: drying (-1), steady (0), wetting (+1).
/// `zoomed` uses the larger radius shown past the station-detail zoom.
pub fn trend_style(direction: i8, zoomed: bool) -> Option<FeatureStyle> {
    let fill = match direction {
        -1 => Color::rgb8(255, 0, 0),
        0 => Color::rgb8(162, 162, 162),
        1 => Color::rgb8(0, 0, 255),
        _ => return None,
    };
    let radius = if zoomed { POINT_RADIUS } else { 2.0 };
    Some(
        FeatureStyle::point(PointShape::Circle { radius })
            .with_fill(fill)
            .with_stroke(Color::rgb8(255, 255, 255), 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use map::PointShape;

    #[test]
    fn condition_labels_match_across_spellings() {
        let a = drought_condition_style("Severely Dry", ConditionShape::Triangle);
        let b = drought_condition_style("SeverelyDry", ConditionShape::Triangle);
        let c = drought_condition_style("Severely_Dry", ConditionShape::Triangle);
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn condition_shapes_differ() {
        let tri = drought_condition_style("Near Normal", ConditionShape::Triangle).expect("tri");
        let sq = drought_condition_style("Near normal", ConditionShape::Diamond).expect("sq");
        assert!(matches!(
            tri.shape,
            Some(PointShape::Regular { points: 3, .. })
        ));
        assert!(matches!(
            sq.shape,
            Some(PointShape::Regular { points: 4, .. })
        ));
    }

    #[test]
    fn unknown_keys_yield_none() {
        assert!(drought_condition_style("Soggy", ConditionShape::Circle).is_none());
        assert!(drought_class_fill(5).is_none());
        assert!(waterwatch_style(8).is_none());
        assert!(precip_outlook_style(OutlookLean::EqualChances, 50).is_none());
        assert!(station_network_style("carrier-pigeon").is_none());
        assert!(trend_style(2, false).is_none());
    }

    #[test]
    fn drought_class_variants_share_colors() {
        for class in 0..=4 {
            let fill = drought_class_fill(class).expect("fill");
            let outline = drought_class_outline(class).expect("outline");
            assert_eq!(
                fill.fill.map(|f| f.color),
                outline.stroke.map(|s| s.color)
            );
        }
    }

    #[test]
    fn trend_radius_depends_on_zoom() {
        let small = trend_style(1, false).expect("style");
        let large = trend_style(1, true).expect("style");
        match (small.shape, large.shape) {
            (
                Some(PointShape::Circle { radius: r1 }),
                Some(PointShape::Circle { radius: r2 }),
            ) => assert!(r1 < r2),
            other => panic!("expected circles, got {other:?}"),
        }
    }
}
