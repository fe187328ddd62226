//! The styled "environment watersheds" vector-tile layer.
//!
//! The style document is hand-authored data: per-symbol filters on the
//! `Symbol` attribute select stream orders, and zoom stops fade boundaries
//! in and widen streams as the user approaches query zoom. The sprite atlas
//! travels inline as a data URI, so the style is self-contained.

use formats::{Filter, PaintValue, StyleDocument, StyleLayer, StyleSource};
use map::{LayerSource, TileSource};
use serde_json::json;

pub const WATERSHEDS_LAYER_NAME: &str = "Environment Watersheds";

pub const WATERSHEDS_TILE_URL: &str =
    "https://basemaps.arcgis.com/arcgis/rest/services/Environment_Watersheds/VectorTileServer/tile/{z}/{y}/{x}.pbf";

const SOURCE_ID: &str = "watersheds";
const SOURCE_LAYER: &str = "Environment Watersheds";

// 1x1 transparent PNG; placeholder slot the atlas build step overwrites.
const SPRITE_PNG_BASE64: &str =
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Stream-order symbol codes carried by the tiles, lowest to highest order.
const STREAM_SYMBOLS: [(i64, &str, f64); 4] = [
    (1, "#9bd1e8", 0.4),
    (2, "#6fbde0", 0.7),
    (3, "#3fa8d8", 1.1),
    (4, "#19afff", 1.6),
];

/// Builds the full watershed style document.
pub fn watershed_style_document() -> StyleDocument {
    let mut doc = StyleDocument::new("environment-watersheds");
    doc.sprite = Some(SPRITE_PNG_BASE64.to_string());
    doc.sources
        .insert(SOURCE_ID.to_string(), StyleSource::vector(WATERSHEDS_TILE_URL));

    // Basin fills appear only once boundaries are meaningful on screen.
    doc.layers.push(
        StyleLayer::fill("basin-fill", SOURCE_ID, SOURCE_LAYER)
            .with_filter(Filter::eq("Symbol", 0))
            .with_paint("fill-color", PaintValue::constant("#0b2e4f"))
            .with_paint(
                "fill-opacity",
                PaintValue::stops(1.0, vec![(4.0, json!(0.0)), (8.0, json!(0.12))]),
            ),
    );

    doc.layers.push(
        StyleLayer::line("basin-boundary", SOURCE_ID, SOURCE_LAYER)
            .with_filter(Filter::eq("Symbol", 0))
            .with_paint("line-color", PaintValue::constant("#8dd6fc"))
            .with_paint(
                "line-opacity",
                PaintValue::stops(1.0, vec![(5.0, json!(0.2)), (10.0, json!(0.8))]),
            )
            .with_paint(
                "line-width",
                PaintValue::stops(1.2, vec![(5.0, json!(0.5)), (12.0, json!(1.5))]),
            ),
    );

    // One line layer per stream order, widening toward query zoom.
    for (symbol, color, base_width) in STREAM_SYMBOLS {
        doc.layers.push(
            StyleLayer::line(format!("stream-order-{symbol}"), SOURCE_ID, SOURCE_LAYER)
                .with_filter(Filter::eq("Symbol", symbol))
                .with_paint("line-color", PaintValue::constant(color))
                .with_paint(
                    "line-width",
                    PaintValue::stops(
                        1.4,
                        vec![
                            (6.0, json!(base_width * 0.5)),
                            (15.0, json!(base_width * 2.5)),
                        ],
                    ),
                ),
        );
    }

    doc
}

/// The watershed layer ready to mount on a map, style serialized inline.
pub fn watershed_layer() -> Result<LayerSource, formats::FormatError> {
    Ok(LayerSource::VectorTile {
        source: TileSource::new(WATERSHEDS_TILE_URL),
        style_json: watershed_style_document().to_json()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::PaintValue;

    #[test]
    fn document_has_a_layer_per_stream_order() {
        let doc = watershed_style_document();
        for symbol in 1..=4 {
            assert!(
                doc.layers
                    .iter()
                    .any(|l| l.id == format!("stream-order-{symbol}")),
                "missing stream-order-{symbol}"
            );
        }
    }

    #[test]
    fn filters_key_on_the_symbol_attribute() {
        let doc = watershed_style_document();
        for layer in &doc.layers {
            let filter = layer.filter.as_ref().expect("every layer filtered");
            assert_eq!(filter.0[0], "==");
            assert_eq!(filter.0[1], "Symbol");
        }
    }

    #[test]
    fn widths_use_zoom_stops() {
        let doc = watershed_style_document();
        let stream = doc
            .layers
            .iter()
            .find(|l| l.id == "stream-order-4")
            .expect("layer");
        assert!(matches!(
            stream.paint.get("line-width"),
            Some(PaintValue::Stops(_))
        ));
    }

    #[test]
    fn mounted_layer_carries_the_serialized_style() {
        match watershed_layer().expect("layer") {
            map::LayerSource::VectorTile { source, style_json } => {
                assert_eq!(source.url_template, WATERSHEDS_TILE_URL);
                let doc = StyleDocument::from_json(&style_json).expect("style parses back");
                assert_eq!(doc, watershed_style_document());
            }
            other => panic!("expected vector tile layer, got {other:?}"),
        }
    }
}
