use std::collections::BTreeMap;

use foundation::geo::Coordinate;

use crate::events::ClickBus;
use crate::log::EventLog;
use crate::style::FeatureStyle;
use crate::view::View;

/// Stable handle for a layer in the map's layer collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// A transient feature rendered by an overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
}

impl Feature {
    pub fn point(p: Coordinate) -> Self {
        Self {
            geometry: Geometry::Point(p),
        }
    }

    pub fn line(vertices: Vec<Coordinate>) -> Self {
        Self {
            geometry: Geometry::LineString(vertices),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
}

/// A remote tile or image source, consumed as configuration only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: Option<String>,
}

impl TileSource {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: None,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }
}

/// What a layer draws from.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSource {
    /// Shaded relief / imagery tiles.
    RasterTile { source: TileSource, opacity: f32 },
    /// Tiled vector geometry painted by a serialized style document.
    VectorTile { source: TileSource, style_json: String },
    /// An image (non-tiled) map service rendered server-side.
    ImageService { source: TileSource, layer_defs: Option<String> },
    /// Client-owned features: markers, highlighted reaches, thematic points.
    Overlay { features: Vec<Feature>, style: FeatureStyle },
}

impl LayerSource {
    pub fn is_overlay(&self) -> bool {
        matches!(self, LayerSource::Overlay { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerRecord {
    pub name: String,
    pub z_index: i32,
    pub source: LayerSource,
}

/// The shared map instance.
///
/// Owned externally (by the widget shell); content controllers only mutate
/// the layer collection and the view. All mutation happens on the UI thread,
/// so there is no interior locking.
#[derive(Debug, Default)]
pub struct Map {
    view: View,
    next_layer: u64,
    layers: BTreeMap<LayerId, LayerRecord>,
    clicks: ClickBus,
    log: EventLog,
}

impl Map {
    pub fn new(view: View) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn clicks(&self) -> &ClickBus {
        &self.clicks
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// Adds a layer and returns its handle.
    pub fn add_layer(
        &mut self,
        name: impl Into<String>,
        z_index: i32,
        source: LayerSource,
    ) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(
            id,
            LayerRecord {
                name: name.into(),
                z_index,
                source,
            },
        );
        id
    }

    /// Removes a layer. Returns `true` if it was present.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerRecord> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn contains_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Layers in draw order: ascending z-index, insertion order within a tier.
    pub fn layers_ordered(&self) -> Vec<(LayerId, &LayerRecord)> {
        let mut out: Vec<(LayerId, &LayerRecord)> =
            self.layers.iter().map(|(id, rec)| (*id, rec)).collect();
        out.sort_by_key(|(id, rec)| (rec.z_index, *id));
        out
    }

    pub fn find_layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.layers
            .iter()
            .find(|(_, rec)| rec.name == name)
            .map(|(id, _)| *id)
    }

    /// Number of overlay layers with the given name. The interaction flow
    /// keeps this at most 1 for each of its overlay names.
    pub fn overlay_count_named(&self, name: &str) -> usize {
        self.layers
            .values()
            .filter(|rec| rec.name == name && rec.source.is_overlay())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FeatureStyle;
    use foundation::geo::Coordinate;

    fn overlay(features: Vec<Feature>) -> LayerSource {
        LayerSource::Overlay {
            features,
            style: FeatureStyle::default(),
        }
    }

    #[test]
    fn add_and_remove_layers() {
        let mut map = Map::default();
        let id = map.add_layer("Stream Marker", 4, overlay(vec![]));
        assert!(map.contains_layer(id));
        assert_eq!(map.layer_count(), 1);
        assert!(map.remove_layer(id));
        assert!(!map.remove_layer(id));
        assert_eq!(map.layer_count(), 0);
    }

    #[test]
    fn draw_order_is_z_then_insertion() {
        let mut map = Map::default();
        let top = map.add_layer("top", 4, overlay(vec![]));
        let bottom = map.add_layer("bottom", 0, overlay(vec![]));
        let mid_a = map.add_layer("mid-a", 2, overlay(vec![]));
        let mid_b = map.add_layer("mid-b", 2, overlay(vec![]));

        let order: Vec<LayerId> = map.layers_ordered().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![bottom, mid_a, mid_b, top]);
    }

    #[test]
    fn overlay_count_only_counts_overlays() {
        let mut map = Map::default();
        map.add_layer(
            "Hillshade",
            0,
            LayerSource::RasterTile {
                source: TileSource::new("https://example/{z}/{y}/{x}"),
                opacity: 0.5,
            },
        );
        map.add_layer(
            "Stream Marker",
            4,
            overlay(vec![Feature::point(Coordinate::new(0.0, 0.0))]),
        );
        assert_eq!(map.overlay_count_named("Stream Marker"), 1);
        assert_eq!(map.overlay_count_named("Hillshade"), 0);
    }
}
