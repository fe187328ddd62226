//! The map shell: outer composition of view, layer list, and legend.
//!
//! The shell is pure pass-through configuration. The host hands it a
//! declarative document (the same shape the dashboard plugin serves as
//! JSON); building a map from it is a straight translation with no error
//! states of its own.

use foundation::geo::{Extent, LonLat, lon_lat_to_mercator};
use foundation::zoom::zoom_for_extent;
use layers::{basemap, z_order};
use map::{LayerSource, Map, TileSource, View};
use serde::{Deserialize, Serialize};

/// Margin in degrees added on every side of a configured extent before
/// framing it, so country borders do not touch the viewport edge.
pub const EXTENT_MARGIN_DEG: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    pub map_config: MapConfig,
    pub view_config: ViewConfig,
    pub layers: Vec<LayerConfig>,
    pub legend: Vec<LegendItem>,
}

/// Container styling forwarded to the host page untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub class_name: String,
    pub width: String,
    pub height: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            class_name: "ol-map".to_string(),
            width: "100%".to_string(),
            height: "100%".to_string(),
        }
    }
}

/// Initial camera, center in WGS84 degrees as the host supplies it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub center: [f64; 2],
    pub zoom: f64,
    /// Optional WGS84 bounds `[minLon, minLat, maxLon, maxLat]` to frame
    /// instead of center/zoom, e.g. a country's extent. Framed with
    /// [`EXTENT_MARGIN_DEG`] of slack on every side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<[f64; 4]>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 20.0],
            zoom: 2.0,
            extent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum LayerConfig {
    RasterTile {
        name: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
        z_index: i32,
    },
    ImageService {
        name: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layer_defs: Option<String>,
        z_index: i32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

fn legend_item(label: &str, color: &str) -> LegendItem {
    LegendItem {
        label: label.to_string(),
        color: color.to_string(),
    }
}

/// The stock shell document: dark gray base, topo, and the streamflow image
/// service (optionally scoped to one country), with the return-period legend.
pub fn default_shell_config(country: Option<&str>) -> ShellConfig {
    ShellConfig {
        map_config: MapConfig::default(),
        view_config: ViewConfig::default(),
        layers: vec![
            LayerConfig::RasterTile {
                name: basemap::DARK_GRAY_BASE_NAME.to_string(),
                url: basemap::DARK_GRAY_BASE_URL.to_string(),
                attribution: None,
                z_index: z_order::BASEMAP,
            },
            LayerConfig::RasterTile {
                name: basemap::WORLD_TOPO_NAME.to_string(),
                url: basemap::WORLD_TOPO_URL.to_string(),
                attribution: None,
                z_index: z_order::BASEMAP,
            },
            LayerConfig::ImageService {
                name: basemap::STREAMFLOW_NAME.to_string(),
                url: basemap::STREAMFLOW_SERVICE_URL.to_string(),
                layer_defs: country.map(|c| format!("0: rivercountry='{c}'")),
                z_index: z_order::BASEMAP,
            },
        ],
        legend: vec![
            legend_item("Normal", "#4BACCC"),
            legend_item("Exceeds 2yr", "#F7D23E"),
            legend_item("Exceeds 10yr", "#FF813D"),
            legend_item("Exceeds 25yr", "#FA4343"),
            legend_item("Exceeds 50yr", "#BC25F7"),
        ],
    }
}

/// Builds the shared map instance from a shell document.
pub fn build_map(config: &ShellConfig) -> Map {
    let center = lon_lat_to_mercator(LonLat::new(
        config.view_config.center[0],
        config.view_config.center[1],
    ));
    let mut view = View::new(center, config.view_config.zoom);
    if let Some([min_lon, min_lat, max_lon, max_lat]) = config.view_config.extent {
        let min = lon_lat_to_mercator(LonLat::new(
            min_lon - EXTENT_MARGIN_DEG,
            min_lat - EXTENT_MARGIN_DEG,
        ));
        let max = lon_lat_to_mercator(LonLat::new(
            max_lon + EXTENT_MARGIN_DEG,
            max_lat + EXTENT_MARGIN_DEG,
        ));
        let framed = Extent::new(min.x, min.y, max.x, max.y);
        let (width_px, height_px) = view.viewport_px();
        view.set_center(framed.center());
        view.set_zoom(zoom_for_extent(framed, width_px, height_px));
    }
    let mut map = Map::new(view);

    for layer in &config.layers {
        match layer {
            LayerConfig::RasterTile {
                name,
                url,
                attribution,
                z_index,
            } => {
                let mut source = TileSource::new(url.clone());
                if let Some(attribution) = attribution {
                    source = source.with_attribution(attribution.clone());
                }
                map.add_layer(
                    name.clone(),
                    *z_index,
                    LayerSource::RasterTile {
                        source,
                        opacity: 1.0,
                    },
                );
            }
            LayerConfig::ImageService {
                name,
                url,
                layer_defs,
                z_index,
            } => {
                map.add_layer(
                    name.clone(),
                    *z_index,
                    LayerSource::ImageService {
                        source: TileSource::new(url.clone()),
                        layer_defs: layer_defs.clone(),
                    },
                );
            }
        }
    }

    map
}
