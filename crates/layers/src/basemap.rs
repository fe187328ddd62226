//! Static basemap layer definitions.
//!
//! These are configuration only: fixed external tile/image URL templates
//! plus the opacity and draw order each layer is mounted with. No custom
//! protocol handling happens on this side.

use map::{LayerSource, TileSource};

pub const DARK_GRAY_BASE_URL: &str = "https://server.arcgisonline.com/arcgis/rest/services/Canvas/World_Dark_Gray_Base/MapServer/tile/{z}/{y}/{x}";

pub const WORLD_TOPO_URL: &str = "https://server.arcgisonline.com/arcgis/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}";

pub const HILLSHADE_URL: &str = "https://services.arcgisonline.com/arcgis/rest/services/Elevation/World_Hillshade/MapServer/tile/{z}/{y}/{x}";

pub const STREAMFLOW_SERVICE_URL: &str =
    "https://livefeeds3.arcgis.com/arcgis/rest/services/GEOGLOWS/GlobalWaterModel_Medium/MapServer";

/// Shaded-relief opacity; keeps the thematic layers readable above it.
pub const HILLSHADE_OPACITY: f32 = 0.45;

pub const DARK_GRAY_BASE_NAME: &str = "World Dark Gray Base Map";
pub const WORLD_TOPO_NAME: &str = "World Topographic Map";
pub const HILLSHADE_NAME: &str = "World Hillshade";
pub const STREAMFLOW_NAME: &str = "Geoglows Streamflow";

pub fn dark_gray_base() -> LayerSource {
    LayerSource::RasterTile {
        source: TileSource::new(DARK_GRAY_BASE_URL).with_attribution(
            "Tiles © <a href=\"https://server.arcgisonline.com/arcgis/rest/services/Canvas/World_Dark_Gray_Base/MapServer\">ArcGIS</a>",
        ),
        opacity: 1.0,
    }
}

pub fn world_topographic() -> LayerSource {
    LayerSource::RasterTile {
        source: TileSource::new(WORLD_TOPO_URL).with_attribution(
            "Tiles © <a href=\"https://server.arcgisonline.com/arcgis/rest/services/World_Topo_Map/MapServer\">ArcGIS</a>",
        ),
        opacity: 1.0,
    }
}

pub fn hillshade() -> LayerSource {
    LayerSource::RasterTile {
        source: TileSource::new(HILLSHADE_URL),
        opacity: HILLSHADE_OPACITY,
    }
}

/// The server-rendered streamflow image service, optionally scoped to one
/// country via a layer-definition filter.
pub fn streamflow_service(country: Option<&str>) -> LayerSource {
    LayerSource::ImageService {
        source: TileSource::new(STREAMFLOW_SERVICE_URL),
        layer_defs: country.map(|c| format!("0: rivercountry='{c}'")),
    }
}
