pub mod basemap;
pub mod overlay;
pub mod symbology;
pub mod watersheds;

/// Draw-order tiers for the widget's layer stack. Overlays sit above every
/// tiled layer; the marker sits above the reach highlight.
pub mod z_order {
    pub const BASEMAP: i32 = 0;
    pub const HILLSHADE: i32 = 1;
    pub const WATERSHEDS: i32 = 2;
    pub const REACH_HIGHLIGHT: i32 = 3;
    pub const MARKER: i32 = 4;
}
