//! Zoom level math for EPSG:3857 tile pyramids.

use crate::geo::{Coordinate, Extent, MERCATOR_HALF_WORLD_M};

/// Resolution in meters per pixel at zoom 0 for 256 px tiles.
pub const ZOOM_0_RESOLUTION: f64 = MERCATOR_HALF_WORLD_M * 2.0 / 256.0;

/// Lowest zoom level views will clamp to.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom level views will clamp to.
pub const MAX_ZOOM: f64 = 22.0;

/// Meters per pixel at a (fractional) zoom level.
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    ZOOM_0_RESOLUTION / 2f64.powf(zoom)
}

/// The map extent visible for a view at `center`/`zoom` through a viewport of
/// `width_px` x `height_px` device pixels.
pub fn extent_for_view(center: Coordinate, zoom: f64, width_px: u32, height_px: u32) -> Extent {
    let res = resolution_for_zoom(zoom);
    let half_w = width_px as f64 * res * 0.5;
    let half_h = height_px as f64 * res * 0.5;
    Extent::new(
        center.x - half_w,
        center.y - half_h,
        center.x + half_w,
        center.y + half_h,
    )
}

/// The (fractional) zoom at which `extent` just fits a viewport of
/// `width_px` x `height_px` device pixels, clamped to the zoom range.
pub fn zoom_for_extent(extent: Extent, width_px: u32, height_px: u32) -> f64 {
    let res_x = extent.width() / width_px.max(1) as f64;
    let res_y = extent.height() / height_px.max(1) as f64;
    let res = res_x.max(res_y);
    if res <= 0.0 {
        return MAX_ZOOM;
    }
    (ZOOM_0_RESOLUTION / res).log2().clamp(MIN_ZOOM, MAX_ZOOM)
}
