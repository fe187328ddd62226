use foundation::geo::{Coordinate, Extent};
use foundation::zoom::{MAX_ZOOM, MIN_ZOOM, extent_for_view};

/// The map's camera: a Web Mercator center, a zoom level, and the viewport it
/// projects through.
///
/// Zoom is clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`] on every write.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    center: Coordinate,
    zoom: f64,
    width_px: u32,
    height_px: u32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            zoom: 2.0,
            width_px: 800,
            height_px: 600,
        }
    }
}

impl View {
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        let mut v = Self {
            center,
            ..Self::default()
        };
        v.set_zoom(zoom);
        v
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn viewport_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    pub fn set_viewport_px(&mut self, width_px: u32, height_px: u32) {
        self.width_px = width_px.max(1);
        self.height_px = height_px.max(1);
    }

    /// The extent currently visible through the viewport.
    pub fn calculate_extent(&self) -> Extent {
        extent_for_view(self.center, self.zoom, self.width_px, self.height_px)
    }
}
