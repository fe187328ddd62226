//! Flat draw styles for overlay features.
//!
//! These are the paint parameters a renderer needs for user-interaction
//! overlays and for thematic point/polygon layers. They carry no behavior.

/// An RGBA color with components in 0..=1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const TRANSPARENT: Color = Color([0.0, 0.0, 0.0, 0.0]);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// From 8-bit channels, e.g. `rgb8(0, 0, 139)` for dark blue.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Marker geometry for point features.
#[derive(Debug, Clone, PartialEq)]
pub enum PointShape {
    Circle { radius: f32 },
    /// Regular polygon; `points = 3` is a triangle, `points = 4` with a 45°
    /// angle offset renders as a diamond.
    Regular { points: u8, radius: f32, angle_rad: f32 },
    /// Bitmap/vector icon referenced by URI, anchored in icon-relative units
    /// (`[0.5, 1.0]` is bottom-center).
    Icon { href: String, anchor: [f32; 2] },
}

/// The complete paint descriptor for one overlay layer or category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureStyle {
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    pub shape: Option<PointShape>,
}

impl FeatureStyle {
    pub fn stroked(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(Stroke::new(color, width)),
            ..Self::default()
        }
    }

    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(Fill::new(color)),
            ..Self::default()
        }
    }

    pub fn point(shape: PointShape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(Stroke::new(color, width));
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(Fill::new(color));
        self
    }
}
