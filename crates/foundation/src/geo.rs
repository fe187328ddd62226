//! Planar map coordinates and extents.
//!
//! All map-facing coordinates are Web Mercator (EPSG:3857) meters. Geographic
//! input (EPSG:4326 degrees) is converted at the edges via
//! [`lon_lat_to_mercator`].

/// WGS84 semi-major axis in meters; also the Web Mercator sphere radius.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// EPSG code for geographic WGS84 coordinates.
pub const EPSG_WGS84: u32 = 4326;

/// EPSG code for Web Mercator map coordinates.
pub const EPSG_WEB_MERCATOR: u32 = 3857;

/// Half the Web Mercator world width in meters.
pub const MERCATOR_HALF_WORLD_M: f64 = EARTH_RADIUS_M * std::f64::consts::PI;

/// A position in Web Mercator meters.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub const fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Convert WGS84 degrees to Web Mercator meters.
pub fn lon_lat_to_mercator(p: LonLat) -> Coordinate {
    let x = EARTH_RADIUS_M * p.lon_deg.to_radians();
    let lat = p.lat_deg.clamp(-85.06, 85.06).to_radians();
    let y = EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat * 0.5).tan().ln();
    Coordinate::new(x, y)
}

/// Convert Web Mercator meters back to WGS84 degrees.
pub fn mercator_to_lon_lat(p: Coordinate) -> LonLat {
    let lon = (p.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (p.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    LonLat::new(lon, lat)
}

/// An axis-aligned map extent in Web Mercator meters.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Grows the extent on every side by `margin` meters.
    pub fn padded(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Serializes as `minx,miny,maxx,maxy`, the form tile/identify services
    /// take in query strings.
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
