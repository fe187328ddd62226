pub mod geo;
pub mod zoom;

// Foundation crate: small, well-tested primitives only.
pub use geo::*;
pub use zoom::*;
