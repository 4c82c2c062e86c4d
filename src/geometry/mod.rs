//! Geometric Primitives and Operations

pub mod intersections;
pub mod outline;

// Re-export commonly used items
pub use intersections::horizontal_crossings;
pub use outline::{contour_to_bezpath, contours_to_bezpaths};
