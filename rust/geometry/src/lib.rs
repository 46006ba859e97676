// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing-space geometry for roof sketches
//!
//! A roof sketch arrives as labeled line segments plus closed facet
//! polygons, all in the arbitrary coordinate system it was drawn in. This
//! crate holds the primitives (points, lines, polygons) and the segmenter
//! that splits raw lines wherever another line's endpoint lands on them.

pub mod line;
pub mod point;
pub mod polygon;
pub mod segment;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use line::{angle_between_degrees, on_segment, SketchLine};
pub use point::Point2D;
pub use polygon::Polygon;
pub use segment::{segment_lines, Segment};

/// Coincidence tolerance for drawing-space coordinates.
///
/// Sketch coordinates come from a vector editor, so split points land on
/// their host lines up to rounding. All containment and coincidence tests
/// in this crate compare against this tolerance rather than exact equality.
pub const EPSILON: f64 = 1e-9;
