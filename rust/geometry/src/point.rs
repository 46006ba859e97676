// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D points in drawing space

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::EPSILON;

/// A 2D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether two points coincide within the drawing-space tolerance
    pub fn coincides_with(&self, other: &Point2D) -> bool {
        self.distance_to(other) < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_coincidence_tolerance() {
        let a = Point2D::new(1.0, 1.0);
        let b = Point2D::new(1.0 + 1e-12, 1.0);
        let c = Point2D::new(1.0 + 1e-6, 1.0);
        assert!(a.coincides_with(&b));
        assert!(!a.coincides_with(&c));
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let p = Point2D::new(2.5, -7.0);
        let back = Point2D::from_nalgebra(&p.to_nalgebra());
        assert_eq!(p, back);
    }
}
