// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Labeled sketch lines and angle relations between them

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::point::Point2D;
use crate::EPSILON;

/// A drawn roof line with a stable operator-facing label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchLine {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
}

impl SketchLine {
    pub fn new(id: impl Into<String>, start: Point2D, end: Point2D) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Drawing-space length
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Orientation in degrees from the horizontal axis
    pub fn angle_degrees(&self) -> f64 {
        (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees()
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Direction vector from start to end
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// Whether `p` lies on the closed segment, endpoints included
    pub fn contains(&self, p: &Point2D) -> bool {
        on_segment(p, &self.start, &self.end)
    }

    /// Whether `p` lies strictly between the endpoints. The endpoints
    /// themselves do not count, so touching lines at a shared vertex do
    /// not split each other.
    pub fn contains_interior(&self, p: &Point2D) -> bool {
        !p.coincides_with(&self.start) && !p.coincides_with(&self.end) && self.contains(p)
    }
}

/// Distance-sum containment test for the closed segment from `a` to `b`:
/// `p` is on it iff the detour through `p` adds nothing to the direct
/// distance.
pub fn on_segment(p: &Point2D, a: &Point2D, b: &Point2D) -> bool {
    let via = a.distance_to(p) + p.distance_to(b);
    (via - a.distance_to(b)).abs() < EPSILON
}

/// Angle between two lines in degrees, folded to [0, 90].
///
/// Lines are undirected, so reversing either endpoint order leaves the
/// result unchanged; 90 means perpendicular. Degenerate (zero-length)
/// lines report 0.
pub fn angle_between_degrees(a: &SketchLine, b: &SketchLine) -> f64 {
    let da = a.direction();
    let db = b.direction();
    let denom = da.norm() * db.norm();
    if denom < EPSILON {
        return 0.0;
    }
    let cos = (da.dot(&db) / denom).abs().min(1.0);
    cos.acos().to_degrees()
}
