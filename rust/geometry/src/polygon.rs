// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed facet polygons

use serde::{Deserialize, Serialize};

use crate::point::Point2D;
use crate::EPSILON;

/// A closed polygon in drawing space. The ring is stored without a
/// repeated closing vertex; the edge from the last vertex back to the
/// first is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub ring: Vec<Point2D>,
}

impl Polygon {
    pub fn new(ring: Vec<Point2D>) -> Self {
        Self { ring }
    }

    /// Shoelace area. Orientation-independent; degenerate rings with
    /// fewer than 3 vertices have zero area.
    pub fn area(&self) -> f64 {
        let n = self.ring.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.ring[i].x * self.ring[j].y;
            area -= self.ring[j].x * self.ring[i].y;
        }

        (area / 2.0).abs()
    }

    /// Area centroid of the ring. Degenerate rings fall back to the
    /// vertex average.
    pub fn centroid(&self) -> Point2D {
        let n = self.ring.len();
        if n == 0 {
            return Point2D::new(0.0, 0.0);
        }

        let mut signed = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let cross = self.ring[i].x * self.ring[j].y - self.ring[j].x * self.ring[i].y;
            signed += cross;
            cx += (self.ring[i].x + self.ring[j].x) * cross;
            cy += (self.ring[i].y + self.ring[j].y) * cross;
        }
        signed /= 2.0;

        if signed.abs() < EPSILON {
            let sum = self
                .ring
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            return Point2D::new(sum.0 / n as f64, sum.1 / n as f64);
        }

        Point2D::new(cx / (6.0 * signed), cy / (6.0 * signed))
    }

    /// Ring edges as (start, end) pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| (self.ring[i], self.ring[(i + 1) % n]))
    }
}
