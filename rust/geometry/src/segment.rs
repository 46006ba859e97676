// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting raw drawn lines into atomic segments
//!
//! Operators draw long lines that other lines terminate against: a ridge
//! spanning several facets, an eave shared by two planes. Downstream math
//! works per facet boundary, so each raw line is cut at every endpoint of
//! another line that falls strictly inside it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::line::SketchLine;
use crate::point::Point2D;

/// An atomic piece of a drawn line between two consecutive split points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Label of the line this segment was cut from
    pub line_id: String,
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(line_id: impl Into<String>, start: Point2D, end: Point2D) -> Self {
        Self {
            line_id: line_id.into(),
            start,
            end,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Split every line at the endpoints of other lines that fall strictly
/// inside it.
///
/// The result is the maximal atomic decomposition: no returned segment has
/// another input line's endpoint in its interior, so running the splitter
/// over its own output changes nothing. A line nobody terminates against
/// comes back as a single segment. Coincident split points (several lines
/// meeting the host at the same spot) cut only once.
pub fn segment_lines(lines: &[SketchLine]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(lines.len());

    for line in lines {
        let mut cuts: SmallVec<[Point2D; 4]> = SmallVec::new();
        for other in lines {
            if other.id == line.id {
                continue;
            }
            for p in [other.start, other.end] {
                if line.contains_interior(&p) && !cuts.iter().any(|c| c.coincides_with(&p)) {
                    cuts.push(p);
                }
            }
        }

        if cuts.is_empty() {
            segments.push(Segment::new(line.id.clone(), line.start, line.end));
            continue;
        }

        // Order the cut points along the line
        cuts.sort_by(|a, b| {
            let da = line.start.distance_to(a);
            let db = line.start.distance_to(b);
            da.partial_cmp(&db).unwrap()
        });

        let mut prev = line.start;
        for cut in cuts {
            segments.push(Segment::new(line.id.clone(), prev, cut));
            prev = cut;
        }
        segments.push(Segment::new(line.id.clone(), prev, line.end));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> SketchLine {
        SketchLine::new(id, Point2D::new(x1, y1), Point2D::new(x2, y2))
    }

    #[test]
    fn test_untouched_lines_pass_through() {
        let lines = vec![line("a", 0.0, 0.0, 10.0, 0.0), line("b", 0.0, 5.0, 10.0, 5.0)];
        let segments = segment_lines(&lines);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].line_id, "a");
        assert_relative_eq!(segments[0].length(), 10.0);
    }

    #[test]
    fn test_t_junction_splits_the_bar() {
        // Stem ends on the bar's interior: one extra segment
        let bar = line("bar", 0.0, 0.0, 10.0, 0.0);
        let stem = line("stem", 4.0, 0.0, 4.0, 6.0);
        let segments = segment_lines(&[bar, stem]);

        assert_eq!(segments.len(), 3);
        let bar_parts: Vec<_> = segments.iter().filter(|s| s.line_id == "bar").collect();
        assert_eq!(bar_parts.len(), 2);
        assert_relative_eq!(bar_parts[0].length(), 4.0);
        assert_relative_eq!(bar_parts[1].length(), 6.0);
        // The chain reconstructs the bar
        assert_eq!(bar_parts[0].start, Point2D::new(0.0, 0.0));
        assert_eq!(bar_parts[0].end, bar_parts[1].start);
        assert_eq!(bar_parts[1].end, Point2D::new(10.0, 0.0));
    }

    #[test]
    fn test_crossing_without_endpoint_contact_does_not_split() {
        // Two lines crossing mid-span share no endpoints, so neither is cut
        let lines = vec![line("a", 0.0, 0.0, 10.0, 0.0), line("b", 5.0, -5.0, 5.0, 5.0)];
        assert_eq!(segment_lines(&lines).len(), 2);
    }

    #[test]
    fn test_shared_corner_does_not_split() {
        let lines = vec![line("a", 0.0, 0.0, 10.0, 0.0), line("b", 10.0, 0.0, 10.0, 8.0)];
        assert_eq!(segment_lines(&lines).len(), 2);
    }

    #[test]
    fn test_coincident_cut_points_cut_once() {
        // Two stems meet the bar at the same interior point
        let lines = vec![
            line("bar", 0.0, 0.0, 12.0, 0.0),
            line("up", 6.0, 0.0, 6.0, 4.0),
            line("down", 6.0, 0.0, 6.0, -4.0),
        ];
        let segments = segment_lines(&lines);
        // 3 lines + 1 distinct interior point
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn test_count_matches_interior_points() {
        // Two king posts spanning ridge to eave: both of their endpoints
        // are interior points, two on the ridge and two on the eave
        let lines = vec![
            line("eave", 0.0, 0.0, 30.0, 0.0),
            line("ridge", 0.0, 10.0, 30.0, 10.0),
            line("k1", 10.0, 10.0, 10.0, 0.0),
            line("k2", 20.0, 10.0, 20.0, 0.0),
        ];
        let segments = segment_lines(&lines);
        assert_eq!(segments.len(), 4 + 4);

        let eave_parts: Vec<_> = segments.iter().filter(|s| s.line_id == "eave").collect();
        let total: f64 = eave_parts.iter().map(|s| s.length()).sum();
        assert_relative_eq!(total, 30.0);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let lines = vec![
            line("bar", 0.0, 0.0, 10.0, 0.0),
            line("stem", 4.0, 0.0, 4.0, 6.0),
        ];
        let first = segment_lines(&lines);

        let relabeled: Vec<SketchLine> = first
            .iter()
            .enumerate()
            .map(|(i, s)| SketchLine::new(format!("s{}", i), s.start, s.end))
            .collect();
        let second = segment_lines(&relabeled);

        assert_eq!(second.len(), first.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
        }
    }
}
