// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The roof aggregate: lines, atomic segments, facets, and their indexes
//!
//! Assembly happens once per sketch. Raw lines are split into atomic
//! segments, each facet resolves the ordered run of segments tracing its
//! ring, and a reverse line-to-facets index is built. After that the
//! aggregate is read-only; the calibration stages only ever write sheet
//! cells.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use rooftake_geometry::{on_segment, segment_lines, Polygon, Segment, SketchLine};

/// Spreadsheet-style facet label: A..Z, then AA, AB, ...
pub fn letter_id(index: usize) -> String {
    let mut s = String::new();
    let mut num = index + 1;
    while num > 0 {
        let rem = ((num - 1) % 26) as u8;
        s.insert(0, (b'A' + rem) as char);
        num = (num - 1) / 26;
    }
    s
}

/// One piece of a facet's boundary: the atomic segment's parent line and
/// the segment's drawing-space length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub line_id: String,
    pub length: f64,
}

/// A closed roof surface in the sketch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facet {
    /// Letter label, assigned in construction order
    pub id: String,
    pub polygon: Polygon,
    /// Boundary pieces in ring-traversal order; together they trace the
    /// exterior ring exactly once
    pub boundary: Vec<BoundarySegment>,
}

/// Aggregate owning the sketch geometry
#[derive(Debug, Clone)]
pub struct Roof {
    lines: Vec<SketchLine>,
    segments: Vec<Segment>,
    facets: Vec<Facet>,
    line_index: FxHashMap<String, usize>,
    facets_of_line: FxHashMap<String, Vec<usize>>,
}

impl Roof {
    /// Assemble a roof from raw drawn lines and facet polygons.
    ///
    /// Lines are split into atomic segments first; a facet's boundary is
    /// then the segments lying wholly on its ring edges, walked edge by
    /// edge and ordered along each edge.
    pub fn assemble(lines: Vec<SketchLine>, polygons: Vec<Polygon>) -> Self {
        let segments = segment_lines(&lines);

        let mut facets = Vec::with_capacity(polygons.len());
        for (i, polygon) in polygons.into_iter().enumerate() {
            let boundary = trace_boundary(&polygon, &segments);
            facets.push(Facet {
                id: letter_id(i),
                polygon,
                boundary,
            });
        }

        Self::from_parts(lines, segments, facets)
    }

    /// Build a roof from pre-derived parts. A sketch parser that already
    /// knows each facet's boundary can skip `assemble` and hand the
    /// pieces over directly.
    pub fn from_parts(lines: Vec<SketchLine>, segments: Vec<Segment>, facets: Vec<Facet>) -> Self {
        let line_index: FxHashMap<String, usize> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.id.clone(), i))
            .collect();

        let mut facets_of_line: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (fi, facet) in facets.iter().enumerate() {
            for piece in &facet.boundary {
                let entry = facets_of_line.entry(piece.line_id.clone()).or_default();
                // A line split into several pieces appears once per facet
                if entry.last() != Some(&fi) {
                    entry.push(fi);
                }
            }
        }

        Self {
            lines,
            segments,
            facets,
            line_index,
            facets_of_line,
        }
    }

    pub fn lines(&self) -> &[SketchLine] {
        &self.lines
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn facet(&self, index: usize) -> Option<&Facet> {
        self.facets.get(index)
    }

    pub fn line_by_id(&self, id: &str) -> Option<&SketchLine> {
        self.line_index.get(id).map(|&i| &self.lines[i])
    }

    /// Indices of the facets a line bounds, in facet order
    pub fn facets_of_line(&self, id: &str) -> &[usize] {
        self.facets_of_line
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Collect the atomic segments lying along each ring edge, ordered from
/// the edge's start. A segment belongs to an edge when both its endpoints
/// are on it.
fn trace_boundary(polygon: &Polygon, segments: &[Segment]) -> Vec<BoundarySegment> {
    let mut boundary = Vec::new();

    for (a, b) in polygon.edges() {
        let mut on_edge: Vec<&Segment> = segments
            .iter()
            .filter(|s| on_segment(&s.start, &a, &b) && on_segment(&s.end, &a, &b))
            .collect();

        on_edge.sort_by(|s, t| {
            let ds = a.distance_to(&s.midpoint());
            let dt = a.distance_to(&t.midpoint());
            ds.partial_cmp(&dt).unwrap()
        });

        for segment in on_edge {
            boundary.push(BoundarySegment {
                line_id: segment.line_id.clone(),
                length: segment.length(),
            });
        }
    }

    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rooftake_geometry::Point2D;

    #[test]
    fn test_letter_ids() {
        assert_eq!(letter_id(0), "A");
        assert_eq!(letter_id(1), "B");
        assert_eq!(letter_id(25), "Z");
        assert_eq!(letter_id(26), "AA");
        assert_eq!(letter_id(27), "AB");
        assert_eq!(letter_id(51), "AZ");
        assert_eq!(letter_id(52), "BA");
    }

    /// Gable roof: two rectangular facets sharing a ridge, with full-height
    /// gable edges drawn as single lines crossing the ridge ends.
    fn gable() -> Roof {
        let lines = vec![
            SketchLine::new("E1", Point2D::new(0.0, 0.0), Point2D::new(40.0, 0.0)),
            SketchLine::new("E2", Point2D::new(0.0, 20.0), Point2D::new(40.0, 20.0)),
            SketchLine::new("R1", Point2D::new(0.0, 10.0), Point2D::new(40.0, 10.0)),
            SketchLine::new("G1", Point2D::new(0.0, 0.0), Point2D::new(0.0, 20.0)),
            SketchLine::new("G2", Point2D::new(40.0, 0.0), Point2D::new(40.0, 20.0)),
        ];
        let front = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(40.0, 0.0),
            Point2D::new(40.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        let back = Polygon::new(vec![
            Point2D::new(0.0, 10.0),
            Point2D::new(40.0, 10.0),
            Point2D::new(40.0, 20.0),
            Point2D::new(0.0, 20.0),
        ]);
        Roof::assemble(lines, vec![front, back])
    }

    #[test]
    fn test_assemble_splits_gable_edges() {
        let roof = gable();
        // 5 lines, and the ridge ends cut both gable edges
        assert_eq!(roof.segments().len(), 7);
    }

    #[test]
    fn test_boundaries_trace_rings_in_order() {
        let roof = gable();
        let front = &roof.facets()[0];
        assert_eq!(front.id, "A");

        let ids: Vec<&str> = front.boundary.iter().map(|p| p.line_id.as_str()).collect();
        assert_eq!(ids, ["E1", "G2", "R1", "G1"]);

        let lengths: Vec<f64> = front.boundary.iter().map(|p| p.length).collect();
        assert_relative_eq!(lengths[0], 40.0);
        assert_relative_eq!(lengths[1], 10.0);
        assert_relative_eq!(lengths[2], 40.0);
        assert_relative_eq!(lengths[3], 10.0);
    }

    #[test]
    fn test_reverse_lookup_lists_facets_in_order() {
        let roof = gable();
        assert_eq!(roof.facets_of_line("R1"), &[0, 1]);
        assert_eq!(roof.facets_of_line("G1"), &[0, 1]);
        assert_eq!(roof.facets_of_line("E1"), &[0]);
        assert_eq!(roof.facets_of_line("E2"), &[1]);
        assert!(roof.facets_of_line("nope").is_empty());
    }

    #[test]
    fn test_line_lookup() {
        let roof = gable();
        assert_relative_eq!(roof.line_by_id("E1").unwrap().length(), 40.0);
        assert!(roof.line_by_id("Q9").is_none());
    }

    #[test]
    fn test_partial_edge_coverage() {
        // One long eave spans two facets; each facet picks up only its half
        let lines = vec![
            SketchLine::new("E1", Point2D::new(0.0, 0.0), Point2D::new(20.0, 0.0)),
            SketchLine::new("M", Point2D::new(10.0, 0.0), Point2D::new(10.0, 10.0)),
            SketchLine::new("T", Point2D::new(0.0, 10.0), Point2D::new(20.0, 10.0)),
            SketchLine::new("L", Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0)),
            SketchLine::new("X", Point2D::new(20.0, 0.0), Point2D::new(20.0, 10.0)),
        ];
        let left = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        let right = Polygon::new(vec![
            Point2D::new(10.0, 0.0),
            Point2D::new(20.0, 0.0),
            Point2D::new(20.0, 10.0),
            Point2D::new(10.0, 10.0),
        ]);
        let roof = Roof::assemble(lines, vec![left, right]);

        let left_eave: Vec<_> = roof.facets()[0]
            .boundary
            .iter()
            .filter(|p| p.line_id == "E1")
            .collect();
        assert_eq!(left_eave.len(), 1);
        assert_relative_eq!(left_eave[0].length, 10.0);
        assert_eq!(roof.facets_of_line("E1"), &[0, 1]);
    }
}
