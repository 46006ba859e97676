// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The operator datasheet: one annotated row per roof line
//!
//! Rows arrive with a category and pitch on every line and a real length
//! on a sparse subset; the engine fills in the missing lengths and the
//! per-facet areas. Row order matters twice: rows pair positionally with
//! facets (row 0 annotates facet A), and summary tallies keep first-seen
//! order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::category::LineCategory;
use crate::error::{Error, Result};
use crate::roof::Roof;

/// Serde adapter for the `"-"` sentinel the sheet uses for absent values
mod sentinel {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_str("-"),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Cell::deserialize(deserializer)? {
            Cell::Number(v) => Ok(Some(v)),
            Cell::Text(s) => {
                let s = s.trim();
                if s == "-" || s.is_empty() {
                    Ok(None)
                } else {
                    s.parse().map(Some).map_err(|_| {
                        de::Error::custom(format!("expected a number or \"-\", got \"{}\"", s))
                    })
                }
            }
        }
    }
}

/// One annotation row keyed by line label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRow {
    /// Label of the roof line this row annotates
    pub line_label: String,
    /// Category code (R, H, V, K, E)
    pub category: LineCategory,
    /// Real length in feet; operator ground truth or a filled prediction
    #[serde(with = "sentinel", default)]
    pub length_ft: Option<f64>,
    /// Pitch of the facet the line belongs to, rise per 12. Required on
    /// every row.
    #[serde(with = "sentinel", default)]
    pub pitch: Option<f64>,
    /// True facet area; row position pairs the cell with its facet
    #[serde(with = "sentinel", default)]
    pub area_sqft: Option<f64>,
}

impl SheetRow {
    pub fn new(
        line_label: impl Into<String>,
        category: LineCategory,
        length_ft: Option<f64>,
        pitch: Option<f64>,
    ) -> Self {
        Self {
            line_label: line_label.into(),
            category,
            length_ft,
            pitch,
            area_sqft: None,
        }
    }
}

/// The full annotation sheet, in the order the operator entered it.
///
/// Lookups by line label go through an index built once; rows keep their
/// labels for the life of the sheet, only the value cells change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<SheetRow>", into = "Vec<SheetRow>")]
pub struct Datasheet {
    rows: Vec<SheetRow>,
    index: FxHashMap<String, usize>,
}

impl Datasheet {
    pub fn new(rows: Vec<SheetRow>) -> Self {
        let mut index = FxHashMap::default();
        for (i, row) in rows.iter().enumerate() {
            // First row wins if a label is duplicated
            index.entry(row.line_label.clone()).or_insert(i);
        }
        Self { rows, index }
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&SheetRow> {
        self.rows.get(index)
    }

    pub fn row_for_line(&self, label: &str) -> Option<&SheetRow> {
        self.index.get(label).map(|&i| &self.rows[i])
    }

    pub fn known_length_count(&self) -> usize {
        self.rows.iter().filter(|r| r.length_ft.is_some()).count()
    }

    pub fn set_length(&mut self, index: usize, value: f64) {
        self.rows[index].length_ft = Some(value);
    }

    pub fn set_area(&mut self, index: usize, value: f64) {
        self.rows[index].area_sqft = Some(value);
    }

    /// Check every precondition that is fatal to a run: pitches present,
    /// labels resolving, enough ground truth to fit a scale, and a flat
    /// angle reference on every facet.
    pub fn validate(&self, roof: &Roof) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.pitch.is_none() {
                return Err(Error::MissingPitch {
                    row: i,
                    label: row.line_label.clone(),
                });
            }
            if roof.line_by_id(&row.line_label).is_none() {
                return Err(Error::UnknownLineLabel {
                    row: i,
                    label: row.line_label.clone(),
                });
            }
        }

        let known = self.known_length_count();
        if known < 2 {
            return Err(Error::NotEnoughKnownLengths { count: known });
        }

        for facet in roof.facets() {
            let has_flat = facet.boundary.iter().any(|piece| {
                self.row_for_line(&piece.line_id)
                    .is_some_and(|r| r.category.is_flat())
            });
            if !has_flat {
                return Err(Error::NoFlatBoundary {
                    facet: facet.id.clone(),
                });
            }
        }

        Ok(())
    }
}

impl From<Vec<SheetRow>> for Datasheet {
    fn from(rows: Vec<SheetRow>) -> Self {
        Datasheet::new(rows)
    }
}

impl From<Datasheet> for Vec<SheetRow> {
    fn from(sheet: Datasheet) -> Self {
        sheet.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::LineCategory;
    use crate::roof::Roof;
    use rooftake_geometry::{Point2D, Polygon, SketchLine};

    fn simple_roof() -> Roof {
        // One square facet: two eaves annotated, two king rakes
        let lines = vec![
            SketchLine::new("E1", Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0)),
            SketchLine::new("R1", Point2D::new(0.0, 10.0), Point2D::new(10.0, 10.0)),
            SketchLine::new("K1", Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0)),
            SketchLine::new("K2", Point2D::new(10.0, 0.0), Point2D::new(10.0, 10.0)),
        ];
        let ring = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        Roof::assemble(lines, vec![ring])
    }

    fn rows() -> Vec<SheetRow> {
        vec![
            SheetRow::new("E1", LineCategory::Eave, Some(20.0), Some(6.0)),
            SheetRow::new("R1", LineCategory::Ridge, Some(20.0), Some(6.0)),
            SheetRow::new("K1", LineCategory::King, None, Some(6.0)),
            SheetRow::new("K2", LineCategory::King, None, Some(6.0)),
        ]
    }

    #[test]
    fn test_sentinel_round_trip() {
        let row = SheetRow::new("E1", LineCategory::Eave, None, Some(6.0));
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"length_ft\":\"-\""));
        assert!(json.contains("\"pitch\":6.0"));

        let back: SheetRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.length_ft, None);
        assert_eq!(back.pitch, Some(6.0));
        assert_eq!(back.area_sqft, None);
    }

    #[test]
    fn test_sentinel_accepts_numeric_strings() {
        let back: SheetRow = serde_json::from_str(
            r#"{"line_label":"E1","category":"e","length_ft":"24","pitch":6,"area_sqft":"-"}"#,
        )
        .unwrap();
        assert_eq!(back.length_ft, Some(24.0));
        assert_eq!(back.category, LineCategory::Eave);
    }

    #[test]
    fn test_sentinel_rejects_garbage() {
        let result: std::result::Result<SheetRow, _> = serde_json::from_str(
            r#"{"line_label":"E1","category":"E","length_ft":"tall","pitch":6}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_complete_sheet() {
        let sheet = Datasheet::new(rows());
        assert!(sheet.validate(&simple_roof()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_pitch() {
        let mut rows = rows();
        rows[2].pitch = None;
        let sheet = Datasheet::new(rows);
        match sheet.validate(&simple_roof()) {
            Err(Error::MissingPitch { row, label }) => {
                assert_eq!(row, 2);
                assert_eq!(label, "K1");
            }
            other => panic!("expected MissingPitch, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_requires_two_known_lengths() {
        let mut rows = rows();
        rows[1].length_ft = None;
        let sheet = Datasheet::new(rows);
        match sheet.validate(&simple_roof()) {
            Err(Error::NotEnoughKnownLengths { count }) => assert_eq!(count, 1),
            other => panic!("expected NotEnoughKnownLengths, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_label() {
        let mut rows = rows();
        rows[3].line_label = "Z9".into();
        let sheet = Datasheet::new(rows);
        match sheet.validate(&simple_roof()) {
            Err(Error::UnknownLineLabel { row, label }) => {
                assert_eq!(row, 3);
                assert_eq!(label, "Z9");
            }
            other => panic!("expected UnknownLineLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_requires_flat_boundary_per_facet() {
        // Recategorize every boundary line as inclined
        let rows = vec![
            SheetRow::new("E1", LineCategory::Hip, Some(20.0), Some(6.0)),
            SheetRow::new("R1", LineCategory::Valley, Some(20.0), Some(6.0)),
            SheetRow::new("K1", LineCategory::King, None, Some(6.0)),
            SheetRow::new("K2", LineCategory::King, None, Some(6.0)),
        ];
        let sheet = Datasheet::new(rows);
        match sheet.validate(&simple_roof()) {
            Err(Error::NoFlatBoundary { facet }) => assert_eq!(facet, "A"),
            other => panic!("expected NoFlatBoundary, got {:?}", other),
        }
    }

    #[test]
    fn test_row_lookup_prefers_first_duplicate() {
        let sheet = Datasheet::new(vec![
            SheetRow::new("E1", LineCategory::Eave, Some(10.0), Some(6.0)),
            SheetRow::new("E1", LineCategory::Eave, Some(99.0), Some(6.0)),
        ]);
        assert_eq!(sheet.row_for_line("E1").unwrap().length_ft, Some(10.0));
    }
}
