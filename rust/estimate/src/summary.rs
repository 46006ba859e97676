// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roll-up of a completed sheet into report figures
//!
//! Everything here is presentation math over the filled sheet: length
//! totals per category, area grouped by pitch, and the waste schedule an
//! estimator quotes from. Individual lengths and areas are truncated to
//! whole feet before totaling, matching how the figures appear on the
//! printed page; waste-adjusted areas stay unrounded and are formatted
//! only at display time.

use serde::{Deserialize, Serialize};

use crate::category::LineCategory;
use crate::sheet::Datasheet;

/// Waste multipliers quoted on every estimate, from none to 22%
pub const WASTE_FACTORS: [f64; 7] = [1.0, 1.1, 1.12, 1.15, 1.17, 1.2, 1.22];

/// One row of the waste schedule
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WasteLine {
    pub factor: f64,
    pub area_sqft: f64,
    pub squares: f64,
}

/// Report figures derived from a filled sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Whole-foot length per category, always all five in R, H, V, K, E
    /// order
    pub length_totals: Vec<(LineCategory, f64)>,
    /// Whole-square-foot area per pitch, in first-appearance order
    pub area_by_pitch: Vec<(f64, f64)>,
    pub total_area_sqft: f64,
    /// Rows carrying an area cell, one per measured facet
    pub facet_count: usize,
    /// Pitch with the largest area share; earliest seen wins ties
    pub predominant_pitch: Option<f64>,
    pub total_squares: f64,
    pub waste_schedule: Vec<WasteLine>,
}

impl Summary {
    pub fn from_sheet(sheet: &Datasheet) -> Self {
        let mut length_totals: Vec<(LineCategory, f64)> = LineCategory::all()
            .into_iter()
            .map(|category| (category, 0.0))
            .collect();
        let mut area_by_pitch: Vec<(f64, f64)> = Vec::new();
        let mut facet_count = 0;

        for row in sheet.rows() {
            if let Some(length) = row.length_ft {
                for (category, total) in &mut length_totals {
                    if *category == row.category {
                        *total += length.trunc();
                    }
                }
            }

            if let Some(area) = row.area_sqft {
                facet_count += 1;
                if let Some(pitch) = row.pitch {
                    match area_by_pitch.iter_mut().find(|(p, _)| *p == pitch) {
                        Some(slot) => slot.1 += area.trunc(),
                        None => area_by_pitch.push((pitch, area.trunc())),
                    }
                }
            }
        }

        let total_area_sqft: f64 = area_by_pitch.iter().map(|(_, area)| area).sum();

        let mut predominant_pitch = None;
        let mut best_area = f64::NEG_INFINITY;
        for &(pitch, area) in &area_by_pitch {
            if area > best_area {
                best_area = area;
                predominant_pitch = Some(pitch);
            }
        }

        let waste_schedule = WASTE_FACTORS
            .iter()
            .map(|&factor| {
                let area_sqft = total_area_sqft * factor;
                WasteLine {
                    factor,
                    area_sqft,
                    squares: area_sqft / 100.0,
                }
            })
            .collect();

        Self {
            length_totals,
            area_by_pitch,
            total_area_sqft,
            facet_count,
            predominant_pitch,
            total_squares: total_area_sqft / 100.0,
            waste_schedule,
        }
    }

    /// Total length for one category
    pub fn length_for(&self, category: LineCategory) -> f64 {
        self.length_totals
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, total)| *total)
            .unwrap_or(0.0)
    }
}
