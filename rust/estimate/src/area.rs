// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facet area estimation
//!
//! Ground-truth lengths are operator-rounded, so the drawing-to-real
//! ratio wobbles from segment to segment. Each facet therefore gets its
//! own scale factor, the median over its boundary segments, and its
//! drawing area is slope-corrected and converted through that factor.

use crate::error::{Error, Result};
use crate::projection::{pitch_angle, projected_drawing_length};
use crate::roof::{Facet, Roof};
use crate::sheet::Datasheet;

/// Median of a sample set, averaging the two middle values for even
/// counts. Callers guarantee a non-empty slice.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Derive the facet's drawing-units-per-foot factor.
///
/// Every boundary segment with a sheet row votes: the row's real length
/// is apportioned to the segment by its share of the parent line's
/// projected length, and the segment's drawing length over that gives
/// one factor. Segments without a row, with zero ground truth, or with a
/// zero or non-finite apportioned length abstain; a parent whose
/// projected length is zero (degenerate line, or parallel to its flat
/// reference) falls in the last group. `pitch` is the facet's, and
/// applies to inclined parents even when their own row sits on another
/// facet.
pub fn facet_scale_factor(
    facet: &Facet,
    pitch: f64,
    roof: &Roof,
    sheet: &Datasheet,
) -> Result<f64> {
    let mut factors = Vec::with_capacity(facet.boundary.len());

    for piece in &facet.boundary {
        let Some(line) = roof.line_by_id(&piece.line_id) else {
            continue;
        };
        let Some(row) = sheet.row_for_line(&piece.line_id) else {
            continue;
        };
        let Some(real) = row.length_ft else { continue };

        let projected =
            projected_drawing_length(line, row.category.slope_class(), pitch, roof, sheet)?;
        let actual = real * (piece.length / projected);
        if real == 0.0 || actual == 0.0 || !actual.is_finite() {
            continue;
        }
        factors.push(piece.length / actual);
    }

    if factors.is_empty() {
        return Err(Error::NoScaleFactors {
            facet: facet.id.clone(),
        });
    }

    let factor = median(&mut factors);
    tracing::debug!(
        facet = %facet.id,
        samples = factors.len(),
        scale_factor = factor,
        "Facet scale factor"
    );
    Ok(factor)
}

/// True area in square feet from a drawing-space polygon area.
///
/// The drawing shows the facet's horizontal footprint; dividing by the
/// cosine of the slope angle recovers the surface area, the squared
/// scale factor converts units, and the result is rounded up to an even
/// foot count, the granularity estimates are quoted at.
pub fn facet_true_area(drawing_area: f64, pitch: f64, scale_factor: f64) -> f64 {
    let surface = drawing_area / pitch_angle(pitch).cos();
    let mut area = (surface / (scale_factor * scale_factor)).round();
    if area as i64 % 2 != 0 {
        area += 1.0;
    }
    area
}

/// Estimate an area for every facet paired with a sheet row and write it
/// into the row's area cell. Facet `i` pairs with row `i`; facets past
/// the end of the sheet are skipped. All areas are computed before the
/// first write. Returns the number of facets measured.
pub fn estimate_areas(roof: &Roof, sheet: &mut Datasheet) -> Result<usize> {
    let mut areas: Vec<(usize, f64)> = Vec::new();

    for (i, facet) in roof.facets().iter().enumerate() {
        if i >= sheet.len() {
            break;
        }
        let row = &sheet.rows()[i];
        let pitch = row.pitch.ok_or_else(|| Error::MissingPitch {
            row: i,
            label: row.line_label.clone(),
        })?;

        let factor = facet_scale_factor(facet, pitch, roof, sheet)?;
        let area = facet_true_area(facet.polygon.area(), pitch, factor);
        tracing::debug!(facet = %facet.id, scale_factor = factor, area, "Facet area");
        areas.push((i, area));
    }

    let measured = areas.len();
    for (i, value) in areas {
        sheet.set_area(i, value);
    }

    Ok(measured)
}
