// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pitch and angle projection of drawing lengths onto the roof surface
//!
//! Flat lines (eaves, ridges) lie in the horizontal plane, so the sketch
//! shows them at full length. An inclined line is foreshortened twice
//! over: by the facet's slope and by how obliquely it meets the flat
//! reference direction. Undoing that gives the length the calibrator can
//! compare against ground truth.

use rooftake_geometry::{angle_between_degrees, SketchLine};

use crate::category::SlopeClass;
use crate::error::{Error, Result};
use crate::roof::Roof;
use crate::sheet::Datasheet;

/// Slope angle of a facet in radians, from its pitch in rise per 12
pub fn pitch_angle(pitch: f64) -> f64 {
    (pitch / 12.0).atan()
}

/// Undo the foreshortening of an inclined line.
///
/// `angle_deg` is the angle to the flat reference line on the same facet;
/// the divisor `atan(pitch / 12) / |sin angle|` maps drawing length to
/// surface length. A reference parallel to the line (angle 0) drives the
/// divisor to infinity and the projected length to zero, which downstream
/// stages treat as non-informative.
pub fn project_length(drawing_length: f64, pitch: f64, angle_deg: f64) -> f64 {
    let factor = pitch_angle(pitch) / angle_deg.to_radians().sin().abs();
    drawing_length / factor
}

/// Find the flat (eave or ridge) line forming the largest angle with
/// `line` across every facet `line` bounds.
///
/// The largest angle is the most head-on reference. Candidates are walked
/// in facet order then ring order, and only a strictly larger angle
/// replaces the current pick; with equal angles the projection comes out
/// the same either way, so the tie-break never changes a result.
pub fn flat_reference<'a>(
    line: &SketchLine,
    roof: &'a Roof,
    sheet: &Datasheet,
) -> Result<&'a SketchLine> {
    let mut best: Option<(&SketchLine, f64)> = None;

    for &fi in roof.facets_of_line(&line.id) {
        let facet = &roof.facets()[fi];
        for piece in &facet.boundary {
            if piece.line_id == line.id {
                continue;
            }
            let flat = sheet
                .row_for_line(&piece.line_id)
                .is_some_and(|row| row.category.is_flat());
            if !flat {
                continue;
            }
            let Some(candidate) = roof.line_by_id(&piece.line_id) else {
                continue;
            };
            let angle = angle_between_degrees(line, candidate);
            match best {
                Some((_, best_angle)) if angle <= best_angle => {}
                _ => best = Some((candidate, angle)),
            }
        }
    }

    best.map(|(reference, _)| reference)
        .ok_or_else(|| Error::NoFlatReference {
            label: line.id.clone(),
        })
}

/// Drawing length of a line as calibration and prediction see it: flat
/// categories read straight off the page, inclined ones are projected
/// through the facet pitch and the angle to their flat reference.
pub fn projected_drawing_length(
    line: &SketchLine,
    slope: SlopeClass,
    pitch: f64,
    roof: &Roof,
    sheet: &Datasheet,
) -> Result<f64> {
    match slope {
        SlopeClass::Flat => Ok(line.length()),
        SlopeClass::Inclined => {
            let reference = flat_reference(line, roof, sheet)?;
            let angle = angle_between_degrees(line, reference);
            Ok(project_length(line.length(), pitch, angle))
        }
    }
}
