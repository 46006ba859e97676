// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Rooftake Estimation
//!
//! Turns an annotated roof sketch into calibrated measurements. A sketch
//! is unscaled line work plus facet polygons; an operator supplies a
//! datasheet with a category and pitch for every line and real lengths
//! for a few of them. This crate fits the drawing scale to those known
//! lengths, predicts the rest, and estimates the true area of every
//! facet.
//!
//! ## Overview
//!
//! - **Sketch assembly**: raw lines are split into atomic segments and
//!   facet boundaries traced from them ([`Roof::assemble`])
//! - **Projection**: inclined lines are corrected for pitch and for the
//!   angle to their flat reference before any scale math ([`projection`])
//! - **Calibration**: one zero-intercept least-squares coefficient maps
//!   drawing lengths to feet ([`ScaleFit`])
//! - **Areas**: each facet converts through the median scale factor of
//!   its own boundary ([`area`])
//! - **Summary**: category length totals, area by pitch, and the waste
//!   schedule ([`Summary`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rooftake_estimate::{process_roof, Datasheet, LineCategory, Roof, SheetRow};
//! use rooftake_geometry::{Point2D, Polygon, SketchLine};
//!
//! let roof = Roof::assemble(lines, facet_polygons);
//! let mut sheet = Datasheet::new(vec![
//!     SheetRow::new("E1", LineCategory::Eave, Some(40.0), Some(6.0)),
//!     SheetRow::new("R1", LineCategory::Ridge, Some(40.0), Some(6.0)),
//!     SheetRow::new("H1", LineCategory::Hip, None, Some(6.0)),
//! ]);
//!
//! let result = process_roof(&roof, &mut sheet)?;
//! println!(
//!     "{} sq ft over {} facets",
//!     result.summary.total_area_sqft, result.facets_measured
//! );
//! ```

pub mod area;
pub mod calibration;
pub mod category;
pub mod error;
pub mod projection;
pub mod roof;
pub mod sheet;
pub mod summary;

pub use area::{estimate_areas, facet_scale_factor, facet_true_area};
pub use calibration::{collect_samples, predict_missing, ScaleFit};
pub use category::{LineCategory, SlopeClass};
pub use error::{Error, Result};
pub use projection::{flat_reference, pitch_angle, project_length, projected_drawing_length};
pub use roof::{letter_id, BoundarySegment, Facet, Roof};
pub use sheet::{Datasheet, SheetRow};
pub use summary::{Summary, WasteLine, WASTE_FACTORS};

/// Outcome of a full takeoff run
#[derive(Debug, Clone)]
pub struct TakeoffResult {
    /// Rows whose length was filled by prediction
    pub predicted: usize,
    /// Facets that received an area estimate
    pub facets_measured: usize,
    pub summary: Summary,
}

/// Run the whole pipeline over one roof: validate, calibrate, predict
/// missing lengths, estimate facet areas, and summarize. The sheet is
/// filled in place; each stage computes every value before writing any,
/// so a failing stage never leaves partial results behind.
pub fn process_roof(roof: &Roof, sheet: &mut Datasheet) -> Result<TakeoffResult> {
    sheet.validate(roof)?;

    let samples = collect_samples(roof, sheet)?;
    let fit = ScaleFit::fit(&samples)?;
    tracing::info!(
        samples = samples.len(),
        scale = fit.coefficient(),
        "Fitted drawing scale"
    );

    let predicted = predict_missing(roof, sheet, &fit)?;
    let facets_measured = estimate_areas(roof, sheet)?;

    let summary = Summary::from_sheet(sheet);
    tracing::info!(
        predicted,
        facets_measured,
        total_area_sqft = summary.total_area_sqft,
        "Takeoff complete"
    );

    Ok(TakeoffResult {
        predicted,
        facets_measured,
        summary,
    })
}
