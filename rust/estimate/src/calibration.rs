// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zero-intercept scale fit and length prediction
//!
//! Annotated rows pair a projected drawing length with an operator
//! ground truth. The scale between them is one proportional coefficient,
//! fit through the origin (zero drawing length must mean zero real
//! length) by the closed-form least-squares estimator so repeated runs
//! reproduce predictions bit for bit.

use crate::error::{Error, Result};
use crate::projection::projected_drawing_length;
use crate::roof::Roof;
use crate::sheet::Datasheet;

/// Proportional model `real = k * drawing`, fit through the origin
#[derive(Debug, Clone, Copy)]
pub struct ScaleFit {
    k: f64,
}

impl ScaleFit {
    /// Fit the coefficient over (drawing, real) pairs: k = Σ(d·r) / Σ(d²).
    /// At least two pairs are required.
    pub fn fit(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.len() < 2 {
            return Err(Error::NotEnoughKnownLengths { count: pairs.len() });
        }

        let mut num = 0.0;
        let mut den = 0.0;
        for &(drawing, real) in pairs {
            num += drawing * real;
            den += drawing * drawing;
        }

        Ok(Self { k: num / den })
    }

    /// Feet per drawing unit
    pub fn coefficient(&self) -> f64 {
        self.k
    }

    /// Raw model output for a projected drawing length
    pub fn predict_raw(&self, drawing_length: f64) -> f64 {
        self.k * drawing_length
    }

    /// Rounded prediction with the zero floor: a length that rounds to 0
    /// is reported as 1 ft, the smallest edge worth listing.
    pub fn predict(&self, drawing_length: f64) -> f64 {
        let rounded = self.predict_raw(drawing_length).round();
        if rounded == 0.0 {
            1.0
        } else {
            rounded
        }
    }
}

/// Collect (projected drawing length, known real length) pairs over the
/// rows carrying ground truth.
pub fn collect_samples(roof: &Roof, sheet: &Datasheet) -> Result<Vec<(f64, f64)>> {
    let mut pairs = Vec::new();

    for (i, row) in sheet.rows().iter().enumerate() {
        let Some(real) = row.length_ft else { continue };
        let line = roof
            .line_by_id(&row.line_label)
            .ok_or_else(|| Error::UnknownLineLabel {
                row: i,
                label: row.line_label.clone(),
            })?;
        let pitch = row.pitch.ok_or_else(|| Error::MissingPitch {
            row: i,
            label: row.line_label.clone(),
        })?;

        let drawing =
            projected_drawing_length(line, row.category.slope_class(), pitch, roof, sheet)?;
        tracing::debug!(
            line = %line.id,
            drawing_length = drawing,
            real_length = real,
            "Calibration sample"
        );
        pairs.push((drawing, real));
    }

    Ok(pairs)
}

/// Predict a real length for every row lacking one and write it into the
/// sheet. Every prediction is computed before the first write, so a
/// projection failure leaves the sheet untouched. Returns the number of
/// rows filled.
pub fn predict_missing(roof: &Roof, sheet: &mut Datasheet, fit: &ScaleFit) -> Result<usize> {
    let mut predictions: Vec<(usize, f64)> = Vec::new();

    for (i, row) in sheet.rows().iter().enumerate() {
        if row.length_ft.is_some() {
            continue;
        }
        let line = roof
            .line_by_id(&row.line_label)
            .ok_or_else(|| Error::UnknownLineLabel {
                row: i,
                label: row.line_label.clone(),
            })?;
        let pitch = row.pitch.ok_or_else(|| Error::MissingPitch {
            row: i,
            label: row.line_label.clone(),
        })?;

        let drawing =
            projected_drawing_length(line, row.category.slope_class(), pitch, roof, sheet)?;
        let predicted = fit.predict(drawing);
        tracing::debug!(
            line = %line.id,
            drawing_length = drawing,
            predicted,
            "Predicted length"
        );
        predictions.push((i, predicted));
    }

    let filled = predictions.len();
    for (i, value) in predictions {
        sheet.set_length(i, value);
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_proportional_fit() {
        let fit = ScaleFit::fit(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
        assert_eq!(fit.coefficient(), 2.0);
        assert_eq!(fit.predict(5.0), 10.0);
    }

    #[test]
    fn test_fit_minimizes_residual_not_ratio_average() {
        // Closed form weights by drawing length squared
        let fit = ScaleFit::fit(&[(1.0, 3.0), (2.0, 4.0)]).unwrap();
        // k = (1*3 + 2*4) / (1 + 4) = 11/5
        assert_eq!(fit.coefficient(), 2.2);
    }

    #[test]
    fn test_prediction_floor_at_one() {
        let fit = ScaleFit::fit(&[(10.0, 3.0), (20.0, 6.0)]).unwrap();
        // Raw prediction 0.3 rounds to 0, floored to 1
        assert_eq!(fit.predict(1.0), 1.0);
        assert_eq!(fit.predict_raw(1.0), 0.3);
    }

    #[test]
    fn test_fit_requires_two_pairs() {
        match ScaleFit::fit(&[(5.0, 10.0)]) {
            Err(Error::NotEnoughKnownLengths { count }) => assert_eq!(count, 1),
            other => panic!("expected NotEnoughKnownLengths, got {:?}", other),
        }
    }
}
