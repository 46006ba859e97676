use thiserror::Error;

/// Result type for takeoff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while calibrating a roof sketch.
///
/// All of these are configuration errors in the input: the run aborts
/// before writing anything, the operator fixes the sheet or the sketch,
/// and runs again.
#[derive(Error, Debug)]
pub enum Error {
    #[error("row {row}: missing pitch for line '{label}'")]
    MissingPitch { row: usize, label: String },

    #[error("{count} known length(s) on the sheet, at least 2 are required to calibrate")]
    NotEnoughKnownLengths { count: usize },

    #[error("row {row}: no roof line labeled '{label}'")]
    UnknownLineLabel { row: usize, label: String },

    #[error("facet {facet}: boundary has no eave or ridge line")]
    NoFlatBoundary { facet: String },

    #[error("line '{label}': no eave or ridge on any facet it bounds to serve as angle reference")]
    NoFlatReference { label: String },

    #[error("facet {facet}: no usable boundary segment to derive a scale factor from")]
    NoScaleFactors { facet: String },
}
