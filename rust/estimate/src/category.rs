// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line categories and their slope classes
//!
//! Operators annotate every line with one of five letter codes. Only the
//! split into flat and inclined matters to the math: flat lines lie in
//! the horizontal reference plane and read straight off the page, the
//! rest are foreshortened by the facet's slope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator-facing category code for a roof line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineCategory {
    /// R: horizontal top edge where two facets meet
    Ridge,
    /// H: inclined edge running down an outside corner
    Hip,
    /// V: inclined edge running down an inside corner
    Valley,
    /// K: king post, rake, or other inclined member
    King,
    /// E: horizontal lower edge along the wall plate
    Eave,
}

/// Whether a category needs pitch and angle correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeClass {
    /// Lies in the horizontal plane; drawing length is already true
    Flat,
    /// Rises out of the sketch plane; length must be projected
    Inclined,
}

impl LineCategory {
    pub fn code(&self) -> &'static str {
        match self {
            LineCategory::Ridge => "R",
            LineCategory::Hip => "H",
            LineCategory::Valley => "V",
            LineCategory::King => "K",
            LineCategory::Eave => "E",
        }
    }

    pub fn slope_class(&self) -> SlopeClass {
        match self {
            LineCategory::Ridge | LineCategory::Eave => SlopeClass::Flat,
            LineCategory::Hip | LineCategory::Valley | LineCategory::King => SlopeClass::Inclined,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.slope_class() == SlopeClass::Flat
    }

    /// All categories in sheet column order
    pub fn all() -> [LineCategory; 5] {
        [
            LineCategory::Ridge,
            LineCategory::Hip,
            LineCategory::Valley,
            LineCategory::King,
            LineCategory::Eave,
        ]
    }
}

impl FromStr for LineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(LineCategory::Ridge),
            "H" => Ok(LineCategory::Hip),
            "V" => Ok(LineCategory::Valley),
            "K" => Ok(LineCategory::King),
            "E" => Ok(LineCategory::Eave),
            other => Err(format!(
                "unrecognized line category '{}' (expected R, H, V, K, or E)",
                other
            )),
        }
    }
}

impl TryFrom<String> for LineCategory {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LineCategory> for String {
    fn from(c: LineCategory) -> String {
        c.code().to_string()
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
