use std::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One OCR text block, positioned by the centre and size of its bounding box
/// in page-normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub date: NaiveDate,
    pub name: String,
}

/// School year printed as a column header on the flyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchoolYear(u8);

impl SchoolYear {
    pub fn new(year: u8) -> Result<Self> {
        match year {
            1..=6 => Ok(Self(year)),
            _ => Err(Error::InvalidSchoolYear(year)),
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Grades 1 and 2 share a column and a vocabulary.
    #[must_use]
    pub fn is_lower(self) -> bool {
        self.0 <= 2
    }
}

impl TryFrom<u8> for SchoolYear {
    type Error = Error;

    fn try_from(year: u8) -> Result<Self> {
        Self::new(year)
    }
}

impl fmt::Display for SchoolYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年生", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, true)]
    #[case(2, true)]
    #[case(3, false)]
    #[case(6, false)]
    fn school_year_bands(#[case] year: u8, #[case] lower: bool) {
        assert_eq!(SchoolYear::new(year).unwrap().is_lower(), lower);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(255)]
    fn school_year_out_of_range(#[case] year: u8) {
        assert!(matches!(
            SchoolYear::try_from(year),
            Err(Error::InvalidSchoolYear(y)) if y == year
        ));
    }
}
