use std::io;

use chrono::NaiveDate;
use thiserror::Error;

use crate::SchoolYear;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed document: {0}")]
    MalformedInput(String),

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),

    #[error("target month is unknown")]
    UnknownMonth,

    #[error("no day-of-month tokens to locate the date column")]
    NoDateColumnCandidates,

    #[error("no date rows found near the date column")]
    NoDateRows,

    #[error("row position for {0} is unresolved after interpolation")]
    UnresolvedRow(NaiveDate),

    #[error("cannot find {0} in page")]
    GradeColumnNotFound(SchoolYear),

    #[error("school year must be between 1 and 6, got {0}")]
    InvalidSchoolYear(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
