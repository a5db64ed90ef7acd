macro_rules! regex {
    ($re:expr) => {{
        static REGEX: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($re).unwrap());
        &REGEX
    }};
}

mod bands;
mod columns;
mod document;
mod error;
mod events;
mod rows;
mod schedule;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use bands::{is_ignored, GradeBand, IGNORED, LOWER_GRADES, UPPER_GRADES};
pub use columns::{date_column_x, grade_column_x};
pub use document::{Block, BoundingPoly, Document, Layout, Page, TextAnchor, TextSegment, Vertex};
pub use error::{Error, Result};
pub use events::{extract_events, MAX_EVENT_WIDTH, MAX_GRADE_DISTANCE};
pub use rows::{complete_date_rows, extract_date_rows, DateRowMap, MAX_DATE_DISTANCE, MAX_ROW_HEIGHT};
pub use schedule::{
    extract_page_schedule, extract_schedule, month_from_tokens, period_from_filename,
    schedule_from_tokens,
};
pub use structs::{Event, SchoolYear, Token};

#[cfg(feature = "ics")]
pub use crate::ics::events_to_ics;
