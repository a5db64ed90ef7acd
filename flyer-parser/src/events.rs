use log::debug;

use crate::bands::is_ignored;
use crate::{DateRowMap, Error, Event, Result, SchoolYear, Token};

/// Furthest an event may sit from the grade column header.
pub const MAX_GRADE_DISTANCE: f64 = 0.1;
/// Anything wider is a banner across several columns.
pub const MAX_EVENT_WIDTH: f64 = 0.25;

/// Picks the events of one school year out of the tokens and dates each of
/// them by the closest calendar row.
///
/// Ignored phrases win over vocabulary matches. Identical events are kept.
/// Fails with [`Error::NoDateRows`] only when an event has no row to date it.
pub fn extract_events(
    tokens: &[Token],
    rows: &DateRowMap,
    grade_x: f64,
    school_year: SchoolYear,
) -> Result<Vec<Event>> {
    let band = school_year.band();
    let mut events = Vec::new();

    for token in tokens {
        if (token.cx - grade_x).abs() > MAX_GRADE_DISTANCE || token.width >= MAX_EVENT_WIDTH {
            continue;
        }

        if is_ignored(&token.text) || !band.matches(&token.text) {
            continue;
        }

        let date = rows.nearest(token.cy).ok_or(Error::NoDateRows)?;

        let event = Event {
            date,
            name: token.text.replace('\n', " "),
        };

        debug!("{} {}", event.date, event.name);
        events.push(event);
    }

    Ok(events)
}
