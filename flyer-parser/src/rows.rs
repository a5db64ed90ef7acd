use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

use crate::columns::is_day_number;
use crate::{Error, Result, Token};

/// Furthest a day number may sit from the date column.
pub const MAX_DATE_DISTANCE: f64 = 0.15;
/// Blocks this tall span several lines and say nothing precise about a row.
pub const MAX_ROW_HEIGHT: f64 = 0.1;

/// Vertical position of every calendar row, ordered by date.
///
/// A position is `None` until it has been observed or interpolated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRowMap(BTreeMap<NaiveDate, Option<f64>>);

impl DateRowMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a row position unless the date already has one entry.
    /// Returns whether the position was recorded.
    pub fn insert_first(&mut self, date: NaiveDate, y: f64) -> bool {
        if self.0.contains_key(&date) {
            return false;
        }
        self.0.insert(date, Some(y));
        true
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<Option<f64>> {
        self.0.get(&date).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.0.iter().map(|(date, y)| (*date, *y))
    }

    /// Inserts every date missing between the first and last entry and
    /// estimates its position.
    ///
    /// Estimates are linear in the position of the entry within the ordered
    /// sequence, between the closest resolved entries on either side. Entries
    /// with no resolved neighbour on one side stay unresolved.
    #[must_use]
    pub fn interpolate(&self) -> Self {
        let mut rows = Vec::with_capacity(self.0.len());
        let mut prev: Option<NaiveDate> = None;

        for (&date, &y) in &self.0 {
            if let Some(prev) = prev {
                let mut missing = prev + Duration::days(1);
                while missing < date {
                    rows.push((missing, None));
                    missing += Duration::days(1);
                }
            }
            rows.push((date, y));
            prev = Some(date);
        }

        let known = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, (_, y))| y.map(|y| (idx, y)))
            .collect::<Vec<_>>();

        for pair in known.windows(2) {
            let (a, ya) = pair[0];
            let (b, yb) = pair[1];
            let span = (b - a) as f64;

            for (i, row) in rows.iter_mut().enumerate().take(b).skip(a + 1) {
                // Weighted form keeps a single midpoint at exactly (ya + yb) / 2.
                row.1 = Some((ya * (b - i) as f64 + yb * (i - a) as f64) / span);
            }
        }

        Self(rows.into_iter().collect())
    }

    /// First unresolved date, if any.
    #[must_use]
    pub fn first_unresolved(&self) -> Option<NaiveDate> {
        self.0
            .iter()
            .find_map(|(date, y)| y.is_none().then_some(*date))
    }

    /// Date whose row is vertically closest to `y`.
    ///
    /// On equal distance the earliest date wins. Unresolved rows are skipped.
    #[must_use]
    pub fn nearest(&self, y: f64) -> Option<NaiveDate> {
        let mut best: Option<(NaiveDate, f64)> = None;

        for (&date, &row_y) in &self.0 {
            let Some(row_y) = row_y else {
                continue;
            };

            let distance = (row_y - y).abs();
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((date, distance));
            }
        }

        best.map(|(date, _)| date)
    }
}

impl FromIterator<(NaiveDate, f64)> for DateRowMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut rows = Self::new();
        for (date, y) in iter {
            rows.insert_first(date, y);
        }
        rows
    }
}

/// Turns a token's text into a date, if it reads as a day of `month` or as
/// an explicit `M/D`.
fn parse_row_date(text: &str, year: i32, month: u32) -> Option<NaiveDate> {
    let text = text.replace("||", "11");
    let text = text.split(char::is_whitespace).next()?;

    let (month, day) = if is_day_number(text) {
        (month, text.parse().ok()?)
    } else {
        let captures = regex!(r"^([0-9]{1,2})/([0-9]{1,2})$").captures(text)?;
        (captures[1].parse().ok()?, captures[2].parse().ok()?)
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Collects the vertical position of every readable day number close to the
/// date column. The first token seen for a date wins.
pub fn extract_date_rows(tokens: &[Token], year: i32, month: u32, date_x: f64) -> DateRowMap {
    let mut rows = DateRowMap::new();

    for token in tokens {
        if (token.cx - date_x).abs() > MAX_DATE_DISTANCE || token.height >= MAX_ROW_HEIGHT {
            continue;
        }

        if let Some(date) = parse_row_date(&token.text, year, month) {
            rows.insert_first(date, token.cy);
        }
    }

    debug!("{} date rows from {month}/{year} tokens", rows.len());
    rows
}

/// Interpolates `rows` and checks that every position got resolved.
pub fn complete_date_rows(rows: &DateRowMap) -> Result<DateRowMap> {
    let rows = rows.interpolate();

    if let Some(date) = rows.first_unresolved() {
        return Err(Error::UnresolvedRow(date));
    }

    for (date, y) in rows.iter() {
        debug!("{} {date} {y:?}", date.weekday());
    }

    Ok(rows)
}
