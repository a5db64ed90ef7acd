use log::debug;

use crate::{Error, Result, SchoolYear, Token};

/// A bare day of month: one or two ASCII digits.
pub(crate) fn is_day_number(text: &str) -> bool {
    (1..=2).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Horizontal centre of the column holding the day numbers.
///
/// Uses the median so that stray numbers elsewhere on the page (page
/// numbers, prices) do not drag the column.
pub fn date_column_x(tokens: &[Token]) -> Result<f64> {
    let mut xs = tokens
        .iter()
        .filter(|token| is_day_number(&token.text))
        .map(|token| token.cx)
        .collect::<Vec<_>>();

    let x = median(&mut xs).ok_or(Error::NoDateColumnCandidates)?;
    debug!("date column x: {x} ({} candidates)", xs.len());
    Ok(x)
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

/// Horizontal centre of the first token carrying the school year's header.
pub fn grade_column_x(tokens: &[Token], school_year: SchoolYear) -> Result<f64> {
    let marker = school_year.band().marker(school_year);

    let x = tokens
        .iter()
        .find(|token| token.text.contains(marker.as_ref()))
        .map(|token| token.cx)
        .ok_or(Error::GradeColumnNotFound(school_year))?;

    debug!("grade column x for {school_year}: {x}");
    Ok(x)
}
