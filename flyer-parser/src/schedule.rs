use std::path::Path;

use chrono::{Datelike, Utc};
use log::{debug, info};

use crate::columns::{date_column_x, grade_column_x};
use crate::events::extract_events;
use crate::rows::{complete_date_rows, extract_date_rows};
use crate::{Document, Error, Event, Result, SchoolYear, Token};

/// Year and month encoded in a `...YYMM.json` file name.
pub fn period_from_filename<P: AsRef<Path>>(path: P) -> Option<(i32, u32)> {
    let name = path.as_ref().file_name()?.to_str()?;
    let captures = regex!(r"([0-9]{2})([0-9]{2})\.json$").captures(name)?;

    let year = 2000 + captures[1].parse::<i32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;

    (1..=12).contains(&month).then_some((year, month))
}

/// Reads ASCII or full-width decimal digits.
fn parse_digits(digits: &str) -> Option<u32> {
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '0'..='9' => c.to_digit(10)?,
            '０'..='９' => u32::from(c) - u32::from('０'),
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

/// Month from an issue title such as `4月号` or `４月号`, first match in
/// token order.
pub fn month_from_tokens(tokens: &[Token]) -> Option<u32> {
    let month = tokens.iter().find_map(|token| {
        regex!(r"([0-9０-９]+)月号")
            .captures(&token.text)
            .and_then(|captures| parse_digits(&captures[1]))
    })?;

    (1..=12).contains(&month).then_some(month)
}

/// Runs the layout inference over already extracted tokens.
pub fn schedule_from_tokens(
    tokens: &[Token],
    school_year: SchoolYear,
    year: i32,
    month: u32,
) -> Result<Vec<Event>> {
    let date_x = date_column_x(tokens)?;

    let rows = extract_date_rows(tokens, year, month, date_x);
    let rows = complete_date_rows(&rows)?;

    let grade_x = grade_column_x(tokens, school_year)?;

    extract_events(tokens, &rows, grade_x, school_year)
}

/// Extracts the events of `school_year` from the first page of `document`.
///
/// `year` defaults to the current year and `month` to the issue title printed
/// on the page.
pub fn extract_schedule(
    document: &Document,
    school_year: SchoolYear,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<Event>> {
    extract_page_schedule(document, 0, school_year, year, month)
}

/// Same as [`extract_schedule`] for any page of `document`.
pub fn extract_page_schedule(
    document: &Document,
    page_index: usize,
    school_year: SchoolYear,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<Event>> {
    let tokens = document.tokens(page_index)?;
    for token in &tokens {
        debug!("{token:?}");
    }

    let month = month
        .or_else(|| month_from_tokens(&tokens))
        .ok_or(Error::UnknownMonth)?;

    let year = year.unwrap_or_else(|| {
        let year = Utc::now().year();
        info!("Target year is set to {year}");
        year
    });

    schedule_from_tokens(&tokens, school_year, year, month)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn token(text: &str) -> Token {
        Token {
            text: text.into(),
            cx: 0.5,
            cy: 0.5,
            width: 0.1,
            height: 0.02,
        }
    }

    #[rstest]
    #[case("schedule_2304.json", Some((2023, 4)))]
    #[case("/tmp/flyers/nichinoken-2412.json", Some((2024, 12)))]
    #[case("2313.json", None)]
    #[case("2300.json", None)]
    #[case("schedule_2304.pdf", None)]
    #[case("schedule_2304json", None)]
    #[case("schedule.json", None)]
    fn filename_periods(#[case] path: &str, #[case] expected: Option<(i32, u32)>) {
        assert_eq!(period_from_filename(path), expected);
    }

    #[rstest]
    #[case(&["にちのおしらせ", "4月号"], Some(4))]
    #[case(&["12月号 特別", "1月号"], Some(12))]
    #[case(&["にちのけん ４月号"], Some(4))]
    #[case(&["１２月号"], Some(12))]
    #[case(&["1２月号"], Some(12))]
    #[case(&["4月"], None)]
    #[case(&["13月号"], None)]
    #[case(&[], None)]
    fn text_months(#[case] texts: &[&str], #[case] expected: Option<u32>) {
        let tokens = texts.iter().map(|text| token(text)).collect::<Vec<_>>();
        assert_eq!(month_from_tokens(&tokens), expected);
    }

    #[test]
    fn reads_requested_page() {
        let document = Document::from_json(
            r#"{"text": "", "pages": [{"blocks": []}, {"blocks": [{"layout": {}}]}]}"#,
        )
        .unwrap();
        let year = SchoolYear::new(3).unwrap();

        assert!(matches!(
            extract_page_schedule(&document, 0, year, Some(2023), Some(4)),
            Err(Error::NoDateColumnCandidates)
        ));
        assert!(matches!(
            extract_page_schedule(&document, 1, year, Some(2023), Some(4)),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn unknown_month_aborts() {
        let document = Document::from_json(r#"{"text": "", "pages": [{"blocks": []}]}"#).unwrap();
        let year = SchoolYear::new(3).unwrap();

        assert!(matches!(
            extract_schedule(&document, year, Some(2023), None),
            Err(Error::UnknownMonth)
        ));
    }

    #[test]
    fn missing_date_column_aborts() {
        let tokens = [token("3年生"), token("授業")];
        let year = SchoolYear::new(3).unwrap();

        assert!(matches!(
            schedule_from_tokens(&tokens, year, 2023, 4),
            Err(Error::NoDateColumnCandidates)
        ));
    }

    #[test]
    fn no_rows_and_no_events() {
        let tokens = [token("31"), token("3年生")];
        let year = SchoolYear::new(3).unwrap();

        assert_eq!(schedule_from_tokens(&tokens, year, 2023, 4).unwrap(), vec![]);
    }

    #[test]
    fn undatable_event_aborts() {
        let tokens = [token("31"), token("3年生"), token("授業")];
        let year = SchoolYear::new(3).unwrap();

        assert!(matches!(
            schedule_from_tokens(&tokens, year, 2023, 4),
            Err(Error::NoDateRows)
        ));
    }
}
