use chrono::{Datelike, Weekday};
use flyer_parser::Event;

pub const EVENTS_PER_MESSAGE: usize = 3;

const CALENDAR_URL: &str = "https://www.google.com/calendar/render?action=TEMPLATE";

fn weekday_kanji(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

/// Link that opens a prefilled all-day entry in the calendar app.
pub fn calendar_url(event: &Event) -> String {
    let date = event.date.format("%Y%m%d");
    format!(
        "{CALENDAR_URL}&text={}&details=&dates={date}/{date}&sf=true&output=xml",
        urlencoding::encode(&event.name)
    )
}

pub fn label(event: &Event) -> String {
    format!(
        "{}（{}） {}",
        event.date,
        weekday_kanji(event.date.weekday()),
        event.name
    )
}

fn render(event: &Event) -> String {
    format!("\n■ {}\n{}", label(event), calendar_url(event))
}

/// Splits the rendered events into as few messages as `per_message` allows,
/// keeping message sizes within one of each other. Earlier messages take the
/// extra entries.
pub fn build_messages(events: &[Event], per_message: usize) -> Vec<String> {
    let rendered = events.iter().map(render).collect::<Vec<_>>();
    if rendered.is_empty() {
        return Vec::new();
    }

    let count = rendered.len().div_ceil(per_message.max(1));
    let (base, extra) = (rendered.len() / count, rendered.len() % count);

    let mut messages = Vec::with_capacity(count);
    let mut rest = rendered.as_slice();

    for idx in 0..count {
        let size = base + usize::from(idx < extra);
        let (chunk, tail) = rest.split_at(size);
        messages.push(chunk.join("\n"));
        rest = tail;
    }

    messages
}
