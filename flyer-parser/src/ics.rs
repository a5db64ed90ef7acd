use std::borrow::Cow;

use chrono::Duration;
use ics::{
    parameters::Value,
    properties::{DtEnd, DtStart, Summary},
    ICalendar,
};

use crate::Event;

impl Event {
    /// All-day calendar entry. `seq` keeps identical events apart.
    #[must_use]
    pub fn to_ics(&self, seq: usize) -> ics::Event<'_> {
        let start = self.date.format("%Y%m%d").to_string();
        let end = (self.date + Duration::days(1)).format("%Y%m%d").to_string();

        let id = format!("{start}_{seq}_{}", self.name.replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, format!("{start}T000000Z"));

        let mut dtstart = DtStart::new(start);
        dtstart.add(Value::DATE);
        ics_event.push(dtstart);

        let mut dtend = DtEnd::new(end);
        dtend.add(Value::DATE);
        ics_event.push(dtend);

        ics_event.push(Summary::new(&self.name));

        ics_event
    }
}

#[must_use]
pub fn events_to_ics<'a, S: Into<Cow<'a, str>>>(name: S, events: &'a [Event]) -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", name);

    for (seq, event) in events.iter().enumerate() {
        icalendar.add_event(event.to_ics(seq));
    }

    icalendar
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn all_day_events() {
        let events = vec![
            Event {
                date: NaiveDate::from_ymd_opt(2023, 4, 30).unwrap(),
                name: "全国テスト".into(),
            },
            Event {
                date: NaiveDate::from_ymd_opt(2023, 4, 30).unwrap(),
                name: "全国テスト".into(),
            },
        ];

        let ics = events_to_ics("4年生", &events).to_string();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART;VALUE=DATE:20230430"));
        assert!(ics.contains("DTEND;VALUE=DATE:20230501"));
        assert!(ics.contains("DTSTAMP:20230430T000000Z"));
        assert!(ics.contains("SUMMARY:全国テスト"));
        assert!(ics.contains("UID:20230430_0_全国テスト"));
        assert!(ics.contains("UID:20230430_1_全国テスト"));
    }
}
