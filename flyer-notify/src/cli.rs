use std::path::PathBuf;
use std::process;

use getopts::{Matches, Options};

use crate::message::EVENTS_PER_MESSAGE;

pub struct Args {
    pub document: PathBuf,
    pub school_year: u8,
    pub page: usize,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub batch_size: usize,
    pub json: bool,
    pub ics: Option<PathBuf>,
    pub debug: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt("p", "page", "Page of the document to read [Default: 0]", "INDEX");
    opts.optopt("y", "year", "Year of the schedule [Default: from file name]", "YEAR");
    opts.optopt(
        "m",
        "month",
        "Month of the schedule [Default: from file name or page title]",
        "MONTH",
    );
    opts.optopt(
        "b",
        "batch-size",
        "Events per notification message [Default: 3]",
        "COUNT",
    );
    opts.optflag("j", "json", "Print events as JSON instead of messages");
    opts.optopt("i", "ics", "Also write the events to an iCalendar file", "FILE");
    opts.optflag(
        "d",
        "debug",
        "Print debug messages and never send notifications",
    );
    opts
}

fn usage(opts: &Options) -> String {
    let brief = format!(
        "{} DOCUMENT_JSON SCHOOL_YEAR",
        opts.short_usage(env!("CARGO_PKG_NAME"))
    );
    opts.usage(&brief)
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn opt_or_exit<T: std::str::FromStr>(matches: &Matches, name: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match matches.opt_get(name) {
        Ok(value) => value,
        Err(err) => fail(&format!("Provided value for option '{name}' is invalid: {err}")),
    }
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(err) => fail(&err.to_string()),
    };

    if matches.opt_present("help") {
        println!("{}", usage(&opts));
        process::exit(0);
    }

    let [document, school_year] = matches.free.as_slice() else {
        fail(&usage(&opts));
    };

    let school_year = match school_year.parse::<u8>() {
        Ok(year @ 1..=6) => year,
        _ => fail(&format!("SCHOOL_YEAR must be one of 1-6, got '{school_year}'")),
    };

    let batch_size = opt_or_exit(&matches, "batch-size").unwrap_or(EVENTS_PER_MESSAGE);
    if batch_size == 0 {
        fail("Provided value for option 'batch-size' must be positive");
    }

    Args {
        document: PathBuf::from(document),
        school_year,
        page: opt_or_exit(&matches, "page").unwrap_or(0),
        year: opt_or_exit(&matches, "year"),
        month: opt_or_exit(&matches, "month"),
        batch_size,
        json: matches.opt_present("json"),
        ics: matches.opt_str("ics").map(PathBuf::from),
        debug: matches.opt_present("debug"),
    }
}
