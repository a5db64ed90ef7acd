mod cli;
mod message;
mod notify;

use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use flyer_parser::{
    events_to_ics, extract_page_schedule, period_from_filename, Document, Event, SchoolYear,
};
use log::{debug, info};

use crate::cli::Args;
use crate::message::build_messages;
use crate::notify::Notifier;

const LOG: &str = "LOG";
const TOKEN: &str = "FLYER_NOTIFY_TOKEN";

fn setup_logging(debug: bool) {
    if debug {
        env::set_var(LOG, "flyer_notify=debug,flyer_parser=debug");
    } else if env::var(LOG).is_err() {
        env::set_var(LOG, "flyer_notify=info,flyer_parser=info");
    }

    pretty_env_logger::init_custom_env(LOG);
}

fn read_events(args: &Args) -> Result<Vec<Event>> {
    let school_year = SchoolYear::new(args.school_year)?;

    let file = fs::File::open(&args.document)
        .with_context(|| format!("Failed to open {}", args.document.display()))?;
    let document = Document::from_reader(file)
        .with_context(|| format!("Failed to parse {}", args.document.display()))?;

    // Flags beat the file name; the library falls back to the page title
    // and the current year.
    let from_filename = period_from_filename(&args.document);
    let year = args.year.or(from_filename.map(|(year, _)| year));
    let month = args.month.or(from_filename.map(|(_, month)| month));

    Ok(extract_page_schedule(
        &document,
        args.page,
        school_year,
        year,
        month,
    )?)
}

fn write_ics(path: &Path, school_year: u8, events: &[Event]) -> Result<()> {
    let name = format!("{school_year}年生");
    events_to_ics(name, events)
        .save_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());
    setup_logging(args.debug);

    let events = read_events(&args)?;
    info!("Found {} events", events.len());

    if let Some(path) = &args.ics {
        write_ics(path, args.school_year, &events)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let messages = build_messages(&events, args.batch_size);
    for message in &messages {
        println!("{message}");
    }

    let token = env::var(TOKEN).unwrap_or_default();
    if token.is_empty() || args.debug {
        debug!("Not sending notifications");
        return Ok(());
    }

    Notifier::new(token).send_all(&messages).await?;
    info!("Sent {} messages", messages.len());

    Ok(())
}
