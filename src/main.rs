use crate::builder::{
    parse_trips, build_trip, BlockTimeContext, DiscrepancyReport, Mode, Outcome, Prompter,
};
use crate::duration::Duration;
use crate::event::Event;
use crate::itinerary::Itinerary;
use crate::schedule::{Line, LineEntry, Trip};
use crate::store::{JsonStore, Repository};
use chrono::{Datelike, NaiveDateTime};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;
use tabled::Tabled;

mod airport;
mod builder;
mod cursor;
mod duration;
mod equipment;
mod error;
mod event;
mod itinerary;
mod roster;
mod route;
mod schedule;
mod store;

#[derive(Parser)]
struct Args {
    /// Path to the roster text file
    #[arg(value_name = "ROSTER")]
    roster: PathBuf,

    /// Path to the JSON event store
    #[arg(short, long, value_name = "FILE", default_value = "data/store.json")]
    store: PathBuf,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())
        .expect("Failed to spawn pager");

    let mut stdin = pager.stdin.take().expect("Failed to open stdin for pager");

    if let Err(e) = stdin.write_all(content.as_bytes()) {
        // Broken pipe is common if the user quits the pager early
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing to pager: {}", e);
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

/// Console implementation of the construction prompts. Asks again until
/// the answer parses; a closed stdin leaves the trip as it stands.
struct ConsolePrompter;

impl ConsolePrompter {
    fn read_line(&self, question: &str) -> Option<String> {
        print!("{} ", question.cyan());
        std::io::stdout().flush().ok()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer).ok()?;
        Some(answer.trim().to_string())
    }
}

impl Prompter for ConsolePrompter {
    fn ask_block_time(&mut self, context: &BlockTimeContext<'_>) -> Duration {
        loop {
            let question = format!(
                "Block time for {} {}-{} departing {} (HHMM)?",
                context.flight.name,
                context.flight.origin,
                context.flight.destination,
                context.departs.format("%d%b %H:%M"),
            );
            match self.read_line(&question) {
                Some(answer) => {
                    if let Some(duration) = Duration::parse(&answer) {
                        return duration;
                    }
                    println!("{}", "Expected a HHMM or HH:MM value.".yellow());
                }
                None => return Duration::new(0),
            }
        }
    }

    fn ask_is_event_correct(&mut self, event: &Event) -> bool {
        loop {
            match self.read_line(&format!("Is {} correct [y/n]?", event)) {
                Some(answer) => match answer.as_str() {
                    "y" | "Y" | "" => return true,
                    "n" | "N" => return false,
                    _ => println!("{}", "Expected y or n.".yellow()),
                },
                None => return true,
            }
        }
    }

    fn ask_replacement_itinerary(&mut self, event: &Event) -> Itinerary {
        loop {
            let begin = match self.read_line("New departure (DDMMMYYYY HH:MM)?") {
                Some(answer) => {
                    match NaiveDateTime::parse_from_str(&answer, "%d%b%Y %H:%M") {
                        Ok(begin) => begin,
                        Err(_) => {
                            println!("{}", "Expected v.gr. 30JUN2018 21:55.".yellow());
                            continue;
                        }
                    }
                }
                None => return event.itinerary,
            };
            match self.read_line("Block time (HHMM)?") {
                Some(answer) => match Duration::parse(&answer) {
                    Some(duration) => return Itinerary::from_duration(begin, duration),
                    None => println!("{}", "Expected a HHMM or HH:MM value.".yellow()),
                },
                None => return event.itinerary,
            }
        }
    }
}

#[derive(Tabled)]
struct TripRow {
    #[tabled(rename = "Trip")]
    number: String,
    #[tabled(rename = "Dated")]
    dated: String,
    #[tabled(rename = "Days")]
    days: usize,
    #[tabled(rename = "Report")]
    report: String,
    #[tabled(rename = "Release")]
    release: String,
    #[tabled(rename = "Block")]
    block: String,
    #[tabled(rename = "Deadhead")]
    deadhead: String,
    #[tabled(rename = "TAFB")]
    tafb: String,
}

impl TripRow {
    fn from_trip(trip: &Trip) -> TripRow {
        let credits = trip.compute_credits();
        TripRow {
            number: trip.number.clone(),
            dated: trip.dated.format("%d%b%Y").to_string(),
            days: trip.duty_days.len(),
            report: trip.report().format("%d%b %H:%M").to_string(),
            release: trip.release().format("%d%b %H:%M").to_string(),
            block: credits.block.to_string(),
            deadhead: credits.deadhead.zero_suppressed(),
            tafb: credits.tafb.to_string(),
        }
    }
}

fn list_trips(trips: &[Trip]) {
    if trips.is_empty() {
        println!("No trips built yet.");
        return;
    }
    let rows: Vec<TripRow> = trips.iter().map(TripRow::from_trip).collect();
    let mut table = tabled::Table::new(&rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn list_pending(pending: &[DiscrepancyReport]) {
    if pending.is_empty() {
        println!("Nothing pending.");
        return;
    }
    for report in pending {
        println!(
            "  {} {} {}",
            report.record.number.bold(),
            report.record.dated.format("%d%b%Y"),
            report.error.to_string().yellow(),
        );
    }
}

fn print_credits(trips: &[Trip]) {
    let Some(first) = trips.first() else {
        println!("No trips built yet.");
        return;
    };
    let mut line = Line::new(first.dated.year(), first.dated.month());
    for trip in trips {
        line.push(LineEntry::Trip(trip.clone()));
    }
    let credits = line.compute_credits();
    println!("Block    {:>8}", credits.block.to_string());
    println!("Deadhead {:>8}", credits.deadhead.to_string());
    println!("Duty     {:>8}", credits.duty.to_string());
    println!("TAFB     {:>8}", credits.tafb.to_string());
}

fn fix_pending(
    pending: &mut Vec<DiscrepancyReport>,
    trips: &mut Vec<Trip>,
    repo: &mut Repository<JsonStore>,
    prompter: &mut ConsolePrompter,
) {
    for report in std::mem::take(pending) {
        match build_trip(&report.record, Mode::Final, repo, prompter) {
            Ok(trip) => {
                println!("Trip {} {}", trip.number, "rebuilt".green());
                trips.push(trip);
            }
            Err(error) => {
                println!("Trip {} {}", report.record.number, error.to_string().red());
                pending.push(DiscrepancyReport {
                    record: report.record,
                    error,
                });
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.roster)?;

    let store = if args.store.exists() {
        JsonStore::load_from_file(&args.store)?
    } else {
        JsonStore::new()
    };
    let mut repo = Repository::new(store);
    let mut prompter = ConsolePrompter;

    let mut trips: Vec<Trip> = Vec::new();
    let mut pending: Vec<DiscrepancyReport> = Vec::new();
    for outcome in parse_trips(&text, Mode::Postpone, &mut repo, &mut prompter) {
        match outcome {
            Outcome::Built(trip) => trips.push(trip),
            Outcome::Discrepancy(report) => pending.push(report),
        }
    }
    println!(
        "Loaded {}: {} trips built, {} postponed.",
        args.roster.display(),
        trips.len().to_string().green(),
        pending.len().to_string().yellow(),
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "pending".to_string(),
            "fix".to_string(),
            "credits".to_string(),
            "save".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => list_trips(&trips),
                    "pending" => list_pending(&pending),
                    "fix" => {
                        if pending.is_empty() {
                            println!("Nothing pending.");
                        } else {
                            fix_pending(&mut pending, &mut trips, &mut repo, &mut prompter);
                        }
                    },
                    "credits" => print_credits(&trips),
                    "save" => {
                        repo.store().save_to_file(&args.store)?;
                        println!("Saved event store to {}", args.store.display());
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls          - List built trips in a table");
                        println!("  pending     - List trips postponed over a discrepancy");
                        println!("  fix         - Retry pending trips, asking for missing times");
                        println!("  credits     - Total the month's pay-time buckets");
                        println!("  save        - Write the event store back to disk");
                        println!("  help / ?    - Show this help menu");
                        println!("  exit / quit - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
