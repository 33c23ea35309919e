use crate::cursor::TimeCursor;
use crate::duration::Duration;
use crate::error::BuildError;
use crate::event::{Event, EventKind};
use crate::itinerary::Itinerary;
use crate::roster::{trip_records, DutyDayRecord, FlightRecord, TripRecord};
use crate::schedule::{DutyDay, Trip};
use crate::store::{Repository, Store};
use chrono::{Datelike, NaiveDateTime};

/// How the pipeline treats a flight whose block time cannot be derived
/// from the roster alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Abort the trip and leave it for a later sweep.
    Postpone,
    /// Ask a human.
    Final,
}

/// Everything a human needs to see to supply a missing block time.
pub struct BlockTimeContext<'a> {
    pub departs: NaiveDateTime,
    pub flight: &'a FlightRecord,
}

/// The injected human-in-the-loop. The engine never talks to a console
/// itself, so a scripted implementation runs the pipeline headless.
pub trait Prompter {
    fn ask_block_time(&mut self, context: &BlockTimeContext<'_>) -> Duration;
    fn ask_is_event_correct(&mut self, event: &Event) -> bool;
    fn ask_replacement_itinerary(&mut self, event: &Event) -> Itinerary;
}

/// A trip that could not be reconstructed this pass, with the record
/// kept so the caller can retry it in [`Mode::Final`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscrepancyReport {
    pub record: TripRecord,
    pub error: BuildError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Built(Trip),
    Discrepancy(DiscrepancyReport),
}

/// Reconstructs every trip found in `text`. One trip per record, in
/// document order; a failed trip becomes a report and its siblings are
/// unaffected.
pub fn parse_trips<S: Store>(
    text: &str,
    mode: Mode,
    repo: &mut Repository<S>,
    prompter: &mut dyn Prompter,
) -> Vec<Outcome> {
    trip_records(text)
        .map(|record| match build_trip(&record, mode, repo, prompter) {
            Ok(trip) => Outcome::Built(trip),
            Err(error) => Outcome::Discrepancy(DiscrepancyReport { record, error }),
        })
        .collect()
}

pub fn build_trip<S: Store>(
    record: &TripRecord,
    mode: Mode,
    repo: &mut Repository<S>,
    prompter: &mut dyn Prompter,
) -> Result<Trip, BuildError> {
    let mut cursor = TimeCursor::seed(record.dated, record.check_in);
    let mut trip = Trip::new(record.number.clone(), record.dated);

    for day_record in &record.duty_days {
        let duty_day = build_duty_day(&mut cursor, day_record, mode, repo, prompter)?;
        trip.push(duty_day);
    }

    let computed = trip.duration();
    if computed != record.totals.tafb {
        return Err(BuildError::TripMismatch {
            computed,
            declared: record.totals.tafb,
        });
    }
    Ok(trip)
}

fn build_duty_day<S: Store>(
    cursor: &mut TimeCursor,
    record: &DutyDayRecord,
    mode: Mode,
    repo: &mut Repository<S>,
    prompter: &mut dyn Prompter,
) -> Result<DutyDay, BuildError> {
    cursor.start_duty_day();
    let suggested = Duration::parse(&record.crd).filter(|d| !d.is_zero());

    let mut events = Vec::with_capacity(record.flights.len());
    for flight in &record.flights {
        let itinerary = resolve_block(cursor, flight, suggested, mode, prompter)?;
        let mut event = Event {
            name: flight.name.clone(),
            route: repo.route(route_name(&flight.name), &flight.origin, &flight.destination),
            itinerary,
            kind: EventKind::Flight {
                carrier: resolve_carrier(&flight.name, &flight.equipment),
                equipment: repo.equipment(&flight.equipment),
                deadhead: flight.name.starts_with("DH"),
            },
            store_id: None,
        };
        event.store_id = Some(repo.create_event(&event));
        events.push(event);
        cursor.advance(Duration::parse(&flight.turn).unwrap_or_default());
    }
    cursor.end_duty_day();

    let mut duty_day = DutyDay::new(events);
    let computed = duty_day.duration();
    if computed != record.dy {
        match mode {
            Mode::Postpone => {
                retract_trailing_artifacts(&duty_day, repo);
                return Err(BuildError::DutyDayMismatch {
                    computed,
                    declared: record.dy,
                });
            }
            Mode::Final => repair_duty_day(&mut duty_day, repo, prompter),
        }
    }

    if let Some((_, layover)) = &record.layover {
        cursor.advance(*layover);
    }
    Ok(duty_day)
}

/// Decides a flight's elapsed block time and moves the cursor past it.
///
/// A deadhead leg is logged with a zero block of its own (the operating
/// carrier owns it). The duty day's aggregate is the only same-source
/// hint, and only when the leg stays inside one month: an aggregate
/// cannot stand in for a single leg that crosses a month boundary, so
/// the speculative advance is undone exactly and the flight stays
/// unresolved.
fn resolve_block(
    cursor: &mut TimeCursor,
    flight: &FlightRecord,
    suggested: Option<Duration>,
    mode: Mode,
    prompter: &mut dyn Prompter,
) -> Result<Itinerary, BuildError> {
    let begin = cursor.now();

    let own = Duration::parse(&flight.block).unwrap_or_default();
    if !own.is_zero() {
        cursor.advance(own);
        return Ok(Itinerary::from_duration(begin, own));
    }

    if let Some(hint) = suggested {
        cursor.advance(hint);
        let end = cursor.now();
        if (end.year(), end.month()) == (begin.year(), begin.month()) {
            return Ok(Itinerary::from_duration(begin, hint));
        }
        cursor.retreat(hint);
    }

    match mode {
        Mode::Postpone => Err(BuildError::UndefinedBlockTime {
            flight: flight.name.clone(),
        }),
        Mode::Final => {
            let manual = prompter.ask_block_time(&BlockTimeContext {
                departs: begin,
                flight,
            });
            cursor.advance(manual);
            Ok(Itinerary::from_duration(begin, manual))
        }
    }
}

/// Rows for the first non-numeric-named event and everything after it
/// were written on the strength of an inferred deadhead time that just
/// failed its arithmetic check, so they come back out of the store.
fn retract_trailing_artifacts<S: Store>(duty_day: &DutyDay, repo: &mut Repository<S>) {
    let artifact = duty_day
        .events
        .iter()
        .position(|e| !e.name.bytes().all(|b| b.is_ascii_digit()));
    if let Some(first) = artifact {
        for event in &duty_day.events[first..] {
            if let Some(id) = event.store_id {
                repo.delete_event(id);
            }
        }
    }
}

/// Walks every event past a human. A rejected event gets its itinerary
/// replaced wholesale and the day is then accepted as corrected, with
/// no second arithmetic check.
fn repair_duty_day<S: Store>(
    duty_day: &mut DutyDay,
    repo: &mut Repository<S>,
    prompter: &mut dyn Prompter,
) {
    for event in duty_day.events.iter_mut() {
        if !prompter.ask_is_event_correct(event) {
            event.itinerary = prompter.ask_replacement_itinerary(event);
            if let Some(id) = event.store_id {
                repo.update_event(id, event);
            }
        }
    }
}

/// Flight numbers may arrive prefixed with a carrier or deadhead tag;
/// the route itself is always the trailing four characters.
fn route_name(name: &str) -> &str {
    &name[name.len().saturating_sub(4)..]
}

/// Regional-partner deadheads are rostered under the mainline tag with a
/// sentinel equipment code; any other alphabetic prefix names its
/// carrier outright.
fn resolve_carrier(name: &str, equipment: &str) -> String {
    if name.starts_with("DH") {
        if equipment == "DHD" {
            return "6D".to_string();
        }
        return "AM".to_string();
    }
    let prefix = &name[..name.len().min(2)];
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return prefix.to_string();
    }
    "AM".to_string()
}

#[cfg(test)]
mod tests;
