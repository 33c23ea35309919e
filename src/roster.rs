use crate::duration::Duration;
use chrono::{NaiveDate, NaiveTime};

/// One flight line as printed: eight whitespace-delimited fields.
/// `block`/`turn` hold whatever the line's sixth and seventh slots carry;
/// see [`DutyDayRecord`] for the last-line reinterpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub name: String,
    pub origin: String,
    pub begin: String,
    pub destination: String,
    pub end: String,
    pub block: String,
    pub turn: String,
    pub equipment: String,
}

/// A duty day's flights plus its declared footer totals.
///
/// The roster prints the day's release time in the last flight line's
/// block slot and that flight's block in its turn slot. The reshuffle is
/// applied while the record is assembled, so `flights` is already
/// consistent by the time anyone reads it: every flight's `block` is a
/// block, every `turn` is a turn, and `release` holds the day's release.
#[derive(Debug, Clone, PartialEq)]
pub struct DutyDayRecord {
    pub flights: Vec<FlightRecord>,
    pub release: String,
    pub layover: Option<(String, Duration)>,
    pub bl: Duration,
    /// Raw aggregate block field. Negative forms (`-0175`) are printed
    /// upstream with an unconfirmed meaning, so the string is kept as is.
    pub crd: String,
    pub tl: Duration,
    pub dy: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripTotals {
    pub tl: Duration,
    pub bl: Duration,
    pub cr: Duration,
    pub tafb: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub number: String,
    pub dated: NaiveDate,
    pub check_in: NaiveTime,
    pub duty_days: Vec<DutyDayRecord>,
    pub totals: TripTotals,
}

/// Lazily scans trip records out of roster text. Text that matches no
/// part of the grammar (page headers, footers, truncated trips) yields
/// nothing.
pub fn trip_records(text: &str) -> TripRecords<'_> {
    TripRecords {
        lines: text.lines().peekable(),
    }
}

pub struct TripRecords<'a> {
    lines: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> Iterator for TripRecords<'a> {
    type Item = TripRecord;

    fn next(&mut self) -> Option<TripRecord> {
        loop {
            let header = loop {
                let line = self.lines.next()?;
                if line.trim_start().starts_with('#') {
                    break line;
                }
            };

            // Chunk runs to the TOTALS footer; a new `#` before that
            // means this trip is truncated.
            let mut body = Vec::new();
            let mut totals_line = None;
            while let Some(&line) = self.lines.peek() {
                if line.trim_start().starts_with('#') {
                    break;
                }
                self.lines.next();
                if line.split_whitespace().next() == Some("TOTALS") {
                    totals_line = Some(line);
                    break;
                }
                body.push(line);
            }

            let record = totals_line.and_then(|t| parse_trip(header, &body, t));
            match record {
                Some(record) => return Some(record),
                None => continue,
            }
        }
    }
}

fn parse_trip(header: &str, body: &[&str], totals_line: &str) -> Option<TripRecord> {
    let header_tokens: Vec<&str> = header.split_whitespace().collect();
    let number = header_tokens
        .iter()
        .find(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))?
        .to_string();
    let check_in = header_tokens
        .iter()
        .find_map(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())?;

    let mut dated = None;
    let mut duty_days = Vec::new();
    let mut flights: Vec<FlightRecord> = Vec::new();

    for line in body {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if dated.is_none() {
            if let Ok(date) = NaiveDate::parse_from_str(tokens[0], "%d%b%Y") {
                dated = Some(date);
                continue;
            }
        }

        if let Some(footer) = parse_footer(&tokens) {
            duty_days.push(close_duty_day(std::mem::take(&mut flights), footer)?);
            continue;
        }

        if tokens.len() == 10 && is_day_month(tokens[0]) && is_clock(tokens[1]) {
            if let Some(flight) = parse_flight(&tokens[2..]) {
                flights.push(flight);
                continue;
            }
        }

        if tokens.len() == 8 {
            if let Some(flight) = parse_flight(&tokens) {
                flights.push(flight);
                continue;
            }
        }

        // Anything else is page noise.
    }

    if !flights.is_empty() || duty_days.is_empty() {
        return None;
    }

    Some(TripRecord {
        number,
        dated: dated?,
        check_in,
        duty_days,
        totals: parse_totals(totals_line)?,
    })
}

struct Footer {
    layover: Option<(String, Duration)>,
    bl: Duration,
    crd: String,
    tl: Duration,
    dy: Duration,
}

/// Last-line reshuffle: the final flight's block slot is the day's
/// release, its turn slot is its block, and its true turn is zero.
/// A footer with no flight lines above it invalidates the chunk.
fn close_duty_day(mut flights: Vec<FlightRecord>, footer: Footer) -> Option<DutyDayRecord> {
    let last = flights.last_mut()?;
    let release = std::mem::replace(&mut last.block, last.turn.clone());
    last.turn = "0000".to_string();
    Some(DutyDayRecord {
        flights,
        release,
        layover: footer.layover,
        bl: footer.bl,
        crd: footer.crd,
        tl: footer.tl,
        dy: footer.dy,
    })
}

fn parse_footer(tokens: &[&str]) -> Option<Footer> {
    let n = tokens.len();
    if n != 4 && n != 6 {
        return None;
    }
    let dy = Duration::parse(tokens[n - 1].strip_suffix("DY")?)?;
    let tl = Duration::parse(tokens[n - 2].strip_suffix("TL")?)?;
    let crd = tokens[n - 3].strip_suffix("CRD")?.to_string();
    let bl = Duration::parse(tokens[n - 4].strip_suffix("BL")?)?;
    let layover = if n == 6 {
        if !is_airport(tokens[0]) {
            return None;
        }
        Some((tokens[0].to_string(), Duration::parse(tokens[1])?))
    } else {
        None
    };
    Some(Footer {
        layover,
        bl,
        crd,
        tl,
        dy,
    })
}

fn parse_totals(line: &str) -> Option<TripTotals> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 || tokens[0] != "TOTALS" {
        return None;
    }
    Some(TripTotals {
        tl: Duration::parse(tokens[1].strip_suffix("TL")?)?,
        bl: Duration::parse(tokens[2].strip_suffix("BL")?)?,
        cr: Duration::parse(tokens[3].strip_suffix("CR")?)?,
        tafb: Duration::parse(tokens[4].strip_suffix("TAFB")?)?,
    })
}

fn parse_flight(tokens: &[&str]) -> Option<FlightRecord> {
    if tokens.len() != 8 {
        return None;
    }
    let [name, origin, begin, destination, end, block, turn, equipment] = tokens else {
        return None;
    };
    if !(4..=6).contains(&name.len()) || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    if !is_airport(origin) || !is_airport(destination) {
        return None;
    }
    if !is_clock(begin) || !is_clock(end) || !is_clock(block) || !is_clock(turn) {
        return None;
    }
    if equipment.len() != 3 || !equipment.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(FlightRecord {
        name: name.to_string(),
        origin: origin.to_string(),
        begin: begin.to_string(),
        destination: destination.to_string(),
        end: end.to_string(),
        block: block.to_string(),
        turn: turn.to_string(),
        equipment: equipment.to_string(),
    })
}

fn is_airport(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_clock(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_day_month(token: &str) -> bool {
    token.len() == 5
        && token[..2].bytes().all(|b| b.is_ascii_digit())
        && token[2..].bytes().all(|b| b.is_ascii_uppercase())
}
