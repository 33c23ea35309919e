use crate::builder::{BlockTimeContext, Prompter};
use crate::duration::Duration;
use crate::event::Event;
use crate::itinerary::Itinerary;
use crate::route::{Route, RouteKey};
use crate::store::{EventRow, JsonStore, Repository, Store};
use crate::{airport::Airport, equipment::Equipment};
use std::collections::VecDeque;

/// A month's trips file as printed by the crew portal, page noise
/// included. The last chunk is cut off mid-trip.
pub const SAMPLE_ROSTER: &str = "\
# 3431 CHECK IN AT 20:55
30JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
30JUN 2055 0194 MEX 2155 TIJ 2335 0340 0046 737
DH0111 TIJ 0021 GDL 0519 0549 0000 737
GDL 26:51 0340BL -175CRD 0205TL 0854DY
02JUL 0840 0782 GDL 0940 LAX 1110 1140 0330 38A
LAX 11:35 0330BL -370CRD 0000TL 0500DY
03JUL 2315 0785 LAX 0015 GDL 0531 0601 0316 38A
GDL 23:29 0316BL -356CRD 0000TL 0446DY
04JUL 0530 0770 GDL 0630 TIJ 0731 0301 0050 38A
0773 TIJ 0821 GDL 1330 0309 0131 38A
DH0253 GDL 1501 MEX 1630 1700 0000 7S8
0610BL -650CRD 0000TL 1130DY
TOTALS 2:05TL 2:05BL 00:00CR 92:05TAFB
# 4047 CHECK IN AT 20:00
08JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
08JUN 2000 0956 MEX 2100 MTY 2245 2315 0145 7S8
MTY 30:40 0145BL 0000CRD 0145TL 0315DY
10JUN 0555 0905 MTY 0655 MEX 0830 0135 0250 7S8
0543 MEX 1120 CUN 1337 0217 0048 7S8
0592 CUN 1425 MEX 1655 1725 0230 7S8
0622BL 0000CRD 0622TL 1130DY
TOTALS 8:07TL 8:07BL 00:00CR 45:25TAFB
# 4048 CHECK IN AT 08:40
06JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
06JUN 0840 1120 MEX 0940 GDL 1104 0124 0056 38A
0178 GDL 1200 TIJ 1303 0303 0057 38A
DH0179 TIJ 1400 GDL 1858 1928 0000 38A
GDL 13:10 0427BL 0258CRD 0725TL 1048DY
07JUN 0838 0782 GDL 0938 LAX 1110 1140 0332 38A
LAX 11:35 0332BL 0000CRD 0332TL 0502DY
08JUN 2315 0785 LAX 0015 GDL 0534 0319 0115 38A
DH0239 GDL 0649 MEX 0815 0845 0000 7S8
0319BL 0126CRD 0445TL 0730DY
TOTALS 15:42TL 11:18BL 04:24CR 48:05TAFB
# 4049 CHECK IN AT 12:30
16JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
16JUN 1230 1176 MEX 1330 TIJ 1511 0341 0059 7S8
1177 TIJ 1610 MEX 2142 2212 0332 7S8
0713BL 0000CRD 0713TL 0942DY
TOTALS 7:13TL 7:13BL 00:00CR 9:42TAFB
# 4049 CHECK IN AT 12:30
23JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
23JUN 1230 1176 MEX 1330 TIJ 1511 0341 0059 737
1177 TIJ 1610 MEX 2142 2212 0332 737
0713BL 0000CRD 0713TL 0942DY
TOTALS 7:13TL 7:13BL 00:00CR 9:42TAFB
# 4049 CHECK IN AT 12:30
23JUN2018
DATE RPT FLIGHT DEPARTS ARRIVES RLS BLK TURN EQ
23JUN 1230 1176 MEX 1330 TIJ 1511 0341 0059 737
1177 TIJ 1610 MEX 2142 2212 0332 737
0713BL 0000CRD 0713TL 0942DY
TO";

/// Answers prompts from pre-loaded scripts and panics on anything it
/// was not told to expect, so a sweep that must stay silent is checked
/// for free.
pub struct ScriptedPrompter {
    block_times: VecDeque<Duration>,
    verdicts: VecDeque<bool>,
    replacements: VecDeque<Itinerary>,
}

impl ScriptedPrompter {
    pub fn silent() -> ScriptedPrompter {
        ScriptedPrompter {
            block_times: VecDeque::new(),
            verdicts: VecDeque::new(),
            replacements: VecDeque::new(),
        }
    }

    pub fn with_block_times(times: &[&str]) -> ScriptedPrompter {
        ScriptedPrompter {
            block_times: times.iter().map(|t| Duration::parse(t).unwrap()).collect(),
            verdicts: VecDeque::new(),
            replacements: VecDeque::new(),
        }
    }

    pub fn with_repairs(verdicts: &[bool], replacements: Vec<Itinerary>) -> ScriptedPrompter {
        ScriptedPrompter {
            block_times: VecDeque::new(),
            verdicts: verdicts.iter().copied().collect(),
            replacements: replacements.into(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_block_time(&mut self, _context: &BlockTimeContext<'_>) -> Duration {
        self.block_times.pop_front().expect("unexpected block time prompt")
    }

    fn ask_is_event_correct(&mut self, _event: &Event) -> bool {
        self.verdicts.pop_front().expect("unexpected correctness prompt")
    }

    fn ask_replacement_itinerary(&mut self, _event: &Event) -> Itinerary {
        self.replacements.pop_front().expect("unexpected replacement prompt")
    }
}

/// Store double that remembers which rows were retracted or rewritten.
#[derive(Default)]
pub struct RecordingStore {
    inner: JsonStore,
    pub deleted: Vec<u64>,
    pub updated: Vec<u64>,
}

impl RecordingStore {
    pub fn rows(&self) -> usize {
        self.events().count()
    }

    pub fn events(&self) -> impl Iterator<Item = (&u64, &EventRow)> {
        self.inner.events()
    }
}

impl Store for RecordingStore {
    fn load_airport(&mut self, iata: &str) -> Option<Airport> {
        self.inner.load_airport(iata)
    }

    fn create_airport(&mut self, airport: Airport) -> Airport {
        self.inner.create_airport(airport)
    }

    fn load_route(&mut self, key: &RouteKey) -> Option<Route> {
        self.inner.load_route(key)
    }

    fn create_route(&mut self, route: Route) -> Route {
        self.inner.create_route(route)
    }

    fn load_equipment(&mut self, code: &str) -> Option<Equipment> {
        self.inner.load_equipment(code)
    }

    fn create_equipment(&mut self, equipment: Equipment) -> Equipment {
        self.inner.create_equipment(equipment)
    }

    fn find_event(&mut self, row: &EventRow) -> Option<u64> {
        self.inner.find_event(row)
    }

    fn create_event(&mut self, row: EventRow) -> u64 {
        self.inner.create_event(row)
    }

    fn update_event(&mut self, id: u64, row: EventRow) {
        self.updated.push(id);
        self.inner.update_event(id, row)
    }

    fn delete_event(&mut self, id: u64) {
        self.deleted.push(id);
        self.inner.delete_event(id)
    }
}

pub fn repo() -> Repository<RecordingStore> {
    Repository::new(RecordingStore::default())
}
