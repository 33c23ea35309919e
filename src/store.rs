use crate::airport::Airport;
use crate::equipment::Equipment;
use crate::event::{Event, EventKind};
use crate::route::{Route, RouteKey};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Flat row an event is persisted as.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub name: String,
    pub carrier: Option<String>,
    pub origin: String,
    pub destination: String,
    pub begin: NaiveDateTime,
    pub minutes: u32,
    pub deadhead: bool,
}

impl EventRow {
    pub fn from_event(event: &Event) -> EventRow {
        let (carrier, deadhead) = match &event.kind {
            EventKind::Flight {
                carrier, deadhead, ..
            } => (Some(carrier.clone()), *deadhead),
            EventKind::GroundDuty => (None, false),
        };
        EventRow {
            name: event.name.clone(),
            carrier,
            origin: event.route.origin.iata.to_string(),
            destination: event.route.destination.iata.to_string(),
            begin: event.itinerary.begin,
            minutes: event.duration().minutes(),
            deadhead,
        }
    }
}

/// The persistence boundary. Keyed entities answer lookup-or-create;
/// event rows carry numeric ids so a repair pass can retract or update
/// the exact rows it wrote. An event's natural key is (carrier, begin,
/// origin, destination): `find_event` answers it so a retried trip
/// rewrites the rows it persisted on an earlier pass.
pub trait Store {
    fn load_airport(&mut self, iata: &str) -> Option<Airport>;
    fn create_airport(&mut self, airport: Airport) -> Airport;
    fn load_route(&mut self, key: &RouteKey) -> Option<Route>;
    fn create_route(&mut self, route: Route) -> Route;
    fn load_equipment(&mut self, code: &str) -> Option<Equipment>;
    fn create_equipment(&mut self, equipment: Equipment) -> Equipment;
    fn find_event(&mut self, row: &EventRow) -> Option<u64>;
    fn create_event(&mut self, row: EventRow) -> u64;
    fn update_event(&mut self, id: u64, row: EventRow);
    fn delete_event(&mut self, id: u64);
}

#[derive(Serialize, Deserialize, Default)]
struct Snapshot {
    airports: Vec<Airport>,
    routes: Vec<Route>,
    equipment: Vec<Equipment>,
    events: Vec<(u64, EventRow)>,
    next_event_id: u64,
}

/// Whole-file JSON snapshot store. Doubles as the in-memory store when
/// constructed empty.
#[derive(Default)]
pub struct JsonStore {
    airports: HashMap<String, Airport>,
    routes: HashMap<RouteKey, Route>,
    equipment: HashMap<String, Equipment>,
    events: BTreeMap<u64, EventRow>,
    next_event_id: u64,
}

impl JsonStore {
    pub fn new() -> JsonStore {
        JsonStore::default()
    }

    pub fn load_from_file(path: &Path) -> io::Result<JsonStore> {
        let data = std::fs::read_to_string(path)?;
        let raw: Snapshot = serde_json::from_str(&data)?;
        Ok(JsonStore {
            airports: raw
                .airports
                .into_iter()
                .map(|a| (a.iata.to_string(), a))
                .collect(),
            routes: raw.routes.into_iter().map(|r| (r.key(), r)).collect(),
            equipment: raw
                .equipment
                .into_iter()
                .map(|e| (e.code.to_string(), e))
                .collect(),
            events: raw.events.into_iter().collect(),
            next_event_id: raw.next_event_id,
        })
    }

    pub fn save_to_file(&self, path: &Path) -> io::Result<()> {
        let snapshot = Snapshot {
            airports: self.airports.values().cloned().collect(),
            routes: self.routes.values().cloned().collect(),
            equipment: self.equipment.values().cloned().collect(),
            events: self.events.iter().map(|(k, v)| (*k, v.clone())).collect(),
            next_event_id: self.next_event_id,
        };
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)
    }

    pub fn events(&self) -> impl Iterator<Item = (&u64, &EventRow)> {
        self.events.iter()
    }
}

impl Store for JsonStore {
    fn load_airport(&mut self, iata: &str) -> Option<Airport> {
        self.airports.get(iata).cloned()
    }

    fn create_airport(&mut self, airport: Airport) -> Airport {
        self.airports
            .insert(airport.iata.to_string(), airport.clone());
        airport
    }

    fn load_route(&mut self, key: &RouteKey) -> Option<Route> {
        self.routes.get(key).cloned()
    }

    fn create_route(&mut self, route: Route) -> Route {
        self.routes.insert(route.key(), route.clone());
        route
    }

    fn load_equipment(&mut self, code: &str) -> Option<Equipment> {
        self.equipment.get(code).cloned()
    }

    fn create_equipment(&mut self, equipment: Equipment) -> Equipment {
        self.equipment
            .insert(equipment.code.to_string(), equipment.clone());
        equipment
    }

    fn find_event(&mut self, row: &EventRow) -> Option<u64> {
        self.events
            .iter()
            .find(|(_, existing)| {
                existing.carrier == row.carrier
                    && existing.begin == row.begin
                    && existing.origin == row.origin
                    && existing.destination == row.destination
            })
            .map(|(id, _)| *id)
    }

    fn create_event(&mut self, row: EventRow) -> u64 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.events.insert(id, row);
        id
    }

    fn update_event(&mut self, id: u64, row: EventRow) {
        self.events.insert(id, row);
    }

    fn delete_event(&mut self, id: u64) {
        self.events.remove(&id);
    }
}

/// Per-run flyweight caches over a store. Each distinct key hits the
/// store at most once per run; repeated lookups hand back the same
/// shared entity.
pub struct Repository<S: Store> {
    store: S,
    airports: HashMap<String, Arc<Airport>>,
    routes: HashMap<RouteKey, Arc<Route>>,
    equipment: HashMap<String, Arc<Equipment>>,
}

impl<S: Store> Repository<S> {
    pub fn new(store: S) -> Repository<S> {
        Repository {
            store,
            airports: HashMap::new(),
            routes: HashMap::new(),
            equipment: HashMap::new(),
        }
    }

    pub fn airport(&mut self, iata: &str) -> Arc<Airport> {
        if let Some(airport) = self.airports.get(iata) {
            return airport.clone();
        }
        let airport = self
            .store
            .load_airport(iata)
            .unwrap_or_else(|| self.store.create_airport(Airport::new(iata)));
        let airport = Arc::new(airport);
        self.airports.insert(iata.to_string(), airport.clone());
        airport
    }

    pub fn route(&mut self, name: &str, origin: &str, destination: &str) -> Arc<Route> {
        let key = RouteKey {
            name: name.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
        };
        if let Some(route) = self.routes.get(&key) {
            return route.clone();
        }
        let route = match self.store.load_route(&key) {
            Some(route) => route,
            None => {
                let route = Route {
                    name: Arc::from(name),
                    origin: self.airport(origin),
                    destination: self.airport(destination),
                };
                self.store.create_route(route)
            }
        };
        let route = Arc::new(route);
        self.routes.insert(key, route.clone());
        route
    }

    pub fn equipment(&mut self, code: &str) -> Arc<Equipment> {
        if let Some(equipment) = self.equipment.get(code) {
            return equipment.clone();
        }
        let equipment = self
            .store
            .load_equipment(code)
            .unwrap_or_else(|| self.store.create_equipment(Equipment::new(code)));
        let equipment = Arc::new(equipment);
        self.equipment.insert(code.to_string(), equipment.clone());
        equipment
    }

    /// Persists an event, reusing the row of an earlier pass over the
    /// same (carrier, begin, origin, destination) leg instead of
    /// writing a duplicate.
    pub fn create_event(&mut self, event: &Event) -> u64 {
        let row = EventRow::from_event(event);
        match self.store.find_event(&row) {
            Some(id) => {
                self.store.update_event(id, row);
                id
            }
            None => self.store.create_event(row),
        }
    }

    pub fn update_event(&mut self, id: u64, event: &Event) {
        self.store.update_event(id, EventRow::from_event(event));
    }

    pub fn delete_event(&mut self, id: u64) {
        self.store.delete_event(id);
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
