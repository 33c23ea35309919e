use crate::airport::Airport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

/// The natural key a route is stored and cached under. Flight numbers
/// recur between city pairs, so the pair is part of the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub name: String,
    pub origin: String,
    pub destination: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: Arc<str>,
    pub origin: Arc<Airport>,
    pub destination: Arc<Airport>,
}

impl Route {
    pub fn key(&self) -> RouteKey {
        RouteKey {
            name: self.name.to_string(),
            origin: self.origin.iata.to_string(),
            destination: self.destination.iata.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.name, self.origin, self.destination)
    }
}
