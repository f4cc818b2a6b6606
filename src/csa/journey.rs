use tracing::{debug, warn};

use crate::{
    csa::{Connection, ConnectionIndex, Leg, RoutingError, StopId},
    time::TimePattern,
};

/// Rebuilds a rider-facing itinerary from a scan result.
#[derive(Debug)]
pub struct Journey {
    connection_index: ConnectionIndex,
    time_pattern: TimePattern,
}

impl Journey {
    pub fn new(connection_index: ConnectionIndex) -> Result<Self, RoutingError> {
        if connection_index.is_empty() {
            return Err(RoutingError::EmptyScannerResult);
        }

        Ok(Self {
            connection_index,
            time_pattern: TimePattern::default(),
        })
    }

    /// Accepts the scanner's output directly; "no route" is treated like an
    /// empty index.
    pub fn from_scan(scan: Option<ConnectionIndex>) -> Result<Self, RoutingError> {
        scan.ok_or(RoutingError::EmptyScannerResult)
            .and_then(Self::new)
    }

    pub fn with_time_pattern(mut self, time_pattern: TimePattern) -> Self {
        self.time_pattern = time_pattern;
        self
    }

    /// Legs from the origin to `dest_id`, one per trip ridden. `None` when
    /// `dest_id` has no predecessor in the index, or when the predecessor
    /// chain never reaches a stop without one.
    pub fn compute_legs(self, dest_id: &StopId) -> Option<Vec<Leg>> {
        let mut legs = vec![];
        let mut leg_connections: Vec<&Connection> = vec![];
        let mut cursor = dest_id;

        // An acyclic chain visits each indexed stop at most once.
        for _ in 0..self.connection_index.len() {
            let Some(connection) = self.connection_index.get(cursor) else {
                break;
            };

            let interchange = leg_connections
                .last()
                .is_some_and(|last| last.trip_id != connection.trip_id);

            if interchange {
                legs.extend(self.flatten(&leg_connections));
                leg_connections.clear();
            }

            leg_connections.push(connection);
            cursor = &connection.source_id;
        }

        if self.connection_index.contains(cursor) {
            warn!(%dest_id, %cursor, "predecessor chain does not reach an origin");
            return None;
        }

        legs.extend(self.flatten(&leg_connections));

        if legs.is_empty() {
            return None;
        }

        legs.reverse();
        debug!(%dest_id, legs = legs.len(), "reconstructed journey");
        Some(legs)
    }

    /// `connections` is in destination-to-origin order.
    fn flatten(&self, connections: &[&Connection]) -> Option<Leg> {
        let (first, last) = (connections.last()?, connections.first()?);
        Some(Leg::from_run(first, last, &self.time_pattern))
    }
}
