use chrono::TimeDelta;
use std::collections::HashMap;
use tracing::debug;

use crate::{
    csa::{Connection, StopId, Transfer, csa_state::CsaState},
    time::{TimeFormatError, TimeOffset},
};

const DEFAULT_MIN_INTERCHANGE_SECS: i64 = 300;

/// Predecessor map produced by a successful scan: for every reached stop,
/// the connection that delivered its earliest arrival.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionIndex(HashMap<StopId, Connection>);

impl ConnectionIndex {
    pub fn get(&self, stop_id: &StopId) -> Option<&Connection> {
        self.0.get(stop_id)
    }

    pub fn contains(&self, stop_id: &StopId) -> bool {
        self.0.contains_key(stop_id)
    }

    pub fn arrival_at(&self, stop_id: &StopId) -> Option<TimeOffset> {
        self.0.get(stop_id).map(|c| c.arrival_time)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StopId, &Connection)> {
        self.0.iter()
    }
}

impl From<HashMap<StopId, Connection>> for ConnectionIndex {
    fn from(index: HashMap<StopId, Connection>) -> Self {
        Self(index)
    }
}

impl FromIterator<Connection> for ConnectionIndex {
    /// Indexes each connection under its destination stop.
    fn from_iter<I: IntoIterator<Item = Connection>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|c| (c.destination_id.clone(), c))
                .collect(),
        )
    }
}

/// Earliest-arrival scanner over a timetable sorted by departure time.
///
/// The scanner only borrows its input; every query builds and drops its own
/// state, so one scanner can serve any number of queries.
pub struct Scanner<'a> {
    connections: &'a [Connection],
    transfers: &'a [Transfer],
    min_interchange_time: TimeDelta,
}

impl<'a> Scanner<'a> {
    /// `connections` must be sorted by ascending departure time. This is not
    /// checked.
    pub fn new(connections: &'a [Connection]) -> Self {
        Self {
            connections,
            transfers: &[],
            min_interchange_time: TimeDelta::seconds(DEFAULT_MIN_INTERCHANGE_SECS),
        }
    }

    /// Footpaths are stored but not yet walked by the scan.
    pub fn with_transfers(mut self, transfers: &'a [Transfer]) -> Self {
        self.transfers = transfers;
        self
    }

    /// Stored but not yet enforced by the scan.
    pub fn with_min_interchange_time(mut self, min_interchange_time: TimeDelta) -> Self {
        self.min_interchange_time = min_interchange_time;
        self
    }

    pub fn transfers(&self) -> &[Transfer] {
        self.transfers
    }

    pub fn min_interchange_time(&self) -> TimeDelta {
        self.min_interchange_time
    }

    pub fn compute_connections(
        &self,
        source_id: &StopId,
        dest_id: &StopId,
        start_time: &str,
    ) -> Result<Option<ConnectionIndex>, TimeFormatError> {
        let start = TimeOffset::parse(start_time)?;
        Ok(self.compute_connections_at(source_id, dest_id, start))
    }

    /// Scans until `dest_id` is first reached. Returns `None` when the
    /// destination cannot be reached from `source_id` at or after `start`.
    pub fn compute_connections_at(
        &self,
        source_id: &StopId,
        dest_id: &StopId,
        start: TimeOffset,
    ) -> Option<ConnectionIndex> {
        debug!(
            %source_id,
            %dest_id,
            %start,
            transfers = self.transfers.len(),
            min_interchange_secs = self.min_interchange_time.num_seconds(),
            "starting scan"
        );

        let mut csa = CsaState::new();
        csa.seed(source_id.clone(), start);

        let mut scanned = 0usize;
        for c in self.connections_after(start) {
            scanned += 1;

            if csa.is_reachable(c) && csa.is_better(c) {
                let first_visit = csa.add_connection(c);
                debug!(
                    stop = %c.destination_id,
                    arrival = %c.arrival_time,
                    trip = %c.trip_id,
                    first_visit,
                    "relaxed"
                );
            }

            if csa.is_finished(dest_id) {
                break;
            }
        }

        let found = csa.is_finished(dest_id);
        debug!(
            scanned,
            reached = csa.earliest_arrivals.len(),
            found,
            "scan finished"
        );

        found.then(|| ConnectionIndex(csa.connection_index))
    }

    /// Earliest arrival at every stop reachable from `source_id`, origin
    /// included. Runs over the whole timetable without early termination.
    pub fn compute_arrival_times(
        &self,
        source_id: &StopId,
        start: TimeOffset,
    ) -> HashMap<StopId, TimeOffset> {
        let mut csa = CsaState::new();
        csa.seed(source_id.clone(), start);

        for c in self.connections_after(start) {
            if csa.is_reachable(c) && csa.is_better(c) {
                csa.add_connection(c);
            }
        }

        debug!(
            %source_id,
            %start,
            reached = csa.earliest_arrivals.len(),
            "computed arrival times"
        );

        csa.earliest_arrivals
    }

    /// Connections departing before `start` can never be boarded.
    fn connections_after(&self, start: TimeOffset) -> impl Iterator<Item = &'a Connection> {
        let connections = self.connections;
        let first_connection = connections.partition_point(|c| c.departure_time < start);

        connections[first_connection..].iter()
    }
}
