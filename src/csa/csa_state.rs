use crate::{
    csa::{Connection, StopId},
    time::TimeOffset,
};
use std::collections::HashMap;

/// Per-query scan state. Built fresh for every query and dropped with it.
#[derive(Debug, Default)]
pub struct CsaState {
    pub earliest_arrivals: HashMap<StopId, TimeOffset>,
    pub connection_index: HashMap<StopId, Connection>,
}

impl CsaState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn seed(&mut self, stop_id: StopId, time: TimeOffset) {
        self.earliest_arrivals.insert(stop_id, time);
    }

    pub fn is_reachable(&self, connection: &Connection) -> bool {
        self.earliest_arrivals
            .get(&connection.source_id)
            .map(|&time| time <= connection.departure_time)
            .unwrap_or(false)
    }

    pub fn is_better(&self, connection: &Connection) -> bool {
        self.earliest_arrivals
            .get(&connection.destination_id)
            .map(|&time| time > connection.arrival_time)
            .unwrap_or(true)
    }

    /// Records `connection` as the predecessor of its destination.
    /// Returns whether the destination was reached for the first time.
    pub fn add_connection(&mut self, connection: &Connection) -> bool {
        let previous = self
            .earliest_arrivals
            .insert(connection.destination_id.clone(), connection.arrival_time);
        self.connection_index
            .insert(connection.destination_id.clone(), connection.clone());

        previous.is_none()
    }

    pub fn is_finished(&self, dest_id: &StopId) -> bool {
        self.earliest_arrivals.contains_key(dest_id)
    }
}
