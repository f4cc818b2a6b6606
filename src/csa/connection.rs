use serde::{Deserialize, Serialize};

use crate::{
    csa::{StopId, TripId},
    time::TimeOffset,
};

/// One scheduled movement of a trip between two consecutive stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source_id: StopId,
    pub destination_id: StopId,
    pub departure_time: TimeOffset,
    pub arrival_time: TimeOffset,
    pub trip_id: TripId,
}

impl Connection {
    pub fn new(
        source_id: StopId,
        destination_id: StopId,
        departure_time: TimeOffset,
        arrival_time: TimeOffset,
        trip_id: TripId,
    ) -> Self {
        Self {
            source_id,
            destination_id,
            departure_time,
            arrival_time,
            trip_id,
        }
    }
}

/// A footpath between two stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub source_id: StopId,
    pub destination_id: StopId,
    /// Walking time in seconds.
    pub duration: u32,
}

impl Transfer {
    pub fn new(source_id: StopId, destination_id: StopId, duration: u32) -> Self {
        Self {
            source_id,
            destination_id,
            duration,
        }
    }
}
