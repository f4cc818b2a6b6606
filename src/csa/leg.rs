use serde::Serialize;

use crate::{
    csa::{Connection, StopId, TripId},
    time::TimePattern,
};

/// One uninterrupted ride on a single trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub source_id: StopId,
    pub destination_id: StopId,
    pub departure_time: String,
    pub arrival_time: String,
    pub trip_id: TripId,
}

impl Leg {
    /// Collapses a run of same-trip connections given its chronologically
    /// first and last members.
    pub(crate) fn from_run(first: &Connection, last: &Connection, pattern: &TimePattern) -> Self {
        Self {
            source_id: first.source_id.clone(),
            destination_id: last.destination_id.clone(),
            departure_time: first.departure_time.format(pattern),
            arrival_time: last.arrival_time.format(pattern),
            trip_id: first.trip_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOffset;

    #[test]
    fn run_spans_first_departure_to_last_arrival() {
        let trip = TripId::new("A");
        let connections = [
            Connection::new(
                StopId::new("S1"),
                StopId::new("S2"),
                TimeOffset::from_seconds(3600),
                TimeOffset::from_seconds(3900),
                trip.clone(),
            ),
            Connection::new(
                StopId::new("S2"),
                StopId::new("S3"),
                TimeOffset::from_seconds(3960),
                TimeOffset::from_seconds(4500),
                trip.clone(),
            ),
        ];

        let leg = Leg::from_run(&connections[0], &connections[1], &TimePattern::default());
        assert_eq!(leg.source_id, StopId::new("S1"));
        assert_eq!(leg.destination_id, StopId::new("S3"));
        assert_eq!(leg.departure_time, "01:00:00");
        assert_eq!(leg.arrival_time, "01:15:00");
        assert_eq!(leg.trip_id, trip);
    }

    #[test]
    fn serializes_camel_case() {
        let leg = Leg {
            source_id: StopId::new("S1"),
            destination_id: StopId::new("S2"),
            departure_time: "00:00:00".into(),
            arrival_time: "00:10:00".into(),
            trip_id: TripId::new("T1"),
        };
        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["sourceId"], "S1");
        assert_eq!(json["destinationId"], "S2");
        assert_eq!(json["tripId"], "T1");
    }
}
