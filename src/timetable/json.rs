use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use std::io::Read;

use crate::{
    csa::{Connection, StopId, Transfer, TripId},
    time::TimeOffset,
    timetable::adapter::TimetableSource,
};

/// Feed times are either `"HH:MM:SS"` strings or plain seconds.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
enum RawTime {
    Seconds(u32),
    Text(String),
}

impl RawTime {
    fn resolve(&self) -> Result<TimeOffset> {
        Ok(match self {
            RawTime::Seconds(s) => TimeOffset::from_seconds(*s),
            RawTime::Text(s) => TimeOffset::parse(s)?,
        })
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct ConnectionRecord {
    source_id: String,
    destination_id: String,
    departure_time: RawTime,
    arrival_time: RawTime,
    trip_id: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct TransferRecord {
    source_id: String,
    destination_id: String,
    #[serde(default)]
    duration: u32,
}

#[derive(Deserialize)]
struct FeedDocument {
    connections: Vec<ConnectionRecord>,
    #[serde(default)]
    transfers: Vec<TransferRecord>,
}

/// A timetable feed in JSON form, either as one document or as separate
/// connection and transfer arrays.
pub struct JsonFeed {
    connections: Vec<ConnectionRecord>,
    transfers: Vec<TransferRecord>,
}

impl JsonFeed {
    /// Parse a `{ "connections": [...], "transfers": [...] }` document.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let document: FeedDocument =
            serde_json::from_reader(r).context("parsing timetable feed")?;
        Ok(Self {
            connections: document.connections,
            transfers: document.transfers,
        })
    }

    /// Parse bare arrays, as stored in zipped feeds.
    pub fn from_parts<C: Read, T: Read>(connections: C, transfers: Option<T>) -> Result<Self> {
        let connections =
            serde_json::from_reader(connections).context("parsing connections array")?;
        let transfers = match transfers {
            Some(r) => serde_json::from_reader(r).context("parsing transfers array")?,
            None => vec![],
        };
        Ok(Self {
            connections,
            transfers,
        })
    }
}

fn stop_id(raw: &str) -> Result<StopId> {
    let raw = raw.trim();
    ensure!(!raw.is_empty(), "empty stop id");
    Ok(StopId::new(raw))
}

fn to_connection(record: &ConnectionRecord) -> Result<Connection> {
    let departure_time = record.departure_time.resolve()?;
    let arrival_time = record.arrival_time.resolve()?;
    if arrival_time < departure_time {
        bail!(
            "trip {} arrives at {} before departing at {}",
            record.trip_id,
            arrival_time,
            departure_time
        );
    }

    Ok(Connection {
        source_id: stop_id(&record.source_id)?,
        destination_id: stop_id(&record.destination_id)?,
        departure_time,
        arrival_time,
        trip_id: TripId::new(record.trip_id.clone()),
    })
}

fn to_transfer(record: &TransferRecord) -> Result<Transfer> {
    Ok(Transfer {
        source_id: stop_id(&record.source_id)?,
        destination_id: stop_id(&record.destination_id)?,
        duration: record.duration,
    })
}

impl TimetableSource for JsonFeed {
    type Error = anyhow::Error;

    fn connections(&self) -> Result<Vec<Connection>> {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, record)| {
                to_connection(record).with_context(|| format!("invalid connection #{i}"))
            })
            .collect()
    }

    fn transfers(&self) -> Result<Vec<Transfer>> {
        self.transfers
            .iter()
            .enumerate()
            .map(|(i, record)| to_transfer(record).with_context(|| format!("invalid transfer #{i}")))
            .collect()
    }
}
