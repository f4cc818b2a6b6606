use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::Path,
};
use tracing::{info, warn};
use zip::{ZipArchive, result::ZipError};

use crate::csa::{Connection, Transfer};

pub mod adapter;
pub mod json;

pub use adapter::TimetableSource;
pub use json::JsonFeed;

const CONNECTIONS_MEMBER: &str = "connections.json";
const TRANSFERS_MEMBER: &str = "transfers.json";

/// Connections sorted by departure time, plus the footpath list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Timetable {
    pub connections: Vec<Connection>,
    pub transfers: Vec<Transfer>,
}

impl Timetable {
    pub fn from_source<S: TimetableSource>(source: &S) -> Result<Self, S::Error> {
        let mut connections = source.connections()?;
        // Stable, so equal departures keep feed order.
        connections.sort_by_key(|c| c.departure_time);
        let transfers = source.transfers()?;

        Ok(Self {
            connections,
            transfers,
        })
    }

    /// Reads a `.json` feed, a `.zip` holding `connections.json` and
    /// optionally `transfers.json`, or a `.bin` cache written by [`Timetable::save`].
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let timetable = match extension.as_deref() {
            Some("json") => {
                let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
                Self::from_source(&JsonFeed::from_reader(BufReader::new(file))?)?
            }
            Some("zip") => Self::read_zip(path)?,
            Some("bin") => Self::load(path)?,
            _ => bail!("unsupported timetable format: {path:?}"),
        };

        info!(
            connections = timetable.connections.len(),
            transfers = timetable.transfers.len(),
            "loaded timetable from {path:?}"
        );
        Ok(timetable)
    }

    fn read_zip(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
        let mut archive = ZipArchive::new(file)?;

        let connections: Vec<u8> = {
            let mut entry = archive
                .by_name(CONNECTIONS_MEMBER)
                .with_context(|| format!("missing {CONNECTIONS_MEMBER} in {path:?}"))?;
            let mut buf = vec![];
            std::io::copy(&mut entry, &mut buf)?;
            buf
        };

        let transfers: Option<Vec<u8>> = match archive.by_name(TRANSFERS_MEMBER) {
            Ok(mut entry) => {
                let mut buf = vec![];
                std::io::copy(&mut entry, &mut buf)?;
                Some(buf)
            }
            Err(ZipError::FileNotFound) => {
                warn!("no {TRANSFERS_MEMBER} in {path:?}, continuing without transfers");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let feed = JsonFeed::from_parts(connections.as_slice(), transfers.as_deref())?;
        Self::from_source(&feed)
    }

    /// Reads a cache written by [`Timetable::save`], restoring departure order.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("reading {:?}", path.as_ref()))?;
        let mut timetable: Self =
            postcard::from_bytes(&bytes).context("decoding timetable cache")?;
        timetable.connections.sort_by_key(|c| c.departure_time);
        Ok(timetable)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = postcard::to_stdvec(self)?;
        std::fs::write(&path, &bytes).with_context(|| format!("writing {:?}", path.as_ref()))?;
        Ok(())
    }
}
