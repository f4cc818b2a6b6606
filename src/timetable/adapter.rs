use crate::csa::{Connection, Transfer};

pub trait TimetableSource {
    type Error;

    /// Returns all connections (any order); the builder will sort by departure.
    fn connections(&self) -> Result<Vec<Connection>, Self::Error>;

    /// Returns footpath/transfer graph.
    fn transfers(&self) -> Result<Vec<Transfer>, Self::Error>;
}
