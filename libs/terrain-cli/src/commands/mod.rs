//! Subcommand implementations.

pub mod build;
pub mod grid;
pub mod tile;

use clap::ValueEnum;
use terrain_elevation::ColumnOrder;

/// Column layout of tile rows, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnOrderArg {
    /// `lat lon elevation`
    LatLon,
    /// `lon lat elevation`
    LonLat,
}

impl From<ColumnOrderArg> for ColumnOrder {
    fn from(arg: ColumnOrderArg) -> Self {
        match arg {
            ColumnOrderArg::LatLon => ColumnOrder::LatLon,
            ColumnOrderArg::LonLat => ColumnOrder::LonLat,
        }
    }
}
