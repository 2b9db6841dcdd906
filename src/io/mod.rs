//! Import/Export-Anbindung: GPX 1.1 und CSV.

pub mod csv;
pub mod gpx;

pub use self::csv::{read_waypoints_csv, write_waypoints_csv};
pub use self::gpx::{parse_gpx, write_gpx, GpxImport};
