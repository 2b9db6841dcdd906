//! Kursrechner: geodätischer Berechnungskern für die Seetörnplanung.
//!
//! Berechnet aus geographischen Koordinaten die Navigationsgrößen einer
//! Route: Distanz, rechtweisender und missweisender Kurs,
//! Himmelsrichtung und Ankunftszeiten. Dazu kommen ein toleranter
//! Koordinaten-Parser/-Formatter und GPX-/CSV-Anbindung. Fenster/UI,
//! Druckausgabe und Einstellungs-Persistenz sind bewusst außerhalb
//! dieses Crates.

pub mod coord_text;
pub mod core;
pub mod geo;
pub mod io;
pub mod planner;

pub use coord_text::{format, parse, CoordinateFormat, ParseCoordinateError};
pub use core::{Coordinate, CoordinateError, Leg, MagneticCourse, Route, Waypoint};
pub use geo::{
    destination, inverse, rhumb_line, CardinalDirection, GeodesicMethod, GeodesicResult,
    MagneticVariation,
};
pub use io::{parse_gpx, read_waypoints_csv, write_gpx, write_waypoints_csv, GpxImport};
pub use planner::{calculate_legs, create_route, PlannerConfig};
