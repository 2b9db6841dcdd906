//! Core-Domänentypen: Koordinate, Wegpunkt, Leg und Route.

pub mod coordinate;
pub mod route;
pub mod waypoint;

pub use coordinate::{Coordinate, CoordinateError};
pub use route::{Leg, MagneticCourse, Route};
pub use waypoint::Waypoint;
