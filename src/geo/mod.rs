//! Rechenkern: Ellipsoid-Geodäsie, Loxodrome, Kompassrose, Missweisung.
//!
//! Alle Funktionen sind synchron, seiteneffektfrei und total über
//! validierten Eingaben; der Geodäten-Solver degradiert statt zu
//! scheitern (siehe [`GeodesicMethod`]).

pub mod cardinal;
pub mod ellipsoid;
pub mod geodesic;
pub mod magnetic;
pub mod rhumb;

pub use cardinal::CardinalDirection;
pub use ellipsoid::{
    meters_to_nautical_miles, normalize_azimuth, normalize_longitude, MEAN_RADIUS_M,
    METERS_PER_NAUTICAL_MILE, WGS84_A, WGS84_B, WGS84_F,
};
pub use geodesic::{inverse, GeodesicMethod, GeodesicResult};
pub use magnetic::{
    declination, is_high_confidence, magnetic_to_true, true_to_magnetic, variation,
    MagneticVariation,
};
pub use rhumb::{destination, rhumb_line};
