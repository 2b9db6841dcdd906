//! Validierte geographische Koordinate (WGS84, Dezimalgrad).

use serde::{Deserialize, Serialize};

/// Fehler bei der Konstruktion einer Koordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// Breite außerhalb von [-90, 90] oder nicht endlich.
    #[error("Ungueltige Breite: {0} (erlaubt: -90..=90)")]
    InvalidLatitude(f64),
    /// Länge außerhalb von [-180, 180] oder nicht endlich.
    #[error("Ungueltige Laenge: {0} (erlaubt: -180..=180)")]
    InvalidLongitude(f64),
}

/// Eine geographische Position in Dezimalgrad.
///
/// Invariante: Breite liegt in [-90, 90], Länge in [-180, 180], beide
/// Werte sind endlich. Die Felder sind privat; die Invariante wird
/// ausschließlich über [`Coordinate::new`] hergestellt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unvalidierte Rohform für Serde.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl Coordinate {
    /// Erstellt eine validierte Koordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Breite in Dezimalgrad (negativ = Süd).
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Länge in Dezimalgrad (negativ = West).
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Hemisphären-Buchstabe der Breite: 'N' oder 'S'.
    pub fn latitude_hemisphere(&self) -> char {
        if self.latitude < 0.0 {
            'S'
        } else {
            'N'
        }
    }

    /// Hemisphären-Buchstabe der Länge: 'E' oder 'W'.
    pub fn longitude_hemisphere(&self) -> char {
        if self.longitude < 0.0 {
            'W'
        } else {
            'E'
        }
    }

    /// Betrag der Breite.
    pub fn latitude_magnitude(&self) -> f64 {
        self.latitude.abs()
    }

    /// Betrag der Länge.
    pub fn longitude_magnitude(&self) -> f64 {
        self.longitude.abs()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.5}° {} {:.5}° {}",
            self.latitude_magnitude(),
            self.latitude_hemisphere(),
            self.longitude_magnitude(),
            self.longitude_hemisphere()
        )
    }
}
