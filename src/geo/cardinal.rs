//! 16-teilige Kompassrose: Peilung ↔ Himmelsrichtung.

use super::ellipsoid::normalize_azimuth;

/// Die 16 Himmelsrichtungen der Kompassrose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CardinalDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

/// Sektor-Breite der Kompassrose in Grad (360 / 16).
const SECTOR_WIDTH: f64 = 22.5;

const ALL: [CardinalDirection; 16] = [
    CardinalDirection::N,
    CardinalDirection::NNE,
    CardinalDirection::NE,
    CardinalDirection::ENE,
    CardinalDirection::E,
    CardinalDirection::ESE,
    CardinalDirection::SE,
    CardinalDirection::SSE,
    CardinalDirection::S,
    CardinalDirection::SSW,
    CardinalDirection::SW,
    CardinalDirection::WSW,
    CardinalDirection::W,
    CardinalDirection::WNW,
    CardinalDirection::NW,
    CardinalDirection::NNW,
];

impl CardinalDirection {
    /// Ordnet eine Peilung (Grad, rechtweisend) der nächstliegenden
    /// Himmelsrichtung zu.
    ///
    /// Die Sektoren sind auf die Himmelsrichtungen zentriert:
    /// N deckt [348.75, 360) ∪ [0, 11.25) ab.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let normalized = normalize_azimuth(bearing_deg);
        let index = ((normalized + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH) as usize % 16;
        ALL[index]
    }

    /// Liefert die Sektorgrenzen (min, max) einer Himmelsrichtung in Grad.
    ///
    /// Für Nord läuft der Sektor über die 0°/360°-Grenze: (348.75, 11.25).
    pub fn bearing_range(&self) -> (f64, f64) {
        let index = ALL.iter().position(|d| d == self).unwrap_or(0) as f64;
        let center = index * SECTOR_WIDTH;
        let min = normalize_azimuth(center - SECTOR_WIDTH / 2.0);
        let max = normalize_azimuth(center + SECTOR_WIDTH / 2.0);
        (min, max)
    }

    /// Kurzes Kürzel der Himmelsrichtung ("N", "NNE", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalDirection::N => "N",
            CardinalDirection::NNE => "NNE",
            CardinalDirection::NE => "NE",
            CardinalDirection::ENE => "ENE",
            CardinalDirection::E => "E",
            CardinalDirection::ESE => "ESE",
            CardinalDirection::SE => "SE",
            CardinalDirection::SSE => "SSE",
            CardinalDirection::S => "S",
            CardinalDirection::SSW => "SSW",
            CardinalDirection::SW => "SW",
            CardinalDirection::WSW => "WSW",
            CardinalDirection::W => "W",
            CardinalDirection::WNW => "WNW",
            CardinalDirection::NW => "NW",
            CardinalDirection::NNW => "NNW",
        }
    }
}

impl std::fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_boundaries_around_north() {
        assert_eq!(CardinalDirection::from_bearing(0.0), CardinalDirection::N);
        assert_eq!(CardinalDirection::from_bearing(360.0), CardinalDirection::N);
        assert_eq!(CardinalDirection::from_bearing(11.24), CardinalDirection::N);
        assert_eq!(
            CardinalDirection::from_bearing(11.26),
            CardinalDirection::NNE
        );
        assert_eq!(
            CardinalDirection::from_bearing(348.76),
            CardinalDirection::N
        );
        assert_eq!(
            CardinalDirection::from_bearing(348.74),
            CardinalDirection::NNW
        );
    }

    #[test]
    fn test_cardinal_centers() {
        assert_eq!(CardinalDirection::from_bearing(90.0), CardinalDirection::E);
        assert_eq!(CardinalDirection::from_bearing(180.0), CardinalDirection::S);
        assert_eq!(CardinalDirection::from_bearing(270.0), CardinalDirection::W);
        assert_eq!(
            CardinalDirection::from_bearing(225.0),
            CardinalDirection::SW
        );
    }

    #[test]
    fn test_negative_and_large_bearings() {
        assert_eq!(CardinalDirection::from_bearing(-90.0), CardinalDirection::W);
        assert_eq!(CardinalDirection::from_bearing(720.0), CardinalDirection::N);
    }

    #[test]
    fn test_bearing_range_wraps_at_north() {
        let (min, max) = CardinalDirection::N.bearing_range();
        assert_eq!(min, 348.75);
        assert_eq!(max, 11.25);
    }

    #[test]
    fn test_bearing_range_regular_sector() {
        let (min, max) = CardinalDirection::E.bearing_range();
        assert_eq!(min, 78.75);
        assert_eq!(max, 101.25);
    }

    #[test]
    fn test_from_bearing_matches_own_range() {
        for dir in ALL {
            let (min, max) = dir.bearing_range();
            let center = if min > max {
                0.0 // Nord: Sektorzentrum liegt auf 0°
            } else {
                (min + max) / 2.0
            };
            assert_eq!(CardinalDirection::from_bearing(center), dir);
        }
    }
}
