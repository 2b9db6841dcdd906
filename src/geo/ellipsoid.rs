//! WGS84-Ellipsoid-Konstanten und Einheiten-Umrechnungen.
//!
//! Alle geodätischen Berechnungen im Crate beziehen sich auf dieses
//! Referenzellipsoid. Die `const`-Werte sind die offiziellen
//! WGS84-Definitionsgrößen.

// ── WGS84-Ellipsoid ─────────────────────────────────────────────────

/// Große Halbachse (Äquatorradius) in Metern.
pub const WGS84_A: f64 = 6_378_137.0;
/// Abplattung 1/298.257223563.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Kleine Halbachse (Polradius) in Metern, abgeleitet aus a und f.
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Mittlerer Erdradius R1 = (2a + b) / 3 in Metern.
/// Wird nur vom sphärischen Fallback des Geodäten-Solvers benutzt.
pub const MEAN_RADIUS_M: f64 = (2.0 * WGS84_A + WGS84_B) / 3.0;

// ── Einheiten ───────────────────────────────────────────────────────

/// Meter pro Seemeile (internationale Definition).
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Rechnet eine Distanz in Metern in Seemeilen um.
pub fn meters_to_nautical_miles(meters: f64) -> f64 {
    meters / METERS_PER_NAUTICAL_MILE
}

// ── Winkel ──────────────────────────────────────────────────────────

/// Normalisiert ein Azimut in Grad auf das Intervall [0, 360).
///
/// Funktioniert für beliebige reelle Eingaben, auch stark negative
/// oder mehrfach umlaufende Winkel.
pub fn normalize_azimuth(degrees: f64) -> f64 {
    let mut wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // Winzige negative Reste können nach der Addition wieder auf 360.0 landen
    if wrapped >= 360.0 {
        wrapped = 0.0;
    }
    wrapped
}

/// Normalisiert eine Länge in Grad auf das Intervall (-180, 180].
pub fn normalize_longitude(degrees: f64) -> f64 {
    let mut lon = degrees % 360.0;
    if lon > 180.0 {
        lon -= 360.0;
    } else if lon <= -180.0 {
        lon += 360.0;
    }
    lon
}
