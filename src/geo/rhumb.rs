//! Loxodrome (Rhumb Line): Kurs konstanter Peilung.
//!
//! Unter Mercator-Projektion ist die Loxodrome eine Gerade; der Kurs
//! ergibt sich aus dem Verhältnis der Längendifferenz zur Differenz der
//! isometrischen Breiten. Länger als der Großkreis, aber ohne
//! Kursänderungen zu steuern — für kurze Seestrecken die praktische Wahl.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::ellipsoid::{normalize_azimuth, normalize_longitude, WGS84_A};
use super::geodesic::{GeodesicMethod, GeodesicResult};
use crate::core::Coordinate;

/// Schwelle, unterhalb derer eine Differenz als "verschwindend" gilt.
const NEAR_ZERO: f64 = 1e-12;

/// Isometrische (Mercator-projizierte) Breite.
fn isometric_latitude(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Berechnet Distanz und konstanten Kurs entlang der Loxodrome.
///
/// Anfangs- und Endkurs sind per Definition identisch. Die Distanz wird
/// im Winkelraum berechnet und mit dem Äquatorradius skaliert. Kreuzt
/// die Strecke den Antimeridian, wird die kürzere Längendifferenz gewählt.
pub fn rhumb_line(from: &Coordinate, to: &Coordinate) -> GeodesicResult {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let d_phi = phi2 - phi1;

    let mut d_lambda = (to.longitude() - from.longitude()).to_radians();
    // Antimeridian: kürzere signierte Längendifferenz wählen
    if d_lambda > PI {
        d_lambda -= 2.0 * PI;
    } else if d_lambda < -PI {
        d_lambda += 2.0 * PI;
    }

    let d_psi = isometric_latitude(phi2) - isometric_latitude(phi1);

    let bearing_rad = if d_psi.abs() < NEAR_ZERO && d_phi.abs() < NEAR_ZERO && d_lambda.abs() < NEAR_ZERO
    {
        // Identische Punkte: Kurs unbestimmt, 0 per Konvention
        0.0
    } else if d_psi.abs() < NEAR_ZERO {
        // Reiner Ost-West-Kurs
        if d_lambda >= 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    } else {
        d_lambda.atan2(d_psi)
    };

    // Streckungsfaktor der Ost-West-Komponente; bei verschwindender
    // Breitendifferenz direkt cos φ, um die 0/0-Division zu vermeiden
    let q = if d_psi.abs() > NEAR_ZERO {
        d_phi / d_psi
    } else {
        phi1.cos()
    };

    let angular = (d_phi * d_phi + q * q * d_lambda * d_lambda).sqrt();
    let bearing_deg = normalize_azimuth(bearing_rad.to_degrees());

    GeodesicResult {
        distance_m: angular * WGS84_A,
        initial_bearing_deg: bearing_deg,
        final_bearing_deg: bearing_deg,
        converged: true,
        method: GeodesicMethod::RhumbLine,
    }
}

/// Projiziert von `start` entlang eines konstanten Kurses um `distance_m`
/// Meter voraus.
///
/// Die Breite wird bei ±90° gekappt, die Länge in (-180, 180] normalisiert.
pub fn destination(start: &Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let phi1 = start.latitude().to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / WGS84_A;

    let mut phi2 = phi1 + delta * theta.cos();
    // Über den Pol hinaus projizierte Strecken an ±90° kappen
    phi2 = phi2.clamp(-FRAC_PI_2, FRAC_PI_2);

    let d_psi = isometric_latitude(phi2) - isometric_latitude(phi1);
    let q = if d_psi.abs() > NEAR_ZERO {
        (phi2 - phi1) / d_psi
    } else {
        phi1.cos()
    };

    let d_lambda = if q.abs() > NEAR_ZERO {
        delta * theta.sin() / q
    } else {
        0.0
    };

    let lat = phi2.to_degrees().clamp(-90.0, 90.0);
    let lon = normalize_longitude(start.longitude() + d_lambda.to_degrees());

    // Beide Komponenten sind gekappt bzw. normalisiert, die Invariante hält
    Coordinate::new(lat, lon).unwrap_or(*start)
}
