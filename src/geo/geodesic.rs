//! Ellipsoidischer Inverse-Solver mit sphärischem Fallback.
//!
//! Primärpfad ist die iterative Inverse auf dem WGS84-Ellipsoid
//! (reduzierte Breiten, Korrektur der Längendifferenz bis zur
//! Konvergenz). Nahe antipodischer Punktpaare konvergiert die Iteration
//! nicht; dann wird auf die Großkreis-Formel auf der mittleren Kugel
//! zurückgefallen. Der Fallback ist ein erwartetes Routine-Ergebnis und
//! wird nur über das Methoden-Tag des Resultats sichtbar, nie als Fehler.

use serde::{Deserialize, Serialize};

use super::ellipsoid::{
    meters_to_nautical_miles, normalize_azimuth, MEAN_RADIUS_M, WGS84_A, WGS84_B, WGS84_F,
};
use crate::core::Coordinate;

/// Konvergenzschwelle der Längendifferenz-Korrektur (Radiant).
const CONVERGENCE_THRESHOLD: f64 = 1e-12;
/// Harte Obergrenze der Iterationen; garantiert Terminierung.
const MAX_ITERATIONS: u32 = 200;
/// Winkelabstand, unterhalb dessen zwei Punkte als identisch gelten.
const COINCIDENT_EPSILON: f64 = 1e-12;

/// Verwendete Berechnungsmethode eines [`GeodesicResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeodesicMethod {
    /// Iterative Inverse auf dem WGS84-Ellipsoid
    EllipsoidalIterative,
    /// Großkreis auf der mittleren Kugel (Iteration nicht konvergiert)
    SphericalFallback,
    /// Loxodrome (konstanter Kurs)
    RhumbLine,
}

/// Ergebnis einer Distanz-/Kursberechnung zwischen zwei Punkten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodesicResult {
    /// Distanz in Metern (≥ 0)
    pub distance_m: f64,
    /// Anfangskurs in Grad, rechtweisend, [0, 360)
    pub initial_bearing_deg: f64,
    /// Endkurs in Grad, rechtweisend, [0, 360)
    pub final_bearing_deg: f64,
    /// Ist die ellipsoidische Iteration konvergiert?
    pub converged: bool,
    /// Tatsächlich verwendete Methode
    pub method: GeodesicMethod,
}

impl GeodesicResult {
    /// Distanz in Seemeilen.
    pub fn distance_nm(&self) -> f64 {
        meters_to_nautical_miles(self.distance_m)
    }
}

/// Berechnet Distanz sowie Anfangs- und Endkurs zwischen zwei Punkten.
///
/// Total: schlägt nie fehl, sondern degradiert bei Nicht-Konvergenz auf
/// den sphärischen Fallback (erkennbar am Methoden-Tag).
pub fn inverse(from: &Coordinate, to: &Coordinate) -> GeodesicResult {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let l = (to.longitude() - from.longitude()).to_radians();

    // Reduzierte Breiten auf der Hilfskugel
    let u1 = ((1.0 - WGS84_F) * phi1.tan()).atan();
    let u2 = ((1.0 - WGS84_F) * phi2.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut iterations = 0u32;

    let mut sin_sigma;
    let mut cos_sigma;
    let mut sigma;
    let mut cos_sq_alpha;
    let mut cos_2sigma_m;
    let mut sin_lambda;
    let mut cos_lambda;

    loop {
        sin_lambda = lambda.sin();
        cos_lambda = lambda.cos();

        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        sin_sigma = (t1 * t1 + t2 * t2).sqrt();

        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

        // Identische Punkte: σ ≈ 0. Bei σ ≈ π (antipodal) ist sin σ
        // ebenfalls winzig, dort muss aber weiter iteriert werden.
        if sin_sigma < COINCIDENT_EPSILON && cos_sigma > 0.0 {
            return GeodesicResult {
                distance_m: 0.0,
                initial_bearing_deg: 0.0,
                final_bearing_deg: 0.0,
                converged: true,
                method: GeodesicMethod::EllipsoidalIterative,
            };
        }

        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Äquatoriale Linie: cos²α = 0
        cos_2sigma_m = if cos_sq_alpha.abs() > f64::EPSILON {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - lambda_prev).abs() < CONVERGENCE_THRESHOLD {
            break;
        }

        iterations += 1;
        if iterations >= MAX_ITERATIONS {
            // Nahe antipodischer Paare konvergiert die Iteration nicht
            log::debug!(
                "Ellipsoidische Iteration nach {} Schritten nicht konvergiert, sphaerischer Fallback",
                MAX_ITERATIONS
            );
            return spherical_fallback(from, to);
        }
    }

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a_coef = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b_coef = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = b_coef
        * sin_sigma
        * (cos_2sigma_m
            + b_coef / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - b_coef / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    let distance_m = WGS84_B * a_coef * (sigma - delta_sigma);

    let initial = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let final_ = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    GeodesicResult {
        distance_m,
        initial_bearing_deg: normalize_azimuth(initial.to_degrees()),
        final_bearing_deg: normalize_azimuth(final_.to_degrees()),
        converged: true,
        method: GeodesicMethod::EllipsoidalIterative,
    }
}

/// Großkreis-Näherung auf der mittleren Kugel (Haversine).
///
/// Der Endkurs wird gleich dem Anfangskurs gemeldet; das ist eine bekannte
/// Einschränkung des sphärischen Modells und wird bewusst nicht korrigiert.
fn spherical_fallback(from: &Coordinate, to: &Coordinate) -> GeodesicResult {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (to.longitude() - from.longitude()).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    let bearing = (d_lambda.sin() * phi2.cos())
        .atan2(phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos());
    let bearing_deg = normalize_azimuth(bearing.to_degrees());

    GeodesicResult {
        distance_m: MEAN_RADIUS_M * c,
        initial_bearing_deg: bearing_deg,
        final_bearing_deg: bearing_deg,
        converged: false,
        method: GeodesicMethod::SphericalFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("Koordinate erwartet")
    }

    #[test]
    fn test_coincident_points_zero_distance() {
        let p = coord(47.5, -122.3);
        let result = inverse(&p, &p);
        assert_eq!(result.distance_m, 0.0);
        assert_eq!(result.initial_bearing_deg, 0.0);
        assert!(result.converged);
        assert_eq!(result.method, GeodesicMethod::EllipsoidalIterative);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let result = inverse(&coord(0.0, 0.0), &coord(0.0, 1.0));
        assert_relative_eq!(result.distance_m, 111_319.49, epsilon = 0.01);
        assert_abs_diff_eq!(result.initial_bearing_deg, 90.0, epsilon = 1e-6);
        assert_eq!(result.method, GeodesicMethod::EllipsoidalIterative);
        assert!(result.converged);
    }

    #[test]
    fn test_symmetry_forward_backward() {
        let a = coord(54.18, 12.08); // Warnemünde
        let b = coord(54.67, 11.86); // Gedser
        let ab = inverse(&a, &b);
        let ba = inverse(&b, &a);

        assert_relative_eq!(ab.distance_m, ba.distance_m, epsilon = 1e-6);
        let diff = normalize_azimuth(ab.initial_bearing_deg - ba.initial_bearing_deg);
        // Wegen der Meridiankonvergenz nicht exakt 180°
        assert_abs_diff_eq!(diff, 180.0, epsilon = 0.5);
    }

    #[test]
    fn test_known_long_distance() {
        // Flinders Peak → Buninyong, das klassische Vincenty-Testpaar
        let a = coord(-37.951033, 144.424868);
        let b = coord(-37.652821, 143.926496);
        let result = inverse(&a, &b);
        assert_relative_eq!(result.distance_m, 54_972.271, epsilon = 0.5);
    }

    #[test]
    fn test_near_antipodal_falls_back_to_sphere() {
        let result = inverse(&coord(0.0, 0.0), &coord(0.5, 179.7));
        assert_eq!(result.method, GeodesicMethod::SphericalFallback);
        assert!(!result.converged);
        // Beinahe halber Erdumfang
        assert!(result.distance_m > 19_000_000.0);
        assert_eq!(result.initial_bearing_deg, result.final_bearing_deg);
    }

    #[test]
    fn test_exactly_antipodal_falls_back_to_sphere() {
        // sin σ ist auch bei σ = π winzig; das darf nicht als
        // Punktgleichheit mit Distanz 0 enden
        let equatorial = inverse(&coord(0.0, 0.0), &coord(0.0, 180.0));
        assert_eq!(equatorial.method, GeodesicMethod::SphericalFallback);
        assert!(!equatorial.converged);
        assert_relative_eq!(
            equatorial.distance_m,
            std::f64::consts::PI * MEAN_RADIUS_M,
            epsilon = 1.0
        );

        let oblique = inverse(&coord(45.0, 10.0), &coord(-45.0, -170.0));
        assert_eq!(oblique.method, GeodesicMethod::SphericalFallback);
        assert!(oblique.distance_m > 20_000_000.0);
    }

    #[test]
    fn test_bearings_normalized() {
        let result = inverse(&coord(10.0, 10.0), &coord(-10.0, -10.0));
        assert!((0.0..360.0).contains(&result.initial_bearing_deg));
        assert!((0.0..360.0).contains(&result.final_bearing_deg));
    }

    #[test]
    fn test_distance_nm_conversion() {
        let result = inverse(&coord(0.0, 0.0), &coord(0.0, 1.0));
        assert_relative_eq!(result.distance_nm(), 111_319.49 / 1852.0, epsilon = 0.001);
    }
}
