//! Vereinfachtes Magnetfeld-Modell: Deklination aus dem Dipolanteil.
//!
//! Grad-1-Näherung des World Magnetic Model: nur die drei
//! Gauß-Koeffizienten g₁⁰, g₁¹, h₁¹ mit linearer Säkularvariation ab der
//! Epoche 2020.0. Die Genauigkeit liegt deutlich unter dem vollen
//! Grad-12-Modell; Aufrufer müssen die Verwendung über
//! [`is_high_confidence`] absichern statt dem Wert blind zu vertrauen.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ellipsoid::{normalize_azimuth, WGS84_A};
use crate::core::Coordinate;

// ── Modell-Koeffizienten (WMM2020, Grad 1) ──────────────────────────

/// Epoche des Koeffizientensatzes.
const EPOCH_YEAR: f64 = 2020.0;
/// g₁⁰ zur Epoche in Nanotesla.
const G10: f64 = -29_404.5;
/// g₁¹ zur Epoche in Nanotesla.
const G11: f64 = -1_450.7;
/// h₁¹ zur Epoche in Nanotesla.
const H11: f64 = 4_652.9;
/// Säkularvariation g₁⁰ in nT pro Jahr.
const G10_SV: f64 = 6.7;
/// Säkularvariation g₁¹ in nT pro Jahr.
const G11_SV: f64 = 7.7;
/// Säkularvariation h₁¹ in nT pro Jahr.
const H11_SV: f64 = -25.1;

/// Breitengrenze der Verlässlichkeit: polnahe Werte sind unbrauchbar.
const CONFIDENCE_MAX_LATITUDE: f64 = 80.0;

/// Deklarierte Gültigkeit des Koeffizientensatzes (einschließlich Beginn,
/// ausschließlich Ende).
fn validity_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2020, 1, 1).expect("gueltiges Datum"),
        NaiveDate::from_ymd_opt(2030, 1, 1).expect("gueltiges Datum"),
    )
}

/// Bericht einer Deklinationsberechnung.
///
/// Reiner Report-Wert, wird nie persistiert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticVariation {
    /// Deklination in Grad, Ost positiv
    pub declination_deg: f64,
    /// Liegt der Wert im verlässlichen Bereich des Modells?
    pub is_high_confidence: bool,
    /// Berechnungsdatum
    pub date: NaiveDate,
    /// Ort der Berechnung
    pub position: Coordinate,
}

/// Dezimale Jahre seit der Modell-Epoche.
fn years_since_epoch(date: NaiveDate) -> f64 {
    let year_start = NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("gueltiges Datum");
    let day_fraction = (date - year_start).num_days() as f64 / 365.25;
    date.year() as f64 + day_fraction - EPOCH_YEAR
}

/// Berechnet die magnetische Deklination in Grad (Ost positiv).
///
/// `altitude_m` ist die Höhe über dem Ellipsoid in Metern; der
/// Höhenfaktor (a/r)³ skaliert beide Feldkomponenten gleichermaßen.
pub fn declination(
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
    date: NaiveDate,
) -> f64 {
    let dt = years_since_epoch(date);
    let g10 = G10 + G10_SV * dt;
    let g11 = G11 + G11_SV * dt;
    let h11 = H11 + H11_SV * dt;

    let phi = latitude_deg.to_radians();
    let lambda = longitude_deg.to_radians();

    let r = WGS84_A + altitude_m;
    let altitude_factor = (WGS84_A / r).powi(3);

    // Dipol-Feldkomponenten in lokalen Nord-/Ost-Richtungen
    let north = altitude_factor * (-g10 * phi.cos() + (g11 * lambda.cos() + h11 * lambda.sin()) * phi.sin());
    let east = altitude_factor * (g11 * lambda.sin() - h11 * lambda.cos());

    east.atan2(north).to_degrees()
}

/// Berechnet die Deklination als vollständigen Report.
pub fn variation(position: &Coordinate, altitude_m: f64, date: NaiveDate) -> MagneticVariation {
    MagneticVariation {
        declination_deg: declination(position.latitude(), position.longitude(), altitude_m, date),
        is_high_confidence: is_high_confidence(position.latitude(), date),
        date,
        position: *position,
    }
}

/// Ist das Modell für diese Breite und dieses Datum verlässlich?
///
/// Gilt genau dann, wenn |Breite| ≤ 80° und das Datum im deklarierten
/// Gültigkeitsfenster des Koeffizientensatzes liegt.
pub fn is_high_confidence(latitude_deg: f64, date: NaiveDate) -> bool {
    let (start, end) = validity_window();
    latitude_deg.abs() <= CONFIDENCE_MAX_LATITUDE && date >= start && date < end
}

/// Rechnet einen rechtweisenden Kurs in einen missweisenden um.
pub fn true_to_magnetic(true_bearing_deg: f64, declination_deg: f64) -> f64 {
    normalize_azimuth(true_bearing_deg - declination_deg)
}

/// Rechnet einen missweisenden Kurs in einen rechtweisenden um.
pub fn magnetic_to_true(magnetic_bearing_deg: f64, declination_deg: f64) -> f64 {
    normalize_azimuth(magnetic_bearing_deg + declination_deg)
}
