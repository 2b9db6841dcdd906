//! Route und Legs: die zusammengesetzten Planungs-Ergebnisse.

use chrono::{DateTime, Duration, FixedOffset};

use crate::geo::CardinalDirection;

use super::Waypoint;

/// Missweisungs-Komposit eines Legs.
///
/// Deklination und missweisender Kurs treten immer gemeinsam auf; das
/// Komposit macht die Beides-oder-keines-Invariante strukturell statt
/// per Konvention durchsetzbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticCourse {
    /// Deklination in Grad, Ost positiv
    pub declination_deg: f64,
    /// Missweisender Kurs in Grad, [0, 360)
    pub magnetic_course_deg: f64,
}

/// Ein Teilabschnitt zwischen zwei aufeinanderfolgenden Wegpunkten.
///
/// Referenziert die Wegpunkte über ihre IDs statt sie zu besitzen;
/// Eigentümer beider Listen ist die [`Route`].
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// ID des Start-Wegpunkts
    pub from_id: u64,
    /// ID des Ziel-Wegpunkts
    pub to_id: u64,
    /// Distanz in Seemeilen
    pub distance_nm: f64,
    /// Rechtweisender Kurs in Grad, [0, 360)
    pub true_bearing_deg: f64,
    /// Himmelsrichtung des rechtweisenden Kurses
    pub cardinal: CardinalDirection,
    /// Missweisung, nur bei hoher Modell-Verlässlichkeit gesetzt
    pub magnetic: Option<MagneticCourse>,
    /// Fahrzeit, nur bei bekannter Geschwindigkeit gesetzt
    pub duration: Option<Duration>,
    /// Ankunftszeit, nur bei bekannter Startzeit und Geschwindigkeit gesetzt
    pub eta: Option<DateTime<FixedOffset>>,
}

/// Eine geplante Route: benannte, geordnete Wegpunkte plus berechnete Legs.
///
/// Die Legs werden bei jeder Neuberechnung vollständig neu aufgebaut,
/// nie einzeln gepatcht. Summen und End-ETA sind abgeleitete Größen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    /// Anzeigename der Route
    pub name: String,
    /// Geordnete Wegpunkte
    pub waypoints: Vec<Waypoint>,
    /// Berechnete Legs, Länge = max(0, |waypoints| - 1)
    pub legs: Vec<Leg>,
}

impl Route {
    /// Gesamtdistanz in Seemeilen.
    pub fn total_distance_nm(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_nm).sum()
    }

    /// Gesamtfahrzeit, sofern für alle Legs eine Fahrzeit vorliegt.
    pub fn total_duration(&self) -> Option<Duration> {
        if self.legs.is_empty() {
            return None;
        }
        let mut total = Duration::zero();
        for leg in &self.legs {
            total = total + leg.duration?;
        }
        Some(total)
    }

    /// Ankunftszeit am letzten Wegpunkt, sofern berechnet.
    pub fn final_eta(&self) -> Option<DateTime<FixedOffset>> {
        self.legs.last().and_then(|leg| leg.eta)
    }

    /// Sucht einen Wegpunkt über seine ID.
    pub fn waypoint_by_id(&self, id: u64) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// Anzahl der Wegpunkte.
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Anzahl der Legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}
