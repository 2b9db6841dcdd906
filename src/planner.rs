//! Leg-Assemblierung: komponiert Solver, Missweisung und Zeitrechnung
//! zu einer vollständigen Route.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::core::{Leg, MagneticCourse, Route, Waypoint};
use crate::geo::{self, CardinalDirection};

/// Eingaben einer Routen-Berechnung.
///
/// Das Berechnungsdatum der Missweisung kommt immer vom Aufrufer; der
/// Kern liest nie die Systemuhr. An der Systemgrenze ist das aktuelle
/// UTC-Datum der übliche Default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Fahrtgeschwindigkeit in Knoten; nur positive Werte zählen
    pub speed_knots: Option<f64>,
    /// Abfahrtszeit am ersten Wegpunkt
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Loxodrome statt Geodäte rechnen
    pub use_rhumb_line: bool,
    /// Datum für das Missweisungs-Modell
    pub calculation_date: NaiveDate,
}

impl PlannerConfig {
    /// Minimale Konfiguration: nur Geodäte + Missweisungs-Datum.
    pub fn new(calculation_date: NaiveDate) -> Self {
        Self {
            speed_knots: None,
            start_time: None,
            use_rhumb_line: false,
            calculation_date,
        }
    }
}

/// Berechnet die Legs für eine geordnete Wegpunktliste.
///
/// Liefert eine leere Liste bei weniger als zwei Wegpunkten. Pro
/// Wegpunkt-Paar wird je nach Flag der Geodäten- oder Loxodrom-Solver
/// gewählt, die Missweisung am *Start*-Wegpunkt des Legs abgefragt und
/// nur bei hoher Verlässlichkeit übernommen. ETAs akkumulieren additiv
/// entlang der Route: jedes Leg startet zur Ankunftszeit des vorherigen.
pub fn calculate_legs(waypoints: &[Waypoint], config: &PlannerConfig) -> Vec<Leg> {
    if waypoints.len() < 2 {
        return Vec::new();
    }

    let speed = config.speed_knots.filter(|s| *s > 0.0);
    let mut running_clock = config.start_time;
    let mut legs = Vec::with_capacity(waypoints.len() - 1);

    for pair in waypoints.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);

        let solved = if config.use_rhumb_line {
            geo::rhumb_line(&from.position, &to.position)
        } else {
            geo::inverse(&from.position, &to.position)
        };

        let distance_nm = solved.distance_nm();
        let true_bearing_deg = solved.initial_bearing_deg;
        let cardinal = CardinalDirection::from_bearing(true_bearing_deg);

        // Missweisung am Startpunkt des Legs; beide Felder oder keines
        let variation = geo::variation(&from.position, 0.0, config.calculation_date);
        let magnetic = variation.is_high_confidence.then(|| MagneticCourse {
            declination_deg: variation.declination_deg,
            magnetic_course_deg: geo::true_to_magnetic(
                true_bearing_deg,
                variation.declination_deg,
            ),
        });

        let duration = speed.map(|knots| {
            let hours = distance_nm / knots;
            Duration::milliseconds((hours * 3_600_000.0).round() as i64)
        });

        let eta = match (duration, running_clock) {
            (Some(d), Some(clock)) => {
                let arrival = clock + d;
                running_clock = Some(arrival);
                Some(arrival)
            }
            _ => None,
        };

        legs.push(Leg {
            from_id: from.id,
            to_id: to.id,
            distance_nm,
            true_bearing_deg,
            cardinal,
            magnetic,
            duration,
            eta,
        });
    }

    legs
}

/// Erstellt eine Route samt berechneter Legs.
pub fn create_route(name: impl Into<String>, waypoints: Vec<Waypoint>, config: &PlannerConfig) -> Route {
    let legs = calculate_legs(&waypoints, config);
    Route {
        name: name.into(),
        waypoints,
        legs,
    }
}

impl Route {
    /// Berechnet alle Legs aus den aktuellen Wegpunkten neu.
    ///
    /// Immer ein vollständiger Neuaufbau, nie ein inkrementeller Patch.
    pub fn recalculate(&mut self, config: &PlannerConfig) {
        self.legs = calculate_legs(&self.waypoints, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;
    use chrono::TimeZone;

    fn waypoint(id: u64, name: &str, lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(
            id,
            name,
            Coordinate::new(lat, lon).expect("Koordinate erwartet"),
        )
    }

    fn base_config() -> PlannerConfig {
        PlannerConfig::new(NaiveDate::from_ymd_opt(2024, 6, 1).expect("gueltiges Datum"))
    }

    #[test]
    fn test_fewer_than_two_waypoints_yields_no_legs() {
        let config = base_config();
        assert!(calculate_legs(&[], &config).is_empty());
        assert!(calculate_legs(&[waypoint(1, "A", 0.0, 0.0)], &config).is_empty());
    }

    #[test]
    fn test_leg_ids_follow_waypoint_order() {
        let wps = vec![
            waypoint(7, "A", 54.0, 12.0),
            waypoint(3, "B", 54.5, 12.5),
            waypoint(9, "C", 55.0, 13.0),
        ];
        let legs = calculate_legs(&wps, &base_config());
        assert_eq!(legs.len(), 2);
        assert_eq!((legs[0].from_id, legs[0].to_id), (7, 3));
        assert_eq!((legs[1].from_id, legs[1].to_id), (3, 9));
    }

    #[test]
    fn test_no_speed_leaves_time_fields_unset() {
        let wps = vec![waypoint(1, "A", 0.0, 0.0), waypoint(2, "B", 0.0, 1.0)];
        let legs = calculate_legs(&wps, &base_config());
        assert!(legs[0].duration.is_none());
        assert!(legs[0].eta.is_none());
    }

    #[test]
    fn test_zero_speed_counts_as_absent() {
        let mut config = base_config();
        config.speed_knots = Some(0.0);
        config.start_time = Some(
            FixedOffset::east_opt(3600)
                .expect("gueltiger Offset")
                .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
                .unwrap(),
        );
        let wps = vec![waypoint(1, "A", 0.0, 0.0), waypoint(2, "B", 0.0, 1.0)];
        let legs = calculate_legs(&wps, &config);
        assert!(legs[0].duration.is_none());
        assert!(legs[0].eta.is_none());
    }

    #[test]
    fn test_magnetic_composite_all_or_nothing() {
        // Startpunkt jenseits von 80° Breite → kein Missweisungs-Komposit
        let polar = vec![waypoint(1, "A", 85.0, 0.0), waypoint(2, "B", 84.0, 0.0)];
        let legs = calculate_legs(&polar, &base_config());
        assert!(legs[0].magnetic.is_none());

        let temperate = vec![waypoint(1, "A", 54.0, 12.0), waypoint(2, "B", 54.5, 12.5)];
        let legs = calculate_legs(&temperate, &base_config());
        let magnetic = legs[0].magnetic.expect("Komposit erwartet");
        // Missweisender Kurs ist rechtweisender Kurs minus Deklination
        let expected =
            crate::geo::true_to_magnetic(legs[0].true_bearing_deg, magnetic.declination_deg);
        assert_eq!(magnetic.magnetic_course_deg, expected);
    }

    #[test]
    fn test_out_of_window_date_disables_magnetic() {
        let mut config = base_config();
        config.calculation_date = NaiveDate::from_ymd_opt(2035, 1, 1).expect("gueltiges Datum");
        let wps = vec![waypoint(1, "A", 54.0, 12.0), waypoint(2, "B", 54.5, 12.5)];
        let legs = calculate_legs(&wps, &config);
        assert!(legs[0].magnetic.is_none());
    }

    #[test]
    fn test_rhumb_flag_selects_rhumb_solver() {
        let wps = vec![waypoint(1, "A", 30.0, -10.0), waypoint(2, "B", 45.0, 20.0)];

        let geodesic = calculate_legs(&wps, &base_config());
        let mut config = base_config();
        config.use_rhumb_line = true;
        let rhumb = calculate_legs(&wps, &config);

        // Loxodrome ist auf dieser Strecke messbar länger
        assert!(rhumb[0].distance_nm > geodesic[0].distance_nm);
    }

    #[test]
    fn test_eta_accumulates_along_route() {
        let offset = FixedOffset::east_opt(0).expect("gueltiger Offset");
        let start = offset.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

        // Je ~1 sm Abstand entlang des Meridians
        let wps = vec![
            waypoint(1, "A", 0.0, 0.0),
            waypoint(2, "B", 1.0 / 60.0, 0.0),
            waypoint(3, "C", 2.0 / 60.0, 0.0),
        ];
        let mut config = base_config();
        config.speed_knots = Some(6.0);
        config.start_time = Some(start);

        let legs = calculate_legs(&wps, &config);
        assert_eq!(legs.len(), 2);

        let eta1 = legs[0].eta.expect("ETA erwartet");
        let eta2 = legs[1].eta.expect("ETA erwartet");

        let expected1 = start + Duration::minutes(10);
        let expected2 = start + Duration::minutes(20);
        assert!((eta1 - expected1).num_seconds().abs() <= 30);
        assert!((eta2 - expected2).num_seconds().abs() <= 30);
        // Kette: Leg 2 startet bei der Ankunft von Leg 1
        assert!(eta2 > eta1);
    }

    #[test]
    fn test_create_route_and_recalculate() {
        let wps = vec![
            waypoint(1, "A", 54.0, 12.0),
            waypoint(2, "B", 54.5, 12.5),
            waypoint(3, "C", 55.0, 13.0),
        ];
        let config = base_config();
        let mut route = create_route("Ostsee", wps, &config);
        assert_eq!(route.name, "Ostsee");
        assert_eq!(route.leg_count(), 2);
        assert!(route.total_distance_nm() > 0.0);
        assert!(route.total_duration().is_none());

        // Neuberechnung mit Geschwindigkeit füllt die Zeitfelder
        let mut with_speed = config;
        with_speed.speed_knots = Some(5.0);
        route.recalculate(&with_speed);
        assert_eq!(route.leg_count(), 2);
        assert!(route.total_duration().is_some());
        assert!(route.final_eta().is_none(), "ohne Startzeit keine ETA");
    }
}
