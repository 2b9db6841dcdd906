//! CSV-Import und -Export von Wegpunkten.
//!
//! Spaltenlayout: `name,lat,lon`. Beim Export werden die Koordinaten als
//! Dezimalgrad mit Hemisphären-Buchstaben geschrieben; der Import nutzt
//! den toleranten Parser, sodass auch handgeschriebene DMS-Zellen
//! funktionieren. Fehlerhafte Zeilen werden mit Warnung übersprungen.

use anyhow::{Context, Result};

use crate::coord_text::{self, CoordinateFormat};
use crate::core::{Coordinate, Waypoint};

/// Nachkommastellen der exportierten Dezimalgrad (~1 m Auflösung).
const EXPORT_DECIMALS: usize = 5;

/// Schreibt Wegpunkte als CSV-String mit Kopfzeile.
pub fn write_waypoints_csv(waypoints: &[Waypoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["name", "lat", "lon"])
        .context("Fehler beim Schreiben der CSV-Kopfzeile")?;

    for waypoint in waypoints {
        let lat = coord_text::format(
            waypoint.position.latitude(),
            true,
            CoordinateFormat::DecimalDegrees,
            EXPORT_DECIMALS,
            true,
        );
        let lon = coord_text::format(
            waypoint.position.longitude(),
            false,
            CoordinateFormat::DecimalDegrees,
            EXPORT_DECIMALS,
            true,
        );
        writer
            .write_record([waypoint.name.as_str(), lat.as_str(), lon.as_str()])
            .with_context(|| format!("Fehler beim Schreiben von Wegpunkt '{}'", waypoint.name))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Fehler beim Abschliessen des CSV-Writers: {}", err))?;
    String::from_utf8(bytes).context("CSV-Ausgabe ist kein gueltiges UTF-8")
}

/// Liest Wegpunkte aus einem CSV-String mit Kopfzeile `name,lat,lon`.
///
/// IDs werden fortlaufend neu vergeben. Zeilen mit unlesbaren
/// Koordinaten werden übersprungen und per `log::warn!` gemeldet.
pub fn read_waypoints_csv(csv_content: &str) -> Result<Vec<Waypoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers = reader
        .headers()
        .context("Fehler beim Lesen der CSV-Kopfzeile")?
        .clone();
    let name_idx = find_column(&headers, "name")?;
    let lat_idx = find_column(&headers, "lat")?;
    let lon_idx = find_column(&headers, "lon")?;

    let mut waypoints = Vec::new();
    let mut next_id = 1u64;

    for (row_number, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Fehler in CSV-Zeile {}", row_number + 2))?;

        let name = record.get(name_idx).unwrap_or("").to_string();
        let lat_text = record.get(lat_idx).unwrap_or("");
        let lon_text = record.get(lon_idx).unwrap_or("");

        let lat = match coord_text::parse(lat_text, true) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("CSV-Zeile {} uebersprungen: {}", row_number + 2, err);
                continue;
            }
        };
        let lon = match coord_text::parse(lon_text, false) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("CSV-Zeile {} uebersprungen: {}", row_number + 2, err);
                continue;
            }
        };

        // Parser-Grenzen garantieren bereits gültige Werte
        let Ok(position) = Coordinate::new(lat, lon) else {
            log::warn!("CSV-Zeile {} uebersprungen: Koordinate ungueltig", row_number + 2);
            continue;
        };

        let id = next_id;
        next_id += 1;
        let name = if name.is_empty() {
            format!("WP{}", id)
        } else {
            name
        };
        waypoints.push(Waypoint::new(id, name, position));
    }

    Ok(waypoints)
}

fn find_column(headers: &csv::StringRecord, wanted: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(wanted))
        .with_context(|| format!("CSV-Spalte '{}' fehlt", wanted))
}
