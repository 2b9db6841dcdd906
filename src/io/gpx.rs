//! GPX-1.1-Import und -Export von Wegpunkten und Routen.
//!
//! Gelesen werden `<wpt>`-Elemente und die `<rtept>` der ersten `<rte>`;
//! geschrieben wird eine Route als `<rte>` mit allen Wegpunkten
//! zusätzlich als `<wpt>`. Abgeleitete Größen (Distanzen, Kurse, ETA)
//! werden nie persistiert, sondern nach dem Import neu berechnet.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::{Coordinate, Route, Waypoint};

/// Ergebnis eines GPX-Imports.
#[derive(Debug, Clone, Default)]
pub struct GpxImport {
    /// Freistehende `<wpt>`-Wegpunkte
    pub waypoints: Vec<Waypoint>,
    /// Name der ersten `<rte>`, falls vorhanden
    pub route_name: Option<String>,
    /// Wegpunkte der ersten `<rte>`
    pub route_waypoints: Vec<Waypoint>,
}

/// Parst ein GPX-1.1-Dokument aus einem XML-String.
///
/// IDs werden beim Import fortlaufend neu vergeben; namenlose Punkte
/// erhalten einen generierten Namen.
pub fn parse_gpx(xml_content: &str) -> Result<GpxImport> {
    // Kein trim_text: Namen können aus mehreren Text-/Entity-Stücken
    // bestehen, deren innere Leerzeichen erhalten bleiben müssen.
    // Getrimmt wird erst der fertig gesammelte Inhalt.
    let mut reader = Reader::from_str(xml_content);

    let mut buffer = Vec::new();

    let mut import = GpxImport::default();
    let mut next_id = 1u64;

    let mut in_route = false;
    let mut in_ignored_route = false;
    let mut seen_route = false;
    let mut in_point = false;
    let mut point_is_route_member = false;
    let mut point_lat: Option<f64> = None;
    let mut point_lon: Option<f64> = None;
    let mut point_name: Option<String> = None;
    let mut current_tag: Option<String> = None;
    // Textinhalt kommt in Stücken (Text- und Entity-Events) und wird
    // bis zum End-Event gesammelt
    let mut text_accum = String::new();
    let mut saw_gpx_root = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();

                match tag.as_ref() {
                    "gpx" => saw_gpx_root = true,
                    "rte" => {
                        if seen_route {
                            in_ignored_route = true;
                        } else {
                            in_route = true;
                            seen_route = true;
                        }
                    }
                    "rtept" if in_ignored_route => {}
                    "wpt" | "rtept" => {
                        in_point = true;
                        point_is_route_member = tag == "rtept" && in_route;
                        point_name = None;
                        (point_lat, point_lon) = read_point_attributes(&reader, e)?;
                    }
                    _ => {
                        current_tag = Some(tag);
                        text_accum.clear();
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                // Selbstschließende Punkte (<wpt .../>) liefern kein End-Event
                if (tag == "wpt" || tag == "rtept") && !in_ignored_route {
                    let (lat, lon) = read_point_attributes(&reader, e)?;
                    let waypoint = finish_point(lat, lon, None, &mut next_id)?;
                    if tag == "rtept" && in_route {
                        import.route_waypoints.push(waypoint);
                    } else {
                        import.waypoints.push(waypoint);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if current_tag.is_some() {
                    text_accum.push_str(&e.xml_content()?);
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if current_tag.is_some() {
                    if let Some(ch) = e.resolve_char_ref()? {
                        text_accum.push(ch);
                    } else {
                        let entity = e.decode()?;
                        let resolved = quick_xml::escape::resolve_xml_entity(&entity)
                            .with_context(|| format!("Unbekannte XML-Entitaet: &{};", entity))?;
                        text_accum.push_str(resolved);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                match tag.as_ref() {
                    "rte" => {
                        in_route = false;
                        in_ignored_route = false;
                    }
                    "rtept" if in_ignored_route => {}
                    "wpt" | "rtept" => {
                        in_point = false;
                        let waypoint =
                            finish_point(point_lat, point_lon, point_name.take(), &mut next_id)?;
                        if point_is_route_member {
                            import.route_waypoints.push(waypoint);
                        } else {
                            import.waypoints.push(waypoint);
                        }
                    }
                    "name" => {
                        if current_tag.as_deref() == Some("name") {
                            let text = text_accum.trim().to_string();
                            text_accum.clear();
                            if in_point {
                                point_name = Some(text);
                            } else if in_route {
                                import.route_name = Some(text);
                            }
                            current_tag = None;
                        }
                    }
                    _ => {
                        if current_tag.as_deref() == Some(tag.as_ref()) {
                            current_tag = None;
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des GPX"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_gpx_root {
        bail!("Kein <gpx>-Wurzelelement gefunden");
    }

    Ok(import)
}

/// Liest die lat/lon-Attribute eines Punkt-Elements.
fn read_point_attributes<R>(
    reader: &Reader<R>,
    element: &quick_xml::events::BytesStart<'_>,
) -> Result<(Option<f64>, Option<f64>)> {
    let mut lat = None;
    let mut lon = None;
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        if key == "lat" {
            lat = Some(parse_gpx_number(&value)?);
        } else if key == "lon" {
            lon = Some(parse_gpx_number(&value)?);
        }
    }
    Ok((lat, lon))
}

fn parse_gpx_number(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Ungueltige GPX-Koordinate: '{}'", value))
}

fn finish_point(
    lat: Option<f64>,
    lon: Option<f64>,
    name: Option<String>,
    next_id: &mut u64,
) -> Result<Waypoint> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        bail!("Wegpunkt ohne lat/lon-Attribute");
    };
    let position = Coordinate::new(lat, lon)
        .with_context(|| format!("Koordinate ausserhalb des Wertebereichs: {}/{}", lat, lon))?;
    let id = *next_id;
    *next_id += 1;
    let name = name.unwrap_or_else(|| format!("WP{}", id));
    Ok(Waypoint::new(id, name, position))
}

/// Schreibt eine Route als GPX-1.1-Dokument.
pub fn write_gpx(route: &Route) -> Result<String> {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str(
        "<gpx version=\"1.1\" creator=\"kursrechner\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
    );

    for waypoint in &route.waypoints {
        output.push_str(&format!(
            "    <wpt lat=\"{:.6}\" lon=\"{:.6}\">\n",
            waypoint.position.latitude(),
            waypoint.position.longitude()
        ));
        output.push_str(&format!(
            "        <name>{}</name>\n",
            escape_xml(&waypoint.name)
        ));
        output.push_str("    </wpt>\n");
    }

    output.push_str("    <rte>\n");
    output.push_str(&format!(
        "        <name>{}</name>\n",
        escape_xml(&route.name)
    ));
    for waypoint in &route.waypoints {
        output.push_str(&format!(
            "        <rtept lat=\"{:.6}\" lon=\"{:.6}\">\n",
            waypoint.position.latitude(),
            waypoint.position.longitude()
        ));
        output.push_str(&format!(
            "            <name>{}</name>\n",
            escape_xml(&waypoint.name)
        ));
        output.push_str("        </rtept>\n");
    }
    output.push_str("    </rte>\n");
    output.push_str("</gpx>\n");

    log::info!(
        "GPX exportiert: {} Wegpunkte, Route '{}'",
        route.waypoints.len(),
        route.name
    );

    Ok(output)
}

/// Escaped die fünf XML-Sonderzeichen.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
