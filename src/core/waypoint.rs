//! Repräsentiert einen benannten Wegpunkt einer Route.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Ein Wegpunkt: eindeutige ID, Anzeigename und Position.
///
/// Die Reihenfolge von Wegpunkten ist eine Eigenschaft des Containers
/// (Route), nie des Wegpunkts selbst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Eindeutige ID innerhalb einer Route
    pub id: u64,
    /// Anzeigename
    pub name: String,
    /// Position (WGS84)
    pub position: Coordinate,
}

impl Waypoint {
    /// Erstellt einen neuen Wegpunkt.
    pub fn new(id: u64, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}
