//! Koordinaten-Text-Engine: toleranter Parser und Formatter.

pub mod formatter;
pub mod parser;

pub use formatter::{format, CoordinateFormat};
pub use parser::{parse, ParseCoordinateError};
