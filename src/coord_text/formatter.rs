//! Formatiert Dezimalgrad als Koordinaten-Text.
//!
//! Drei Ausgabeformate mit frei wählbarer Nachkommastellen-Anzahl.
//! An der Rundungsgrenze gilt die Übertrags-Regel: runden Sekunden auf
//! 60 auf, wandern sie in die Minuten; erreichen die Minuten dadurch 60,
//! wandern sie in die Grad.

/// Ausgabeformat einer Koordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CoordinateFormat {
    /// Dezimalgrad, z.B. "043.12340°"
    DecimalDegrees,
    /// Grad + Dezimalminuten, z.B. "043° 07.404'"
    DegreesDecimalMinutes,
    /// Grad-Minuten-Sekunden, z.B. "043° 07' 24.24\""
    DegreesMinutesSeconds,
}

/// Formatiert einen Koordinatenwert (Dezimalgrad).
///
/// `decimals` ist die Nachkommastellen-Anzahl der jeweils feinsten
/// Komponente. Mit `include_hemisphere` wird statt eines Vorzeichens der
/// Hemisphären-Buchstabe angehängt; er leitet sich rein aus dem
/// Vorzeichen ab. Grad werden auf 3 Stellen, Minuten auf 2 Stellen mit
/// Nullen aufgefüllt.
pub fn format(
    value: f64,
    is_latitude: bool,
    format: CoordinateFormat,
    decimals: usize,
    include_hemisphere: bool,
) -> String {
    let magnitude = value.abs();
    let body = match format {
        CoordinateFormat::DecimalDegrees => format_decimal_degrees(magnitude, decimals),
        CoordinateFormat::DegreesDecimalMinutes => format_decimal_minutes(magnitude, decimals),
        CoordinateFormat::DegreesMinutesSeconds => format_dms(magnitude, decimals),
    };

    if include_hemisphere {
        let hemisphere = match (is_latitude, value < 0.0) {
            (true, false) => 'N',
            (true, true) => 'S',
            (false, false) => 'E',
            (false, true) => 'W',
        };
        format!("{} {}", body, hemisphere)
    } else if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Rundet auf `decimals` Nachkommastellen.
fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Feldbreite einer nullaufgefüllten Zahl: `int_digits` Vorkommastellen
/// plus Dezimalpunkt und Nachkommastellen.
fn padded_width(int_digits: usize, decimals: usize) -> usize {
    if decimals == 0 {
        int_digits
    } else {
        int_digits + 1 + decimals
    }
}

fn format_decimal_degrees(magnitude: f64, decimals: usize) -> String {
    let rounded = round_to(magnitude, decimals);
    format!(
        "{:0width$.prec$}°",
        rounded,
        width = padded_width(3, decimals),
        prec = decimals
    )
}

fn format_decimal_minutes(magnitude: f64, decimals: usize) -> String {
    let mut degrees = magnitude.floor();
    let mut minutes = round_to((magnitude - degrees) * 60.0, decimals);

    // Übertrag: Minuten runden auf 60 auf
    if minutes >= 60.0 {
        minutes = 0.0;
        degrees += 1.0;
    }

    format!(
        "{:03}° {:0width$.prec$}'",
        degrees as u32,
        minutes,
        width = padded_width(2, decimals),
        prec = decimals
    )
}

fn format_dms(magnitude: f64, decimals: usize) -> String {
    let mut degrees = magnitude.floor();
    let total_minutes = (magnitude - degrees) * 60.0;
    let mut minutes = total_minutes.floor();
    let mut seconds = round_to((total_minutes - minutes) * 60.0, decimals);

    // Übertrags-Regel an der Rundungsgrenze
    if seconds >= 60.0 {
        seconds = 0.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes = 0.0;
        degrees += 1.0;
    }

    format!(
        "{:03}° {:02}' {:0width$.prec$}\"",
        degrees as u32,
        minutes as u32,
        seconds,
        width = padded_width(2, decimals),
        prec = decimals
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_degrees_basic() {
        assert_eq!(
            format(-43.1234, true, CoordinateFormat::DecimalDegrees, 4, true),
            "043.1234° S"
        );
        assert_eq!(
            format(-43.1234, true, CoordinateFormat::DecimalDegrees, 4, false),
            "-043.1234°"
        );
        assert_eq!(
            format(7.5, false, CoordinateFormat::DecimalDegrees, 2, true),
            "007.50° E"
        );
    }

    #[test]
    fn test_decimal_minutes_basic() {
        assert_eq!(
            format(54.18, true, CoordinateFormat::DegreesDecimalMinutes, 3, true),
            "054° 10.800' N"
        );
        assert_eq!(
            format(-0.5, true, CoordinateFormat::DegreesDecimalMinutes, 1, true),
            "000° 30.0' S"
        );
    }

    #[test]
    fn test_dms_basic() {
        assert_eq!(
            format(
                -43.1234,
                true,
                CoordinateFormat::DegreesMinutesSeconds,
                2,
                true
            ),
            "043° 07' 24.24\" S"
        );
    }

    #[test]
    fn test_seconds_carry_into_minutes() {
        // 10° 29' 59.996" rundet bei 2 Stellen auf 60.00" → 10° 30' 00.00"
        let value = 10.0 + 29.0 / 60.0 + 59.996 / 3600.0;
        assert_eq!(
            format(value, true, CoordinateFormat::DegreesMinutesSeconds, 2, false),
            "010° 30' 00.00\""
        );
    }

    #[test]
    fn test_carry_cascades_into_degrees() {
        // 10° 59' 59.9996" → 11° 00' 00.00"
        let value = 10.0 + 59.0 / 60.0 + 59.9996 / 3600.0;
        assert_eq!(
            format(value, true, CoordinateFormat::DegreesMinutesSeconds, 2, false),
            "011° 00' 00.00\""
        );
    }

    #[test]
    fn test_minutes_carry_in_decimal_minutes() {
        // 10° 59.99996' → 11° 00.000'
        let value = 10.0 + 59.999_96 / 60.0;
        assert_eq!(
            format(value, true, CoordinateFormat::DegreesDecimalMinutes, 3, false),
            "011° 00.000'"
        );
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(
            format(43.1234, true, CoordinateFormat::DegreesMinutesSeconds, 0, false),
            "043° 07' 24\""
        );
        assert_eq!(
            format(43.6, true, CoordinateFormat::DecimalDegrees, 0, false),
            "044°"
        );
    }

    #[test]
    fn test_zero_value_is_north_east() {
        assert_eq!(
            format(0.0, true, CoordinateFormat::DecimalDegrees, 1, true),
            "000.0° N"
        );
        assert_eq!(
            format(0.0, false, CoordinateFormat::DecimalDegrees, 1, true),
            "000.0° E"
        );
    }
}
