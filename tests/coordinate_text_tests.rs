//! Roundtrip-Eigenschaften der Koordinaten-Text-Engine.

use kursrechner::{format, parse, CoordinateFormat};

/// Halbe Einheit der feinsten Komponente des Formats.
fn half_unit(format: CoordinateFormat, decimals: usize) -> f64 {
    let step = 10f64.powi(-(decimals as i32));
    match format {
        CoordinateFormat::DecimalDegrees => step / 2.0,
        CoordinateFormat::DegreesDecimalMinutes => step / 2.0 / 60.0,
        CoordinateFormat::DegreesMinutesSeconds => step / 2.0 / 3600.0,
    }
}

fn assert_roundtrip(value: f64, is_latitude: bool, fmt: CoordinateFormat, decimals: usize) {
    let text = format(value, is_latitude, fmt, decimals, true);
    let parsed = parse(&text, is_latitude)
        .unwrap_or_else(|e| panic!("'{}' nicht parsebar: {}", text, e));
    let tolerance = half_unit(fmt, decimals) + 1e-12;
    assert!(
        (parsed - value).abs() <= tolerance,
        "Roundtrip {} -> '{}' -> {} (Toleranz {})",
        value,
        text,
        parsed,
        tolerance
    );
}

#[test]
fn test_roundtrip_all_formats_and_precisions() {
    let formats = [
        CoordinateFormat::DecimalDegrees,
        CoordinateFormat::DegreesDecimalMinutes,
        CoordinateFormat::DegreesMinutesSeconds,
    ];
    let latitudes = [0.0, -0.5, 12.345678, -43.1234, 54.18, 89.999, -90.0, 90.0];
    let longitudes = [0.0, -8.7, 101.2525, -179.95, 180.0, -180.0];

    for fmt in formats {
        for decimals in [2usize, 4] {
            for &lat in &latitudes {
                assert_roundtrip(lat, true, fmt, decimals);
            }
            for &lon in &longitudes {
                assert_roundtrip(lon, false, fmt, decimals);
            }
        }
    }
}

#[test]
fn test_roundtrip_without_hemisphere_letter() {
    for &value in &[-43.1234, 67.89] {
        let text = format(value, true, CoordinateFormat::DegreesMinutesSeconds, 2, false);
        let parsed = parse(&text, true).expect("Roundtrip erwartet");
        assert!((parsed - value).abs() <= 0.5 / 3600.0 + 1e-12);
    }
}

#[test]
fn test_spec_example_dms_south() {
    let parsed = parse("43° 07′ 24.24″ S", true).expect("DMS erwartet");
    assert!((parsed + 43.1234).abs() < 1e-5);
}

#[test]
fn test_formatter_output_reimports_via_any_pattern() {
    // Formatter-Ausgaben müssen von den verankerten Mustern erfasst
    // werden, nicht erst von der Token-Rückfallebene
    let samples = [
        format(54.18, true, CoordinateFormat::DecimalDegrees, 5, true),
        format(54.18, true, CoordinateFormat::DegreesDecimalMinutes, 3, true),
        format(-54.18, true, CoordinateFormat::DegreesMinutesSeconds, 1, true),
    ];
    for text in samples {
        assert!(parse(&text, true).is_ok(), "'{}' nicht parsebar", text);
    }
}
