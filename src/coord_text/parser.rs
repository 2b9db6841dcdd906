//! Toleranter Parser für Koordinaten-Texte.
//!
//! Akzeptiert Dezimalgrad, Grad + Dezimalminuten und
//! Grad-Minuten-Sekunden, jeweils mit optionalem Hemisphären-Buchstaben
//! am Anfang oder Ende und Trennzeichen aus Whitespace, Komma, Tab sowie
//! ASCII- und Unicode-Grad-/Minuten-/Sekundenzeichen.
//!
//! Strategie: zuerst verankerte Muster (DMS, dann D-M, dann reines
//! Dezimalformat), anschließend positionsbasiertes Token-Parsing als
//! Rückfallebene.

use std::sync::LazyLock;

use regex::Regex;

/// Fehler beim Parsen eines Koordinaten-Texts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseCoordinateError {
    /// Text ist leer, numerisch unlesbar oder Minuten/Sekunden liegen
    /// außerhalb von [0, 60).
    #[error("Unlesbares Koordinatenformat: '{0}'")]
    Format(String),
    /// Der zusammengesetzte Betrag überschreitet 90° (Breite) bzw. 180° (Länge).
    #[error("Wert ausserhalb des gueltigen Bereichs: {value} (Maximum {max})")]
    Range { value: f64, max: f64 },
}

/// Grad-Minuten-Sekunden, z.B. "43° 07′ 24.24″ S" oder "-43 7 24.24".
static DMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^([NSEW])?\s*([+-]?\d{1,3})[°º\s,]+(\d{1,2})['′’\s,]+(\d{1,2}(?:\.\d+)?)["″”]?\s*([NSEW])?$"#,
    )
    .expect("gueltiges DMS-Muster")
});

/// Grad + Dezimalminuten, z.B. "054° 10.8' N".
static DM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^([NSEW])?\s*([+-]?\d{1,3})[°º\s,]+(\d{1,2}(?:\.\d+)?)['′’]?\s*([NSEW])?$"#)
        .expect("gueltiges DM-Muster")
});

/// Reine Dezimalgrad, z.B. "-43.1234" oder "43.1234° S".
static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^([NSEW])?\s*([+-]?\d{1,3}(?:\.\d+)?)[°º]?\s*([NSEW])?$"#)
        .expect("gueltiges Dezimal-Muster")
});

/// Parst einen Koordinaten-Text in Dezimalgrad.
///
/// `is_latitude` steuert ausschließlich die Bereichsgrenze (90° statt
/// 180°); Hemisphären-Buchstaben werden auf beiden Achsen tolerant
/// akzeptiert. Ein Hemisphären-Buchstabe übersteuert ein literales
/// Vorzeichen: S/W erzwingt negativ, N/E positiv.
pub fn parse(text: &str, is_latitude: bool) -> Result<f64, ParseCoordinateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseCoordinateError::Format(text.to_string()));
    }

    if let Some(caps) = DMS_PATTERN.captures(trimmed) {
        let hemisphere = capture_hemisphere(&caps, &[1, 5]);
        let degrees = parse_number(caps.get(2).map_or("", |m| m.as_str()), trimmed)?;
        let minutes = parse_number(caps.get(3).map_or("", |m| m.as_str()), trimmed)?;
        let seconds = parse_number(caps.get(4).map_or("", |m| m.as_str()), trimmed)?;
        return assemble(
            degrees, minutes, seconds, hemisphere, is_latitude, trimmed,
        );
    }

    if let Some(caps) = DM_PATTERN.captures(trimmed) {
        let hemisphere = capture_hemisphere(&caps, &[1, 4]);
        let degrees = parse_number(caps.get(2).map_or("", |m| m.as_str()), trimmed)?;
        let minutes = parse_number(caps.get(3).map_or("", |m| m.as_str()), trimmed)?;
        return assemble(
            degrees,
            minutes,
            SignedDegrees::ZERO,
            hemisphere,
            is_latitude,
            trimmed,
        );
    }

    if let Some(caps) = DECIMAL_PATTERN.captures(trimmed) {
        let hemisphere = capture_hemisphere(&caps, &[1, 3]);
        let degrees = parse_number(caps.get(2).map_or("", |m| m.as_str()), trimmed)?;
        return assemble(
            degrees,
            SignedDegrees::ZERO,
            SignedDegrees::ZERO,
            hemisphere,
            is_latitude,
            trimmed,
        );
    }

    parse_tokenized(trimmed, is_latitude)
}

/// Vorzeichenbehaftete Gradangabe: Zahlenwert plus explizites Minus,
/// damit "-0° 30'" sein Vorzeichen nicht verliert.
#[derive(Debug, Clone, Copy)]
struct SignedDegrees {
    magnitude: f64,
    negative: bool,
}

impl SignedDegrees {
    const ZERO: SignedDegrees = SignedDegrees {
        magnitude: 0.0,
        negative: false,
    };
}

fn parse_number(token: &str, original: &str) -> Result<SignedDegrees, ParseCoordinateError> {
    let negative = token.starts_with('-');
    let value: f64 = token
        .trim_start_matches(['+', '-'])
        .parse()
        .map_err(|_| ParseCoordinateError::Format(original.to_string()))?;
    Ok(SignedDegrees {
        magnitude: value,
        negative,
    })
}

fn capture_hemisphere(caps: &regex::Captures<'_>, groups: &[usize]) -> Option<char> {
    groups
        .iter()
        .filter_map(|&g| caps.get(g))
        .filter_map(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
        .next()
}

/// Setzt Betrag |deg| + min/60 + sec/3600 zusammen und wendet die
/// Vorzeichenregel an.
fn assemble(
    degrees: SignedDegrees,
    minutes: SignedDegrees,
    seconds: SignedDegrees,
    hemisphere: Option<char>,
    is_latitude: bool,
    original: &str,
) -> Result<f64, ParseCoordinateError> {
    if minutes.negative || seconds.negative {
        return Err(ParseCoordinateError::Format(original.to_string()));
    }
    if !(0.0..60.0).contains(&minutes.magnitude) || !(0.0..60.0).contains(&seconds.magnitude) {
        return Err(ParseCoordinateError::Format(original.to_string()));
    }

    let magnitude = degrees.magnitude + minutes.magnitude / 60.0 + seconds.magnitude / 3600.0;

    let max = if is_latitude { 90.0 } else { 180.0 };
    if magnitude > max {
        return Err(ParseCoordinateError::Range {
            value: magnitude,
            max,
        });
    }

    // Hemisphäre übersteuert das literale Vorzeichen
    let negative = match hemisphere {
        Some('S') | Some('W') => true,
        Some(_) => false,
        None => degrees.negative,
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Rückfallebene: Trennzeichen entfernen, in 1–4 Tokens zerlegen und
/// positionsbasiert interpretieren (1 → D, 2 → D M, 3/4 → D M S, wobei
/// die Hemisphäre als eigenes Token am Ende stehen darf).
fn parse_tokenized(text: &str, is_latitude: bool) -> Result<f64, ParseCoordinateError> {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '°' | 'º' | '\'' | '′' | '’' | '"' | '″' | '”' | ',' | '\t' => ' ',
            other => other,
        })
        .collect();

    let mut tokens: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();
    if tokens.is_empty() || tokens.len() > 4 {
        return Err(ParseCoordinateError::Format(text.to_string()));
    }

    let mut hemisphere: Option<char> = None;

    // Hemisphäre am Anfang des ersten Tokens
    let first = tokens[0].clone();
    if let Some(c) = first.chars().next().filter(|c| c.is_ascii_alphabetic()) {
        let upper = c.to_ascii_uppercase();
        if matches!(upper, 'N' | 'S' | 'E' | 'W') {
            hemisphere = Some(upper);
            tokens[0] = first[c.len_utf8()..].to_string();
            if tokens[0].is_empty() {
                tokens.remove(0);
            }
        }
    }

    // Hemisphäre am Ende des letzten Tokens
    if let Some(last) = tokens.last().cloned() {
        if let Some(c) = last.chars().last().filter(|c| c.is_ascii_alphabetic()) {
            let upper = c.to_ascii_uppercase();
            if matches!(upper, 'N' | 'S' | 'E' | 'W') && hemisphere.is_none() {
                hemisphere = Some(upper);
                let stripped = last[..last.len() - c.len_utf8()].to_string();
                if stripped.is_empty() {
                    tokens.pop();
                } else {
                    *tokens.last_mut().expect("Token vorhanden") = stripped;
                }
            }
        }
    }

    if tokens.is_empty() || tokens.len() > 3 {
        return Err(ParseCoordinateError::Format(text.to_string()));
    }

    let degrees = parse_number(&tokens[0], text)?;
    let minutes = if tokens.len() >= 2 {
        parse_number(&tokens[1], text)?
    } else {
        SignedDegrees::ZERO
    };
    let seconds = if tokens.len() == 3 {
        parse_number(&tokens[2], text)?
    } else {
        SignedDegrees::ZERO
    };

    assemble(degrees, minutes, seconds, hemisphere, is_latitude, text)
}
