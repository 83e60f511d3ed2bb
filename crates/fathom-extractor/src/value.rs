//! Parse raw cell tokens into typed values
//!
//! Every parser here is tolerant: empty or unparsable input yields the
//! type's empty value, never an error. Documents photographed at an angle
//! produce a lot of almost-numbers and these parsers are the last line of
//! defense against them.

use fathom_domain::Viscosity;
use regex::Regex;
use std::sync::LazyLock;

// Leading number with an optional degree sign and C/F unit marker.
static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\s*°?\s*([CcFf])?").expect("temperature pattern")
});

// `<number><unit letters>@<number><degree><C|F>`, all but the number optional.
static VISCOSITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\s*([A-Za-z]+)?\s*@?\s*(\d+\s*°?[CF])?").expect("viscosity pattern")
});

/// Parse a float out of a token that may carry thousands separators and
/// stray whitespace. `None` on empty or unparsable input.
pub fn parse_float_loose(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a temperature token, normalizing to °F.
///
/// A `C` unit marker on the value converts via `F = C * 9/5 + 32`; an `F`
/// marker passes through. When the value carries no marker the column header
/// decides: any `c` in `header_hint` (case-insensitive) means the column is
/// Celsius. `None` on empty or unparsable input.
pub fn parse_temperature_f(text: &str, header_hint: &str) -> Option<f64> {
    let value = text.trim();
    if value.is_empty() {
        return None;
    }

    let (number, unit) = match TEMPERATURE_RE.captures(value) {
        Some(caps) => (
            caps[1].parse::<f64>().ok()?,
            caps.get(2).map(|m| m.as_str().to_ascii_uppercase()),
        ),
        None => (parse_float_loose(value)?, None),
    };

    let celsius = match unit.as_deref() {
        Some("C") => true,
        Some(_) => false,
        None => header_hint.to_lowercase().contains('c'),
    };

    Some(if celsius { number * 9.0 / 5.0 + 32.0 } else { number })
}

/// Parse a compound viscosity expression such as `250 cSt @ 50C`.
///
/// Falls back to a bare float parse when the compound pattern does not
/// match; all three fields are always present, defaulting to `None`/empty.
pub fn parse_viscosity(text: &str) -> Viscosity {
    let value = text.trim();
    if value.is_empty() {
        return Viscosity::default();
    }

    match VISCOSITY_RE.captures(value) {
        Some(caps) => Viscosity {
            value: caps[1].parse().ok(),
            unit: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            measured_at: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
        },
        None => Viscosity {
            value: parse_float_loose(value),
            ..Default::default()
        },
    }
}
