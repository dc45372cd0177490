//! Coordinate token normalization.
//!
//! A latitude or longitude shows up on article pages in one of three
//! mutually exclusive encodings:
//!
//! 1. degrees-minutes-seconds with hemisphere letter, e.g. `1°0′0″S`
//! 2. decimal degrees with hemisphere letter, e.g. `1.0000S`
//! 3. signed decimal degrees, no letter, e.g. `-1.0000`
//!
//! Encodings are tried in that order; the first pattern matching the start
//! of the token wins. Range checks ([-90, 90] / [-180, 180]) are deliberately
//! not performed here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DEG_MIN_SEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}°\d{0,2}′?\d{0,2}″?[NESW]").unwrap());
static FLOAT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}\.?\d*[NESW]").unwrap());
static FLOAT_SIGN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d{1,3}\.?\d*").unwrap());

/// The token matched none of the accepted encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    token: String,
}

impl FormatError {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrong coordinates formatting '{}'. Use one of following:\n\
             1°0′0″S 1°0′0″E\n\
             1.0000S 1.0000E\n\
             -1.0000 1.0000",
            self.token
        )
    }
}

impl std::error::Error for FormatError {}

/// Convert a textual latitude/longitude token into signed decimal degrees.
///
/// Called independently for each half of a coordinate pair; the two results
/// are never cross-validated.
pub fn normalize(token: &str) -> Result<f64, FormatError> {
    type Converter = fn(&str) -> Result<f64, FormatError>;
    let encodings: [(&Regex, Converter); 3] = [
        (&DEG_MIN_SEC, dms_to_decimal),
        (&FLOAT_LETTER, lettered_to_decimal),
        (&FLOAT_SIGN, signed_decimal),
    ];

    for (pattern, convert) in encodings {
        if pattern.is_match(token) {
            return convert(token);
        }
    }
    Err(FormatError::new(token))
}

/// N/E are positive, S/W negative.
fn hemisphere_sign(letter: char) -> f64 {
    if letter == 'N' || letter == 'E' {
        1.0
    } else {
        -1.0
    }
}

/// Split off a trailing hemisphere letter, if the token ends with one.
fn split_hemisphere(token: &str) -> Option<(&str, char)> {
    let (idx, letter) = token.char_indices().last()?;
    if matches!(letter, 'N' | 'E' | 'S' | 'W') {
        Some((&token[..idx], letter))
    } else {
        None
    }
}

/// `45°30′0″N` → 45.5. The nth part contributes part / 60^n.
fn dms_to_decimal(token: &str) -> Result<f64, FormatError> {
    let (body, letter) = split_hemisphere(token).ok_or_else(|| FormatError::new(token))?;
    let uniform = body.replace(['°', '′', '″'], "-");

    let mut degrees = 0.0;
    for (n, part) in uniform.split('-').filter(|p| !p.is_empty()).enumerate() {
        let value: f64 = part.parse().map_err(|_| FormatError::new(token))?;
        degrees += value / 60f64.powi(n as i32);
    }
    Ok(hemisphere_sign(letter) * degrees)
}

/// `1.0000S` → -1.0. Internal spaces are tolerated.
fn lettered_to_decimal(token: &str) -> Result<f64, FormatError> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let (body, letter) = split_hemisphere(&compact).ok_or_else(|| FormatError::new(token))?;
    let value: f64 = body.parse().map_err(|_| FormatError::new(token))?;
    Ok(hemisphere_sign(letter) * value)
}

/// `-1.0000` → -1.0. The sign, if any, is already in the token.
fn signed_decimal(token: &str) -> Result<f64, FormatError> {
    token.parse().map_err(|_| FormatError::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dms_south_negative() {
        assert_relative_eq!(normalize("1°0′0″S").unwrap(), -1.0);
    }

    #[test]
    fn test_dms_minutes_and_seconds() {
        assert_relative_eq!(normalize("45°30′0″N").unwrap(), 45.5);
        assert_relative_eq!(normalize("52°31′12″N").unwrap(), 52.52);
    }

    #[test]
    fn test_dms_minutes_only() {
        // No seconds group at all — common on article pages.
        assert_relative_eq!(normalize("47°22′N").unwrap(), 47.0 + 22.0 / 60.0);
        assert_relative_eq!(normalize("8°33′E").unwrap(), 8.55);
    }

    #[test]
    fn test_dms_west_negative() {
        assert_relative_eq!(normalize("122°20′0″W").unwrap(), -(122.0 + 20.0 / 60.0));
    }

    #[test]
    fn test_lettered_decimal() {
        assert_relative_eq!(normalize("1.0000N").unwrap(), 1.0);
        assert_relative_eq!(normalize("1.0000S").unwrap(), -1.0);
        assert_relative_eq!(normalize("73.9857W").unwrap(), -73.9857);
    }

    #[test]
    fn test_signed_decimal() {
        assert_relative_eq!(normalize("-1.0000").unwrap(), -1.0);
        assert_relative_eq!(normalize("151.2093").unwrap(), 151.2093);
    }

    #[test]
    fn test_garbage_is_format_error() {
        assert!(normalize("garbage").is_err());
        assert!(normalize("").is_err());
    }

    #[test]
    fn test_error_message_lists_accepted_shapes() {
        let msg = normalize("garbage").unwrap_err().to_string();
        assert!(msg.contains("1°0′0″S 1°0′0″E"));
        assert!(msg.contains("1.0000S 1.0000E"));
        assert!(msg.contains("-1.0000 1.0000"));
    }

    #[test]
    fn test_priority_dms_before_lettered() {
        // A DMS token must never be handed to the plain-float path.
        assert_relative_eq!(normalize("10°30′0″N").unwrap(), 10.5);
    }

    #[test]
    fn test_trailing_junk_rejected() {
        // Matches the signed-decimal prefix but the full token is not a float.
        assert!(normalize("12°34′").is_err());
    }
}
