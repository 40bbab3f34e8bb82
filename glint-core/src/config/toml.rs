//! Simple TOML parser for the eyes configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the eye layout. It does NOT support full TOML and never
//! allocates, so it runs on the target.
//!
//! Supported features:
//! - Key = value pairs (decimal integers, `0x` hex for the address)
//! - [eye.left], [eye.right] and [display] section headers
//! - Comments (# ...), whole-line or trailing
//!
//! Keys that are not present keep their default value.

use super::types::{EyeLayout, EyesConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    InvalidKey,
    /// Value missing or not a valid number
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    LeftEye,
    RightEye,
    Display,
}

/// Parse TOML configuration into EyesConfig
pub fn parse_config(input: &str) -> Result<EyesConfig, ParseError> {
    let mut config = EyesConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Drop everything after the first `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse section header like "eye.left" or "display"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let mut parts = header.trim().split('.');
    let section_type = parts.next().map(str::trim);
    let name = parts.next().map(str::trim);

    if parts.next().is_some() {
        return Err(ParseError::InvalidSection);
    }

    match (section_type, name) {
        (Some("eye"), Some("left")) => Ok(Section::LeftEye),
        (Some("eye"), Some("right")) => Ok(Section::RightEye),
        (Some("display"), None) => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a 7-bit I2C address, decimal or `0x` hex
fn parse_address(value: &str) -> Result<u8, ParseError> {
    let address = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidValue)?,
        None => parse_int(value)?,
    };

    if address > 0x7F {
        return Err(ParseError::InvalidValue);
    }
    Ok(address)
}

fn apply_eye_value(eye: &mut EyeLayout, key: &str, value: &str) -> Result<(), ParseError> {
    let field = match key {
        "center_x" => &mut eye.center_x,
        "center_y" => &mut eye.center_y,
        "width" => &mut eye.width,
        "height" => &mut eye.height,
        "pupil_offset_x" => &mut eye.pupil_offset_x,
        "pupil_offset_y" => &mut eye.pupil_offset_y,
        "pupil_diameter" => &mut eye.pupil_diameter,
        _ => return Err(ParseError::InvalidKey),
    };
    *field = parse_int(value)?;
    Ok(())
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut EyesConfig,
) -> Result<(), ParseError> {
    match section {
        Section::LeftEye => apply_eye_value(&mut config.left, key, value),
        Section::RightEye => apply_eye_value(&mut config.right, key, value),
        Section::Display => match key {
            "i2c_address" => {
                config.display.i2c_address = parse_address(value)?;
                Ok(())
            }
            _ => Err(ParseError::InvalidKey),
        },
        Section::Root => Err(ParseError::InvalidKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("eye.left"), Ok(Section::LeftEye));
        assert_eq!(parse_section_header(" eye.right "), Ok(Section::RightEye));
        assert_eq!(parse_section_header("display"), Ok(Section::Display));
        assert_eq!(
            parse_section_header("eye.middle"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("eye.left.extra"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_section_header("eye"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x3C"), Ok(0x3C));
        assert_eq!(parse_address("0x3d"), Ok(0x3D));
        assert_eq!(parse_address("60"), Ok(60));
        assert_eq!(parse_address("0x80"), Err(ParseError::InvalidValue));
        assert_eq!(parse_address("0xZZ"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config(""), Ok(EyesConfig::default()));
        assert_eq!(
            parse_config("# just a comment\n\n"),
            Ok(EyesConfig::default())
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
# Robot eyes
[display]
i2c_address = 0x3D

[eye.left]
center_x = 32   # nudged right
center_y = 30
width = 56
height = 50
pupil_offset_x = 2
pupil_offset_y = 8
pupil_diameter = 24

[eye.right]
center_x = 94
center_y = 30
width = 56
height = 50
pupil_offset_x = -2
pupil_offset_y = 8
pupil_diameter = 24
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.display.i2c_address, 0x3D);
        assert_eq!(
            config.left,
            EyeLayout {
                center_x: 32,
                center_y: 30,
                width: 56,
                height: 50,
                pupil_offset_x: 2,
                pupil_offset_y: 8,
                pupil_diameter: 24,
            }
        );
        assert_eq!(config.right.center_x, 94);
        assert_eq!(config.right.pupil_offset_x, -2);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[eye.right]\ncenter_x = 100\n").unwrap();
        let defaults = EyesConfig::default();

        assert_eq!(config.left, defaults.left);
        assert_eq!(config.right.center_x, 100);
        assert_eq!(config.right.width, defaults.right.width);
        assert_eq!(config.display, defaults.display);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("[mouth]\nwidth = 3"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[eye.left]\neyebrow = 3"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(parse_config("width = 3"), Err(ParseError::InvalidKey));
        assert_eq!(
            parse_config("[eye.left]\nwidth = wide"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[eye.left]\nwidth ="),
            Err(ParseError::InvalidValue)
        );
    }
}
