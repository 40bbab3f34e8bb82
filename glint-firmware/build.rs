//! Build script for glint-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates eyes.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Panel size the layout is checked against
const PANEL_WIDTH: i64 = 128;
const PANEL_HEIGHT: i64 = 64;

/// Keys accepted in an [eye.*] section
const EYE_KEYS: [&str; 7] = [
    "center_x",
    "center_y",
    "width",
    "height",
    "pupil_offset_x",
    "pupil_offset_y",
    "pupil_diameter",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate eyes.toml configuration at compile time
fn validate_config() {
    // Re-run if eyes.toml changes
    println!("cargo:rerun-if-changed=eyes.toml");

    let config_path = Path::new("eyes.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: eyes.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds eyes.toml as its layout configuration.      ║\n\
            ║  Please create one in the glint-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read eyes.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in eyes.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_eyes(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid eyes.toml                                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=eyes.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [display], [eye.left] and [eye.right] are understood by the firmware
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, value) in root {
        match (name.as_str(), value) {
            ("display", toml::Value::Table(_)) => {}
            ("eye", toml::Value::Table(eyes)) => {
                for side in eyes.keys() {
                    if side != "left" && side != "right" {
                        errors.push(format!("unknown section [eye.{}]", side));
                    }
                }
            }
            _ => errors.push(format!("unknown top-level key '{}'", name)),
        }
    }
}

/// Validate [display] settings
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let display = match config.get("display").and_then(|d| d.as_table()) {
        Some(t) => t,
        None => return,
    };

    for (key, value) in display {
        match (key.as_str(), value) {
            ("i2c_address", toml::Value::Integer(addr)) => {
                if *addr < 0 || *addr > 0x7F {
                    errors.push(format!("[display] i2c_address {:#x} is not 7-bit", addr));
                }
            }
            ("i2c_address", _) => {
                errors.push("[display] i2c_address must be an integer".to_string())
            }
            _ => errors.push(format!("[display] unknown key '{}'", key)),
        }
    }
}

/// Validate [eye.left] and [eye.right]
fn validate_eyes(config: &toml::Value, errors: &mut Vec<String>) {
    let eyes = match config.get("eye").and_then(|e| e.as_table()) {
        Some(t) => t,
        None => return,
    };

    for (side, eye) in eyes {
        let eye = match eye.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[eye.{}] must be a table", side));
                continue;
            }
        };

        for (key, value) in eye {
            if !EYE_KEYS.contains(&key.as_str()) {
                errors.push(format!("[eye.{}] unknown key '{}'", side, key));
            } else if value.as_integer().is_none() {
                errors.push(format!("[eye.{}] {} must be an integer", side, key));
            }
        }

        let get = |key: &str| eye.get(key).and_then(|v| v.as_integer());

        for key in ["width", "height", "pupil_diameter"] {
            if let Some(v) = get(key) {
                if v <= 0 {
                    errors.push(format!("[eye.{}] {} must be positive", side, key));
                }
            }
        }

        if let Some(x) = get("center_x") {
            if !(0..PANEL_WIDTH).contains(&x) {
                errors.push(format!("[eye.{}] center_x must be 0-{}", side, PANEL_WIDTH - 1));
            }
        }
        if let Some(y) = get("center_y") {
            if !(0..PANEL_HEIGHT).contains(&y) {
                errors.push(format!("[eye.{}] center_y must be 0-{}", side, PANEL_HEIGHT - 1));
            }
        }
    }
}
