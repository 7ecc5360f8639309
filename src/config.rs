//! Shell configuration
//!
//! Display symbols and behaviour switches of the drawing shell. Values come
//! from a TOML file and can be changed at runtime with the `SET` command.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canvas::{
    Borders, CanvasOptions, DEFAULT_BACKGROUND, DEFAULT_MEMORY_LIMIT, DEFAULT_STROKE,
};
use crate::errors::{DrawError, Result};

/// Value accepted as a reset to the built-in default
pub const DEFAULT_KEYWORD: &str = "default";

/// Settings of one shell session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Symbol of the top and bottom borders
    pub h_border: char,

    /// Symbol of the left and right borders
    pub v_border: char,

    /// Color of lines and rectangles drawn without one
    pub default_draw_char: char,

    /// Color of a new canvas
    pub default_empty_char: char,

    /// Print the canvas after every command that changes it
    pub show_canvas_after_command: bool,

    /// Largest canvas footprint accepted by `C`, in bytes
    pub memory_limit: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            h_border: '-',
            v_border: '|',
            default_draw_char: DEFAULT_STROKE,
            default_empty_char: DEFAULT_BACKGROUND,
            show_canvas_after_command: true,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

/// Settable properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    DefaultDrawChar,
    DefaultEmptyChar,
    HBorder,
    MemoryLimit,
    ShowCanvasAfterCommand,
    VBorder,
}

impl Property {
    /// All properties, sorted by name
    pub const ALL: [Property; 6] = [
        Property::DefaultDrawChar,
        Property::DefaultEmptyChar,
        Property::HBorder,
        Property::MemoryLimit,
        Property::ShowCanvasAfterCommand,
        Property::VBorder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::DefaultDrawChar => "defaultDrawChar",
            Property::DefaultEmptyChar => "defaultEmptyChar",
            Property::HBorder => "hBorder",
            Property::MemoryLimit => "memoryLimit",
            Property::ShowCanvasAfterCommand => "showCanvasAfterCommand",
            Property::VBorder => "vBorder",
        }
    }

    /// Look up a property by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|property| property.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ShellConfig {
    /// Platform config directory for the shell
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "drawing-shell")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Border symbols for rendering
    pub fn borders(&self) -> Borders {
        Borders {
            horizontal: self.h_border,
            vertical: self.v_border,
        }
    }

    /// Options for a new canvas
    pub fn canvas_options(&self) -> CanvasOptions {
        CanvasOptions {
            stroke: self.default_draw_char,
            background: self.default_empty_char,
            memory_limit: self.memory_limit,
        }
    }

    /// Current value of a property, as shown by `SET`
    pub fn get(&self, property: Property) -> String {
        match property {
            Property::DefaultDrawChar => self.default_draw_char.to_string(),
            Property::DefaultEmptyChar => self.default_empty_char.to_string(),
            Property::HBorder => self.h_border.to_string(),
            Property::MemoryLimit => self.memory_limit.to_string(),
            Property::ShowCanvasAfterCommand => self.show_canvas_after_command.to_string(),
            Property::VBorder => self.v_border.to_string(),
        }
    }

    /// Set a property from its textual value
    ///
    /// `default` restores the built-in value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<Property> {
        let Some(property) = Property::from_name(name) else {
            warn!(name, "unknown property");
            return Err(invalid_property(name, "no such property"));
        };

        if value.eq_ignore_ascii_case(DEFAULT_KEYWORD) {
            self.reset(property);
            debug!(%property, "property reset");
            return Ok(property);
        }

        match property {
            Property::DefaultDrawChar => self.default_draw_char = parse_char(property, value)?,
            Property::DefaultEmptyChar => self.default_empty_char = parse_char(property, value)?,
            Property::HBorder => self.h_border = parse_char(property, value)?,
            Property::VBorder => self.v_border = parse_char(property, value)?,
            Property::ShowCanvasAfterCommand => {
                self.show_canvas_after_command = parse_bool(property, value)?;
            }
            Property::MemoryLimit => {
                self.memory_limit = value.parse().map_err(|_| {
                    invalid_property(property.name(), "expected a number of bytes")
                })?;
            }
        }
        debug!(%property, value, "property set");
        Ok(property)
    }

    /// Name and value of every property, sorted by name
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        Property::ALL
            .into_iter()
            .map(|property| (property.name(), self.get(property)))
            .collect()
    }

    fn reset(&mut self, property: Property) {
        let defaults = Self::default();
        match property {
            Property::DefaultDrawChar => self.default_draw_char = defaults.default_draw_char,
            Property::DefaultEmptyChar => self.default_empty_char = defaults.default_empty_char,
            Property::HBorder => self.h_border = defaults.h_border,
            Property::MemoryLimit => self.memory_limit = defaults.memory_limit,
            Property::ShowCanvasAfterCommand => {
                self.show_canvas_after_command = defaults.show_canvas_after_command;
            }
            Property::VBorder => self.v_border = defaults.v_border,
        }
    }
}

/// Load the configuration
///
/// An explicit path must exist. Without one, the platform config file is
/// read when present and the defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> Result<ShellConfig> {
    let Some(path) = path
        .map(Path::to_path_buf)
        .or_else(|| ShellConfig::config_path().filter(|path| path.exists()))
    else {
        debug!("no config file, using defaults");
        return Ok(ShellConfig::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| DrawError::Configuration {
        path: path.clone(),
        message: Arc::new(format!("Failed to read config: {e}")),
    })?;
    let config = toml::from_str(&content).map_err(|e| DrawError::Configuration {
        path: path.clone(),
        message: Arc::new(format!("Failed to parse config: {e}")),
    })?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn parse_char(property: Property, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(invalid_property(property.name(), "expected a single character")),
    }
}

fn parse_bool(property: Property, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(invalid_property(property.name(), "expected true or false")),
    }
}

fn invalid_property(name: &str, message: &str) -> DrawError {
    DrawError::InvalidProperty {
        name: Arc::new(name.to_string()),
        message: Arc::new(message.to_string()),
    }
}
