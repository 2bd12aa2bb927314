//! Diagram configuration.
//!
//! DESIGN
//! ======
//! A single immutable `DiagramConfig` record is threaded through every render
//! call; nothing is read from ambient state once rendering starts. Values come
//! from three layers, later layers winning:
//! - built-in defaults
//! - an optional JSON file (`#[serde(default)]`, so partial files are fine)
//! - `SYNOPTIC_*` environment variables
//!
//! The result is validated once, up front, so the layout and composer never
//! have to second-guess numeric ranges.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_WRAP_CHARS: usize = 40;
pub const DEFAULT_LINK_OPACITY: f64 = 0.35;
pub const DEFAULT_RIBBON_WIDTH_SCALE: f64 = 0.6;
pub const DEFAULT_EXPORT_RESOLUTION: f64 = 192.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange { field: &'static str, value: String, expected: &'static str },
}

/// Visual parameters for one comparator diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Stripe and ribbon color per column (A, B, C).
    pub column_colors: [String; 3],
    /// Marker text color drawn on top of each column's stripe.
    pub marker_text_colors: [String; 3],
    /// Column headings shown when `show_header` is on.
    pub column_titles: [String; 3],
    /// Tokens that mark a repeated sub-header row in the source tables.
    pub header_sentinels: Vec<String>,

    pub show_links: bool,
    pub show_stripe: bool,
    pub show_markers: bool,
    pub show_ids: bool,
    pub show_row_ids_left: bool,
    pub show_zebra: bool,
    pub show_header: bool,
    pub compact: bool,

    /// Ribbon fill opacity, `0.0..=1.0`.
    pub link_opacity: f64,
    /// Ribbon thickness as a fraction of the thinner anchor, `(0.0, 1.0]`.
    pub ribbon_width_scale: f64,
    pub font_size: f64,
    pub wrap_chars: usize,
    /// Output pixels per inch; the logical canvas is laid out at 96.
    pub export_resolution: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            column_colors: ["#FFD700".into(), "#B0C4DE".into(), "#2CA02C".into()],
            marker_text_colors: ["#1F1A17".into(), "#1F1A17".into(), "#FFFFFF".into()],
            column_titles: ["A".into(), "B".into(), "C".into()],
            header_sentinels: vec!["A".into(), "B".into(), "C".into()],
            show_links: true,
            show_stripe: true,
            show_markers: true,
            show_ids: true,
            show_row_ids_left: true,
            show_zebra: true,
            show_header: true,
            compact: false,
            link_opacity: DEFAULT_LINK_OPACITY,
            ribbon_width_scale: DEFAULT_RIBBON_WIDTH_SCALE,
            font_size: DEFAULT_FONT_SIZE,
            wrap_chars: DEFAULT_WRAP_CHARS,
            export_resolution: DEFAULT_EXPORT_RESOLUTION,
        }
    }
}

impl DiagramConfig {
    /// Build the effective configuration: defaults, then the optional JSON
    /// file, then environment overrides. The result is validated.
    ///
    /// Recognized environment variables:
    /// - `SYNOPTIC_FONT_SIZE`
    /// - `SYNOPTIC_WRAP_CHARS`
    /// - `SYNOPTIC_LINK_OPACITY`
    /// - `SYNOPTIC_RIBBON_WIDTH_SCALE`
    /// - `SYNOPTIC_EXPORT_RESOLUTION`
    /// - `SYNOPTIC_COMPACT` (`1`/`true`/`yes` to enable)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if any
    /// value ends up out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
                Self::from_json_str(&raw)?
            }
            None => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a (possibly partial) JSON config. Missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.font_size = env_parse("SYNOPTIC_FONT_SIZE", self.font_size);
        self.wrap_chars = env_parse("SYNOPTIC_WRAP_CHARS", self.wrap_chars);
        self.link_opacity = env_parse("SYNOPTIC_LINK_OPACITY", self.link_opacity);
        self.ribbon_width_scale = env_parse("SYNOPTIC_RIBBON_WIDTH_SCALE", self.ribbon_width_scale);
        self.export_resolution = env_parse("SYNOPTIC_EXPORT_RESOLUTION", self.export_resolution);
        self.compact = env_flag("SYNOPTIC_COMPACT", self.compact);
        self
    }

    /// Copy of this config with the title/header toggle replaced.
    #[must_use]
    pub fn with_header(&self, show_header: bool) -> Self {
        Self { show_header, ..self.clone() }
    }

    /// Check numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(out_of_range("link_opacity", self.link_opacity, "0.0..=1.0"));
        }
        if self.ribbon_width_scale.is_nan() || self.ribbon_width_scale <= 0.0 || self.ribbon_width_scale > 1.0 {
            return Err(out_of_range("ribbon_width_scale", self.ribbon_width_scale, "(0.0, 1.0]"));
        }
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(out_of_range("font_size", self.font_size, "> 0"));
        }
        if self.wrap_chars == 0 {
            return Err(out_of_range("wrap_chars", self.wrap_chars, ">= 1"));
        }
        if self.export_resolution.is_nan() || self.export_resolution <= 0.0 {
            return Err(out_of_range("export_resolution", self.export_resolution, "> 0"));
        }
        Ok(())
    }

    /// Scale factor from logical canvas units to output pixels.
    #[must_use]
    pub fn pixel_scale(&self) -> f64 {
        self.export_resolution / 96.0
    }

    /// Whether a raw cell matches one of the sub-header sentinels.
    #[must_use]
    pub fn is_header_sentinel(&self, cell: &str) -> bool {
        let cell = cell.trim();
        self.header_sentinels
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(cell))
    }
}

fn out_of_range(field: &'static str, value: impl std::fmt::Display, expected: &'static str) -> ConfigError {
    ConfigError::OutOfRange { field, value: value.to_string(), expected }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
