//! Configuration types for study-client

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable holding the API base address
pub const BASE_URL_ENV: &str = "STUDY_API_BASE_URL";

/// API client configuration (base address, timeout, login route)
///
/// The base address is deployment-specific and must be supplied explicitly or
/// sourced from the environment via [`ClientConfig::from_env`]. There is no
/// built-in production address: a missing value is a configuration error, not
/// a silent fallback.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address all request paths are appended to (e.g., "https://api.example.com")
    pub base_url: String,

    /// Per-request deadline (default: 10 seconds). A request that exceeds it
    /// fails as a transport error, indistinguishable from a network failure.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given base address with the default
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: default_timeout(),
        }
    }

    /// Build the configuration from the environment.
    ///
    /// Reads [`BASE_URL_ENV`]. Errors if the variable is unset or does not
    /// parse as an absolute URL.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| Error::Config {
            message: format!("{BASE_URL_ENV} is not set"),
            key: Some("base_url".to_string()),
        })?;
        let config = Self::new(base_url);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, checking the base address parses as an
    /// absolute URL.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url {:?}: {e}", self.base_url),
            key: Some("base_url".to_string()),
        })?;
        Ok(())
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Font face selection for PDF export
///
/// Limited to the PDF base-14 families so documents render without shipping
/// font assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    /// Helvetica (default)
    Helvetica,
    /// Helvetica Bold
    HelveticaBold,
    /// Helvetica Oblique
    HelveticaOblique,
    /// Times Roman
    TimesRoman,
    /// Times Bold
    TimesBold,
    /// Courier
    Courier,
}

impl Default for FontFace {
    fn default() -> Self {
        FontFace::Helvetica
    }
}

/// Style-to-face mapping for PDF export
///
/// The original export font ships a single glyph set, so by default every
/// style resolves to the same face. That collapse is a property of the asset,
/// kept here as configuration rather than corrected silently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Face used for regular text
    #[serde(default)]
    pub normal: FontFace,
    /// Face used where bold is requested (header, title)
    #[serde(default)]
    pub bold: FontFace,
    /// Face used where italic is requested
    #[serde(default)]
    pub italic: FontFace,
    /// Face used where bold italic is requested
    #[serde(default)]
    pub bold_italic: FontFace,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            normal: FontFace::Helvetica,
            bold: FontFace::Helvetica,
            italic: FontFace::Helvetica,
            bold_italic: FontFace::Helvetica,
        }
    }
}

/// Calendar PDF export configuration (page geometry, table styling, fonts)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Page margin on all four sides, in points (default: 20)
    #[serde(default = "default_margin_pt")]
    pub margin_pt: f32,

    /// Body text size in points (default: 12)
    #[serde(default = "default_font_size")]
    pub font_size_pt: f32,

    /// Document title size in points (default: 16)
    #[serde(default = "default_title_size")]
    pub title_size_pt: f32,

    /// Table border line width in points (default: 0.5)
    #[serde(default = "default_border_width")]
    pub border_width_pt: f32,

    /// Header row fill color as RGB in 0.0..=1.0 (default: #eeeeee)
    #[serde(default = "default_header_fill")]
    pub header_fill: [f32; 3],

    /// Width of the date column in points (default: 90)
    #[serde(default = "default_date_column_width")]
    pub date_column_width_pt: f32,

    /// Style-to-face font mapping
    #[serde(default)]
    pub font: FontConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            margin_pt: default_margin_pt(),
            font_size_pt: default_font_size(),
            title_size_pt: default_title_size(),
            border_width_pt: default_border_width(),
            header_fill: default_header_fill(),
            date_column_width_pt: default_date_column_width(),
            font: FontConfig::default(),
        }
    }
}

fn default_margin_pt() -> f32 {
    20.0
}

fn default_font_size() -> f32 {
    12.0
}

fn default_title_size() -> f32 {
    16.0
}

fn default_border_width() -> f32 {
    0.5
}

fn default_header_fill() -> [f32; 3] {
    // #eeeeee
    [0.933, 0.933, 0.933]
}

fn default_date_column_width() -> f32 {
    90.0
}
