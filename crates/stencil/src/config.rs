//! Configuration types for Stencil diagram rendering.
//!
//! This module provides [`RenderAttributes`], the per-diagram rendering
//! configuration, along with TOML loading from conventional locations. All
//! types implement [`serde::Deserialize`] so attributes can come from a
//! config file as well as from code.
//!
//! # Example
//!
//! ```
//! # use stencil::RenderAttributes;
//! let attrs = RenderAttributes::default();
//! assert!(attrs.validate().is_ok());
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use stencil_core::{color::Color, model::LayoutEngine};

use crate::error::Error;

/// Output file format for a finalized diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    /// Infers the format from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "pdf" => Some(OutputFormat::Pdf),
            _ => None,
        }
    }
}

fn default_font_size() -> u32 {
    14
}

fn default_padding() -> f32 {
    36.0
}

fn default_background() -> String {
    "transparent".to_string()
}

/// Rendering configuration for a single diagram.
///
/// Attributes are validated when a diagram begins; an invalid combination
/// is a [`Error::Configuration`] before any declaration happens.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderAttributes {
    /// Label font size in points.
    #[serde(default = "default_font_size")]
    font_size: u32,

    /// Padding around the diagram content, in pixels.
    #[serde(default = "default_padding")]
    padding: f32,

    /// Background color string, `"transparent"` for none.
    #[serde(default = "default_background")]
    background: String,

    /// Output format. When unset, inferred from the output path extension.
    #[serde(default)]
    format: Option<OutputFormat>,

    /// Layout engine positioning the diagram.
    #[serde(default)]
    engine: LayoutEngine,
}

impl Default for RenderAttributes {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            padding: default_padding(),
            background: default_background(),
            format: None,
            engine: LayoutEngine::default(),
        }
    }
}

impl RenderAttributes {
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Sets the label font size in points.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the padding around the diagram content, in pixels.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the background color string, `"transparent"` for none.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Sets the output format explicitly instead of inferring it from the
    /// output path extension.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the layout engine.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Parsed background [`Color`], or `None` when transparent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the color string does not parse.
    pub fn background_color(&self) -> Result<Option<Color>, Error> {
        if self.background.eq_ignore_ascii_case("transparent") {
            return Ok(None);
        }

        Color::new(&self.background)
            .map(Some)
            .map_err(|err| Error::Configuration(format!("Invalid background color: {err}")))
    }

    /// Checks every attribute, reporting the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a zero font size, negative or
    /// non-finite padding, or an unparseable background color.
    pub fn validate(&self) -> Result<(), Error> {
        if self.font_size == 0 {
            return Err(Error::Configuration(
                "Font size must be greater than zero".to_string(),
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::Configuration(format!(
                "Padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        self.background_color()?;

        Ok(())
    }
}

/// Find and load render attributes from conventional locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`stencil/config.toml`)
/// 3. Platform-specific config directory
/// 4. Defaults if none found
///
/// # Errors
///
/// Returns an error if an explicit path is provided but missing, or if a
/// found file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<RenderAttributes, Error> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("stencil/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "stencil", "stencil") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(RenderAttributes::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<RenderAttributes, Error> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::Configuration(format!(
            "Missing configuration file: {}",
            PathBuf::from(path).display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let attributes: RenderAttributes = toml::from_str(&content)
        .map_err(|err| Error::Configuration(format!("Failed to parse TOML configuration: {err}")))?;
    attributes.validate()?;

    Ok(attributes)
}
