//! Configuration types for Introspector rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file:
//!
//! ```toml
//! [render]
//! package = "Shop"
//!
//! [view]
//! scale = 1.0
//! ```
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and view settings.
//! - [`RenderConfig`] - Options of the PlantUML exporter.
//! - [`ViewConfig`] - Defaults applied to view requests.
//!
//! # Example
//!
//! ```
//! # use introspector::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().package().is_none());
//! assert!(config.view().scale().is_none());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// View configuration section.
    #[serde(default)]
    view: ViewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `render` - Exporter options.
    /// * `view` - View request defaults.
    pub fn new(render: RenderConfig, view: ViewConfig) -> Self {
        Self { render, view }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the view configuration.
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }
}

/// Exporter options.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    /// Package title wrapping the use-case diagram.
    #[serde(default)]
    package: Option<String>,
}

impl RenderConfig {
    pub fn new(package: Option<String>) -> Self {
        Self { package }
    }

    /// Returns the configured package title, if any.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

/// Defaults for view requests.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ViewConfig {
    /// Scale threshold used when a request carries none.
    #[serde(default)]
    scale: Option<f32>,
}

impl ViewConfig {
    pub fn new(scale: Option<f32>) -> Self {
        Self { scale }
    }

    /// Returns the default scale threshold. NaN is treated as absent.
    pub fn scale(&self) -> Option<f32> {
        self.scale.filter(|value| !value.is_nan())
    }
}
