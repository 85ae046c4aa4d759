//! Introspector - turns source-code annotations into PlantUML diagrams.
//!
//! Annotation records describe use cases, components, calls between
//! components and notes. This crate resolves their loose cross references
//! into an immutable [`Snapshot`], and renders per-case sequence diagrams,
//! component diagrams and a use-case listing from it.

pub mod config;
pub mod export;
pub mod view;

mod error;
mod graph;

pub use introspector_core::{model, record};

pub use error::IntrospectorError;
pub use graph::Snapshot;

use std::path::Path;

use log::{debug, info, trace};
use serde::Serialize;

use config::AppConfig;
use export::{
    Exporter,
    plantuml::{PlantUml, PlantUmlBuilder},
};
use record::RecordSet;
use view::{ComponentView, SequenceView, UseCaseView};

/// Serialization format of an annotation records file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    #[default]
    Toml,
    Json,
}

impl RecordFormat {
    /// Pick the format from a file extension: `.json` is JSON, anything
    /// else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// A case as listed by [`Introspector::list_cases`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub name: String,
    pub text: Option<String>,
}

/// Entry point for loading annotations and rendering diagrams.
///
/// # Examples
///
/// ```rust
/// use introspector::{Introspector, RecordFormat};
///
/// let source = r#"
///     [[annotation]]
///     kind = "case"
///     name = "c1"
///     text = "hello"
///
///     [[annotation]]
///     kind = "call"
///     cases = [{ name = "c1", order = 1.0 }]
///     from = ["A"]
///     to = ["B"]
///     text = "go"
/// "#;
///
/// let introspector = Introspector::default();
/// let records = introspector
///     .parse_records(source, RecordFormat::Toml)
///     .expect("Failed to parse records");
/// let snapshot = introspector.load(records);
///
/// let diagram = introspector
///     .render_sequence(&snapshot, "c1", None)
///     .expect("Failed to render")
///     .expect("Case exists");
/// assert!(diagram.contains("\"A\" -> \"B\" : \"go\""));
/// ```
#[derive(Debug, Default)]
pub struct Introspector {
    config: AppConfig,
}

impl Introspector {
    /// Create a new introspector with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Render and view defaults
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse annotation records from TOML or JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectorError::Records`] with the offending span when
    /// the text is not a valid records document.
    pub fn parse_records(
        &self,
        source: &str,
        format: RecordFormat,
    ) -> Result<RecordSet, IntrospectorError> {
        info!(format:?; "Parsing annotation records");

        let records = match format {
            RecordFormat::Toml => toml::from_str::<RecordSet>(source)
                .map_err(|err| IntrospectorError::from_toml(err, source))?,
            RecordFormat::Json => serde_json::from_str::<RecordSet>(source)
                .map_err(|err| IntrospectorError::from_json(err, source))?,
        };

        debug!(records = records.records().len(); "Annotation records parsed");
        Ok(records)
    }

    /// Resolve records into an immutable snapshot.
    ///
    /// Records that do not form a valid element are skipped; this never
    /// fails.
    pub fn load(&self, records: RecordSet) -> Snapshot {
        Snapshot::build(records.into_records())
    }

    /// Every case in snapshot order.
    pub fn list_cases(&self, snapshot: &Snapshot) -> Vec<CaseSummary> {
        snapshot
            .cases()
            .map(|case| CaseSummary {
                name: case.name().to_string(),
                text: case.text().map(str::to_string),
            })
            .collect()
    }

    /// Render the sequence diagram of `case`.
    ///
    /// `scale` falls back to the configured default when absent.
    ///
    /// # Errors
    ///
    /// Returns `IntrospectorError` if the exporter fails.
    ///
    /// Returns `Ok(None)` when no case has exactly that name.
    pub fn render_sequence(
        &self,
        snapshot: &Snapshot,
        case: &str,
        scale: Option<f32>,
    ) -> Result<Option<String>, IntrospectorError> {
        let scale = self.scale_or_default(scale);
        info!(case, scale:?; "Rendering sequence diagram");

        let Some(view) = SequenceView::build(snapshot, case, scale) else {
            return Ok(None);
        };

        let text = self.exporter()?.export_sequence(&view)?;
        trace!(text; "Rendered sequence diagram");
        Ok(Some(text))
    }

    /// Render the component diagram of `case`, or of the whole map when
    /// `case` is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns `IntrospectorError` if the exporter fails.
    ///
    /// Returns `Ok(None)` when no case is in scope.
    pub fn render_components(
        &self,
        snapshot: &Snapshot,
        case: Option<&str>,
        scale: Option<f32>,
    ) -> Result<Option<String>, IntrospectorError> {
        let scale = self.scale_or_default(scale);
        info!(case:?, scale:?; "Rendering component diagram");

        let Some(view) = ComponentView::build(snapshot, case, scale) else {
            return Ok(None);
        };

        let text = self.exporter()?.export_components(&view)?;
        trace!(text; "Rendered component diagram");
        Ok(Some(text))
    }

    /// Render the use-case diagram.
    ///
    /// # Errors
    ///
    /// Returns `IntrospectorError` if the configured package title is invalid
    /// or the exporter fails.
    pub fn render_use_cases(&self, snapshot: &Snapshot) -> Result<String, IntrospectorError> {
        info!(cases = snapshot.cases_count(); "Rendering use cases");
        let text = self
            .exporter()?
            .export_use_cases(&UseCaseView::build(snapshot))?;
        Ok(text)
    }

    /// Render every diagram of the snapshot: the use cases, then the
    /// sequence and component diagram of each case, then the whole map.
    /// Diagrams are separated by an empty line.
    ///
    /// # Errors
    ///
    /// Returns `IntrospectorError` if any diagram fails to render.
    pub fn render_all(&self, snapshot: &Snapshot) -> Result<String, IntrospectorError> {
        info!(cases = snapshot.cases_count(); "Rendering all diagrams");

        let mut diagrams = vec![self.render_use_cases(snapshot)?];

        for case in snapshot.cases() {
            diagrams.extend(self.render_sequence(snapshot, case.name(), None)?);
            diagrams.extend(self.render_components(snapshot, Some(case.name()), None)?);
        }
        diagrams.extend(self.render_components(snapshot, None, None)?);

        Ok(diagrams.join("\n"))
    }

    fn scale_or_default(&self, scale: Option<f32>) -> Option<f32> {
        scale
            .filter(|value| !value.is_nan())
            .or_else(|| self.config.view().scale())
    }

    fn exporter(&self) -> Result<PlantUml, IntrospectorError> {
        let exporter = PlantUmlBuilder::new()
            .with_package(self.config.render().package())
            .build()?;
        Ok(exporter)
    }
}
