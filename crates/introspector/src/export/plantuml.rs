//! PlantUML text backend.
//!
//! Values are wrapped in double quotes and otherwise written verbatim; quote
//! characters inside source text are not escaped.

mod component;
mod sequence;
mod use_case;

use std::fmt::Write as _;

use log::{debug, info};

use super::{Error, Exporter};
use crate::view::{ComponentView, SequenceView, UseCaseView};

const START: &str = "@startuml";
const END: &str = "@enduml";

/// Builder for the [`PlantUml`] exporter.
#[derive(Debug, Default)]
pub struct PlantUmlBuilder {
    package: Option<String>,
}

impl PlantUmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the use-case diagram in a package with this title.
    ///
    /// Blank titles are ignored.
    pub fn with_package(mut self, package: Option<&str>) -> Self {
        self.package = package
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self
    }

    /// Build the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the package title spans several lines.
    pub fn build(self) -> Result<PlantUml, Error> {
        if let Some(package) = self.package.as_deref().filter(|p| p.contains(['\n', '\r'])) {
            return Err(Error::Render(format!(
                "package title must be a single line: {package:?}"
            )));
        }

        Ok(PlantUml {
            package: self.package,
        })
    }
}

/// Renders views as PlantUML source.
#[derive(Debug, Clone, Default)]
pub struct PlantUml {
    package: Option<String>,
}

impl PlantUml {
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    fn document(body: impl FnOnce(&mut String) -> Result<(), Error>) -> Result<String, Error> {
        let mut out = String::new();
        writeln!(out, "{START}")?;
        body(&mut out)?;
        writeln!(out, "{END}")?;
        Ok(out)
    }
}

impl Exporter for PlantUml {
    fn export_use_cases(&self, view: &UseCaseView<'_>) -> Result<String, Error> {
        debug!(cases = view.cases().len(); "Exporting use cases");
        Self::document(|out| self.write_use_cases(out, view))
    }

    fn export_sequence(&self, view: &SequenceView<'_>) -> Result<String, Error> {
        let text = Self::document(|out| self.write_sequence(out, view))?;
        info!(case = view.case().name(), bytes = text.len(); "Sequence diagram rendered");
        Ok(text)
    }

    fn export_components(&self, view: &ComponentView<'_>) -> Result<String, Error> {
        let text = Self::document(|out| self.write_components(out, view))?;
        info!(
            case = view.case().unwrap_or("<whole map>"),
            bytes = text.len();
            "Component diagram rendered"
        );
        Ok(text)
    }
}

/// Writes `value` in double quotes, an absent value as `""`.
fn quoted(out: &mut String, value: Option<&str>) -> Result<(), Error> {
    write!(out, "\"{}\"", value.unwrap_or_default())?;
    Ok(())
}

/// Appends ` : "label"` when a label is present.
fn label(out: &mut String, text: Option<&str>) -> Result<(), Error> {
    if let Some(text) = text {
        write!(out, " : ")?;
        quoted(out, Some(text))?;
    }
    Ok(())
}
