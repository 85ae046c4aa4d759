//! Export functionality for Introspector views.
//!
//! This module provides the [`Exporter`] trait that turns views into diagram
//! text. It is the final stage in the processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Annotation records
//!     ↓ graph
//! Snapshot
//!     ↓ view (per request)
//! SequenceView / ComponentView / UseCaseView
//!     ↓ export (this module)
//! Diagram text
//! ```
//!
//! # Available Backends
//!
//! - [`plantuml`] - PlantUML source via [`plantuml::PlantUml`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`IntrospectorError::Export`] at the crate boundary.
//!
//! [`IntrospectorError::Export`]: crate::IntrospectorError::Export

/// PlantUML export backend.
pub mod plantuml;

use std::fmt;

use crate::view::{ComponentView, SequenceView, UseCaseView};

/// Abstraction for diagram export backends.
///
/// Exporters hold only rendering options, so one exporter can serve
/// concurrent requests.
pub trait Exporter {
    /// Exports the use-case listing of a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the text cannot be produced.
    fn export_use_cases(&self, view: &UseCaseView<'_>) -> Result<String, Error>;

    /// Exports the sequence diagram of one case.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the text cannot be produced.
    fn export_sequence(&self, view: &SequenceView<'_>) -> Result<String, Error>;

    /// Exports a component diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the text cannot be produced.
    fn export_components(&self, view: &ComponentView<'_>) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// Writing into the output buffer failed.
    Format(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Format(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}
