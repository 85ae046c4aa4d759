//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Invalid annotation records keep their source text and the byte span the
//! deserializer reported, so they are rendered with a snippet pointing at the
//! offending line. Every other error is rendered as a plain message.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use introspector::IntrospectorError;

use crate::CliError;

/// Adapter for an invalid records file.
pub struct RecordsAdapter<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> RecordsAdapter<'a> {
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for RecordsAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordsAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for RecordsAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid annotation records: {}", self.message)
    }
}

impl std::error::Error for RecordsAdapter<'_> {}

impl MietteDiagnostic for RecordsAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("introspector::records"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "each record is an `[[annotation]]` table with a `kind` of case, component, call or comment",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.span.map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label =
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without source information.
///
/// This adapter handles I/O, configuration and export errors, as well as the
/// not-found and empty results of the CLI commands.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Introspector(IntrospectorError::Io(_)) => "introspector::io",
            CliError::Introspector(IntrospectorError::Records { .. }) => "introspector::records",
            CliError::Introspector(IntrospectorError::Config(_)) => "introspector::config",
            CliError::Introspector(IntrospectorError::Export(_)) => "introspector::export",
            CliError::CaseNotFound(_) => "introspector::not_found",
            CliError::Empty => "introspector::empty",
            CliError::Json(_) => "introspector::json",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CliError::CaseNotFound(_) => Some(Box::new(
                "case names are matched exactly; run the `cases` command to list them",
            )),
            CliError::Empty => Some(Box::new("the records declare no use case")),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// Invalid records with source location information.
    Records(RecordsAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Records(r) => fmt::Display::fmt(r, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Records(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Records(r) => r.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Records(r) => r.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Records(r) => r.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Records(r) => r.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Introspector(IntrospectorError::Records { message, span, src }) => {
            Reportable::Records(RecordsAdapter::new(message, span.as_ref(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_error(span: Option<Range<usize>>) -> CliError {
        CliError::Introspector(IntrospectorError::Records {
            message: "invalid string".to_string(),
            span,
            src: "[[annotation]]\nkind = \"case\nname = \"x\"\n".to_string(),
        })
    }

    #[test]
    fn test_records_error_points_at_span() {
        let err = records_error(Some(22..28));

        let reportable = to_reportable(&err);
        assert_eq!(
            reportable.to_string(),
            "Invalid annotation records: invalid string"
        );
        assert!(reportable.source_code().is_some());

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 22);
        assert_eq!(labels[0].len(), 6);
    }

    #[test]
    fn test_records_error_without_span_has_no_snippet() {
        let err = records_error(None);

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Records(_)));
        assert!(reportable.source_code().is_none());
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_not_found_error() {
        let err = CliError::CaseNotFound("checkout".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Use case not found: checkout");
                assert_eq!(
                    e.code().unwrap().to_string(),
                    "introspector::not_found"
                );
                assert!(e.help().is_some());
            }
            Reportable::Records(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_config_error_is_plain() {
        let err = CliError::Introspector(IntrospectorError::Config("bad".to_string()));

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "Configuration error: bad");
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "introspector::config"
        );
        assert!(reportable.labels().is_none());
    }
}
