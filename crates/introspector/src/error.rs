//! Error types for Introspector operations.
//!
//! This module provides the main error type [`IntrospectorError`]. Building a
//! snapshot and building views never fail; errors only arise at the edges,
//! while reading annotation records or writing diagram text.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Introspector operations.
///
/// # Diagnostic Variants
///
/// The `Records` variant keeps the records source and the byte span reported
/// by the deserializer, so the offending line can be pointed at.
#[derive(Debug, Error)]
pub enum IntrospectorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid annotation records: {message}")]
    Records {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for IntrospectorError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl IntrospectorError {
    /// Create a `Records` error from a TOML deserialization failure.
    pub fn from_toml(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Records {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }

    /// Create a `Records` error from a JSON deserialization failure.
    ///
    /// `serde_json` reports a line and column; they are turned into a one
    /// byte span at that position.
    pub fn from_json(err: serde_json::Error, src: impl Into<String>) -> Self {
        let src = src.into();
        let span = byte_offset(&src, err.line(), err.column()).map(|start| {
            let end = (start + 1).min(src.len());
            start..end
        });

        Self::Records {
            message: err.to_string(),
            span,
            src,
        }
    }
}

/// Byte offset of a 1-based `line` and `column` in `src`.
fn byte_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();

    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let src = "first\nsecond\nthird";
        assert_eq!(byte_offset(src, 1, 1), Some(0));
        assert_eq!(byte_offset(src, 2, 3), Some(8));
        assert_eq!(byte_offset(src, 3, 100), Some(src.len()));
        assert_eq!(byte_offset(src, 0, 0), None);
    }

    #[test]
    fn test_json_error_keeps_source() {
        let src = "{\n  \"annotation\": [\n";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();

        let error = IntrospectorError::from_json(err, src);
        match error {
            IntrospectorError::Records { span, src: kept, .. } => {
                assert_eq!(kept, src);
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
