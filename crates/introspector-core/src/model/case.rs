//! Use-case entities.

use crate::{
    error::ModelError,
    model::{is_blank, text::normalize_block},
};

/// A named use case (scenario).
///
/// Identity is the [`name`](Case::name); the optional key is only used to
/// resolve key-based references from calls and notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    key: Option<String>,
    name: String,
    text: Option<String>,
}

impl Case {
    /// Create a case from a literal name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use introspector_core::{ModelError, model::Case};
    ///
    /// let case = Case::new("checkout", Some("Customer pays")).unwrap();
    /// assert_eq!(case.name(), "checkout");
    /// assert_eq!(Case::new("  ", None), Err(ModelError::EmptyName));
    /// ```
    pub fn new(name: impl Into<String>, text: Option<&str>) -> Result<Self, ModelError> {
        let name = name.into();
        Self::from_declaration(None, Some(&name), text)
    }

    /// Create a case from an annotation attached to a source declaration.
    ///
    /// When no literal name is given, the name is derived from the last
    /// segment of `key` (split on `:` and `.`).
    ///
    /// # Arguments
    ///
    /// * `key` - Identifier of the declaration the annotation is attached to.
    /// * `name` - Literal display name.
    /// * `text` - Description; lines are trimmed and blank lines removed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if neither a name nor a usable key
    /// is present.
    pub fn from_declaration(
        key: Option<&str>,
        name: Option<&str>,
        text: Option<&str>,
    ) -> Result<Self, ModelError> {
        let key = key.filter(|value| !is_blank(value)).map(str::to_string);
        let name = resolve_name(key.as_deref(), name)?;

        Ok(Self {
            key,
            name,
            text: text.and_then(normalize_block),
        })
    }

    /// Declaration key, if the case was declared on a source element.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Canonical case name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised description text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Pick a literal name, falling back to the last segment of the key.
pub(crate) fn resolve_name(key: Option<&str>, name: Option<&str>) -> Result<String, ModelError> {
    if let Some(name) = name.filter(|value| !is_blank(value)) {
        return Ok(name.to_string());
    }

    key.and_then(|key| key.rsplit(|c: char| c == ':' || c == '.').find(|segment| !is_blank(segment)))
        .map(|segment| segment.trim().to_string())
        .ok_or(ModelError::EmptyName)
}
