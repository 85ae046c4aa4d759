//! Component entities and their diagram kinds.

use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    error::ModelError,
    model::{case::resolve_name, is_blank, text::normalize_block},
};

/// The visual kind of a component.
///
/// Names match the PlantUML participant keywords. Unknown or absent kinds
/// fall back to [`ComponentKind::Participant`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    #[default]
    Participant,
    Actor,
    Database,
    Queue,
    Boundary,
    Control,
    Entity,
    Collections,
}

impl ComponentKind {
    /// Parse an optional kind string, downgrading anything unrecognised to
    /// [`ComponentKind::Participant`].
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some(value) if !is_blank(value) => value.parse().unwrap_or_else(|_| {
                debug!(kind = value; "Unknown component kind, using participant");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Keyword declaring this kind in a sequence diagram.
    pub fn sequence_keyword(&self) -> &'static str {
        self.as_str()
    }

    /// Keyword declaring this kind in a component diagram.
    ///
    /// Plain participants are drawn as `component`; every other kind keeps
    /// its own keyword.
    pub fn component_keyword(&self) -> &'static str {
        match self {
            Self::Participant => "component",
            other => other.as_str(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Actor => "actor",
            Self::Database => "database",
            Self::Queue => "queue",
            Self::Boundary => "boundary",
            Self::Control => "control",
            Self::Entity => "entity",
            Self::Collections => "collections",
        }
    }
}

impl FromStr for ComponentKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "participant" => Ok(Self::Participant),
            "actor" => Ok(Self::Actor),
            "database" => Ok(Self::Database),
            "queue" => Ok(Self::Queue),
            "boundary" => Ok(Self::Boundary),
            "control" => Ok(Self::Control),
            "entity" => Ok(Self::Entity),
            "collections" => Ok(Self::Collections),
            _ => Err("Unsupported component kind"),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant/node shown in diagrams.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    key: Option<String>,
    name: String,
    kind: ComponentKind,
    text: Option<String>,
    scale: Option<f32>,
}

impl Component {
    /// Create a component from an annotation.
    ///
    /// # Arguments
    ///
    /// * `key` - Identifier of the declaration the annotation is attached to.
    /// * `name` - Literal display name; derived from `key` when absent.
    /// * `kind` - Kind string; unrecognised values become `participant`.
    /// * `text` - Description; lines are trimmed and blank lines removed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if neither a name nor a usable key
    /// is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use introspector_core::model::{Component, ComponentKind};
    ///
    /// let db = Component::new(None, Some("orders"), Some("database"), None).unwrap();
    /// assert_eq!(db.kind(), ComponentKind::Database);
    ///
    /// let odd = Component::new(None, Some("svc"), Some("unknown"), None).unwrap();
    /// assert_eq!(odd.kind(), ComponentKind::Participant);
    /// ```
    pub fn new(
        key: Option<&str>,
        name: Option<&str>,
        kind: Option<&str>,
        text: Option<&str>,
    ) -> Result<Self, ModelError> {
        let key = key.filter(|value| !is_blank(value)).map(str::to_string);
        let name = resolve_name(key.as_deref(), name)?;

        Ok(Self {
            key,
            name,
            kind: ComponentKind::parse_or_default(kind),
            text: text.and_then(normalize_block),
            scale: None,
        })
    }

    /// Create a bare component for a name that was referenced but never
    /// declared. Synthesized components have the default kind and no scale.
    pub fn synthesized(name: &str) -> Result<Self, ModelError> {
        Self::new(None, Some(name), None, None)
    }

    /// Set the visibility scale of this component. NaN is treated as absent.
    pub fn with_scale(mut self, scale: Option<f32>) -> Self {
        self.scale = scale.filter(|value| !value.is_nan());
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn scale(&self) -> Option<f32> {
        self.scale
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Whether this component is hidden at the requested scale.
    ///
    /// A component is hidden only when both scales are present and its own
    /// scale is strictly greater than the requested one.
    pub fn is_scaled_out(&self, requested: Option<f32>) -> bool {
        match (self.scale, requested) {
            (Some(own), Some(requested)) => own > requested,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(
            ComponentKind::parse_or_default(Some("Database")),
            ComponentKind::Database
        );
        assert_eq!(
            ComponentKind::parse_or_default(Some(" queue ")),
            ComponentKind::Queue
        );
    }

    #[test]
    fn test_kind_defaults() {
        assert_eq!(ComponentKind::parse_or_default(None), ComponentKind::Participant);
        assert_eq!(
            ComponentKind::parse_or_default(Some("")),
            ComponentKind::Participant
        );
        assert_eq!(
            ComponentKind::parse_or_default(Some("unknown")),
            ComponentKind::Participant
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(ComponentKind::Participant.sequence_keyword(), "participant");
        assert_eq!(ComponentKind::Participant.component_keyword(), "component");
        assert_eq!(ComponentKind::Database.component_keyword(), "database");
        assert_eq!(ComponentKind::Collections.to_string(), "collections");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(
            Component::new(None, None, Some("actor"), None),
            Err(ModelError::EmptyName)
        );
        assert_eq!(Component::synthesized(" "), Err(ModelError::EmptyName));
    }

    #[test]
    fn test_name_derived_from_key() {
        let component = Component::new(Some("T:Sample.ServiceThree"), None, None, None).unwrap();
        assert_eq!(component.name(), "ServiceThree");
        assert!(component.has_key("T:Sample.ServiceThree"));
    }

    #[test]
    fn test_scale_filter() {
        let scaled = Component::synthesized("A").unwrap().with_scale(Some(2.0));
        assert!(scaled.is_scaled_out(Some(1.0)));
        assert!(!scaled.is_scaled_out(Some(2.0)));
        assert!(!scaled.is_scaled_out(None));

        let unscaled = Component::synthesized("B").unwrap();
        assert!(!unscaled.is_scaled_out(Some(0.0)));
    }

    #[test]
    fn test_nan_scale_is_absent() {
        let component = Component::synthesized("A").unwrap().with_scale(Some(f32::NAN));
        assert_eq!(component.scale(), None);
    }
}
