//! Entity model for annotation-derived diagrams.
//!
//! This module contains the four element kinds that annotations describe:
//! - [`Case`] - A named use case, the unit of filtering for sequence diagrams
//! - [`Component`] - A participant/node shown in diagrams
//! - [`Call`] - A directed message between components, tagged with cases
//! - [`Note`] - Text attached over one or more components, tagged with cases
//!
//! All four are variants of the closed [`Element`] sum type. Cross references
//! between them are plain names (or pending declaration keys before
//! resolution), never object references.

mod call;
mod case;
mod component;
mod note;
mod reference;
mod text;

pub use call::{Call, CallBuilder};
pub use case::Case;
pub use component::{Component, ComponentKind};
pub use note::{Note, NoteBuilder};
pub use reference::{CaseLink, CaseRefs, ComponentRefs, PendingCase, Reference};
pub use text::{normalize_block, normalize_label};

/// A single annotation-derived element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Case(Case),
    Component(Component),
    Call(Call),
    Note(Note),
}

impl Element {
    /// Returns the element's kind as a static label, used for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Case(_) => "case",
            Element::Component(_) => "component",
            Element::Call(_) => "call",
            Element::Note(_) => "note",
        }
    }

    /// Borrow the inner [`Case`], if this element is one.
    pub fn as_case(&self) -> Option<&Case> {
        match self {
            Element::Case(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the inner [`Component`], if this element is one.
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Element::Component(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the inner [`Call`], if this element is one.
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Element::Call(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the inner [`Note`], if this element is one.
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Element::Note(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Case> for Element {
    fn from(value: Case) -> Self {
        Element::Case(value)
    }
}

impl From<Component> for Element {
    fn from(value: Component) -> Self {
        Element::Component(value)
    }
}

impl From<Call> for Element {
    fn from(value: Call) -> Self {
        Element::Call(value)
    }
}

impl From<Note> for Element {
    fn from(value: Note) -> Self {
        Element::Note(value)
    }
}

/// Returns `true` when the value is empty or contains only whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
