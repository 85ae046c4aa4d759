//! Immutable element graph built once per load.
//!
//! This module turns the parsed element list into a [`Snapshot`]:
//!
//! ```text
//! Annotation records
//!     ↓ into_element
//! Elements (raw references)
//!     ↓ resolve::match_referenced    (key references → canonical names)
//!     ↓ resolve::synthesize_missing  (every referenced name becomes an entity)
//!     ↓ resolve::cleanup             (blank / repeated names inside calls and notes)
//!     ↓ dedup::deduplicate           (one case and one component per name)
//! Snapshot (read-only, shared by every view request)
//! ```
//!
//! No pass fails: malformed input degrades to "no reference" and is reported
//! through the log only.

mod dedup;
mod resolve;

use indexmap::IndexMap;
use log::{debug, info};

use introspector_core::{
    model::{Call, Case, Component, Element, Note},
    record::AnnotationRecord,
};

/// The resolved, deduplicated element collection.
///
/// A snapshot is never mutated after [`Snapshot::build`] returns. It is
/// `Send + Sync`, so one snapshot can serve concurrent view requests; a
/// reload builds a fresh snapshot to swap in.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    elements: Vec<Element>,
    cases: IndexMap<String, usize>,
    components: IndexMap<String, usize>,
}

impl Snapshot {
    /// Build a snapshot from annotation records in parse order.
    ///
    /// Records that cannot form an element are skipped.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AnnotationRecord>,
    {
        let elements: Vec<Element> = records
            .into_iter()
            .filter_map(AnnotationRecord::into_element)
            .collect();

        Self::from_elements(elements)
    }

    /// Build a snapshot from already-constructed elements in parse order.
    pub fn from_elements(mut elements: Vec<Element>) -> Self {
        info!(elements = elements.len(); "Building element snapshot");

        let stats = resolve::match_referenced(&mut elements);
        debug!(
            matched = stats.matched,
            unresolved = stats.unresolved;
            "Matched referenced dependencies"
        );

        let synthesized = resolve::synthesize_missing(&mut elements);
        debug!(synthesized; "Synthesized missing dependencies");

        resolve::cleanup(&mut elements);

        let removed = dedup::deduplicate(&mut elements);
        debug!(removed; "Removed duplicate cases and components");

        let snapshot = Self::index(elements);
        info!(
            cases = snapshot.cases.len(),
            components = snapshot.components.len(),
            elements = snapshot.elements.len();
            "Snapshot built"
        );

        snapshot
    }

    fn index(elements: Vec<Element>) -> Self {
        let mut cases = IndexMap::new();
        let mut components = IndexMap::new();

        for (idx, element) in elements.iter().enumerate() {
            match element {
                Element::Case(case) => {
                    cases.entry(case.name().to_string()).or_insert(idx);
                }
                Element::Component(component) => {
                    components.entry(component.name().to_string()).or_insert(idx);
                }
                Element::Call(_) | Element::Note(_) => {}
            }
        }

        Self {
            elements,
            cases,
            components,
        }
    }

    /// Every element in load order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Cases in load order.
    pub fn cases(&self) -> impl Iterator<Item = &Case> {
        self.cases
            .values()
            .filter_map(|idx| self.elements.get(*idx).and_then(Element::as_case))
    }

    /// Components in load order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components
            .values()
            .filter_map(|idx| self.elements.get(*idx).and_then(Element::as_component))
    }

    /// Calls in load order.
    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        self.elements.iter().filter_map(Element::as_call)
    }

    /// Notes in load order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.elements.iter().filter_map(Element::as_note)
    }

    /// Look up a case by its exact name.
    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases
            .get(name)
            .and_then(|idx| self.elements.get(*idx))
            .and_then(Element::as_case)
    }

    /// Look up a component by its exact name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components
            .get(name)
            .and_then(|idx| self.elements.get(*idx))
            .and_then(Element::as_component)
    }

    pub fn cases_count(&self) -> usize {
        self.cases.len()
    }

    pub fn components_count(&self) -> usize {
        self.components.len()
    }
}
