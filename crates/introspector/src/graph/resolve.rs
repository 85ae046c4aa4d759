//! Reference resolution passes.
//!
//! Calls and notes declare their cases and components loosely: by the key of
//! the declaration a case/component annotation sits on, or by literal name.
//! These passes turn those references into canonical names and make sure
//! every referenced name exists as an entity.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use log::{debug, trace};

use introspector_core::model::{Call, Case, Component, Element, Note};

/// Outcome of [`match_referenced`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct MatchStats {
    pub matched: usize,
    pub unresolved: usize,
}

/// Declaration key → canonical names of the entities declared on it.
///
/// Several annotations may sit on the same declaration, so one key can map
/// to more than one name.
#[derive(Debug, Default)]
struct KeyTable {
    names: HashMap<String, Vec<String>>,
}

impl KeyTable {
    fn insert(&mut self, key: Option<&str>, name: &str) {
        if let Some(key) = key {
            self.names
                .entry(key.to_string())
                .or_default()
                .push(name.to_string());
        }
    }

    fn get(&self, key: &str) -> &[String] {
        self.names.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Pass 1: match key references against declared cases and components.
///
/// Every matched case re-attaches its canonical name through the priority
/// merge, every matched component contributes its canonical name to the
/// `from`/`to`/`over` list. Key references without a match are dropped.
pub(super) fn match_referenced(elements: &mut [Element]) -> MatchStats {
    let mut case_keys = KeyTable::default();
    let mut component_keys = KeyTable::default();

    for element in elements.iter() {
        match element {
            Element::Case(case) => case_keys.insert(case.key(), case.name()),
            Element::Component(component) => {
                component_keys.insert(component.key(), component.name())
            }
            Element::Call(_) | Element::Note(_) => {}
        }
    }

    let mut stats = MatchStats::default();

    for element in elements.iter_mut() {
        match element {
            Element::Call(call) => match_call(call, &case_keys, &component_keys, &mut stats),
            Element::Note(note) => match_note(note, &case_keys, &component_keys, &mut stats),
            Element::Case(_) | Element::Component(_) => {}
        }
    }

    stats
}

fn match_call(call: &mut Call, cases: &KeyTable, components: &KeyTable, stats: &mut MatchStats) {
    for pending in call.take_pending_cases() {
        let names = cases.get(pending.key());
        record_match(stats, pending.key(), names);
        for name in names {
            call.attach_case(name, pending.order());
        }
    }

    for key in call.take_pending_from() {
        let names = components.get(&key);
        record_match(stats, &key, names);
        for name in names {
            call.attach_from(name);
        }
    }

    for key in call.take_pending_to() {
        let names = components.get(&key);
        record_match(stats, &key, names);
        for name in names {
            call.attach_to(name);
        }
    }
}

fn match_note(note: &mut Note, cases: &KeyTable, components: &KeyTable, stats: &mut MatchStats) {
    for pending in note.take_pending_cases() {
        let names = cases.get(pending.key());
        record_match(stats, pending.key(), names);
        for name in names {
            note.attach_case(name, pending.order());
        }
    }

    for key in note.take_pending_over() {
        let names = components.get(&key);
        record_match(stats, &key, names);
        for name in names {
            note.attach_over(name);
        }
    }
}

fn record_match(stats: &mut MatchStats, key: &str, names: &[String]) {
    if names.is_empty() {
        debug!(key; "Reference key matches no declaration, dropping it");
        stats.unresolved += 1;
    } else {
        trace!(key, matches = names.len(); "Resolved reference key");
        stats.matched += 1;
    }
}

/// Pass 2: synthesize a bare case or component for every name that a call
/// or note references but no entity declares. Returns how many entities
/// were appended.
pub(super) fn synthesize_missing(elements: &mut Vec<Element>) -> usize {
    let mut known_cases: HashSet<&str> = HashSet::new();
    let mut known_components: HashSet<&str> = HashSet::new();
    let mut missing_cases: IndexSet<String> = IndexSet::new();
    let mut missing_components: IndexSet<String> = IndexSet::new();

    for element in elements.iter() {
        match element {
            Element::Case(case) => {
                known_cases.insert(case.name());
            }
            Element::Component(component) => {
                known_components.insert(component.name());
            }
            Element::Call(_) | Element::Note(_) => {}
        }
    }

    for element in elements.iter() {
        let (cases, components): (Vec<&str>, Vec<&str>) = match element {
            Element::Call(call) => (
                call.cases().iter().map(|link| link.name()).collect(),
                call.from()
                    .iter()
                    .chain(call.to())
                    .map(String::as_str)
                    .collect(),
            ),
            Element::Note(note) => (
                note.cases().iter().map(|link| link.name()).collect(),
                note.over().iter().map(String::as_str).collect(),
            ),
            Element::Case(_) | Element::Component(_) => continue,
        };

        for name in cases {
            if !known_cases.contains(name) {
                missing_cases.insert(name.to_string());
            }
        }
        for name in components {
            if !known_components.contains(name) {
                missing_components.insert(name.to_string());
            }
        }
    }

    let before = elements.len();

    for name in missing_cases {
        match Case::new(name.as_str(), None) {
            Ok(case) => {
                trace!(name; "Synthesized case");
                elements.push(Element::Case(case));
            }
            Err(err) => debug!(name, err:%; "Cannot synthesize case"),
        }
    }

    for name in missing_components {
        match Component::synthesized(&name) {
            Ok(component) => {
                trace!(name; "Synthesized component");
                elements.push(Element::Component(component));
            }
            Err(err) => debug!(name, err:%; "Cannot synthesize component"),
        }
    }

    elements.len() - before
}

/// Pass 3: drop blank names and collapse repeated names inside every call
/// and note.
pub(super) fn cleanup(elements: &mut [Element]) {
    for element in elements.iter_mut() {
        match element {
            Element::Call(call) => call.cleanup(),
            Element::Note(note) => note.cleanup(),
            Element::Case(_) | Element::Component(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use introspector_core::model::Reference;

    use super::*;

    fn case_with_key(key: &str, name: Option<&str>) -> Element {
        Case::from_declaration(Some(key), name, None).unwrap().into()
    }

    fn component_with_key(key: &str, name: Option<&str>) -> Element {
        Component::new(Some(key), name, None, None).unwrap().into()
    }

    #[test]
    fn test_key_references_resolve_to_canonical_names() {
        let mut elements = vec![
            case_with_key("T:Sample.ServiceOne", Some("Use Case 1")),
            component_with_key("T:Sample.ServiceOne", Some("Service 1")),
            component_with_key("T:Sample.ServiceThree", None),
            Call::builder()
                .case(Reference::key("T:Sample.ServiceOne"), Some(1.0))
                .from(Reference::key("T:Sample.ServiceOne"))
                .to(Reference::key("T:Sample.ServiceThree"))
                .build()
                .unwrap()
                .into(),
        ];

        let stats = match_referenced(&mut elements);
        assert_eq!(
            stats,
            MatchStats {
                matched: 3,
                unresolved: 0
            }
        );

        let call = elements[3].as_call().unwrap();
        assert!(call.has_case("Use Case 1"));
        assert_eq!(call.from(), ["Service 1".to_string()]);
        assert_eq!(call.to(), ["ServiceThree".to_string()]);
    }

    #[test]
    fn test_matched_case_goes_through_priority_merge() {
        let mut elements = vec![
            case_with_key("T:A", Some("c1")),
            Note::builder()
                .case(Reference::name("c1"), None)
                .case(Reference::key("T:A"), Some(2.0))
                .over(Reference::name("X"))
                .build()
                .unwrap()
                .into(),
        ];

        match_referenced(&mut elements);

        let note = elements[1].as_note().unwrap();
        assert_eq!(note.case_orders("c1").collect::<Vec<_>>(), vec![Some(2.0)]);
    }

    #[test]
    fn test_unmatched_keys_are_dropped() {
        let mut elements: Vec<Element> = vec![
            Call::builder()
                .case(Reference::key("T:Missing"), Some(1.0))
                .from(Reference::name("A"))
                .to(Reference::key("T:Nowhere"))
                .build()
                .unwrap()
                .into(),
        ];

        let stats = match_referenced(&mut elements);
        assert_eq!(stats.unresolved, 2);

        let call = elements[0].as_call().unwrap();
        assert!(call.cases().is_empty());
        assert!(call.to().is_empty());
    }

    #[test]
    fn test_synthesize_only_missing_names() {
        let mut elements: Vec<Element> = vec![
            Case::new("c1", None).unwrap().into(),
            Component::synthesized("A").unwrap().into(),
            Call::builder()
                .case(Reference::name("c1"), None)
                .case(Reference::name("c2"), None)
                .from(Reference::name("A"))
                .to(Reference::name("B"))
                .build()
                .unwrap()
                .into(),
            Note::builder()
                .case(Reference::name("c3"), None)
                .over(Reference::name("B"))
                .over(Reference::name("C"))
                .build()
                .unwrap()
                .into(),
        ];

        let added = synthesize_missing(&mut elements);
        assert_eq!(added, 4);

        let case_names: Vec<&str> = elements
            .iter()
            .filter_map(Element::as_case)
            .map(Case::name)
            .collect();
        assert_eq!(case_names, ["c1", "c2", "c3"]);

        let component_names: Vec<&str> = elements
            .iter()
            .filter_map(Element::as_component)
            .map(Component::name)
            .collect();
        assert_eq!(component_names, ["A", "B", "C"]);
    }

    #[test]
    fn test_cleanup_collapses_double_match() {
        let mut elements = vec![
            component_with_key("k:one", Some("A")),
            component_with_key("k:two", Some("A")),
            Call::builder()
                .case(Reference::name("c1"), Some(1.0))
                .from(Reference::key("k:one"))
                .from(Reference::key("k:two"))
                .to(Reference::name("B"))
                .build()
                .unwrap()
                .into(),
        ];

        match_referenced(&mut elements);
        assert_eq!(elements[2].as_call().unwrap().from().len(), 2);

        cleanup(&mut elements);
        assert_eq!(elements[2].as_call().unwrap().from(), ["A".to_string()]);
    }
}
