//! One case and one component per name.

use std::collections::HashSet;

use log::trace;

use introspector_core::model::Element;

/// Remove every case and component whose name was already seen earlier in
/// the collection. Calls and notes are never touched. Returns the number of
/// removed elements.
pub(super) fn deduplicate(elements: &mut Vec<Element>) -> usize {
    let mut case_names: HashSet<String> = HashSet::new();
    let mut component_names: HashSet<String> = HashSet::new();
    let before = elements.len();

    elements.retain(|element| match element {
        Element::Case(case) => {
            let first = case_names.insert(case.name().to_string());
            if !first {
                trace!(name = case.name(); "Dropping duplicate case");
            }
            first
        }
        Element::Component(component) => {
            let first = component_names.insert(component.name().to_string());
            if !first {
                trace!(name = component.name(); "Dropping duplicate component");
            }
            first
        }
        Element::Call(_) | Element::Note(_) => true,
    });

    before - elements.len()
}

#[cfg(test)]
mod tests {
    use introspector_core::model::{Case, Component};

    use super::*;

    #[test]
    fn test_keeps_first_occurrence() {
        let mut elements: Vec<Element> = vec![
            Case::new("c1", Some("first")).unwrap().into(),
            Component::new(None, Some("A"), Some("database"), None)
                .unwrap()
                .into(),
            Case::new("c1", Some("second")).unwrap().into(),
            Component::synthesized("A").unwrap().into(),
        ];

        let removed = deduplicate(&mut elements);

        assert_eq!(removed, 2);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].as_case().unwrap().text(), Some("first"));
        assert_eq!(
            elements[1].as_component().unwrap().kind().sequence_keyword(),
            "database"
        );
    }

    #[test]
    fn test_case_and_component_names_are_independent() {
        let mut elements: Vec<Element> = vec![
            Case::new("shared", None).unwrap().into(),
            Component::synthesized("shared").unwrap().into(),
        ];

        assert_eq!(deduplicate(&mut elements), 0);
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut elements: Vec<Element> = vec![
            Case::new("Checkout", None).unwrap().into(),
            Case::new("checkout", None).unwrap().into(),
        ];

        assert_eq!(deduplicate(&mut elements), 0);
    }
}
