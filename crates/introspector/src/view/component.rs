//! Component (dependency) view of a case or of the whole map.

use log::debug;

use introspector_core::model::{Call, Component, Note};

use super::{any_visible, compare_orders, first_touch, lowest_order, visible_components};
use crate::graph::Snapshot;

/// An emitted component with the texts attached to it.
#[derive(Debug, Clone)]
pub struct ComponentNode<'a> {
    component: &'a Component,
    notes: Vec<&'a str>,
}

impl<'a> ComponentNode<'a> {
    pub fn component(&self) -> &'a Component {
        self.component
    }

    /// Texts of the notes placed over this component, in snapshot order.
    pub fn notes(&self) -> &[&'a str] {
        &self.notes
    }

    /// The component's own description followed by its note texts.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.component
            .text()
            .into_iter()
            .chain(self.notes.iter().copied())
    }
}

/// A directed dependency between two visible components.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<'a> {
    from: &'a str,
    to: &'a str,
    text: Option<&'a str>,
}

impl<'a> Link<'a> {
    pub fn from(&self) -> &'a str {
        self.from
    }

    pub fn to(&self) -> &'a str {
        self.to
    }

    pub fn text(&self) -> Option<&'a str> {
        self.text
    }
}

/// Nodes and links of a component diagram.
#[derive(Debug, Clone)]
pub struct ComponentView<'a> {
    case: Option<&'a str>,
    nodes: Vec<ComponentNode<'a>>,
    links: Vec<Link<'a>>,
}

impl<'a> ComponentView<'a> {
    /// Build the component view of `case_name` at the requested `scale`.
    ///
    /// A missing or blank case name selects the whole map: every visible
    /// component in declaration order, with every call and note in scope.
    /// A named case emits only the components its calls and notes touch,
    /// in first-touch order (`from` side, then `to` side over calls sorted
    /// by their lowest order, then `over` side of notes).
    ///
    /// Returns `None` when no case is in scope: the named case does not
    /// exist, or the whole map is requested from a snapshot without cases.
    pub fn build(snapshot: &'a Snapshot, case_name: Option<&str>, scale: Option<f32>) -> Option<Self> {
        let case = match case_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => match snapshot.case(name) {
                Some(case) => Some(case.name()),
                None => {
                    debug!(case = name; "Components requested for unknown case");
                    return None;
                }
            },
            None if snapshot.cases_count() == 0 => {
                debug!("Whole map requested without any case");
                return None;
            }
            None => None,
        };

        let visible = visible_components(snapshot, scale);

        let calls: Vec<&Call> = snapshot
            .calls()
            .filter(|call| case.is_none_or(|name| call.has_case(name)))
            .collect();
        let notes: Vec<&Note> = snapshot
            .notes()
            .filter(|note| case.is_none_or(|name| note.has_case(name)))
            .collect();

        let emitted: Vec<&Component> = match case {
            None => visible.values().copied().collect(),
            Some(name) => {
                let mut ordered_calls = calls.clone();
                ordered_calls.sort_by(|a, b| {
                    compare_orders(
                        lowest_order(a.case_orders(name)),
                        lowest_order(b.case_orders(name)),
                    )
                });

                first_touch(&ordered_calls, &notes, &visible)
            }
        };

        let nodes: Vec<ComponentNode<'a>> = emitted
            .into_iter()
            .map(|component| ComponentNode {
                component,
                notes: notes
                    .iter()
                    .filter(|note| note.contains_over(component.name()))
                    .filter_map(|note| note.text())
                    .collect(),
            })
            .collect();

        let mut links = Vec::new();
        for call in calls
            .iter()
            .filter(|call| any_visible(call.from(), &visible) && any_visible(call.to(), &visible))
        {
            for from in call.from().iter().filter(|n| visible.contains_key(n.as_str())) {
                for to in call.to().iter().filter(|n| visible.contains_key(n.as_str())) {
                    links.push(Link {
                        from,
                        to,
                        text: call.text(),
                    });
                }
            }
        }

        debug!(
            whole_map = case.is_none(),
            nodes = nodes.len(),
            links = links.len();
            "Built component view"
        );

        Some(Self { case, nodes, links })
    }

    /// The case in scope, or `None` for the whole map.
    pub fn case(&self) -> Option<&'a str> {
        self.case
    }

    pub fn is_whole_map(&self) -> bool {
        self.case.is_none()
    }

    pub fn nodes(&self) -> &[ComponentNode<'a>] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link<'a>] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use introspector_core::model::{Case, Element, Reference};

    use super::*;

    fn call(case: &str, order: f32, from: &str, to: &str) -> Element {
        Call::builder()
            .case(Reference::name(case), Some(order))
            .from(Reference::name(from))
            .to(Reference::name(to))
            .text(Some(format!("{from} to {to}").as_str()))
            .build()
            .unwrap()
            .into()
    }

    fn note(case: &str, over: &str, text: &str) -> Element {
        Note::builder()
            .case(Reference::name(case), Some(1.0))
            .over(Reference::name(over))
            .text(Some(text))
            .build()
            .unwrap()
            .into()
    }

    fn node_names<'a>(view: &ComponentView<'a>) -> Vec<&'a str> {
        view.nodes()
            .iter()
            .map(|node| node.component().name())
            .collect()
    }

    fn sample() -> Snapshot {
        Snapshot::from_elements(vec![
            Component::new(None, Some("idle"), None, Some("never called"))
                .unwrap()
                .into(),
            Component::new(None, Some("B"), Some("database"), Some("storage"))
                .unwrap()
                .into(),
            call("c1", 2.0, "B", "C"),
            call("c1", 1.0, "A", "B"),
            call("c2", 1.0, "X", "B"),
            note("c1", "B", "busy"),
            note("c2", "B", "other"),
        ])
    }

    #[test]
    fn test_unknown_case_has_no_view() {
        let snapshot = sample();
        assert!(ComponentView::build(&snapshot, Some("nope"), None).is_none());
    }

    #[test]
    fn test_whole_map_without_cases_has_no_view() {
        let snapshot = Snapshot::from_elements(vec![Case::new("x", None).unwrap().into()]);
        assert!(ComponentView::build(&snapshot, None, None).is_some());

        let empty = Snapshot::default();
        assert!(ComponentView::build(&empty, None, None).is_none());
    }

    #[test]
    fn test_whole_map_lists_every_component_in_declaration_order() {
        let snapshot = sample();
        let view = ComponentView::build(&snapshot, Some("  "), None).unwrap();

        assert!(view.is_whole_map());
        assert_eq!(node_names(&view), ["idle", "B", "C", "A", "X"]);
        assert_eq!(view.links().len(), 3);

        let b = &view.nodes()[1];
        assert_eq!(b.texts().collect::<Vec<_>>(), ["storage", "busy", "other"]);
    }

    #[test]
    fn test_case_view_uses_first_touch_order() {
        let snapshot = sample();
        let view = ComponentView::build(&snapshot, Some("c1"), None).unwrap();

        assert_eq!(view.case(), Some("c1"));
        assert_eq!(node_names(&view), ["A", "B", "C"]);

        let b = &view.nodes()[1];
        assert_eq!(b.notes(), ["busy"]);

        let links: Vec<(&str, &str)> = view.links().iter().map(|l| (l.from(), l.to())).collect();
        assert_eq!(links, [("B", "C"), ("A", "B")]);
    }

    #[test]
    fn test_scaled_out_component_removes_links() {
        let snapshot = Snapshot::from_elements(vec![
            Component::new(None, Some("C"), None, None)
                .unwrap()
                .with_scale(Some(3.0))
                .into(),
            call("c1", 1.0, "A", "B"),
            call("c1", 2.0, "B", "C"),
        ]);

        let view = ComponentView::build(&snapshot, Some("c1"), Some(2.0)).unwrap();

        assert_eq!(node_names(&view), ["A", "B"]);
        assert_eq!(view.links().len(), 1);
        assert_eq!(view.links()[0].text(), Some("A to B"));
    }

    #[test]
    fn test_multiple_endpoints_produce_one_link_per_pair() {
        let snapshot = Snapshot::from_elements(vec![
            Call::builder()
                .case(Reference::name("c1"), Some(1.0))
                .from(Reference::name("A"))
                .from(Reference::name("B"))
                .to(Reference::name("C"))
                .to(Reference::name("D"))
                .build()
                .unwrap()
                .into(),
        ]);

        let view = ComponentView::build(&snapshot, Some("c1"), None).unwrap();
        let links: Vec<(&str, &str)> = view.links().iter().map(|l| (l.from(), l.to())).collect();

        assert_eq!(links, [("A", "C"), ("A", "D"), ("B", "C"), ("B", "D")]);
    }

    #[test]
    fn test_endpoints_of_one_call_follow_snapshot_order() {
        let snapshot = Snapshot::from_elements(vec![
            Component::new(None, Some("Z"), None, None).unwrap().into(),
            Component::new(None, Some("Y"), None, None).unwrap().into(),
            Call::builder()
                .case(Reference::name("c1"), Some(1.0))
                .from(Reference::name("Y"))
                .from(Reference::name("Z"))
                .to(Reference::name("X"))
                .build()
                .unwrap()
                .into(),
        ]);

        let view = ComponentView::build(&snapshot, Some("c1"), None).unwrap();

        assert_eq!(node_names(&view), ["Z", "Y", "X"]);
    }
}
