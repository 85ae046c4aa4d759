//! Per-request views over a [`Snapshot`].
//!
//! A view is a filtered, ordered selection of borrowed snapshot elements,
//! ready for an exporter. Building a view never mutates the snapshot, so any
//! number of views can be built concurrently from the same snapshot.
//!
//! - [`SequenceView`] - participants and time-ordered steps of one case
//! - [`ComponentView`] - nodes and links of one case, or of the whole map
//! - [`UseCaseView`] - every case with its description
//!
//! Scale filtering is shared by every view: a component is hidden only when
//! both its own scale and the requested scale are present and its own scale
//! is strictly greater.

mod component;
mod sequence;

pub use component::{ComponentNode, ComponentView, Link};
pub use sequence::{Message, NoteStep, SequenceView, Step};

use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};

use introspector_core::model::{Call, Case, Component, Note};

use crate::graph::Snapshot;

/// Every case of a snapshot, in snapshot order.
#[derive(Debug, Clone)]
pub struct UseCaseView<'a> {
    cases: Vec<&'a Case>,
}

impl<'a> UseCaseView<'a> {
    pub fn build(snapshot: &'a Snapshot) -> Self {
        Self {
            cases: snapshot.cases().collect(),
        }
    }

    pub fn cases(&self) -> &[&'a Case] {
        &self.cases
    }
}

/// Compare two optional orders: a missing order sorts before any present
/// order, present orders compare with [`f32::total_cmp`].
pub fn compare_orders(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// The lowest of a set of orders under [`compare_orders`].
fn lowest_order(orders: impl Iterator<Item = Option<f32>>) -> Option<f32> {
    orders.min_by(|a, b| compare_orders(*a, *b)).flatten()
}

/// Components visible at `scale`, keyed by name in declaration order.
fn visible_components(snapshot: &Snapshot, scale: Option<f32>) -> IndexMap<&str, &Component> {
    snapshot
        .components()
        .filter(|component| !component.is_scaled_out(scale))
        .map(|component| (component.name(), component))
        .collect()
}

fn any_visible(names: &[String], visible: &IndexMap<&str, &Component>) -> bool {
    names.iter().any(|name| visible.contains_key(name.as_str()))
}

/// Visible components named in `names`, in snapshot order rather than the
/// order the names were referenced in.
fn in_snapshot_order<'a>(
    visible: &IndexMap<&'a str, &'a Component>,
    names: &[String],
) -> impl Iterator<Item = &'a str> {
    visible
        .keys()
        .copied()
        .filter(move |visible_name| names.iter().any(|name| name.as_str() == *visible_name))
}

/// Components in first-touch order: the `from` side of every call, then the
/// `to` side of every call, then the `over` side of every note. Each component
/// appears once, at its first touch.
fn first_touch<'a>(
    calls: &[&'a Call],
    notes: &[&'a Note],
    visible: &IndexMap<&'a str, &'a Component>,
) -> Vec<&'a Component> {
    let mut touched: IndexSet<&'a str> = IndexSet::new();
    for call in calls {
        touched.extend(in_snapshot_order(visible, call.from()));
    }
    for call in calls {
        touched.extend(in_snapshot_order(visible, call.to()));
    }
    for note in notes {
        touched.extend(in_snapshot_order(visible, note.over()));
    }

    touched
        .iter()
        .filter_map(|name| visible.get(name).copied())
        .collect()
}
