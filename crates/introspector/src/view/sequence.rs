//! Sequence view of a single case.

use log::debug;

use introspector_core::model::{Call, Case, Component, Note};

use super::{any_visible, compare_orders, first_touch, lowest_order, visible_components};
use crate::graph::Snapshot;

/// A directed message between two visible components.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<'a> {
    from: &'a str,
    to: &'a str,
    text: Option<&'a str>,
}

impl<'a> Message<'a> {
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

/// A note placed over one or more visible components.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteStep<'a> {
    over: Vec<&'a str>,
    text: Option<&'a str>,
}

impl<'a> NoteStep<'a> {
    pub fn over(&self) -> &[&'a str] {
        &self.over
    }

    pub fn text(&self) -> Option<&'a str> {
        self.text
    }
}

/// One entry of the sequence timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<'a> {
    Message(Message<'a>),
    Note(NoteStep<'a>),
}

/// Participants and ordered steps of one case.
#[derive(Debug, Clone)]
pub struct SequenceView<'a> {
    case: &'a Case,
    participants: Vec<&'a Component>,
    steps: Vec<Step<'a>>,
}

impl<'a> SequenceView<'a> {
    /// Build the sequence view of `case_name` at the requested `scale`.
    ///
    /// Returns `None` when the snapshot has no case with exactly that name.
    ///
    /// Calls whose `from` or `to` side has no visible component are dropped,
    /// as are notes with no visible `over` component. A call or note holding
    /// several orders for the case yields one step per order; steps are sorted
    /// by order with a missing order first and ties kept in snapshot order
    /// (calls before notes).
    pub fn build(snapshot: &'a Snapshot, case_name: &str, scale: Option<f32>) -> Option<Self> {
        let Some(case) = snapshot.case(case_name) else {
            debug!(case = case_name; "Sequence requested for unknown case");
            return None;
        };
        let name = case.name();

        let visible = visible_components(snapshot, scale);

        let calls: Vec<&Call> = snapshot
            .calls()
            .filter(|call| call.has_case(name))
            .filter(|call| any_visible(call.from(), &visible) && any_visible(call.to(), &visible))
            .collect();
        let notes: Vec<&Note> = snapshot
            .notes()
            .filter(|note| note.has_case(name))
            .filter(|note| any_visible(note.over(), &visible))
            .collect();

        let mut ordered_calls = calls.clone();
        ordered_calls.sort_by(|a, b| {
            compare_orders(
                lowest_order(a.case_orders(name)),
                lowest_order(b.case_orders(name)),
            )
        });

        let participants = first_touch(&ordered_calls, &notes, &visible);

        let mut timeline: Vec<(Option<f32>, Step<'a>)> = Vec::new();

        for call in &calls {
            for order in call.case_orders(name) {
                for from in call.from().iter().filter(|n| visible.contains_key(n.as_str())) {
                    for to in call.to().iter().filter(|n| visible.contains_key(n.as_str())) {
                        timeline.push((
                            order,
                            Step::Message(Message {
                                from,
                                to,
                                text: call.text(),
                            }),
                        ));
                    }
                }
            }
        }

        for note in &notes {
            let over: Vec<&str> = note
                .over()
                .iter()
                .map(String::as_str)
                .filter(|name| visible.contains_key(name))
                .collect();
            for order in note.case_orders(name) {
                timeline.push((
                    order,
                    Step::Note(NoteStep {
                        over: over.clone(),
                        text: note.text(),
                    }),
                ));
            }
        }

        // `sort_by` is stable, ties keep their push order
        timeline.sort_by(|(a, _), (b, _)| compare_orders(*a, *b));

        debug!(
            case = name,
            participants = participants.len(),
            steps = timeline.len();
            "Built sequence view"
        );

        Some(Self {
            case,
            participants,
            steps: timeline.into_iter().map(|(_, step)| step).collect(),
        })
    }

    pub fn case(&self) -> &'a Case {
        self.case
    }

    /// Participants in declaration order.
    pub fn participants(&self) -> &[&'a Component] {
        &self.participants
    }

    /// Timeline steps in order.
    pub fn steps(&self) -> &[Step<'a>] {
        &self.steps
    }
}
