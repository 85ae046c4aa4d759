//! Directed messages between components.

use crate::model::{
    reference::{CaseLink, CaseRefs, ComponentRefs, PendingCase, Reference},
    text::normalize_label,
};

/// A directed message from one set of components to another, tagged with
/// the cases (and per-case order) in which it takes place.
///
/// A call may belong to the same case more than once with different orders;
/// it then appears at each of those points of the narrative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Call {
    cases: CaseRefs,
    from: ComponentRefs,
    to: ComponentRefs,
    text: Option<String>,
}

impl Call {
    /// Start building a call.
    pub fn builder() -> CallBuilder {
        CallBuilder::default()
    }

    pub fn cases(&self) -> &[CaseLink] {
        self.cases.links()
    }

    pub fn from(&self) -> &[String] {
        self.from.names()
    }

    pub fn to(&self) -> &[String] {
        self.to.names()
    }

    /// Normalised single-line label.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_case(&self, name: &str) -> bool {
        self.cases.contains(name)
    }

    pub fn contains_from(&self, name: &str) -> bool {
        self.from.contains(name)
    }

    pub fn contains_to(&self, name: &str) -> bool {
        self.to.contains(name)
    }

    /// Every order this call holds for the given case.
    pub fn case_orders<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<f32>> + 'a {
        self.cases.orders(name)
    }

    /// Merge a canonical case association (priority merge rules apply).
    pub fn attach_case(&mut self, name: &str, order: Option<f32>) {
        self.cases.attach(name, order);
    }

    pub fn attach_from(&mut self, name: &str) {
        self.from.attach(name);
    }

    pub fn attach_to(&mut self, name: &str) {
        self.to.attach(name);
    }

    /// Remove and return the case references still waiting for a key match.
    pub fn take_pending_cases(&mut self) -> Vec<PendingCase> {
        self.cases.take_pending()
    }

    pub fn take_pending_from(&mut self) -> Vec<String> {
        self.from.take_pending()
    }

    pub fn take_pending_to(&mut self) -> Vec<String> {
        self.to.take_pending()
    }

    /// Drop blank and repeated names from every reference list.
    pub fn cleanup(&mut self) {
        self.cases.cleanup();
        self.from.cleanup();
        self.to.cleanup();
    }
}

/// Incremental builder for [`Call`].
///
/// References are appended one at a time; [`CallBuilder::build`] only
/// succeeds if at least one non-blank case, `from` and `to` reference were
/// given.
///
/// # Examples
///
/// ```
/// use introspector_core::model::{Call, Reference};
///
/// let call = Call::builder()
///     .case(Reference::name("checkout"), Some(1.0))
///     .from(Reference::name("web"))
///     .to(Reference::name("api"))
///     .text(Some("POST /orders"))
///     .build()
///     .expect("call has all references");
/// assert!(call.has_case("checkout"));
///
/// let orphan = Call::builder().from(Reference::name("web")).build();
/// assert!(orphan.is_none());
/// ```
#[derive(Debug, Default)]
pub struct CallBuilder {
    call: Call,
    valid_cases: usize,
    valid_from: usize,
    valid_to: usize,
}

impl CallBuilder {
    /// Append a case reference with an optional order.
    pub fn case(mut self, reference: Option<Reference>, order: Option<f32>) -> Self {
        if self.call.cases.push(reference, order) {
            self.valid_cases += 1;
        }
        self
    }

    /// Append a `from` component reference.
    pub fn from(mut self, reference: Option<Reference>) -> Self {
        if self.call.from.push(reference) {
            self.valid_from += 1;
        }
        self
    }

    /// Append a `to` component reference.
    pub fn to(mut self, reference: Option<Reference>) -> Self {
        if self.call.to.push(reference) {
            self.valid_to += 1;
        }
        self
    }

    /// Set the message label.
    pub fn text(mut self, text: Option<&str>) -> Self {
        self.call.text = text.and_then(normalize_label);
        self
    }

    /// Finish the call, or `None` if a required reference axis is empty.
    pub fn build(self) -> Option<Call> {
        (self.valid_cases > 0 && self.valid_from > 0 && self.valid_to > 0).then_some(self.call)
    }
}
