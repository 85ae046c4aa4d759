//! Loosely-declared references and the collections that hold them.
//!
//! Calls and notes refer to cases and components either by the declaration
//! key the target annotation was attached to, or by a literal name. Literal
//! names are canonical immediately; keys stay pending until the resolver
//! matches them against declared entities.

use crate::model::is_blank;

/// A raw reference from a call or note to a case or component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Identifier of the source declaration the target was annotated on.
    Key(String),
    /// Literal, already canonical, name of the target.
    Name(String),
}

impl Reference {
    /// Create a key reference, or `None` if the key is blank.
    pub fn key(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!is_blank(&value)).then_some(Self::Key(value))
    }

    /// Create a literal-name reference, or `None` if the name is blank.
    pub fn name(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!is_blank(&value)).then_some(Self::Name(value))
    }

    /// Pick the reference carried by an optional key/name pair.
    ///
    /// A non-blank key wins over a name; blank values are ignored.
    pub fn from_parts(key: Option<&str>, name: Option<&str>) -> Option<Self> {
        key.and_then(Self::key).or_else(|| name.and_then(Self::name))
    }
}

/// A resolved association between a call/note and a case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseLink {
    name: String,
    order: Option<f32>,
}

impl CaseLink {
    /// Canonical case name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the call/note within the case narrative, if declared.
    pub fn order(&self) -> Option<f32> {
        self.order
    }
}

/// A case reference by declaration key that has not been matched yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCase {
    key: String,
    order: Option<f32>,
}

impl PendingCase {
    /// The declaration key to match against [`Case::key`](crate::model::Case::key).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The order carried by the original reference.
    pub fn order(&self) -> Option<f32> {
        self.order
    }
}

/// Case associations of a call or note.
///
/// Adding an association goes through the priority merge:
/// - an explicit order removes a previous order-less entry for the same case
/// - an order-less entry is dropped when an ordered one already exists
/// - an exact `(name, order)` duplicate is a no-op
///
/// so there is at most one order-less association per case and any number
/// of distinctly ordered ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseRefs {
    links: Vec<CaseLink>,
    pending: Vec<PendingCase>,
}

impl CaseRefs {
    /// Append a raw reference. Literal names are merged immediately, keys are
    /// kept pending. Returns `false` if the reference was blank.
    pub fn push(&mut self, reference: Option<Reference>, order: Option<f32>) -> bool {
        // NaN never compares equal, so it cannot take part in the merge.
        let order = order.filter(|value| !value.is_nan());
        match reference {
            Some(Reference::Name(name)) => {
                self.attach(&name, order);
                true
            }
            Some(Reference::Key(key)) => {
                self.pending.push(PendingCase { key, order });
                true
            }
            None => false,
        }
    }

    /// Merge a canonical case association.
    pub fn attach(&mut self, name: &str, order: Option<f32>) {
        if is_blank(name) {
            return;
        }

        match order {
            Some(_) => self
                .links
                .retain(|link| !(link.name == name && link.order.is_none())),
            None => {
                if self
                    .links
                    .iter()
                    .any(|link| link.name == name && link.order.is_some())
                {
                    return;
                }
            }
        }

        if self
            .links
            .iter()
            .any(|link| link.name == name && link.order == order)
        {
            return;
        }

        self.links.push(CaseLink {
            name: name.to_string(),
            order,
        });
    }

    /// Remove and return every pending key reference.
    pub fn take_pending(&mut self) -> Vec<PendingCase> {
        std::mem::take(&mut self.pending)
    }

    /// Pending key references that have not been resolved yet.
    pub fn pending(&self) -> &[PendingCase] {
        &self.pending
    }

    /// Drop blank names and exact `(name, order)` repeats, keeping the first.
    pub fn cleanup(&mut self) {
        let mut kept: Vec<CaseLink> = Vec::with_capacity(self.links.len());
        for link in self.links.drain(..) {
            if is_blank(&link.name) {
                continue;
            }
            if kept
                .iter()
                .any(|seen| seen.name == link.name && seen.order == link.order)
            {
                continue;
            }
            kept.push(link);
        }
        self.links = kept;
    }

    /// Resolved associations in insertion order.
    pub fn links(&self) -> &[CaseLink] {
        &self.links
    }

    /// Whether any resolved association names the given case.
    pub fn contains(&self, name: &str) -> bool {
        self.links.iter().any(|link| link.name == name)
    }

    /// Every order held for the given case, in insertion order.
    pub fn orders<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<f32>> + 'a {
        self.links
            .iter()
            .filter(move |link| link.name == name)
            .map(CaseLink::order)
    }

    /// Whether no association (resolved or pending) exists.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.pending.is_empty()
    }
}

/// Component references of a call (`from`/`to`) or note (`over`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRefs {
    names: Vec<String>,
    pending: Vec<String>,
}

impl ComponentRefs {
    /// Append a raw reference. Returns `false` if the reference was blank.
    pub fn push(&mut self, reference: Option<Reference>) -> bool {
        match reference {
            Some(Reference::Name(name)) => {
                self.names.push(name);
                true
            }
            Some(Reference::Key(key)) => {
                self.pending.push(key);
                true
            }
            None => false,
        }
    }

    /// Add a canonical component name.
    pub fn attach(&mut self, name: &str) {
        if !is_blank(name) {
            self.names.push(name.to_string());
        }
    }

    /// Remove and return every pending key reference.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Pending key references that have not been resolved yet.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Drop blank names and collapse repeated names, keeping the first.
    pub fn cleanup(&mut self) {
        let mut kept: Vec<String> = Vec::with_capacity(self.names.len());
        for name in self.names.drain(..) {
            if !is_blank(&name) && !kept.contains(&name) {
                kept.push(name);
            }
        }
        self.names = kept;
    }

    /// Resolved component names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the given component name is referenced.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|value| value == name)
    }

    /// Whether no reference (resolved or pending) exists.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.pending.is_empty()
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn case_name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just("c1".to_string()), Just("c2".to_string())]
    }

    fn order_strategy() -> impl Strategy<Value = Option<f32>> {
        prop_oneof![
            Just(None),
            Just(Some(1.0f32)),
            Just(Some(2.0f32)),
            Just(Some(2.5f32))
        ]
    }

    fn entries_strategy() -> impl Strategy<Value = Vec<(String, Option<f32>)>> {
        prop::collection::vec((case_name_strategy(), order_strategy()), 0..16)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Whatever the insertion sequence, a case never holds an order-less
    /// association next to an ordered one, and never holds a duplicate pair.
    fn check_priority_merge_invariant(
        entries: Vec<(String, Option<f32>)>,
    ) -> Result<(), TestCaseError> {
        let mut refs = CaseRefs::default();
        for (name, order) in &entries {
            refs.attach(name, *order);
        }

        for name in ["c1", "c2"] {
            let orders: Vec<Option<f32>> = refs.orders(name).collect();
            let orderless = orders.iter().filter(|order| order.is_none()).count();
            prop_assert!(orderless <= 1, "more than one order-less link: {orders:?}");
            if orderless == 1 {
                prop_assert_eq!(orders.len(), 1, "order-less link beside ordered: {:?}", orders);
            }
            for (idx, order) in orders.iter().enumerate() {
                prop_assert!(
                    !orders[idx + 1..].contains(order),
                    "duplicate order {order:?} in {orders:?}"
                );
            }
        }
        Ok(())
    }

    /// Attaching an ordered entry after an order-less one always removes it.
    fn check_explicit_order_wins(
        name: String,
        order: f32,
    ) -> Result<(), TestCaseError> {
        let mut refs = CaseRefs::default();
        refs.attach(&name, None);
        refs.attach(&name, Some(order));

        prop_assert_eq!(refs.orders(&name).collect::<Vec<_>>(), vec![Some(order)]);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn priority_merge_invariant(entries in entries_strategy()) {
            check_priority_merge_invariant(entries)?;
        }

        #[test]
        fn explicit_order_wins(name in case_name_strategy(), order in -100.0f32..100.0) {
            check_explicit_order_wins(name, order)?;
        }
    }
}
