//! Notes attached over components.

use crate::model::{
    reference::{CaseLink, CaseRefs, ComponentRefs, PendingCase, Reference},
    text::normalize_label,
};

/// Text attached over one or more components at a point in a case's
/// timeline. Called a "comment" in the annotation vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    cases: CaseRefs,
    over: ComponentRefs,
    text: Option<String>,
}

impl Note {
    /// Start building a note.
    pub fn builder() -> NoteBuilder {
        NoteBuilder::default()
    }

    pub fn cases(&self) -> &[CaseLink] {
        self.cases.links()
    }

    pub fn over(&self) -> &[String] {
        self.over.names()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_case(&self, name: &str) -> bool {
        self.cases.contains(name)
    }

    pub fn contains_over(&self, name: &str) -> bool {
        self.over.contains(name)
    }

    pub fn case_orders<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<f32>> + 'a {
        self.cases.orders(name)
    }

    pub fn attach_case(&mut self, name: &str, order: Option<f32>) {
        self.cases.attach(name, order);
    }

    pub fn attach_over(&mut self, name: &str) {
        self.over.attach(name);
    }

    pub fn take_pending_cases(&mut self) -> Vec<PendingCase> {
        self.cases.take_pending()
    }

    pub fn take_pending_over(&mut self) -> Vec<String> {
        self.over.take_pending()
    }

    pub fn cleanup(&mut self) {
        self.cases.cleanup();
        self.over.cleanup();
    }
}

/// Incremental builder for [`Note`].
///
/// [`NoteBuilder::build`] only succeeds if at least one non-blank case and
/// one non-blank `over` reference were given.
#[derive(Debug, Default)]
pub struct NoteBuilder {
    note: Note,
    valid_cases: usize,
    valid_over: usize,
}

impl NoteBuilder {
    pub fn case(mut self, reference: Option<Reference>, order: Option<f32>) -> Self {
        if self.note.cases.push(reference, order) {
            self.valid_cases += 1;
        }
        self
    }

    pub fn over(mut self, reference: Option<Reference>) -> Self {
        if self.note.over.push(reference) {
            self.valid_over += 1;
        }
        self
    }

    pub fn text(mut self, text: Option<&str>) -> Self {
        self.note.text = text.and_then(normalize_label);
        self
    }

    pub fn build(self) -> Option<Note> {
        (self.valid_cases > 0 && self.valid_over > 0).then_some(self.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_case_and_over() {
        assert!(
            Note::builder()
                .case(Reference::name("c1"), Some(1.0))
                .build()
                .is_none()
        );
        assert!(Note::builder().over(Reference::name("A")).build().is_none());
    }

    #[test]
    fn test_note_priority_merge() {
        let note = Note::builder()
            .case(Reference::name("c1"), None)
            .case(Reference::name("c1"), Some(2.1))
            .over(Reference::name("database"))
            .text(Some("processing request to database"))
            .build()
            .unwrap();

        assert_eq!(note.case_orders("c1").collect::<Vec<_>>(), vec![Some(2.1)]);
        assert!(note.contains_over("database"));
        assert_eq!(note.text(), Some("processing request to database"));
    }
}
