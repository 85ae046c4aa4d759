//! Annotation records: the input contract handed over by an extractor.
//!
//! An extractor walks source comments and produces an ordered sequence of
//! [`AnnotationRecord`]s. The records are plain data with serde support so
//! they can be loaded from TOML or JSON files:
//!
//! ```toml
//! [[annotation]]
//! kind = "case"
//! name = "checkout"
//! text = "Customer pays for the basket"
//!
//! [[annotation]]
//! kind = "call"
//! cases = [{ name = "checkout", order = 1.0 }]
//! from = ["web"]
//! to = [{ key = "T:Shop.Api" }]
//! text = "POST /orders"
//! ```
//!
//! Converting a record into a model [`Element`] never fails loudly: records
//! that cannot form a valid element are skipped and reported at debug level.
//! Malformed optional attributes (an `order` or `scale` that is not a number,
//! a `type` that is not a string) read as absent instead of rejecting the file.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::model::{Call, Case, Component, Element, Note, Reference};

/// An ordered collection of annotation records, as stored in a records file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(rename = "annotation", default)]
    records: Vec<AnnotationRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<AnnotationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AnnotationRecord> {
        self.records
    }
}

/// A single annotation found in a source comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnnotationRecord {
    Case(CaseRecord),
    Component(ComponentRecord),
    Call(CallRecord),
    #[serde(alias = "note")]
    Comment(NoteRecord),
}

impl AnnotationRecord {
    /// Convert this record into a model element.
    ///
    /// Returns `None` when the record cannot form a valid element (no name,
    /// or a call/note without the required references).
    pub fn into_element(self) -> Option<Element> {
        let element = match self {
            AnnotationRecord::Case(record) => record.into_case().map(Element::Case),
            AnnotationRecord::Component(record) => record.into_component().map(Element::Component),
            AnnotationRecord::Call(record) => record.into_call().map(Element::Call),
            AnnotationRecord::Comment(record) => record.into_note().map(Element::Note),
        };

        if element.is_none() {
            debug!("Skipping annotation record that does not form an element");
        }

        element
    }
}

/// `case` annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    /// Enclosing declaration key.
    pub key: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
}

impl CaseRecord {
    fn into_case(self) -> Option<Case> {
        Case::from_declaration(
            self.key.as_deref(),
            self.name.as_deref(),
            self.text.as_deref(),
        )
        .ok()
    }
}

/// `component` annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentRecord {
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub scale: Option<f32>,
}

impl ComponentRecord {
    fn into_component(self) -> Option<Component> {
        Component::new(
            self.key.as_deref(),
            self.name.as_deref(),
            self.kind.as_deref(),
            self.text.as_deref(),
        )
        .ok()
        .map(|component| component.with_scale(self.scale))
    }
}

/// A case reference inside a call or note, with its optional order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRefRecord {
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub order: Option<f32>,
}

impl CaseRefRecord {
    fn reference(&self) -> Option<Reference> {
        Reference::from_parts(self.key.as_deref(), self.name.as_deref())
    }
}

/// A component reference inside a call or note.
///
/// A bare string is a literal name; a table may carry a `key` or a `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentRefRecord {
    Name(String),
    Table {
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ComponentRefRecord {
    fn reference(&self) -> Option<Reference> {
        match self {
            ComponentRefRecord::Name(name) => Reference::name(name.as_str()),
            ComponentRefRecord::Table { key, name } => {
                Reference::from_parts(key.as_deref(), name.as_deref())
            }
        }
    }
}

/// `call` annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallRecord {
    pub cases: Vec<CaseRefRecord>,
    pub from: Vec<ComponentRefRecord>,
    pub to: Vec<ComponentRefRecord>,
    pub text: Option<String>,
}

impl CallRecord {
    fn into_call(self) -> Option<Call> {
        let builder = self
            .cases
            .iter()
            .fold(Call::builder(), |builder, case| {
                builder.case(case.reference(), case.order)
            });
        let builder = self
            .from
            .iter()
            .fold(builder, |builder, from| builder.from(from.reference()));
        let builder = self
            .to
            .iter()
            .fold(builder, |builder, to| builder.to(to.reference()));

        builder.text(self.text.as_deref()).build()
    }
}

/// `comment` annotation, modelled as a [`Note`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteRecord {
    pub cases: Vec<CaseRefRecord>,
    pub over: Vec<ComponentRefRecord>,
    pub text: Option<String>,
}

impl NoteRecord {
    fn into_note(self) -> Option<Note> {
        let builder = self
            .cases
            .iter()
            .fold(Note::builder(), |builder, case| {
                builder.case(case.reference(), case.order)
            });
        let builder = self
            .over
            .iter()
            .fold(builder, |builder, over| builder.over(over.reference()));

        builder.text(self.text.as_deref()).build()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f32),
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

/// A number, or a string holding one. Anything else reads as `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(value) => Some(value),
        RawNumber::Text(text) => {
            let parsed = text.trim().parse::<f32>().ok();
            if parsed.is_none() {
                debug!(value = text; "Ignoring attribute that is not a number");
            }
            parsed
        }
        RawNumber::Other(_) => {
            debug!("Ignoring attribute that is not a number");
            None
        }
    };

    Ok(value.filter(|value| !value.is_nan()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawString {
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawString::deserialize(deserializer)? {
        RawString::Text(text) => Ok(Some(text)),
        RawString::Other(_) => {
            debug!("Ignoring attribute that is not a string");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;

    fn name_ref(name: &str) -> ComponentRefRecord {
        ComponentRefRecord::Name(name.to_string())
    }

    fn case_ref(name: &str, order: Option<f32>) -> CaseRefRecord {
        CaseRefRecord {
            name: Some(name.to_string()),
            order,
            ..Default::default()
        }
    }

    #[test]
    fn test_case_record_without_name_or_key_is_skipped() {
        let record = AnnotationRecord::Case(CaseRecord {
            text: Some("orphan".to_string()),
            ..Default::default()
        });
        assert!(record.into_element().is_none());
    }

    #[test]
    fn test_component_record_keeps_scale() {
        let record = AnnotationRecord::Component(ComponentRecord {
            name: Some("db".to_string()),
            kind: Some("database".to_string()),
            scale: Some(2.0),
            ..Default::default()
        });

        let element = record.into_element().expect("component");
        let component = element.as_component().expect("component variant");
        assert_eq!(component.scale(), Some(2.0));
    }

    #[test]
    fn test_call_record_with_blank_cases_is_skipped() {
        let record = AnnotationRecord::Call(CallRecord {
            cases: vec![case_ref("  ", Some(1.0))],
            from: vec![name_ref("A")],
            to: vec![name_ref("B")],
            text: None,
        });
        assert!(record.into_element().is_none());
    }

    #[test]
    fn test_call_record_builds_call() {
        let record = AnnotationRecord::Call(CallRecord {
            cases: vec![case_ref("c1", Some(1.0))],
            from: vec![name_ref("A")],
            to: vec![ComponentRefRecord::Table {
                key: None,
                name: Some("B".to_string()),
            }],
            text: Some("go".to_string()),
        });

        let element = record.into_element().expect("call");
        let call = element.as_call().expect("call variant");
        assert_eq!(call.from(), ["A".to_string()]);
        assert_eq!(call.to(), ["B".to_string()]);
        assert_eq!(call.text(), Some("go"));
    }

    #[test]
    fn test_note_record_requires_over() {
        let record = AnnotationRecord::Comment(NoteRecord {
            cases: vec![case_ref("c1", None)],
            over: vec![],
            text: Some("text".to_string()),
        });
        assert!(record.into_element().is_none());
    }

    #[test]
    fn test_malformed_order_reads_as_missing() {
        let case: CaseRefRecord =
            serde_json::from_str(r#"{ "name": "c1", "order": "first" }"#).unwrap();
        assert_eq!(case.order, None);

        let numeric_text: CaseRefRecord =
            serde_json::from_str(r#"{ "name": "c1", "order": " 2.5 " }"#).unwrap();
        assert_eq!(numeric_text.order, Some(2.5));

        let record: AnnotationRecord = serde_json::from_str(
            r#"{ "kind": "call", "cases": [{ "name": "c1", "order": "first" }],
                 "from": ["A"], "to": ["B"] }"#,
        )
        .unwrap();
        let element = record.into_element().expect("call");
        let call = element.as_call().expect("call variant");
        assert_eq!(call.case_orders("c1").collect::<Vec<_>>(), [None]);
    }

    #[test]
    fn test_malformed_type_and_scale_read_as_missing() {
        let record: AnnotationRecord = serde_json::from_str(
            r#"{ "kind": "component", "name": "svc", "type": 5, "scale": [1] }"#,
        )
        .unwrap();

        let element = record.into_element().expect("component");
        let component = element.as_component().expect("component variant");
        assert_eq!(component.kind(), ComponentKind::Participant);
        assert_eq!(component.scale(), None);
    }
}
