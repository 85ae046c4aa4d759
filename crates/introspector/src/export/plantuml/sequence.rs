//! PlantUML rendering for sequence diagrams.

use std::fmt::Write as _;

use introspector_core::model::{Case, Component};

use super::{PlantUml, label, quoted};
use crate::{
    export::Error,
    view::{Message, NoteStep, SequenceView, Step},
};

impl PlantUml {
    pub(super) fn write_sequence(&self, out: &mut String, view: &SequenceView<'_>) -> Result<(), Error> {
        write_title(out, view.case())?;

        for participant in view.participants() {
            write_participant(out, participant)?;
        }

        for step in view.steps() {
            match step {
                Step::Message(message) => write_message(out, message)?,
                Step::Note(note) => write_note(out, note)?,
            }
        }

        Ok(())
    }
}

fn write_title(out: &mut String, case: &Case) -> Result<(), Error> {
    let Some(text) = case.text() else {
        return Ok(());
    };

    writeln!(out, "title")?;
    writeln!(out, "{text}")?;
    writeln!(out, "end title")?;
    Ok(())
}

fn write_participant(out: &mut String, component: &Component) -> Result<(), Error> {
    writeln!(
        out,
        "{} \"{}\"",
        component.kind().sequence_keyword(),
        component.name()
    )?;

    if let Some(text) = component.text() {
        writeln!(out, "/ note over \"{}\"", component.name())?;
        writeln!(out, "{text}")?;
        writeln!(out, "end note")?;
    }

    Ok(())
}

fn write_message(out: &mut String, message: &Message<'_>) -> Result<(), Error> {
    write!(out, "\"{}\" -> \"{}\"", message.from(), message.to())?;
    label(out, message.text())?;
    writeln!(out)?;
    Ok(())
}

fn write_note(out: &mut String, note: &NoteStep<'_>) -> Result<(), Error> {
    let over = note
        .over()
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(",");

    if note.over().len() == 1 {
        write!(out, "note over {over} : ")?;
        quoted(out, note.text())?;
        writeln!(out)?;
    } else {
        writeln!(out, "note over {over}")?;
        quoted(out, note.text())?;
        writeln!(out)?;
        writeln!(out, "end note")?;
    }

    Ok(())
}
