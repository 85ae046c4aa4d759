//! PlantUML rendering for component diagrams.

use std::fmt::Write as _;

use super::{PlantUml, label, quoted};
use crate::{
    export::Error,
    view::{ComponentNode, ComponentView, Link},
};

const DIVIDER: &str = "----";

impl PlantUml {
    pub(super) fn write_components(
        &self,
        out: &mut String,
        view: &ComponentView<'_>,
    ) -> Result<(), Error> {
        for node in view.nodes() {
            write_node(out, node)?;
        }

        for link in view.links() {
            write_link(out, link)?;
        }

        Ok(())
    }
}

fn write_node(out: &mut String, node: &ComponentNode<'_>) -> Result<(), Error> {
    let component = node.component();
    writeln!(
        out,
        "{} \"{}\"",
        component.kind().component_keyword(),
        component.name()
    )?;

    let own = component.text();
    if own.is_none() && node.notes().is_empty() {
        return Ok(());
    }

    writeln!(out, "note right of [\"{}\"]", component.name())?;
    if let Some(text) = own {
        writeln!(out, "{text}")?;
    }
    for (idx, note) in node.notes().iter().enumerate() {
        if idx > 0 || own.is_some() {
            writeln!(out, "{DIVIDER}")?;
        }
        quoted(out, Some(*note))?;
        writeln!(out)?;
    }
    writeln!(out, "end note")?;

    Ok(())
}

fn write_link(out: &mut String, link: &Link<'_>) -> Result<(), Error> {
    write!(out, "[\"{}\"] --> [\"{}\"]", link.from(), link.to())?;
    label(out, link.text())?;
    writeln!(out)?;
    Ok(())
}
