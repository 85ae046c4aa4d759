//! PlantUML rendering for the use-case listing.

use std::fmt::Write as _;

use super::PlantUml;
use crate::{export::Error, view::UseCaseView};

impl PlantUml {
    pub(super) fn write_use_cases(&self, out: &mut String, view: &UseCaseView<'_>) -> Result<(), Error> {
        if let Some(package) = self.package() {
            writeln!(out, "package \"{package}\" {{")?;
        }

        for case in view.cases() {
            writeln!(out, "usecase \"{}\"", case.name())?;

            // Description goes out unquoted, it may span several lines.
            if let Some(text) = case.text() {
                writeln!(out, "note right of \"{}\"", case.name())?;
                writeln!(out, "{text}")?;
                writeln!(out, "end note")?;
            }
        }

        if self.package().is_some() {
            writeln!(out, "}}")?;
        }

        Ok(())
    }
}
