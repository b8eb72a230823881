//! # Branch Placement
//!
//! A junction's side connector gets exactly one dead end. Branches are depth
//! one: the dead end has no exit that anything attaches to, and placing it
//! leaves the main cursor where the junction put it.

use std::sync::Arc;

use crate::assembler::{AssemblyListener, MazeRun};
use crate::catalog::SectionCatalog;
use crate::error::AssemblyError;
use crate::geometry::ConnectorKind;
use crate::placement::{PlacedSection, SectionHandle, SectionRole};

impl MazeRun {
    /// Hangs a dead end off `junction`'s branch pair, if it has one.
    pub(crate) fn place_branch<L: AssemblyListener + ?Sized>(
        &mut self,
        catalog: &SectionCatalog,
        junction: SectionHandle,
        listener: &mut L,
    ) {
        let Some(placed) = self.sections.get(junction.0) else {
            return;
        };
        if !placed.geometry().has_connector(ConnectorKind::Branch) {
            tracing::debug!("Junction #{} has no branch connector", junction.0);
            return;
        }
        let origin = match placed.connector(ConnectorKind::Branch) {
            Ok(origin) => origin,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        let Some(dead_end) = catalog.dead_end.as_ref() else {
            self.report(AssemblyError::MissingSection {
                role: SectionRole::DeadEnd,
            });
            return;
        };
        if !self.counts.claim(SectionRole::DeadEnd, dead_end) {
            tracing::warn!("Dead-end quota exhausted; junction #{} left open", junction.0);
            return;
        }

        let mut section = PlacedSection::instantiate(
            self.next_handle(),
            SectionRole::DeadEnd,
            0,
            Arc::clone(&dead_end.geometry),
        )
        .with_parent(junction);

        if let Err(err) = section.align_to(origin) {
            self.report(err);
        }
        self.push(section, listener);
    }
}
