//! # Maze Assembler
//!
//! Runs one generation pass through a fixed sequence of phases:
//!
//! ```text
//! Init -> PlaceStart -> PlaceJunctions -> PlaceFiller -> PlaceEnd -> Done
//!                            |
//!                            +-- one dead end per junction (branch.rs)
//! ```
//!
//! Every main-sequence section after the start is welded onto the cursor, the
//! exit pair of the section placed before it. Branches never move the cursor.
//!
//! A run always reaches `Done`. Configuration problems are recorded as
//! diagnostics on the run and the affected step is skipped or left unaligned;
//! exhausted pools just make the maze shorter.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use labyrinth_shared::{Transform, Vec3, DEFAULT_MAZE_LENGTH, DEFAULT_NUMBER_OF_TJUNCTIONS};

use crate::catalog::{select, SectionCatalog, SectionCounts, SectionType};
use crate::error::{AssemblyError, AssemblyResult};
use crate::geometry::{AnchorName, ConnectorKind, ConnectorPair};
use crate::placement::{PlacedSection, SectionHandle, SectionRole};
use crate::seed::MazeSeed;

/// Phases of one assembly run, in strict order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssemblyPhase {
    /// Counts zeroed, cursor cleared, not generated.
    Init,
    /// Start section at the origin.
    PlaceStart,
    /// T-junctions, each with its dead-end branch.
    PlaceJunctions,
    /// Hallways drawn from the filler pool.
    PlaceFiller,
    /// End section, closing the main sequence.
    PlaceEnd,
    /// Generation complete.
    Done,
}

impl AssemblyPhase {
    /// The phase that follows this one. `Done` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Init => Self::PlaceStart,
            Self::PlaceStart => Self::PlaceJunctions,
            Self::PlaceJunctions => Self::PlaceFiller,
            Self::PlaceFiller => Self::PlaceEnd,
            Self::PlaceEnd | Self::Done => Self::Done,
        }
    }
}

/// Observer of a run in progress.
///
/// Hosts use it to instantiate what gets placed; tests use it to watch phases.
pub trait AssemblyListener {
    /// Called on entering each phase. At `Done` the run already reports generated.
    fn on_phase(&mut self, _phase: AssemblyPhase, _run: &MazeRun) {}

    /// Called after each section (main sequence or branch) is placed.
    fn on_section_placed(&mut self, _section: &PlacedSection) {}
}

impl AssemblyListener for () {}

/// Shape of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeSettings {
    /// T-junctions placed right after the start section.
    pub number_of_tjunctions: u32,
    /// Target main-sequence length, start and end included.
    pub maze_length: u32,
}

impl MazeSettings {
    /// Hallway draws attempted during `PlaceFiller`.
    #[must_use]
    pub const fn filler_count(&self) -> u32 {
        self.maze_length
            .saturating_sub(2)
            .saturating_sub(self.number_of_tjunctions)
    }
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            number_of_tjunctions: DEFAULT_NUMBER_OF_TJUNCTIONS,
            maze_length: DEFAULT_MAZE_LENGTH,
        }
    }
}

/// One generation pass and everything it placed.
#[derive(Clone, Debug)]
pub struct MazeRun {
    seed: MazeSeed,
    run_index: u64,
    phase: AssemblyPhase,
    is_generated: bool,
    pub(crate) counts: SectionCounts,
    pub(crate) cursor: Option<ConnectorPair>,
    pub(crate) sections: Vec<PlacedSection>,
    pub(crate) diagnostics: Vec<AssemblyError>,
}

impl MazeRun {
    fn new(seed: MazeSeed, run_index: u64, catalog: &SectionCatalog) -> Self {
        Self {
            seed,
            run_index,
            phase: AssemblyPhase::Init,
            is_generated: false,
            counts: SectionCounts::for_catalog(catalog),
            cursor: None,
            sections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Seed of the assembler that produced this run.
    #[must_use]
    pub const fn seed(&self) -> MazeSeed {
        self.seed
    }

    /// 1-based index of this run on its assembler.
    #[must_use]
    pub const fn run_index(&self) -> u64 {
        self.run_index
    }

    /// Current (or, once finished, final) phase.
    #[must_use]
    pub const fn phase(&self) -> AssemblyPhase {
        self.phase
    }

    /// True only once the run has reached `Done`.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.is_generated
    }

    /// Usage per catalog entry.
    #[must_use]
    pub fn counts(&self) -> &SectionCounts {
        &self.counts
    }

    /// Exit pair the next main-sequence section would weld onto.
    #[must_use]
    pub const fn cursor(&self) -> Option<ConnectorPair> {
        self.cursor
    }

    /// Every placed section, in placement order.
    #[must_use]
    pub fn sections(&self) -> &[PlacedSection] {
        &self.sections
    }

    /// Section by handle.
    #[must_use]
    pub fn section(&self, handle: SectionHandle) -> Option<&PlacedSection> {
        self.sections.get(handle.0)
    }

    /// Start, junctions, hallways and end, in path order.
    pub fn main_sequence(&self) -> impl Iterator<Item = &PlacedSection> {
        self.sections.iter().filter(|s| s.role().is_main_sequence())
    }

    /// Dead ends hanging off junctions.
    pub fn branches(&self) -> impl Iterator<Item = &PlacedSection> {
        self.sections.iter().filter(|s| !s.role().is_main_sequence())
    }

    /// The start section, if one was placed.
    #[must_use]
    pub fn start_section(&self) -> Option<&PlacedSection> {
        self.sections.iter().find(|s| s.role() == SectionRole::Start)
    }

    /// The end section, if one was placed.
    #[must_use]
    pub fn end_section(&self) -> Option<&PlacedSection> {
        self.sections.iter().find(|s| s.role() == SectionRole::End)
    }

    /// Configuration problems met during the run.
    #[must_use]
    pub fn diagnostics(&self) -> &[AssemblyError] {
        &self.diagnostics
    }

    /// World position and orientation of the start section's spawn anchor.
    pub fn spawn_anchor(&self) -> AssemblyResult<Transform> {
        if !self.is_generated {
            return Err(AssemblyError::NotReady);
        }
        let start = self.start_section().ok_or(AssemblyError::MissingSection {
            role: SectionRole::Start,
        })?;
        start
            .anchor_transform(AnchorName::SpawnPoint)
            .ok_or_else(|| AssemblyError::MissingAnchor {
                section: start.name().to_owned(),
                anchor: AnchorName::SpawnPoint,
            })
    }

    fn enter(&mut self, phase: AssemblyPhase) {
        self.phase = phase;
        self.is_generated = phase == AssemblyPhase::Done;
    }

    pub(crate) fn next_handle(&self) -> SectionHandle {
        SectionHandle(self.sections.len())
    }

    pub(crate) fn report(&mut self, diagnostic: AssemblyError) {
        tracing::error!("Maze run {}: {}", self.run_index, diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn push<L: AssemblyListener + ?Sized>(
        &mut self,
        section: PlacedSection,
        listener: &mut L,
    ) -> SectionHandle {
        tracing::debug!(
            "Placed {} '{}' as #{} at {:?} (aligned: {})",
            section.role(),
            section.name(),
            section.handle().0,
            section.transform().position,
            section.is_aligned()
        );
        listener.on_section_placed(&section);
        let handle = section.handle();
        self.sections.push(section);
        handle
    }

    /// Instantiates a main-sequence section and welds it onto the cursor.
    ///
    /// Returns the section and whether alignment succeeded. With no cursor the
    /// section stays at its default transform; the cause was already reported.
    fn weld(
        &mut self,
        role: SectionRole,
        index: usize,
        section_type: &SectionType,
    ) -> (PlacedSection, bool) {
        let mut section = PlacedSection::instantiate(
            self.next_handle(),
            role,
            index,
            Arc::clone(&section_type.geometry),
        );

        let Some(cursor) = self.cursor else {
            tracing::debug!("No cursor; {} '{}' left unaligned", role, section.name());
            return (section, false);
        };

        match section.align_to(cursor) {
            Ok(()) => (section, true),
            Err(err) => {
                self.report(err);
                (section, false)
            }
        }
    }

    /// Moves the cursor to a freshly aligned section's exit pair.
    fn advance_cursor(&mut self, section: &PlacedSection) {
        match section.connector(ConnectorKind::Exit) {
            Ok(exit) => self.cursor = Some(exit),
            Err(err) => {
                self.cursor = None;
                self.report(err);
            }
        }
    }

    fn place_start<L: AssemblyListener + ?Sized>(
        &mut self,
        catalog: &SectionCatalog,
        listener: &mut L,
    ) {
        let Some(start) = catalog.start.as_ref() else {
            self.report(AssemblyError::MissingSection {
                role: SectionRole::Start,
            });
            return;
        };
        if !self.counts.claim(SectionRole::Start, start) {
            self.report(AssemblyError::QuotaExhausted {
                role: SectionRole::Start,
            });
            return;
        }

        let mut section = PlacedSection::instantiate(
            self.next_handle(),
            SectionRole::Start,
            0,
            Arc::clone(&start.geometry),
        );
        section.set_position(Vec3::ZERO);

        self.advance_cursor(&section);
        self.push(section, listener);
    }

    fn place_junction<L: AssemblyListener + ?Sized>(
        &mut self,
        catalog: &SectionCatalog,
        rng: &mut ChaCha8Rng,
        listener: &mut L,
    ) {
        let pool = self.counts.pool_mut(SectionRole::Junction);
        let Some(index) = select(&catalog.junctions, pool, rng) else {
            tracing::debug!("T-junction pool exhausted; skipping");
            return;
        };

        let (section, aligned) = self.weld(SectionRole::Junction, index, &catalog.junctions[index]);
        if aligned {
            self.advance_cursor(&section);
        }
        let junction = self.push(section, listener);
        if aligned {
            self.place_branch(catalog, junction, listener);
        }
    }

    fn place_filler<L: AssemblyListener + ?Sized>(
        &mut self,
        catalog: &SectionCatalog,
        rng: &mut ChaCha8Rng,
        listener: &mut L,
    ) {
        let pool = self.counts.pool_mut(SectionRole::Hallway);
        let Some(index) = select(&catalog.hallways, pool, rng) else {
            tracing::debug!("Hallway pool exhausted; skipping");
            return;
        };

        let (section, aligned) = self.weld(SectionRole::Hallway, index, &catalog.hallways[index]);
        if aligned {
            self.advance_cursor(&section);
        }
        self.push(section, listener);
    }

    fn place_end<L: AssemblyListener + ?Sized>(
        &mut self,
        catalog: &SectionCatalog,
        listener: &mut L,
    ) {
        let Some(end) = catalog.end.as_ref() else {
            self.report(AssemblyError::MissingSection {
                role: SectionRole::End,
            });
            return;
        };
        if !self.counts.claim(SectionRole::End, end) {
            self.report(AssemblyError::QuotaExhausted {
                role: SectionRole::End,
            });
            return;
        }

        let (section, _) = self.weld(SectionRole::End, 0, end);
        self.push(section, listener);
    }
}

/// Owns the catalog, the random source and the most recent run.
#[derive(Debug)]
pub struct MazeAssembler {
    catalog: SectionCatalog,
    settings: MazeSettings,
    seed: MazeSeed,
    rng: ChaCha8Rng,
    runs_started: u64,
    run: Option<MazeRun>,
}

impl MazeAssembler {
    /// Creates an assembler whose draws all derive from `seed`.
    #[must_use]
    pub fn new(catalog: SectionCatalog, settings: MazeSettings, seed: MazeSeed) -> Self {
        Self {
            catalog,
            settings,
            seed,
            rng: seed.rng(),
            runs_started: 0,
            run: None,
        }
    }

    /// The catalog being drawn from.
    #[must_use]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    /// Maze shape.
    #[must_use]
    pub const fn settings(&self) -> MazeSettings {
        self.settings
    }

    /// Seed the random source was built from.
    #[must_use]
    pub const fn seed(&self) -> MazeSeed {
        self.seed
    }

    /// Restarts the random source from `seed`.
    pub fn reseed(&mut self, seed: MazeSeed) {
        self.seed = seed;
        self.rng = seed.rng();
        self.runs_started = 0;
    }

    /// True once the latest run has completed.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.run.as_ref().is_some_and(MazeRun::is_generated)
    }

    /// The latest completed run.
    #[must_use]
    pub fn last_run(&self) -> Option<&MazeRun> {
        self.run.as_ref()
    }

    /// Spawn anchor of the latest run's start section.
    ///
    /// `NotReady` until a run has completed.
    pub fn spawn_anchor(&self) -> AssemblyResult<Transform> {
        self.run
            .as_ref()
            .ok_or(AssemblyError::NotReady)
            .and_then(MazeRun::spawn_anchor)
    }

    /// Runs a full assembly pass.
    pub fn assemble(&mut self) -> &MazeRun {
        self.assemble_with(&mut ())
    }

    /// Runs a full assembly pass, reporting progress to `listener`.
    ///
    /// The previous run is discarded first. Sections it placed are the host's
    /// to clean up; this does not touch them.
    pub fn assemble_with<L: AssemblyListener + ?Sized>(&mut self, listener: &mut L) -> &MazeRun {
        self.run = None;
        self.runs_started += 1;

        let mut run = MazeRun::new(self.seed, self.runs_started, &self.catalog);
        tracing::info!(
            "Assembling maze run {} (seed {:#x}, length {}, T-junctions {})",
            self.runs_started,
            self.seed.value(),
            self.settings.maze_length,
            self.settings.number_of_tjunctions
        );

        let mut phase = AssemblyPhase::Init;
        loop {
            run.enter(phase);
            listener.on_phase(phase, &run);

            match phase {
                AssemblyPhase::Init => {}
                AssemblyPhase::PlaceStart => run.place_start(&self.catalog, listener),
                AssemblyPhase::PlaceJunctions => {
                    for _ in 0..self.settings.number_of_tjunctions {
                        run.place_junction(&self.catalog, &mut self.rng, listener);
                    }
                }
                AssemblyPhase::PlaceFiller => {
                    for _ in 0..self.settings.filler_count() {
                        run.place_filler(&self.catalog, &mut self.rng, listener);
                    }
                }
                AssemblyPhase::PlaceEnd => run.place_end(&self.catalog, listener),
                AssemblyPhase::Done => break,
            }

            phase = phase.next();
        }

        tracing::info!(
            "Maze run {} complete: {} main-sequence sections, {} branches, {} diagnostics",
            run.run_index,
            run.main_sequence().count(),
            run.branches().count(),
            run.diagnostics.len()
        );

        self.run.insert(run)
    }
}
