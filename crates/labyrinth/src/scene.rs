//! # Scene
//!
//! Plain-data stand-in for the host's world: one [`SceneObject`] per placed
//! section, created as the assembler reports placements.
//!
//! The assembler never cleans up after itself. Re-assembling into a scene
//! that was not cleared leaves the previous maze's objects in place.

use labyrinth_procedural::{
    AssemblyListener, AssemblyPhase, MazeRun, PlacedSection, SectionHandle, SectionRole,
};
use labyrinth_shared::Transform;

/// Identifier unique for the lifetime of a scene, across clears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneObjectId(pub u64);

/// One instantiated section.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Scene-wide identifier.
    pub id: SceneObjectId,
    /// Geometry name.
    pub name: String,
    /// World transform at placement.
    pub transform: Transform,
    /// Role within the maze.
    pub role: SectionRole,
    /// Handle within the run that placed it.
    pub section: SectionHandle,
}

/// Everything currently instantiated.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects in instantiation order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if nothing is instantiated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects with the given role.
    pub fn with_role(&self, role: SectionRole) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |object| object.role == role)
    }

    /// Destroys every object. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.objects.len();
        self.objects.clear();
        tracing::debug!("Scene cleared ({} objects)", removed);
        removed
    }

    fn instantiate(&mut self, section: &PlacedSection) -> SceneObjectId {
        let id = SceneObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            name: section.name().to_owned(),
            transform: section.transform(),
            role: section.role(),
            section: section.handle(),
        });
        id
    }
}

impl AssemblyListener for Scene {
    fn on_phase(&mut self, phase: AssemblyPhase, run: &MazeRun) {
        if phase == AssemblyPhase::Init && !self.objects.is_empty() {
            tracing::warn!(
                "Run {} assembling into a scene with {} stale objects",
                run.run_index(),
                self.objects.len()
            );
        }
    }

    fn on_section_placed(&mut self, section: &PlacedSection) {
        self.instantiate(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_procedural::{
        ConnectorKind, MazeAssembler, MazeSeed, MazeSettings, SectionCatalog, SectionGeometry,
        SectionType,
    };
    use labyrinth_shared::Vec3;

    fn assembler() -> MazeAssembler {
        let room = SectionGeometry::new("room")
            .with_connector(
                ConnectorKind::Entry,
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            )
            .with_connector(
                ConnectorKind::Exit,
                Vec3::new(-1.0, 0.0, 4.0),
                Vec3::new(1.0, 0.0, 4.0),
            );
        let catalog = SectionCatalog::new()
            .with_start(SectionType::unlimited(room.clone()))
            .with_end(SectionType::unlimited(room.clone()))
            .with_hallway(SectionType::unlimited(room));
        let settings = MazeSettings {
            number_of_tjunctions: 0,
            maze_length: 4,
        };
        MazeAssembler::new(catalog, settings, MazeSeed::new(1))
    }

    #[test]
    fn test_scene_mirrors_run() {
        let mut scene = Scene::new();
        let mut assembler = assembler();
        let run = assembler.assemble_with(&mut scene);

        assert_eq!(scene.len(), run.sections().len());
        for (object, section) in scene.objects().iter().zip(run.sections()) {
            assert_eq!(object.section, section.handle());
            assert_eq!(object.transform, section.transform());
        }
        assert_eq!(scene.with_role(SectionRole::Hallway).count(), 2);
    }

    #[test]
    fn test_rerun_without_clear_accumulates() {
        let mut scene = Scene::new();
        let mut assembler = assembler();
        assembler.assemble_with(&mut scene);
        assembler.assemble_with(&mut scene);

        assert_eq!(scene.len(), 8);
        assert_eq!(scene.clear(), 8);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut scene = Scene::new();
        let mut assembler = assembler();
        assembler.assemble_with(&mut scene);
        let last = scene.objects().last().map(|o| o.id);

        scene.clear();
        assembler.assemble_with(&mut scene);
        assert!(scene.objects().first().map(|o| o.id) > last);
    }
}
