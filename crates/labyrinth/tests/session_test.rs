//! # Session Integration Test
//!
//! Drives a full session over a small catalog:
//!
//! 1. Spawning before generation is refused
//! 2. `start()` fills the scene and spawns the player on the spawn point
//! 3. A requested reset waits out its timer, then regenerates cleanly
//! 4. A start room without a spawn point is an error for the caller

use std::time::Duration;

use labyrinth::procedural::{
    AnchorName, AssemblyError, ConnectorKind, MazeAssembler, MazeConfig, MazeSeed, MazeSettings,
    SectionCatalog, SectionGeometry, SectionRole, SectionType,
};
use labyrinth::shared::{Vec3, ALIGNMENT_TOLERANCE, PLAYER_TAG};
use labyrinth::{GameSession, PlayerSpawner, SessionConfig, SessionError};

const CATALOG: &str = r#"
    seed = 21
    maze_length = 6
    number_of_tjunctions = 1

    [[geometry]]
    name = "lobby"
    anchors = [
      { name = "B1", position = [-1.0, 0.0, 5.0] },
      { name = "B2", position = [1.0, 0.0, 5.0] },
      { name = "SpawnPoint", position = [0.0, 1.0, 2.0], rotation = [0.0, 0.7071068, 0.0, 0.7071068] },
    ]

    [[geometry]]
    name = "corridor"
    anchors = [
      { name = "A1", position = [-1.0, 0.0, 0.0] },
      { name = "A2", position = [1.0, 0.0, 0.0] },
      { name = "B1", position = [-1.0, 0.0, 4.0] },
      { name = "B2", position = [1.0, 0.0, 4.0] },
    ]

    [[geometry]]
    name = "tee"
    anchors = [
      { name = "A1", position = [-1.0, 0.0, 0.0] },
      { name = "A2", position = [1.0, 0.0, 0.0] },
      { name = "B1", position = [-1.0, 0.0, 4.0] },
      { name = "B2", position = [1.0, 0.0, 4.0] },
      { name = "C1", position = [1.0, 0.0, 3.0] },
      { name = "C2", position = [1.0, 0.0, 1.0] },
    ]

    [[geometry]]
    name = "cap"
    anchors = [
      { name = "A1", position = [-1.0, 0.0, 0.0] },
      { name = "A2", position = [1.0, 0.0, 0.0] },
    ]

    [start]
    geometry = "lobby"

    [end]
    geometry = "cap"

    [dead_end]
    geometry = "cap"

    [[hallways]]
    geometry = "corridor"

    [[junctions]]
    geometry = "tee"
"#;

fn config() -> MazeConfig {
    MazeConfig::from_toml_str(CATALOG).expect("catalog should parse")
}

fn session() -> GameSession {
    let session_config = SessionConfig {
        reset_delay: Duration::from_secs(4),
    };
    GameSession::from_maze_config(&config(), session_config).expect("session")
}

#[test]
fn test_spawn_before_generation_is_not_ready() {
    let assembler = MazeAssembler::from_config(&config()).expect("assembler");
    let spawner = PlayerSpawner::default();

    assert_eq!(
        spawner.spawn(&assembler),
        Err(SessionError::Assembly(AssemblyError::NotReady))
    );
}

#[test]
fn test_start_spawns_player_on_spawn_point() {
    let mut session = session();
    assert!(session.player().is_none());

    let player = session.start().expect("player").clone();
    assert_eq!(player.tag, PLAYER_TAG);
    assert!(player.transform.position.abs_diff_eq(Vec3::new(0.0, 1.0, 2.0), ALIGNMENT_TOLERANCE));
    // Spawn point faces +X.
    assert!((player.transform.rotation * Vec3::Z).abs_diff_eq(Vec3::X, 1e-4));

    let run = session.run().expect("run");
    assert!(run.is_generated());
    assert_eq!(run.main_sequence().count(), 6);
    assert_eq!(run.branches().count(), 1);
    assert_eq!(session.scene().len(), 7);
    assert_eq!(session.scene().with_role(SectionRole::DeadEnd).count(), 1);
}

#[test]
fn test_reset_waits_for_timer() {
    let mut session = session();
    assert_eq!(session.request_reset(), Err(SessionError::NotStarted));

    session.start().expect("player");
    session.request_reset().expect("armed");
    session.request_reset().expect("already armed");
    assert_eq!(session.reset_remaining(), Some(Duration::from_secs(4)));

    for _ in 0..3 {
        assert!(!session.update(Duration::from_secs(1)).expect("tick"));
    }
    assert_eq!(session.resets(), 0);
    assert_eq!(session.assembler().last_run().map(|r| r.run_index()), Some(1));

    assert!(session.update(Duration::from_secs(1)).expect("tick"));
    assert_eq!(session.resets(), 1);
    assert!(session.reset_remaining().is_none());
    assert_eq!(session.assembler().last_run().map(|r| r.run_index()), Some(2));
    assert!(!session.update(Duration::from_secs(10)).expect("idle tick"));
}

#[test]
fn test_reset_leaves_no_stale_instances() {
    let mut session = session();
    session.start().expect("player");
    let first_ids: Vec<_> = session.scene().objects().iter().map(|o| o.id).collect();

    for _ in 0..3 {
        session.reset_now().expect("player");
        let run_sections = session.run().map_or(0, |r| r.sections().len());
        assert_eq!(session.scene().len(), run_sections);
        assert!(session
            .scene()
            .objects()
            .iter()
            .all(|object| !first_ids.contains(&object.id)));
        assert!(session.player().is_some());
    }
}

#[test]
fn test_missing_spawn_point_reported_to_caller() {
    let lobby = SectionGeometry::new("lobby").with_connector(
        ConnectorKind::Exit,
        Vec3::new(-1.0, 0.0, 5.0),
        Vec3::new(1.0, 0.0, 5.0),
    );
    let corridor = SectionGeometry::new("corridor")
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
        .with_start(SectionType::unlimited(lobby))
        .with_end(SectionType::unlimited(corridor.clone()))
        .with_hallway(SectionType::unlimited(corridor));
    let settings = MazeSettings {
        number_of_tjunctions: 0,
        maze_length: 3,
    };
    let assembler = MazeAssembler::new(catalog, settings, MazeSeed::new(5));
    let mut session = GameSession::new(assembler, SessionConfig::default());

    let err = session.start().unwrap_err();
    assert_eq!(
        err,
        SessionError::Assembly(AssemblyError::MissingAnchor {
            section: "lobby".to_owned(),
            anchor: AnchorName::SpawnPoint,
        })
    );
    assert!(session.player().is_none());
    assert_eq!(session.scene().len(), 3);
}
