//! # Demo Catalog Test
//!
//! Loads the catalog shipped in `data/maze/` and assembles it with a range
//! of seeds. The file's quotas cover the default maze shape, so every run
//! must come out complete.

use labyrinth_procedural::{AnchorName, MazeAssembler, MazeConfig, MazeSeed, SectionRole};
use labyrinth_shared::{
    Vec3, ALIGNMENT_TOLERANCE, DEFAULT_MAZE_LENGTH, DEFAULT_NUMBER_OF_TJUNCTIONS,
};

const DEMO_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/maze/catalog.toml");

fn demo_config() -> MazeConfig {
    MazeConfig::from_file(DEMO_CATALOG).expect("demo catalog should load")
}

#[test]
fn test_demo_catalog_loads() {
    let config = demo_config();
    assert_eq!(config.number_of_tjunctions, DEFAULT_NUMBER_OF_TJUNCTIONS);
    assert_eq!(config.maze_length, DEFAULT_MAZE_LENGTH);
    assert!(config.seed.is_none());

    let catalog = config.build_catalog().expect("catalog");
    assert_eq!(catalog.hallways.len(), 4);
    assert_eq!(catalog.junctions.len(), 2);
    assert!(catalog.start.is_some() && catalog.end.is_some() && catalog.dead_end.is_some());
}

#[test]
fn test_demo_catalog_assembles_full_length() {
    let config = demo_config();
    let catalog = config.build_catalog().expect("catalog");

    for seed in 0..100u64 {
        let mut assembler =
            MazeAssembler::new(catalog.clone(), config.settings(), MazeSeed::new(seed));
        let run = assembler.assemble();

        assert!(run.is_generated());
        assert!(run.diagnostics().is_empty(), "seed {seed}: {:?}", run.diagnostics());
        assert_eq!(run.main_sequence().count(), DEFAULT_MAZE_LENGTH as usize);
        assert_eq!(run.branches().count(), DEFAULT_NUMBER_OF_TJUNCTIONS as usize);

        let main: Vec<_> = run.main_sequence().collect();
        for pair in main.windows(2) {
            let exit = pair[0].anchor_position(AnchorName::B1).expect("exit");
            let entry = pair[1].anchor_position(AnchorName::A1).expect("entry");
            assert!(entry.abs_diff_eq(exit, ALIGNMENT_TOLERANCE), "seed {seed}");
        }

        // Junctions come straight after the start.
        let roles: Vec<_> = main.iter().map(|s| s.role()).collect();
        assert_eq!(&roles[1..3], &[SectionRole::Junction, SectionRole::Junction]);
    }
}

#[test]
fn test_demo_catalog_spawn_point() {
    let config = demo_config();
    let mut assembler = MazeAssembler::from_config(&config).expect("assembler");
    assembler.assemble();

    let spawn = assembler.spawn_anchor().expect("spawn anchor");
    let expected = Vec3::new(0.0, 1.0, 2.0);
    assert!(spawn.position.abs_diff_eq(expected, ALIGNMENT_TOLERANCE));
}
