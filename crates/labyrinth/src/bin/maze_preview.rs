//! # LABYRINTH Maze Preview
//!
//! Headless preview of a section catalog: assembles a maze, prints every
//! placed section, then runs one timed reset to show regeneration.
//!
//! Run with: cargo run --bin maze_preview -- [catalog.toml] [seed]
//!
//! Without a path the bundled demo catalog is used. A seed argument
//! overrides any seed pinned in the file.

use std::time::Duration;

use labyrinth::procedural::{MazeConfig, MazeRun};
use labyrinth::{GameSession, SessionConfig};

/// Demo catalog compiled into the binary.
const DEMO_CATALOG: &str = include_str!("../../../../data/maze/catalog.toml");

/// Frame step used to drive the reset timer.
const TICK: Duration = Duration::from_millis(500);

fn print_run(run: &MazeRun) {
    println!(
        "   Run {} | seed {:#018x} | {} main-sequence | {} branches",
        run.run_index(),
        run.seed().value(),
        run.main_sequence().count(),
        run.branches().count()
    );
    println!();
    println!("   {:>3}  {:<10}  {:<22}  {:>24}  ALIGNED", "#", "ROLE", "SECTION", "POSITION");
    for section in run.sections() {
        let p = section.transform().position;
        let indent = if section.parent().is_some() { "  └ " } else { "" };
        println!(
            "   {:>3}  {:<10}  {:<22}  ({:>6.2}, {:>6.2}, {:>6.2})  {}",
            section.handle().0,
            section.role(),
            format!("{indent}{}", section.name()),
            p.x,
            p.y,
            p.z,
            if section.is_aligned() { "yes" } else { "-" }
        );
    }

    if let Some(end) = run.end_section() {
        let p = end.transform().position;
        println!();
        println!("   ✓ Exit '{}' at ({:.2}, {:.2}, {:.2})", end.name(), p.x, p.y, p.z);
    }

    if run.diagnostics().is_empty() {
        println!();
        println!("   ✓ No diagnostics");
    } else {
        println!();
        for diagnostic in run.diagnostics() {
            println!("   ✗ {diagnostic}");
        }
    }
}

fn load_config(path: Option<&str>) -> MazeConfig {
    let loaded = match path {
        Some(path) => {
            println!("📂 Loading catalog from {path} ...");
            MazeConfig::from_file(path)
        }
        None => {
            println!("📂 Loading bundled demo catalog ...");
            MazeConfig::from_toml_str(DEMO_CATALOG)
        }
    };

    match loaded {
        Ok(config) => {
            println!(
                "   ✓ {} geometries, {} hallway types, {} T-junction types",
                config.geometries.len(),
                config.hallways.len(),
                config.junctions.len()
            );
            config
        }
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                  LABYRINTH MAZE PREVIEW v0.1.0");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = load_config(args.first().map(String::as_str));

    if let Some(raw) = args.get(1) {
        match raw.parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(e) => {
                eprintln!("   ✗ FATAL: invalid seed '{raw}': {e}");
                std::process::exit(1);
            }
        }
    }

    let session_config = SessionConfig::default();
    let mut session = match GameSession::from_maze_config(&config, session_config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    };

    // === FIRST MAZE ===
    println!();
    println!(
        "🏗️  Assembling maze (length {}, T-junctions {}) ...",
        config.maze_length, config.number_of_tjunctions
    );
    let spawned = session.start().map(|player| player.transform);
    if let Some(run) = session.run() {
        print_run(run);
    }
    match spawned {
        Ok(spawn) => println!(
            "   ✓ Player spawned at ({:.2}, {:.2}, {:.2})",
            spawn.position.x, spawn.position.y, spawn.position.z
        ),
        Err(e) => println!("   ✗ Player not spawned: {e}"),
    }

    // === TIMED RESET ===
    println!();
    println!("🔄 Requesting reset ({:?} delay) ...", session_config.reset_delay);
    if let Err(e) = session.request_reset() {
        eprintln!("   ✗ FATAL: {e}");
        std::process::exit(1);
    }

    let mut elapsed = Duration::ZERO;
    loop {
        elapsed += TICK;
        match session.update(TICK) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => {
                println!("   ✗ Reset fired but player not spawned: {e}");
                break;
            }
        }
    }
    println!("   ✓ Regenerated after {elapsed:?}, scene holds {} objects", session.scene().len());
    if let Some(run) = session.run() {
        print_run(run);
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
}
