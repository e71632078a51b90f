#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives tactical grids from a scenario file.

mod logging;
mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec2;
use log::info;
use tactical_grid_core::{ActorId, Command, Event, GridCoordinate, GridError, GridId, Position};
use tactical_grid_system_tactical::{
    adjacent_coordinates, find_actor_grid_position, find_optimal_placement_position,
    generate_tactical_map,
};
use tactical_grid_system_transform::world_to_grid_with_origin;
use tactical_grid_world::{apply, query, GridActorMap, World};

use scenario::{GridScenario, Scenario};

/// Builds tactical grids, moves actors across them and prints their maps.
#[derive(Debug, Parser)]
#[command(name = "tactical-grid", version)]
struct Args {
    /// TOML scenario to run instead of the built-in demo.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Print debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the tactical grid command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo()?,
    };

    print!("{}", run(&scenario)?);
    Ok(())
}

fn run(scenario: &Scenario) -> Result<String> {
    let mut world = World::new();
    let mut report = String::new();

    for (index, setup) in scenario.grids.iter().enumerate() {
        let grid = set_up_grid(&mut world, setup)
            .with_context(|| format!("failed to set up grid {}", index + 1))?;
        let section = run_grid(&world, grid, setup)
            .with_context(|| format!("failed to run scenario for {grid}"))?;
        report.push_str(&section);
    }

    Ok(report)
}

fn set_up_grid(world: &mut World, setup: &GridScenario) -> Result<GridId> {
    let grid = match submit(
        world,
        Command::CreateGrid {
            rows: setup.rows,
            cols: setup.cols,
            cell_size: setup.cell_size,
        },
    )? {
        Event::GridCreated { grid, .. } => grid,
        other => bail!("unexpected event {other:?} while creating grid"),
    };

    let [origin_x, origin_y] = setup.origin;
    if setup.origin != [0.0, 0.0] {
        let _ = submit(
            world,
            Command::RepositionGrid {
                grid,
                origin_x,
                origin_y,
            },
        )?;
    }

    Ok(grid)
}

fn submit(world: &mut World, command: Command) -> Result<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);

    match events.pop() {
        Some(Event::CommandRejected { reason }) => {
            Err(anyhow::Error::new(reason).context("command rejected"))
        }
        Some(event) => Ok(event),
        None => bail!("command produced no events"),
    }
}

fn run_grid(world: &World, grid: GridId, setup: &GridScenario) -> Result<String> {
    let entry = query::grid_by_id(world, grid)?;
    let origin = entry.origin();
    let mut report = format!(
        "{grid} {} at ({}, {})\n",
        entry.grid(),
        origin.x,
        origin.y
    );

    let mut actors = GridActorMap::new();
    for placement in &setup.placements {
        let actor = ActorId::try_from(placement.actor)?;
        let coordinate = query::coordinate_at(world, grid, placement.row, placement.col)
            .with_context(|| format!("cannot place actor {actor}"))?;
        actors = actors.place(coordinate, actor);
    }
    report.push_str(&generate_tactical_map(world, grid, &actors)?);

    if !setup.moves.is_empty() {
        for scripted in &setup.moves {
            let actor = ActorId::try_from(scripted.actor)?;
            let from = find_actor_grid_position(world, grid, &actors, actor)
                .with_context(|| format!("actor {actor} is not placed on {grid}"))?;
            let [row, col] = scripted.to;
            let to = query::coordinate_at(world, grid, row, col)
                .with_context(|| format!("cannot move actor {actor}"))?;
            actors = actors.move_actor(actor, from, to)?;

            let line = format!(
                "move actor {actor}: {} -> {}",
                from.to_grid_reference()?,
                to.to_grid_reference()?
            );
            info!("{line}");
            report.push_str(&line);
            report.push('\n');
        }
        report.push_str(&generate_tactical_map(world, grid, &actors)?);
    }

    for [x, y] in &setup.clicks {
        let outcome = match world_to_grid_with_origin(world, grid, Vec2::new(*x, *y)) {
            Ok(coordinate) => describe_cell(coordinate, &actors)?,
            Err(GridError::PositionOutOfTable { .. }) => "outside grid".to_string(),
            Err(error) => return Err(error.into()),
        };
        report.push_str(&format!("click ({x}, {y}): {outcome}\n"));
    }

    if !actors.is_empty() {
        report.push_str(&suggest_placement(world, grid, &actors)?);
    }

    Ok(report)
}

fn describe_cell(coordinate: GridCoordinate, actors: &GridActorMap) -> Result<String> {
    let reference = coordinate.to_grid_reference()?;
    Ok(match actors.actors_at(coordinate) {
        Some(ids) => {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            format!("{reference} occupied by {}", ids.join(", "))
        }
        None => format!("{reference} free"),
    })
}

fn suggest_placement(world: &World, grid: GridId, actors: &GridActorMap) -> Result<String> {
    let occupied: Vec<Position> = actors
        .occupied_coordinates()
        .into_iter()
        .map(|coordinate| Position::new(coordinate.col(), coordinate.row()))
        .collect();
    let centroid = find_optimal_placement_position(&occupied)?;
    let coordinate = query::coordinate_at(world, grid, centroid.y(), centroid.x())?;

    let neighbours = adjacent_coordinates(world, grid, coordinate)?
        .into_iter()
        .map(|neighbour| neighbour.to_grid_reference())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "suggested placement: {} (neighbours: {})\n",
        coordinate.to_grid_reference()?,
        neighbours.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenario_runs_end_to_end() {
        let scenario = Scenario::demo().expect("demo parses");

        let report = run(&scenario).expect("demo runs");

        assert!(report.starts_with("grid#0 TacticalGrid(5, 8, 32) at (64, 32)\n"));
        assert_eq!(report.matches("TACTICAL GRID STATUS:").count(), 2);
        assert!(report.contains("move actor 1: A-1 -> B-2\n"));
        assert!(report.contains("move actor 3: E-8 -> C-4\n"));
        assert!(report.contains("click (80, 48): A-1 free\n"));
        assert!(report.contains("click (10, 10): outside grid\n"));
        assert!(report.contains("suggested placement: B-3 (neighbours: A-3, B-2, B-4, C-3)\n"));
    }

    #[test]
    fn small_grid_report_is_exact() {
        let scenario = Scenario::parse(
            r#"
            [[grids]]
            rows = 2
            cols = 2
            cell_size = 10
            placements = [{ row = 0, col = 0, actor = 7 }]
            clicks = [[5.0, 5.0], [25.0, 5.0]]
            "#,
        )
        .expect("scenario parses");

        let report = run(&scenario).expect("scenario runs");

        assert_eq!(
            report,
            "grid#0 TacticalGrid(2, 2, 10) at (0, 0)\n\
             TACTICAL GRID STATUS:\n    1  2 \nA:  X  . \nB:  .  . \n\
             click (5, 5): A-1 occupied by 7\n\
             click (25, 5): outside grid\n\
             suggested placement: A-1 (neighbours: A-2, B-1)\n"
        );
    }

    #[test]
    fn invalid_grid_is_reported_with_context() {
        let scenario = Scenario::parse(
            r#"
            [[grids]]
            rows = 27
            cols = 2
            cell_size = 10
            "#,
        )
        .expect("scenario parses");

        let error = run(&scenario).expect_err("too many rows");

        assert_eq!(error.to_string(), "failed to set up grid 1");
        assert!(error
            .chain()
            .any(|cause| cause.downcast_ref::<GridError>().is_some()));
    }

    #[test]
    fn moving_an_unplaced_actor_fails() {
        let scenario = Scenario::parse(
            r#"
            [[grids]]
            rows = 2
            cols = 2
            cell_size = 10
            moves = [{ actor = 4, to = [1, 1] }]
            "#,
        )
        .expect("scenario parses");

        assert!(run(&scenario).is_err());
    }

    #[test]
    fn negative_actor_ids_are_rejected() {
        let scenario = Scenario::parse(
            r#"
            [[grids]]
            rows = 2
            cols = 2
            cell_size = 10
            placements = [{ row = 0, col = 0, actor = -1 }]
            "#,
        )
        .expect("scenario parses");

        assert!(run(&scenario).is_err());
    }
}
