//! Grid construction and additive expansion through IncreasePlotSize.

use homestead_core::{
    command::Action,
    config::NewGameConfig,
    plot::{build_grid, GrowthStage},
    snapshot::SaveSnapshot,
    state::{GameState, GridSize},
    transition::{apply, plot_expansion_cost, transition, Rejection, MAX_GRID_SIDE},
};
use chrono::Utc;
use std::collections::HashSet;

#[test]
fn grid_covers_every_coordinate_once() {
    let plots = build_grid(3, 6);
    assert_eq!(plots.len(), 18);

    let coords: HashSet<(u32, u32)> = plots.iter().map(|p| (p.position.x, p.position.y)).collect();
    assert_eq!(coords.len(), 18);
    assert!(plots.iter().all(|p| p.id == format!("plot-{}-{}", p.position.x, p.position.y)));
    assert!(plots.iter().all(|p| p.growth_stage() == GrowthStage::Empty));
}

#[test]
fn expansion_preserves_every_existing_plot() {
    let state = GameState::new_game(&NewGameConfig { starting_coins: 10_000, ..NewGameConfig::default() });
    // Put something in the ground so preserved state is observable.
    let state = transition(
        state,
        &Action::PlantCrop { plot_id: "plot-3-3".into(), crop_id: "potato".into() },
        1_000,
    );
    let before = state.plots.clone();

    let next = transition(state, &Action::IncreasePlotSize, 2_000);

    assert_eq!(next.grid_size, GridSize { rows: 5, cols: 5 });
    assert_eq!(next.plots.len(), 25);
    assert_eq!(&next.plots[..16], &before[..]);
    assert!(next.plots[16..].iter().all(|p| p.is_empty()));
    assert!(next.plot("plot-4-4").is_some());
    assert!(next.plot("plot-3-3").unwrap().planting().is_some());
}

#[test]
fn repeated_expansion_keeps_ids_unique() {
    let mut state = GameState::new_game(&NewGameConfig { starting_coins: 100_000, ..NewGameConfig::default() });
    for _ in 0..4 {
        state = transition(state, &Action::IncreasePlotSize, 0);
    }

    assert_eq!(state.grid_size, GridSize { rows: 8, cols: 8 });
    assert_eq!(state.plots.len(), 64);
    let ids: HashSet<&str> = state.plots.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 64);
    // 16×25 + 25×25 + 36×25 + 49×25
    assert_eq!(state.coins, 100_000 - 3_150);
}

#[test]
fn custom_starting_grid_is_honoured() {
    let state = GameState::new_game(&NewGameConfig {
        grid: GridSize { rows: 2, cols: 3 },
        ..NewGameConfig::default()
    });
    assert_eq!(state.plots.len(), 6);
    assert!(state.plot("plot-2-1").is_some());
    assert!(state.plot("plot-1-2").is_none());
}

#[test]
fn oversized_loaded_grid_refuses_to_grow() {
    let mut saved = GameState::default();
    saved.coins = u64::MAX;
    saved.grid_size = GridSize { rows: 4_000_000_000, cols: 4_000_000_000 };
    let load = Action::LoadGame { snapshot: Box::new(SaveSnapshot::capture(&saved, Utc::now())) };
    let state = transition(GameState::default(), &load, 0);
    assert_eq!(state.grid_size, saved.grid_size);

    assert_eq!(plot_expansion_cost(&state), None);
    let outcome = apply(&state, &Action::IncreasePlotSize, 0);
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::GridTooLarge { rows: 4_000_000_000, cols: 4_000_000_000 })
    );
    assert_eq!(transition(state.clone(), &Action::IncreasePlotSize, 0), state);

    saved.grid_size = GridSize { rows: u32::MAX, cols: 3 };
    assert!(!apply(&saved, &Action::IncreasePlotSize, 0).is_applied());
}

#[test]
fn grid_stops_growing_at_its_largest_side() {
    let mut state = GameState::default();
    state.coins = u64::MAX;
    state.grid_size = GridSize { rows: MAX_GRID_SIDE - 1, cols: 2 };

    let grown = transition(state, &Action::IncreasePlotSize, 0);
    assert_eq!(grown.grid_size, GridSize { rows: MAX_GRID_SIDE, cols: 3 });

    let outcome = apply(&grown, &Action::IncreasePlotSize, 0);
    assert!(matches!(outcome.rejection(), Some(Rejection::GridTooLarge { .. })));
}
