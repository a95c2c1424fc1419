//! Growth timing: stage derivation, percent, and the plant → ready → harvest cycle.

use homestead_core::{
    catalog::{self, find_crop},
    command::Action,
    plot::{growth_percent, growth_stage_of, GrowthStage},
    state::GameState,
    transition::{apply, transition, Outcome, Rejection},
};

const T0: u64 = 1_000;

fn planted_state() -> GameState {
    transition(
        GameState::default(),
        &Action::PlantCrop { plot_id: "plot-0-0".into(), crop_id: "potato".into() },
        T0,
    )
}

#[test]
fn potato_ripens_exactly_at_seventy_seconds() {
    let potato = find_crop("potato").unwrap();
    assert_eq!(potato.growth_duration_seconds, 70);

    assert_eq!(growth_stage_of(potato, T0, 70_999), GrowthStage::Growing);
    assert_eq!(growth_stage_of(potato, T0, 71_000), GrowthStage::Ready);
}

#[test]
fn stage_is_monotonic_for_every_crop() {
    for crop in catalog::crops() {
        let g = crop.growth_duration_seconds * 1000;
        for t in [T0, T0 + 1, T0 + g / 2, T0 + g - 1] {
            assert_eq!(growth_stage_of(crop, T0, t), GrowthStage::Growing, "{} at {t}", crop.id);
        }
        for t in [T0 + g, T0 + g + 1, T0 + 10 * g] {
            assert_eq!(growth_stage_of(crop, T0, t), GrowthStage::Ready, "{} at {t}", crop.id);
        }
    }
}

#[test]
fn growth_percent_floors_and_caps() {
    let potato = find_crop("potato").unwrap();
    assert_eq!(growth_percent(potato, T0, T0), 0);
    // 35s of 70s
    assert_eq!(growth_percent(potato, T0, T0 + 35_000), 50);
    // 69.999s of 70s is still 99%
    assert_eq!(growth_percent(potato, T0, T0 + 69_999), 99);
    assert_eq!(growth_percent(potato, T0, T0 + 70_000), 100);
    assert_eq!(growth_percent(potato, T0, T0 + 700_000), 100);
}

#[test]
fn planting_consumes_a_seed_and_clears_plot_selection() {
    let state = GameState {
        selected_plot_id: Some("plot-0-0".into()),
        ..GameState::default()
    };
    let before = state.inventory.quantity("potato");

    let next = transition(
        state,
        &Action::PlantCrop { plot_id: "plot-0-0".into(), crop_id: "potato".into() },
        T0,
    );

    assert_eq!(next.inventory.quantity("potato"), before - 1);
    assert_eq!(next.selected_plot_id, None);
    let plot = next.plot("plot-0-0").unwrap();
    assert_eq!(plot.planting().unwrap().planted_at, T0);
    assert_eq!(plot.growth_stage(), GrowthStage::Growing);
}

#[test]
fn update_growth_marks_ripe_plots_and_touches_nothing_else() {
    let state = planted_state();

    let early = transition(state.clone(), &Action::UpdateGrowth, T0 + 69_999);
    assert_eq!(early, state);

    let ripe = transition(state.clone(), &Action::UpdateGrowth, T0 + 70_000);
    assert_eq!(ripe.plot("plot-0-0").unwrap().growth_stage(), GrowthStage::Ready);
    assert_eq!(ripe.coins, state.coins);
    assert_eq!(ripe.inventory, state.inventory);
    assert!(ripe.plots.iter().filter(|p| p.id != "plot-0-0").all(|p| p.growth_stage() == GrowthStage::Empty));
}

#[test]
fn harvesting_a_ready_plot_pays_the_yield_and_empties_it() {
    let state = planted_state();
    let coins = state.coins;

    let next = transition(state, &Action::HarvestCrop { plot_id: "plot-0-0".into() }, T0 + 70_000);

    assert_eq!(next.coins, coins + 16);
    let plot = next.plot("plot-0-0").unwrap();
    assert!(plot.is_empty());
    assert_eq!(plot.growth_stage(), GrowthStage::Empty);
}

#[test]
fn harvest_uses_the_supplied_time_not_the_cached_stage() {
    // No UpdateGrowth has run, the cached stage still says growing.
    let state = planted_state();
    assert_eq!(state.plot("plot-0-0").unwrap().growth_stage(), GrowthStage::Growing);

    let outcome = apply(&state, &Action::HarvestCrop { plot_id: "plot-0-0".into() }, T0 + 80_000);
    assert!(outcome.is_applied());
}

#[test]
fn harvesting_an_unripe_or_empty_plot_changes_nothing() {
    let state = planted_state();

    let unripe = apply(&state, &Action::HarvestCrop { plot_id: "plot-0-0".into() }, T0 + 69_999);
    assert_eq!(unripe, Outcome::Rejected(Rejection::NotReady("plot-0-0".into())));
    assert_eq!(transition(state.clone(), &Action::HarvestCrop { plot_id: "plot-0-0".into() }, T0 + 69_999), state);

    let empty = apply(&state, &Action::HarvestCrop { plot_id: "plot-1-0".into() }, T0 + 70_000);
    assert_eq!(empty, Outcome::Rejected(Rejection::PlotEmpty("plot-1-0".into())));

    let missing = apply(&state, &Action::HarvestCrop { plot_id: "plot-9-9".into() }, T0 + 70_000);
    assert_eq!(missing, Outcome::Rejected(Rejection::UnknownPlot("plot-9-9".into())));
}

#[test]
fn planting_guards_leave_state_unchanged() {
    let state = planted_state();
    let plant = |plot: &str, crop: &str| Action::PlantCrop { plot_id: plot.into(), crop_id: crop.into() };

    // Occupied
    assert_eq!(
        apply(&state, &plant("plot-0-0", "potato"), T0).rejection(),
        Some(&Rejection::PlotOccupied("plot-0-0".into()))
    );
    // Locked and no seeds
    assert!(matches!(
        apply(&state, &plant("plot-1-0", "carrot"), T0).rejection(),
        Some(Rejection::NoSeeds { .. })
    ));
    // Unknown crop and unknown plot
    assert!(matches!(apply(&state, &plant("plot-1-0", "mandrake"), T0).rejection(), Some(Rejection::UnknownCrop(_))));
    assert!(matches!(apply(&state, &plant("plot-7-7", "potato"), T0).rejection(), Some(Rejection::UnknownPlot(_))));

    for action in [plant("plot-0-0", "potato"), plant("plot-1-0", "carrot"), plant("plot-7-7", "potato")] {
        assert_eq!(transition(state.clone(), &action, T0), state);
    }
}

#[test]
fn crops_refuse_the_wrong_season() {
    // Summer-only tomato, unlocked and stocked, in spring.
    let state = GameState { coins: 1_000, ..GameState::default() };
    let state = transition(state, &Action::UnlockCrop { crop_id: "tomato".into() }, T0);
    let state = transition(state, &Action::BuyCrop { crop_id: "tomato".into(), quantity: 2 }, T0);
    let plant = Action::PlantCrop { plot_id: "plot-0-0".into(), crop_id: "tomato".into() };

    assert!(matches!(apply(&state, &plant, T0).rejection(), Some(Rejection::OutOfSeason { .. })));

    let summer = transition(state, &Action::ChangeSeason { season: homestead_core::calendar::Season::Summer }, T0);
    assert!(apply(&summer, &plant, T0).is_applied());
}

#[test]
fn last_seed_leaves_a_zero_entry_and_blocks_further_planting() {
    let mut state = GameState::default();
    let seeds = state.inventory.quantity("potato");
    for i in 0..seeds {
        let plot = format!("plot-{}-{}", i % 4, i / 4);
        state = transition(state, &Action::PlantCrop { plot_id: plot, crop_id: "potato".into() }, T0);
    }
    assert_eq!(state.inventory.quantity("potato"), 0);
    assert!(state.inventory.contains("potato"));

    let again = Action::PlantCrop { plot_id: "plot-0-3".into(), crop_id: "potato".into() };
    assert_eq!(transition(state.clone(), &again, T0), state);
}
