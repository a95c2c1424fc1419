//! homestead-runner: headless driver for the farming simulation.
//!
//! Usage:
//!   homestead-runner --seed 12345 --seconds 3600 --db farm.db
//!   homestead-runner --db farm.db --config farm.json --ipc-mode

use anyhow::Result;
use homestead_core::{
    autoplay::Autoplayer,
    catalog,
    command::Action,
    config::FarmConfig,
    engine::FarmEngine,
    state::GameState,
    store::{FarmStore, MemorySlot, SaveSlot},
    transition::{plot_expansion_cost, Outcome},
    types::Millis,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { now: Millis },
    Dispatch { action: Action, now: Millis },
    Save,
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a> {
    applied:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<String>,
    state:    &'a GameState,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let seconds = parse_arg(&args, "--seconds", 3600u64);
    // Synthetic time starts at the wall clock unless --start-millis is given.
    let wall_clock = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    let start = parse_arg(&args, "--start-millis", wall_clock);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let fresh = args.iter().any(|a| a == "--new-game");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let config = match string_arg(&args, "--config") {
        Some(path) => FarmConfig::load(path)?,
        None => FarmConfig::default(),
    };

    if !ipc_mode {
        println!("Homestead: headless runner");
        println!("  seed:      {seed}");
        println!("  seconds:   {seconds}");
        println!("  db:        {db}");
        println!("  day:       {}s", config.day_length_secs);
        println!();
    }

    let slot: Box<dyn SaveSlot> = if db == ":memory:" {
        Box::new(MemorySlot::new())
    } else {
        Box::new(FarmStore::open_migrated(db)?)
    };

    let mut engine = if fresh {
        FarmEngine::new_game(config, slot)
    } else {
        FarmEngine::start(config, slot, start)
    };

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        let stats = run_autoplay(&mut engine, seed, start, seconds);
        engine.save_now();
        print_summary(&engine, &stats, start + seconds * 1000);
    }

    Ok(())
}

#[derive(Default)]
struct RunStats {
    intents:  u64,
    applied:  u64,
    rejected: u64,
    days:     u64,
}

/// Drive the engine with a synthetic clock, one intent per growth tick.
fn run_autoplay(engine: &mut FarmEngine, seed: u64, start: Millis, seconds: u64) -> RunStats {
    let mut player = Autoplayer::new(seed);
    let mut stats = RunStats::default();
    let step = engine.config().growth_tick_millis.max(1);
    let end = start + seconds * 1000;

    let mut now = start;
    while now <= end {
        stats.days += u64::from(engine.tick(now));
        let intent = player.next_intent(engine.state(), now);
        stats.intents += 1;
        match engine.dispatch(intent, now) {
            Outcome::Applied(_) => stats.applied += 1,
            Outcome::Rejected(_) => stats.rejected += 1,
        }
        now += step;
    }
    stats
}

fn run_ipc_loop(engine: &mut FarmEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let (applied, rejected) = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => (true, None),
            IpcCommand::Tick { now } => {
                engine.tick(now);
                (true, None)
            }
            IpcCommand::Save => (engine.save_now(), None),
            IpcCommand::Dispatch { action, now } => match engine.dispatch(action, now) {
                Outcome::Applied(_) => (true, None),
                Outcome::Rejected(reason) => (false, Some(reason.to_string())),
            },
        };
        let reply = IpcReply { applied, rejected, state: engine.state() };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &FarmEngine, stats: &RunStats, now: Millis) {
    let state = engine.state();
    let planted = state.plots.iter().filter(|p| !p.is_empty()).count();

    println!("=== RUN SUMMARY ===");
    println!("  player:        {}", state.player_name);
    println!("  day:           {} ({})", state.day_count, state.current_season);
    println!("  days passed:   {}", stats.days);
    println!("  coins:         {}", state.coins);
    println!("  grid:          {}x{}", state.grid_size.rows, state.grid_size.cols);
    println!("  planted plots: {planted}/{}", state.plots.len());
    println!("  ready plots:   {}", engine.ready_plots(now).len());
    match plot_expansion_cost(state) {
        Some(cost) => println!("  next expand:   {cost} coins"),
        None => println!("  next expand:   grid is at its largest"),
    }
    println!("  intents:       {} ({} applied, {} rejected)", stats.intents, stats.applied, stats.rejected);

    println!();
    println!("=== CROPS ===");
    for crop in catalog::crops() {
        if !state.is_unlocked(crop.id) {
            continue;
        }
        println!(
            "  {:<11} seeds: {:>4} | grows {:>3}s | seed {:>2} | yield {:>3}",
            crop.name,
            state.inventory.quantity(crop.id),
            crop.growth_duration_seconds,
            crop.unit_price,
            crop.harvest_yield
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
