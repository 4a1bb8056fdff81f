use clap::{Parser, Subcommand, ValueEnum};
use planner::game::{AiPlayer, Human, Match, Player, RandomPlayer};
use planner::history::HistoryWriter;
use planner::{HeuristicKind, NimState, Planner, PlannerConfig, SearchLimits};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Nim with a 3-object removal cap against an A* opponent")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Heuristic ordering the search frontier
    #[arg(long, value_enum, default_value_t = HeuristicKind::Sum, global = true)]
    heuristic: HeuristicKind,

    /// Give up a search after this many expanded nodes
    #[arg(long, default_value_t = planner::search::DEFAULT_MAX_EXPANSIONS, global = true)]
    max_expansions: usize,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level on the terminal
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match against the AI, opponent moving first
    Play {
        #[arg(long, num_args = 1.., default_values_t = [3, 4, 5])]
        piles: Vec<usize>,

        #[arg(long, value_enum, default_value_t = Opponent::Human)]
        opponent: Opponent,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,

        /// Write the move history to this CSV file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print the AI's next move
    Plan {
        #[arg(long, num_args = 1.., default_values_t = [3, 4, 5])]
        piles: Vec<usize>,

        /// Plan every state bounded by the given piles
        #[arg(long)]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Opponent {
    Human,
    Random,
}

fn log(verbose: bool, file: Option<&PathBuf>) -> planner::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(path) = file {
        let file = std::fs::File::create(path).map_err(|e| planner::Error::Io {
            operation: format!("create {}", path.display()),
            source: e,
        })?;
        loggers.push(simplelog::WriteLogger::new(log::LevelFilter::Debug, config, file));
    }
    // a second init only fails if a logger is already installed
    let _ = simplelog::CombinedLogger::init(loggers);
    Ok(())
}

/// Every state whose piles are bounded component-wise by `bounds`.
fn bounded_states(bounds: &[usize]) -> Vec<NimState> {
    bounds.iter().fold(vec![vec![]], |prefixes, &bound| {
        prefixes
            .into_iter()
            .flat_map(|prefix: Vec<usize>| {
                (0..=bound).map(move |pile| {
                    let mut piles = prefix.clone();
                    piles.push(pile);
                    piles
                })
            })
            .collect()
    })
    .into_iter()
    .map(NimState::new)
    .collect()
}

fn play(
    planner: Planner<NimState>,
    piles: Vec<usize>,
    opponent: Opponent,
    seed: Option<u64>,
    history: Option<PathBuf>,
) -> planner::Result<()> {
    let opponent: Box<dyn Player> = match opponent {
        Opponent::Human => Box::new(Human),
        Opponent::Random => Box::new(RandomPlayer::new(match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        })),
    };
    let mut writer = history.as_deref().map(HistoryWriter::create).transpose()?;
    let initial = NimState::new(piles);
    println!("Welcome to Nim! Take 1 to 3 objects from one pile; whoever empties the board wins.");
    println!("{}", initial.render());

    let mut game = Match::new(opponent, Box::new(AiPlayer::new(planner)), initial);
    let winner = game.run(|record| {
        println!("\n{} played {}", record.actor, record.description);
        println!("{}", record.after.render());
        match writer.as_mut() {
            Some(writer) => writer.write(record),
            None => Ok(()),
        }
    })?;
    if let Some(writer) = writer {
        writer.finish()?;
    }
    println!("\n{} wins!", winner);
    Ok(())
}

fn plan(planner: Planner<NimState>, piles: Vec<usize>, all: bool, json: bool) -> planner::Result<()> {
    let states = match all {
        true => bounded_states(&piles),
        false => vec![NimState::new(piles)],
    };
    let results = planner.plan_all(&states);
    log::info!("planned {} states, {} cached", states.len(), planner.get_cache_size());
    for (state, result) in states.iter().zip(results) {
        match (result, json) {
            (Ok(next), true) => println!(
                "{}",
                serde_json::json!({ "state": state, "next": next, "move": state.move_to(&next) })
            ),
            (Ok(next), false) => println!("{} -> {}", state, next),
            (Err(e), true) => println!("{}", serde_json::json!({ "state": state, "error": e.to_string() })),
            (Err(e), false) => println!("{} -> {}", state, e),
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = log(cli.verbose, cli.log_file.as_ref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let config = PlannerConfig::new()
        .with_heuristic(cli.heuristic)
        .with_limits(SearchLimits::with_max_expansions(cli.max_expansions));
    log::debug!("{:?}", config);
    let planner = Planner::from_config(config);
    let result = match cli.command {
        Command::Play {
            piles,
            opponent,
            seed,
            history,
        } => play(planner, piles, opponent, seed, history),
        Command::Plan { piles, all, json } => plan(planner, piles, all, json),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
