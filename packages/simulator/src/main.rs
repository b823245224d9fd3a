//! President simulator CLI - runs whole sessions in memory.
//!
//! All seats are played by AI unless `--human` puts a person at one of them,
//! in which case the game is narrated on the terminal and answers are read
//! from stdin.

mod console;
mod error;
mod output;
mod types;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use console::{ask_replay, ConsoleAnnouncer, LineSource};
use error::SimulatorError;
use output::OutputWriter;
use president::ai::{by_name, generate_name};
use president::domain::{derive_ai_seed, Title};
use president::table::TracingAnnouncer;
use president::{
    init_tracing, AiConfig, Announcer, GameBudget, GameSummary, HumanPrompt, JsonlFileSink,
    ResultSink, SessionConfig, SessionReport, Table,
};
use rand::Rng;
use tracing::info;
use types::{AiType, OutputFormat};

#[derive(Parser)]
#[command(name = "president-simulator")]
#[command(about = "Play sessions of President between AI players (and optionally you)")]
struct Args {
    /// Number of games in the session (asks after each game with --human)
    #[arg(short, long)]
    games: Option<u32>,

    /// Number of seats
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(3..=8))]
    players: u8,

    /// AI type for every AI seat
    #[arg(long, default_value = "heuristic", conflicts_with = "seat_ai")]
    ai: AiType,

    /// AI type per seat, comma separated; missing seats use the default AI
    #[arg(long, value_delimiter = ',')]
    seat_ai: Vec<AiType>,

    /// Session seed (deals and AI seeds are derived from it)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON rule set
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seat played from the terminal
    #[arg(long)]
    human: Option<u8>,

    /// Name shown for the human seat
    #[arg(long, default_value = "You")]
    name: String,

    /// Deal the deck in order
    #[arg(long)]
    no_shuffle: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

impl Args {
    fn ai_for(&self, seat: u8) -> AiType {
        self.seat_ai.get(seat as usize).copied().unwrap_or(self.ai)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(seat) = args.human {
        if seat >= args.players {
            return Err(SimulatorError::Args(format!(
                "--human {seat} but only {} seats",
                args.players
            ))
            .into());
        }
    }

    let mut config = SessionConfig::from_env()?;

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    init_tracing(filter, config.log_json);

    config.seats = args.players as usize;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_shuffle {
        config.shuffle = false;
    }
    if args.rules.is_some() {
        config.rules_path = args.rules.clone();
    }
    if args.games.is_some() {
        config.max_games = args.games;
    } else if args.human.is_none() && config.max_games.is_none() {
        config.max_games = Some(1);
    }
    let rules = config.load_rules()?;

    if args.show_output {
        info!(seats = args.players, games = ?config.max_games, seed = ?config.seed, "starting simulator");
    }

    let output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();

    let mut builder = Table::builder(rules.clone(), config.clone());
    let mut names = Vec::with_capacity(args.players as usize);
    for seat in 0..args.players {
        if args.human == Some(seat) {
            names.push(args.name.clone());
            builder = builder.human(
                args.name.clone(),
                Box::new(HumanPrompt::new(LineSource::stdio())),
            );
            continue;
        }
        let ai_type = args.ai_for(seat);
        let factory = by_name(ai_type.name())
            .ok_or_else(|| SimulatorError::Args(format!("unknown AI {}", ai_type.name())))?;
        // Vary play between runs unless a session seed is given
        let seed = match config.seed {
            Some(s) => derive_ai_seed(s, seat),
            None => rand::rng().random::<u64>(),
        };
        let mut name = generate_name(Some(seed));
        if names.contains(&name) {
            name = format!("{name} #{}", seat + 1);
        }
        names.push(name.clone());
        let ai_config = AiConfig {
            seed: Some(seed),
            name: Some(name.clone()),
            ..AiConfig::default()
        };
        info!(seat, %name, ai = factory.name, "AI seated");
        builder = builder.ai(name, (factory.make)(ai_config));
    }

    builder = match &config.results_path {
        Some(path) => {
            let sinks: Vec<Box<dyn ResultSink>> =
                vec![Box::new(output_writer), Box::new(JsonlFileSink::open(path)?)];
            builder.sink(sinks)
        }
        None => builder.sink(output_writer),
    };
    if args.human.is_some() {
        let announcers: Vec<Box<dyn Announcer>> = vec![
            Box::new(ConsoleAnnouncer::new(
                names.clone(),
                rules.deck.clone(),
                io::stdout(),
            )),
            Box::new(TracingAnnouncer),
        ];
        builder = builder
            .announcer(announcers)
            .replay(|_played: u32| ask_replay(&mut io::stdin().lock(), &mut io::stdout()));
    } else {
        builder = builder.replay(GameBudget(config.max_games.unwrap_or(1)));
    }

    let mut table = builder.build()?;
    let start = Instant::now();
    let report = table.run_session()?;
    let elapsed = start.elapsed();

    if args.show_output || args.human.is_some() {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&names, &report, elapsed);
    }

    Ok(())
}

/// Per seat tallies over a session.
#[derive(Debug, Default, Clone, PartialEq)]
struct SeatStats {
    presidents: u32,
    troufions: u32,
    position_sum: u32,
    games: u32,
}

impl SeatStats {
    fn average_position(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.position_sum as f64 / self.games as f64
    }
}

fn seat_stats(seats: usize, games: &[GameSummary]) -> Vec<SeatStats> {
    let mut stats = vec![SeatStats::default(); seats];
    for game in games {
        for standing in &game.standings {
            let Some(entry) = stats.get_mut(standing.seat as usize) else {
                continue;
            };
            entry.games += 1;
            entry.position_sum += standing.position as u32;
            match standing.title {
                Title::President => entry.presidents += 1,
                Title::Troufion => entry.troufions += 1,
                _ => {}
            }
        }
    }
    stats
}

fn print_summary(names: &[String], report: &SessionReport, elapsed: Duration) {
    println!("\n=== Session Summary ===");
    println!("Games completed: {}", report.games.len());
    if report.cancelled {
        println!("Session cancelled");
    }
    println!("Total time: {elapsed:?}");
    if report.games.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / report.games.len() as u32
    );
    let revolutions: u32 = report.games.iter().map(|g| g.revolutions).sum();
    println!("Revolutions: {revolutions}");

    println!("\n=== Results by Seat ===");
    for (seat, stats) in seat_stats(names.len(), &report.games).iter().enumerate() {
        let rate = stats.presidents as f64 / report.games.len() as f64 * 100.0;
        println!(
            "Seat {seat} ({}): avg position={:.2}, president={} ({rate:.1}%), troufion={}",
            names[seat],
            stats.average_position(),
            stats.presidents,
            stats.troufions
        );
    }
}
