use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use n_in_a_row::ai::{search, Agent, LineHeuristic, MinimaxAgent, MonteCarloAgent, RandomAgent};
use n_in_a_row::config::{check_search_bounds, AppConfig, Opponent};
use n_in_a_row::game::{Board, GameOutcome, GameState, Mark, Position, Scoreboard};

/// Play n-in-a-row against a minimax / alpha-beta opponent.
#[derive(Parser)]
#[command(name = "n-in-a-row", about = "N-in-a-row with a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "n-in-a-row.toml")]
    config: PathBuf,

    /// Use a built-in preset instead of the config file: classic or 5x5
    #[arg(long)]
    preset: Option<String>,

    /// Override the search depth in plies
    #[arg(long, conflicts_with = "unlimited")]
    depth: Option<u32>,

    /// Search to the end of the game (small boards only)
    #[arg(long)]
    unlimited: bool,

    /// Disable alpha-beta cutoffs (plain minimax)
    #[arg(long)]
    no_pruning: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play against the engine on the terminal
    Play,
    /// Let the engine play a series of games against a computer opponent
    Watch {
        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Override the configured opponent: random, minimax or monte_carlo
        #[arg(long)]
        opponent: Option<Opponent>,
    },
    /// Print the engine's move for a position given one row per argument
    Analyze {
        /// Board rows, e.g. "XX." ".O." "..." (`.` is empty)
        #[arg(required = true)]
        rows: Vec<String>,
        /// Win length; defaults to the configured value clamped to the board
        #[arg(long)]
        win_length: Option<usize>,
        /// Mark the engine plays
        #[arg(long, default_value = "O")]
        mark: Mark,
    },
    /// Print a configuration file with every default value
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = n_in_a_row::logging::init(&cli.log_level).context("starting logger")?;

    let mut config = match &cli.preset {
        Some(name) => match AppConfig::preset(name) {
            Some(config) => config,
            None => bail!("unknown preset '{}' (expected 'classic' or '5x5')", name),
        },
        None => AppConfig::load_or_default(&cli.config)
            .with_context(|| format!("loading config from {}", cli.config.display()))?,
    };

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.max_depth = Some(depth);
    }
    if cli.unlimited {
        config.search.max_depth = None;
    }
    if cli.no_pruning {
        config.search.pruning = false;
    }

    match cli.command {
        Command::Play => {
            config.validate()?;
            play(&config)
        }
        Command::Watch { games, opponent } => {
            if let Some(opponent) = opponent {
                config.play.opponent = opponent;
            }
            config.validate()?;
            watch(&config, games)
        }
        Command::Analyze {
            rows,
            win_length,
            mark,
        } => analyze(&config, &rows, win_length, mark),
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

fn play(config: &AppConfig) -> Result<()> {
    let human = config.play.human_mark;
    let mut engine = MinimaxAgent::new(config.search);
    let mut state = GameState::new(config.board.build()?, first_mark(config));
    let mut score = Scoreboard::default();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!(
        "{}x{} board, {} in a row. You play {human}. Enter moves as 'row col', 'q' to quit.",
        config.board.rows, config.board.cols, config.board.win_length
    );

    loop {
        while !state.is_terminal() {
            let mark = state.current_player();
            if mark == human {
                print!("{}\nYour move: ", state.board());
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let line = line?;
                if line.trim() == "q" {
                    return Ok(());
                }
                let Some(pos) = parse_position(&line) else {
                    println!("Expected two numbers: row col");
                    continue;
                };
                if let Err(err) = state.play(pos.row, pos.col) {
                    println!("{err}");
                }
            } else {
                println!("AI is thinking...");
                let pos = engine.select_move(state.board_mut(), mark)?;
                if let Some(result) = engine.last_result() {
                    println!("AI places at {pos} (score {})", result.score);
                }
                state.play(pos.row, pos.col)?;
            }
        }

        print!("{}", state.board());
        if let Some(outcome) = state.outcome() {
            score.record(outcome);
            println!("{}", describe(outcome, human));
        }
        println!(
            "Score | You: {} - AI: {} - Draws: {}",
            score.wins(human),
            score.wins(human.other()),
            score.draws
        );

        print!("Play again? [y/N] ");
        io::stdout().flush()?;
        match lines.next() {
            Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
                state.reset(first_mark(config));
            }
            _ => return Ok(()),
        }
    }
}

fn watch(config: &AppConfig, games: u32) -> Result<()> {
    let engine_mark = config.play.human_mark.other();
    let mut engine = MinimaxAgent::new(config.search);
    let mut opponent: Box<dyn Agent> = match config.play.opponent {
        Opponent::Random => Box::new(RandomAgent::new()),
        Opponent::Minimax => Box::new(MinimaxAgent::new(config.search)),
        Opponent::MonteCarlo => Box::new(MonteCarloAgent::new(config.monte_carlo)),
        Opponent::Human => {
            bail!("watch needs a computer opponent (--opponent random|minimax|monte_carlo)")
        }
    };
    let mut score = Scoreboard::default();

    for game in 1..=games {
        let mut state = GameState::new(config.board.build()?, first_mark(config));
        while !state.is_terminal() {
            let mark = state.current_player();
            let pos = if mark == engine_mark {
                engine.select_move(state.board_mut(), mark)?
            } else {
                opponent.select_move(state.board_mut(), mark)?
            };
            state.play(pos.row, pos.col)?;
        }

        if let Some(outcome) = state.outcome() {
            score.record(outcome);
            info!("game {game}: {outcome:?}");
        }
    }

    println!(
        "{} ({engine_mark}) vs {} ({}): {} wins, {} losses, {} draws",
        engine.name(),
        opponent.name(),
        engine_mark.other(),
        score.wins(engine_mark),
        score.wins(engine_mark.other()),
        score.draws
    );
    Ok(())
}

fn analyze(config: &AppConfig, rows: &[String], win_length: Option<usize>, mark: Mark) -> Result<()> {
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let longest = rows
        .first()
        .map(|r| r.chars().count().max(rows.len()))
        .unwrap_or(0);
    let k = win_length.unwrap_or_else(|| config.board.win_length.min(longest));
    let mut board = Board::from_rows(&rows, k).context("parsing board")?;
    check_search_bounds(&config.search, board.rows(), board.cols())?;

    let result = search(&mut board, mark, mark.other(), &config.search, &LineHeuristic)?;
    print!("{board}");
    println!(
        "{mark} plays {} (score {}, {} nodes, {} cutoffs)",
        result.position, result.score, result.stats.nodes, result.stats.cutoffs
    );
    Ok(())
}

fn first_mark(config: &AppConfig) -> Mark {
    if config.play.human_first {
        config.play.human_mark
    } else {
        config.play.human_mark.other()
    }
}

fn parse_position(line: &str) -> Option<Position> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}

fn describe(outcome: GameOutcome, human: Mark) -> &'static str {
    match outcome {
        GameOutcome::Winner(mark) if mark == human => "You win!",
        GameOutcome::Winner(_) => "AI wins!",
        GameOutcome::Draw => "Draw!",
    }
}
