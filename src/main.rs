//! Terminal driver for the arcade rule engines.
//!
//! A thin collaborator around the library: it maps typed lines to move
//! descriptors, routes them through the session controller, and renders
//! the snapshots it gets back. No game rule lives here. Run with a game
//! name (`play connect4`, `play 2048`, ...) or `play dashboard` for the
//! persisted score overview.

use anyhow::Result;
use arcade::counters::FileCounters;
use arcade::game_wrapper::GameWrapper;
use arcade::games::blanks::BlanksState;
use arcade::games::connect4::Connect4State;
use arcade::games::game2048::Game2048State;
use arcade::games::hilo::HiloState;
use arcade::games::lightson::LightsOnState;
use arcade::games::memory::MemoryState;
use arcade::games::minesweeper::MinesweeperState;
use arcade::games::rps::RpsState;
use arcade::games::slider::SliderState;
use arcade::games::tetro::TetroState;
use arcade::games::tictactoe::TicTacToeState;
use arcade::games::wordguess::WordGuessState;
use arcade::scheduler::{self, SharedSession, TimerHandle};
use arcade::session::{MoveOutcome, Session};
use arcade::Status;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const SCORE_URL: &str = "https://cgi.cse.unsw.edu.au/~cs6080/raw/data/info.json";
/// How long a mismatched memory pair stays visible.
const FLIP_BACK_DELAY: Duration = Duration::from_millis(800);
/// Tetro gravity period.
const GRAVITY_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "play", about = "Play the arcade games in the terminal")]
struct Cli {
    /// Game to play, or the dashboard
    #[arg(value_enum)]
    mode: Mode,

    /// Win counter store file
    #[arg(long, default_value = "arcade-counters.json")]
    counters: PathBuf,

    /// Score bootstrap endpoint used by the dashboard
    #[arg(long, default_value = SCORE_URL)]
    score_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Tictactoe,
    Connect4,
    Minesweeper,
    #[value(name = "2048")]
    Game2048,
    Lightson,
    Memory,
    Slider,
    Tetro,
    Wordguess,
    Blanks,
    Hilo,
    Rps,
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.mode {
        Mode::Dashboard => dashboard(&cli.counters, &cli.score_url).await,
        mode => run_game(mode, &cli.counters).await,
    }
}

async fn dashboard(counters: &PathBuf, url: &str) -> Result<()> {
    let mut store = FileCounters::open(counters);
    let total = arcade::remote::bootstrap_games_won(&mut store, url).await;
    println!("Games won: {}", total.to_string().bold());
    println!(
        "  {} / {}   {} / {}",
        "tic-x-wins".dimmed(),
        store_value(&store, "tic-x-wins"),
        "tic-o-wins".dimmed(),
        store_value(&store, "tic-o-wins"),
    );
    Ok(())
}

fn store_value(store: &FileCounters, key: &str) -> u64 {
    use arcade::counters::CounterStore;
    store.get(key)
}

fn new_game(mode: Mode) -> GameWrapper {
    match mode {
        Mode::Tictactoe => GameWrapper::TicTacToe(TicTacToeState::new()),
        Mode::Connect4 => GameWrapper::Connect4(Connect4State::new()),
        Mode::Minesweeper => GameWrapper::Minesweeper(MinesweeperState::new()),
        Mode::Game2048 => GameWrapper::Game2048(Game2048State::new()),
        Mode::Lightson => GameWrapper::LightsOn(LightsOnState::new()),
        Mode::Memory => GameWrapper::Memory(MemoryState::new()),
        Mode::Slider => GameWrapper::Slider(SliderState::new()),
        Mode::Tetro => GameWrapper::Tetro(TetroState::new()),
        Mode::Wordguess => GameWrapper::WordGuess(WordGuessState::new()),
        Mode::Blanks => GameWrapper::Blanks(BlanksState::new()),
        Mode::Hilo => GameWrapper::Hilo(HiloState::new()),
        Mode::Rps => GameWrapper::Rps(RpsState::new()),
        Mode::Dashboard => unreachable!("dashboard is not a game"),
    }
}

fn move_help(mode: Mode) -> &'static str {
    match mode {
        Mode::Tictactoe | Mode::Lightson => "moves: row,col",
        Mode::Connect4 => "moves: column number",
        Mode::Minesweeper => "moves: row,col to reveal, f row,col to flag",
        Mode::Game2048 => "moves: up / down / left / right",
        Mode::Memory => "moves: card index 0-15",
        Mode::Slider => "moves: cell index 0-8, or 'solve'",
        Mode::Tetro => "moves: left / right (gravity ticks on its own)",
        Mode::Wordguess => "moves: a four-letter word",
        Mode::Blanks => "moves: index=letter, e.g. 4=t",
        Mode::Hilo => "moves: a number from 1 to 100",
        Mode::Rps => "moves: rock / paper / scissors",
        Mode::Dashboard => "",
    }
}

async fn run_game(mode: Mode, counters: &PathBuf) -> Result<()> {
    let store = FileCounters::open(counters);
    let session = scheduler::shared(Session::with_counters(new_game(mode), Box::new(store)));

    let mut gravity: Option<TimerHandle> = (mode == Mode::Tetro)
        .then(|| scheduler::run_gravity(&session, GRAVITY_INTERVAL));
    let mut flip_back: Option<TimerHandle> = None;

    println!(
        "{}  ({}; q quits, r resets, p plays again)",
        session.lock().state().game_name().bold(),
        move_help(mode)
    );
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {
                render(&session);
                continue;
            }
            "q" | "quit" => break,
            "r" | "reset" => {
                session.lock().reset();
                if mode == Mode::Tetro {
                    gravity = Some(scheduler::run_gravity(&session, GRAVITY_INTERVAL));
                }
                render(&session);
                continue;
            }
            "p" | "again" => {
                session.lock().play_again();
                if mode == Mode::Tetro {
                    gravity = Some(scheduler::run_gravity(&session, GRAVITY_INTERVAL));
                }
                render(&session);
                continue;
            }
            "solve" => {
                if session.lock().solve() {
                    render(&session);
                } else {
                    println!("{}", "nothing to solve here".yellow());
                }
                continue;
            }
            _ => {}
        }

        let outcome = {
            let mut guard = session.lock();
            match guard.state().parse_move(input) {
                Ok(mv) => Some(guard.attempt_move(mv)),
                Err(err) => {
                    println!("{}", err.yellow());
                    None
                }
            }
        };

        if let Some(outcome) = outcome {
            match outcome {
                MoveOutcome::Accepted { .. } => {
                    // A mismatched memory pair stays visible briefly, then
                    // the timer flips it back.
                    if session.lock().state().pending_flip().is_some() {
                        flip_back = Some(scheduler::schedule_flip_back(&session, FLIP_BACK_DELAY));
                    }
                }
                MoveOutcome::Rejected(reason) => println!("{}", reason.to_string().yellow()),
            }
            render(&session);
        }
    }

    drop(flip_back);
    drop(gravity);
    Ok(())
}

fn render(session: &SharedSession) {
    let guard = session.lock();
    println!("{}", guard.state());
    match guard.status() {
        Status::InProgress => {
            println!("{} moves so far", guard.move_count());
        }
        Status::Win(actor) => {
            let mut line = format!("{} wins!", actor_name(guard.state(), actor));
            if let Some(cells) = guard.winning_line() {
                line.push_str(&format!(" line: {:?}", cells));
            }
            println!("{}", line.green().bold());
        }
        Status::Draw => println!("{}", "it's a draw".cyan()),
        Status::Loss => println!("{}", "round lost".red().bold()),
    }
}

fn actor_name(state: &GameWrapper, actor: i32) -> &'static str {
    match state {
        GameWrapper::TicTacToe(_) => {
            if actor == 1 {
                "X"
            } else {
                "O"
            }
        }
        GameWrapper::Connect4(_) => {
            if actor == 1 {
                "Red"
            } else {
                "Yellow"
            }
        }
        GameWrapper::Rps(_) => {
            if actor == 1 {
                "You"
            } else {
                "Computer"
            }
        }
        _ => "You",
    }
}
