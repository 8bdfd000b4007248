use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ludo_engine::board::{home_stretch, is_safe_cell, occupancy, Coordinate, BOARD_SIZE, MAIN_LOOP};
use ludo_engine::commentary::{BoardSummary, Commentator, NoCommentator, PlainCommentator};
use ludo_engine::core::{Color, GameConfig, PieceId, PieceRef};
use ludo_engine::turn::{NextTurn, Session, Transition};

/// Play Ludo in the terminal, four colours at one keyboard.
#[derive(Parser)]
#[command(name = "ludo", about = "Four-player Ludo in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "ludo.toml")]
    config: PathBuf,

    /// Override the dice seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip presentation delays
    #[arg(long)]
    no_delay: bool,

    /// Describe moves locally instead of using the fallback text
    #[arg(long)]
    plain_commentary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config = config.with_dice_seed(seed);
    }
    if cli.no_delay {
        config = config.without_delays();
    }

    let commentator: Arc<dyn Commentator> = if cli.plain_commentary {
        Arc::new(PlainCommentator)
    } else {
        Arc::new(NoCommentator)
    };
    let mut session = Session::with_commentator(config, commentator).context("starting game")?;

    println!("Commands: r = roll, m <1-4> = move piece, b = board, n = new game, q = quit");
    print_status(&session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        let mut words = line.split_whitespace();

        match words.next() {
            Some("r") if !session.can_roll() => {
                println!("Not allowed: pick a piece first (m <id>) or start a new game (n)");
            }
            Some("r") => {
                let roll = session.roll_dice();
                pause(session.config().roll_delay_ms);
                println!("{} rolled {roll}", session.state().active_color());
                process(&mut session);
            }
            Some("m") => match parse_piece(words.next()) {
                Ok(id) => {
                    let color = session.state().active_color();
                    session.select(PieceRef::new(color, id));
                    process(&mut session);
                }
                Err(err) => println!("{err}"),
            },
            Some("b") => print_board(&session),
            Some("n") => session.reset(),
            Some("q") => break,
            _ => {
                println!("Commands: r = roll, m <1-4> = move piece, b = board, n = new game, q = quit");
                continue;
            }
        }

        session.poll_commentary();
        print_status(&session);
    }

    Ok(())
}

fn parse_piece(word: Option<&str>) -> Result<PieceId> {
    let Some(word) = word else {
        bail!("which piece? use m <1-4>");
    };
    let id: u8 = word.parse().with_context(|| format!("'{word}' is not a piece number"))?;
    if !(1..=4).contains(&id) {
        bail!("piece numbers are 1 to 4");
    }
    Ok(PieceId::new(id))
}

fn process(session: &mut Session) {
    while let Some(result) = session.process_next() {
        match result {
            Ok(Transition::NoMove { .. }) => pause(session.config().pass_delay_ms),
            Ok(Transition::Moved { next: NextTurn::Bonus { .. }, .. }) => {
                pause(session.config().bonus_delay_ms);
            }
            Ok(_) => {}
            Err(err) => println!("Not allowed: {err}"),
        }
    }
}

fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

fn print_status(session: &Session) {
    let state = session.state();
    if let Some(line) = session.log().back() {
        println!("  {line}");
    }
    println!(">> {}", session.commentary());

    if let Some(winner) = state.winner() {
        println!("Game over: {winner} wins. Type n for a new game or q to quit.");
        return;
    }

    let color = state.active_color();
    let movable = session.movable_pieces();
    if movable.is_empty() {
        println!("{color} to roll (r)");
    } else {
        let ids: Vec<String> = movable.iter().map(|p| p.id.to_string()).collect();
        println!(
            "{color} rolled {}: move piece {} (m <id>)",
            state.pending_roll().unwrap_or_default(),
            ids.join(", ")
        );
    }
    let _ = io::stdout().flush();
}

fn print_board(session: &Session) {
    let cells = occupancy(session.state());
    let size = usize::from(BOARD_SIZE);
    let mut grid = vec![vec![' '; size]; size];

    let mut mark = |cell: Coordinate, ch: char| {
        grid[usize::from(cell.y)][usize::from(cell.x)] = ch;
    };
    for cell in MAIN_LOOP {
        mark(cell, if is_safe_cell(cell) { '*' } else { '.' });
    }
    for color in Color::ALL {
        for &cell in home_stretch(color) {
            mark(cell, '-');
        }
    }
    for (cell, occupants) in &cells {
        let ch = match occupants.as_slice() {
            [only] => color_letter(only.color),
            many => char::from_digit(many.len() as u32, 10).unwrap_or('+'),
        };
        mark(*cell, ch);
    }

    for row in &grid {
        let line: String = row.iter().flat_map(|&ch| [ch, ' ']).collect();
        println!("{}", line.trim_end());
    }
    print!("{}", BoardSummary::of(session.state()));
}

fn color_letter(color: Color) -> char {
    match color {
        Color::Blue => 'B',
        Color::Yellow => 'Y',
        Color::Green => 'G',
        Color::Red => 'R',
    }
}
