//! Whole-game runs through the session command queue.

use std::sync::Arc;
use std::time::Duration;

use ludo_engine::commentary::{BoardSummary, PlainCommentator};
use ludo_engine::core::{Action, Color, GameConfig, PIECES_PER_COLOR};
use ludo_engine::turn::Session;

/// Upper bound on rolls for one seeded game.
const MAX_ROLLS: usize = 20_000;

/// Roll and always move the first selectable piece until someone wins.
fn play_out(session: &mut Session) -> usize {
    let mut rolls = 0;
    while !session.state().is_terminal() && rolls < MAX_ROLLS {
        session.roll_dice();
        rolls += 1;
        session.process_all();

        if let Some(&first) = session.movable_pieces().first() {
            session.select(first);
            for result in session.process_all() {
                assert!(result.is_ok(), "selection from movable_pieces rejected: {result:?}");
            }
        }
        assert!(session.state().check_invariants().is_ok());
    }
    rolls
}

#[test]
fn test_seeded_game_reaches_a_winner() {
    let config = GameConfig::default().with_dice_seed(2024).without_delays();
    let mut session = Session::new(config).unwrap();

    let rolls = play_out(&mut session);
    assert!(rolls < MAX_ROLLS);

    let winner = session.state().winner().unwrap();
    let summary = BoardSummary::of(session.state());
    assert_eq!(summary.counts[winner].finished, PIECES_PER_COLOR);
    for color in winner.opponents() {
        assert!(summary.counts[color].finished < PIECES_PER_COLOR);
    }

    let line = format!("{winner} wins!");
    assert_eq!(session.log().back(), Some(&line));
    assert_eq!(session.commentary(), line);
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_dice_seed(99).without_delays();
    let mut first = Session::new(config.clone()).unwrap();
    let mut second = Session::new(config).unwrap();

    play_out(&mut first);
    play_out(&mut second);

    assert_eq!(first.state(), second.state());
    assert_eq!(first.log(), second.log());
}

#[test]
fn test_reset_replays_the_same_game() {
    let config = GameConfig::default().with_dice_seed(5).without_delays();
    let mut session = Session::new(config).unwrap();

    play_out(&mut session);
    let finished = session.state().clone();

    session.reset();
    assert!(!session.state().is_terminal());
    play_out(&mut session);
    assert_eq!(session.state(), &finished);
}

#[test]
fn test_starting_colour_from_config() {
    let config = GameConfig::from_toml("starting_color = \"Red\"\ndice_seed = 1").unwrap();
    let mut session = Session::new(config).unwrap();
    assert_eq!(session.state().active_color(), Color::Red);
    assert_eq!(session.commentary(), "Welcome to Ludo! Red starts.");

    session.submit(Action::Roll(2));
    session.process_all();
    assert_eq!(session.state().active_color(), Color::Blue);
    assert_eq!(session.commentary(), "Blue's turn!");
}

#[test]
fn test_commentary_arrives_without_blocking_play() {
    let config = GameConfig::default().with_dice_seed(3).without_delays();
    let mut session = Session::with_commentator(config, Arc::new(PlainCommentator)).unwrap();

    session.submit(Action::Roll(6));
    session.select(session.state().player(Color::Blue).pieces()[0].piece_ref());
    session.process_all();
    assert_eq!(session.state().active_color(), Color::Blue);

    let reply = session.wait_commentary(Duration::from_secs(5)).unwrap();
    assert!(!reply.fallback);
    assert_eq!(session.commentary(), "Blue rolled a 6! (0 home)");
    assert_eq!(session.commentary_in_flight(), 0);
}
