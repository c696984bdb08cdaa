// SPDX-License-Identifier: MIT OR Apache-2.0

use baagchal_core::{
    Action, GameError, GameOutcome, Phase, Piece, Player, Position, RulesConfig, Session,
    WinReason,
};
use std::cell::RefCell;
use std::rc::Rc;

fn p(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

enum Cmd {
    Place(u8, u8),
    Move((u8, u8), (u8, u8)),
}

fn play(session: &mut Session, cmds: &[Cmd]) {
    for (i, cmd) in cmds.iter().enumerate() {
        let result = match *cmd {
            Cmd::Place(r, c) => session.place_goat(p(r, c)),
            Cmd::Move((fr, fc), (tr, tc)) => session.complete_move(p(fr, fc), p(tr, tc)),
        };
        assert!(result.is_ok(), "command {} failed: {:?}", i, result);
    }
}

fn recording_session() -> (Session, Rc<RefCell<Vec<GameOutcome>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let session = Session::new().with_listener(move |outcome: &GameOutcome| {
        sink.borrow_mut().push(*outcome);
    });
    (session, seen)
}

/// Twenty placements answered by quiet tiger steps, ending with Goat to move
fn full_placement() -> Vec<Cmd> {
    use Cmd::*;
    vec![
        Place(2, 4), Move((4, 0), (3, 0)),
        Place(0, 2), Move((0, 4), (1, 3)),
        Place(4, 1), Move((1, 3), (2, 2)),
        Place(3, 2), Move((2, 2), (3, 3)),
        Place(4, 2), Move((3, 0), (4, 0)),
        Place(1, 3), Move((4, 0), (3, 1)),
        Place(0, 4), Move((3, 1), (2, 1)),
        Place(1, 0), Move((0, 0), (1, 1)),
        Place(3, 1), Move((4, 4), (4, 3)),
        Place(1, 4), Move((3, 3), (2, 3)),
        Place(4, 0), Move((1, 1), (1, 2)),
        Place(2, 0), Move((1, 2), (2, 2)),
        Place(0, 1), Move((4, 3), (4, 4)),
        Place(3, 3), Move((4, 4), (3, 4)),
        Place(3, 0), Move((2, 1), (1, 1)),
        Place(1, 2), Move((3, 4), (4, 4)),
        Place(2, 1), Move((4, 4), (4, 3)),
        Place(0, 3), Move((4, 3), (4, 4)),
        Place(3, 4), Move((4, 4), (4, 3)),
        Place(0, 0), Move((4, 3), (4, 4)),
    ]
}

/// Goats placed so that the last placement leaves no tiger a move
fn trapping_game() -> Vec<Cmd> {
    use Cmd::*;
    vec![
        Place(0, 3), Move((4, 0), (4, 1)),
        Place(3, 2), Move((0, 4), (1, 4)),
        Place(4, 3), Move((4, 1), (4, 2)),
        Place(2, 0), Move((0, 0), (1, 1)),
        Place(3, 3), Move((1, 4), (1, 3)),
        Place(1, 4), Move((1, 3), (0, 4)),
        Place(3, 4), Move((1, 1), (1, 2)),
        Place(0, 2), Move((4, 2), (3, 1)),
        Place(1, 1), Move((3, 1), (2, 2)),
        Place(2, 1), Move((1, 2), (1, 3)),
        Place(3, 1), Move((2, 2), (2, 3)),
        Place(2, 4), Move((1, 3), (2, 2)),
        Place(4, 2), Move((2, 2), (1, 2)),
        Place(1, 0), Move((1, 2), (2, 2)),
        Place(1, 3), Move((2, 2), (1, 2)),
        Place(2, 2),
    ]
}

/// Each placement is jumped straight away
fn five_captures() -> Vec<Cmd> {
    use Cmd::*;
    vec![
        Place(0, 1), Move((0, 0), (0, 2)),
        Place(1, 2), Move((0, 2), (2, 2)),
        Place(2, 3), Move((2, 2), (2, 4)),
        Place(3, 0), Move((4, 0), (2, 0)),
        Place(2, 1), Move((2, 0), (2, 2)),
    ]
}

#[test]
fn first_placement() {
    let mut session = Session::new();
    session.place_goat(p(2, 2)).unwrap();

    assert_eq!(session.board().get(p(2, 2)), Some(Piece::Goat));
    assert_eq!(session.placed_goats(), 1);
    assert_eq!(session.active_player(), Player::Tiger);
}

#[test]
fn tiger_jumps_goat() {
    let mut session = Session::new();
    session.place_goat(p(0, 1)).unwrap();

    let report = session.complete_move(p(0, 0), p(0, 2)).unwrap();
    assert_eq!(
        report.action,
        Action::Captured { from: p(0, 0), over: p(0, 1), to: p(0, 2) }
    );
    assert_eq!(session.board().get(p(0, 1)), Some(Piece::Empty));
    assert_eq!(session.board().get(p(0, 0)), Some(Piece::Empty));
    assert_eq!(session.board().get(p(0, 2)), Some(Piece::Tiger));
    assert_eq!(session.captured_goats(), 1);
    assert_eq!(session.active_player(), Player::Goat);
}

#[test]
fn fifth_capture_wins_for_tigers() {
    let (mut session, seen) = recording_session();
    play(&mut session, &five_captures());

    let expected = GameOutcome {
        winner: Player::Tiger,
        reason: WinReason::GoatsCaptured { count: 5 },
    };
    assert!(session.is_game_over());
    assert_eq!(session.phase(), Phase::Over);
    assert_eq!(session.outcome(), Some(expected));
    assert_eq!(*seen.borrow(), vec![expected]);
    assert_eq!(session.board().count(Piece::Goat), 0);
    assert_eq!(session.board().count(Piece::Tiger), 4);
}

#[test]
fn trapped_tigers_lose() {
    let (mut session, seen) = recording_session();
    play(&mut session, &trapping_game());

    let expected = GameOutcome {
        winner: Player::Goat,
        reason: WinReason::TigersTrapped,
    };
    assert!(!session.check_tiger_mobility());
    assert_eq!(session.outcome(), Some(expected));
    assert_eq!(*seen.borrow(), vec![expected]);
    assert_eq!(session.placed_goats(), 16);

    // Nothing but reset is accepted once the game is over
    let before = session.snapshot();
    assert_eq!(session.place_goat(p(0, 0)), Err(GameError::GameAlreadyOver));
    assert_eq!(session.select_piece(p(0, 4)), Err(GameError::GameAlreadyOver));
    assert_eq!(
        session.complete_move(p(0, 4), p(0, 3)),
        Err(GameError::GameAlreadyOver)
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(seen.borrow().len(), 1);

    session.reset();
    assert_eq!(session.phase(), Phase::Placement);
    assert!(session.place_goat(p(2, 2)).is_ok());
}

#[test]
fn placement_cap_enforced() {
    let mut session = Session::new();
    play(&mut session, &full_placement());

    assert_eq!(session.placed_goats(), 20);
    assert_eq!(session.goats_in_hand(), 0);
    assert_eq!(session.phase(), Phase::Movement);
    assert_eq!(session.active_player(), Player::Goat);

    let board = *session.board();
    assert_eq!(
        session.place_goat(p(4, 3)),
        Err(GameError::PlacementCapExceeded { cap: 20 })
    );
    assert_eq!(*session.board(), board);
}

#[test]
fn goats_move_after_placement() {
    let mut session = Session::new();
    play(&mut session, &full_placement());

    assert_eq!(session.select_piece(p(4, 2)), Ok(p(4, 2)));
    let report = session.complete_selected(p(4, 3)).unwrap();
    assert_eq!(
        report.action,
        Action::Stepped { piece: Piece::Goat, from: p(4, 2), to: p(4, 3) }
    );
    assert_eq!(report.next_player, Player::Tiger);
    assert!(report.outcome.is_none());

    // The tiger on the corner can now jump back over the goat
    let report = session.complete_move(p(4, 4), p(4, 2)).unwrap();
    assert_eq!(
        report.action,
        Action::Captured { from: p(4, 4), over: p(4, 3), to: p(4, 2) }
    );
    assert_eq!(session.captured_goats(), 1);
}

#[test]
fn reset_is_idempotent() {
    let mut session = Session::new();
    play(&mut session, &five_captures()[..4]);

    session.reset();
    let first = session.snapshot();
    session.reset();
    let second = session.snapshot();

    assert_eq!(first, second);
    assert_eq!(first, Session::new().snapshot());
    assert!(session.history().is_empty());
}

#[test]
fn history_records_actions_in_order() {
    let mut session = Session::new();
    play(&mut session, &five_captures()[..2]);

    assert_eq!(
        session.history(),
        &[
            Action::Placed { at: p(0, 1) },
            Action::Captured { from: p(0, 0), over: p(0, 1), to: p(0, 2) },
        ]
    );
}

#[test]
fn custom_capture_threshold() {
    let config = RulesConfig { max_goats: 20, captures_to_win: 1 };
    let mut session = Session::with_config(config).unwrap();
    session.place_goat(p(0, 1)).unwrap();

    let report = session.complete_move(p(0, 0), p(0, 2)).unwrap();
    assert_eq!(
        report.outcome,
        Some(GameOutcome {
            winner: Player::Tiger,
            reason: WinReason::GoatsCaptured { count: 1 },
        })
    );
}

#[test]
fn snapshot_serializes_to_json() {
    let mut session = Session::new();
    session.place_goat(p(2, 2)).unwrap();
    session.select_piece(p(0, 0)).unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["active_player"], "Tiger");
    assert_eq!(json["placed_goats"], 1);
    assert_eq!(json["phase"], "Placement");
    assert_eq!(json["selected"]["row"], 0);
    assert_eq!(json["game_over"], false);
}
