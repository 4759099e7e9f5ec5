//! Tests for dealing, matching and turn rules on whole boards.

use rocknraft_engine::invariants::{Invariant, MonotonicReveal, PairingInvariant};
use rocknraft_engine::{
    Board, BoardConfig, BoardError, BoardInvariants, Cell, Difficulty, InvariantSet, MatchOutcome,
    MarkerId, Player, Selection, TurnAdvance, UserId, UserRef,
};
use std::collections::HashSet;

fn alice() -> UserId {
    UserId::from("1")
}

fn bob() -> UserId {
    UserId::from("2")
}

fn two_humans() -> [Player; 2] {
    [
        Player::human(UserRef::new("1", "alice")),
        Player::human(UserRef::new("2", "bob")),
    ]
}

fn against_bot() -> [Player; 2] {
    [Player::human(UserRef::new("1", "alice")), Player::surrogate()]
}

/// Hidden-slot picks for a pair, read straight off the board.
fn find_pair(board: &Board) -> Option<Selection> {
    let rafts: Vec<_> = board.selectable_cells().collect();
    for (i, a) in rafts.iter().enumerate() {
        for (slot_a, marker) in a.unrevealed().enumerate() {
            for b in &rafts[i + 1..] {
                if let Some(slot_b) = b.unrevealed().position(|m| m.id() == marker.id()) {
                    return Some(Selection::new(a.position(), slot_a, b.position(), slot_b));
                }
            }
        }
    }
    None
}

/// Hidden-slot picks that are guaranteed to miss.
fn find_miss(board: &Board) -> Option<Selection> {
    let rafts: Vec<_> = board.selectable_cells().collect();
    for (i, a) in rafts.iter().enumerate() {
        for (slot_a, marker) in a.unrevealed().enumerate() {
            for b in &rafts[i + 1..] {
                if let Some(slot_b) = b.unrevealed().position(|m| m.id() != marker.id()) {
                    return Some(Selection::new(a.position(), slot_a, b.position(), slot_b));
                }
            }
        }
    }
    None
}

fn positions(board: &Board) -> Vec<Option<Vec<MarkerId>>> {
    board
        .cells()
        .iter()
        .map(|cell| {
            cell.as_occupied()
                .map(|raft| raft.markers().iter().map(|m| m.id()).collect())
        })
        .collect()
}

#[test]
fn test_medium_three_by_three_deal() {
    let config = BoardConfig::new(Difficulty::Medium).with_seed(42);
    let board = Board::new("msg".into(), config, against_bot()).unwrap();

    let rafts: Vec<_> = board.cells().iter().filter_map(Cell::as_occupied).collect();
    assert_eq!(rafts.len(), 8);
    assert!(rafts.iter().all(|raft| raft.markers().len() == 4));

    let ids: HashSet<MarkerId> = rafts
        .iter()
        .flat_map(|raft| raft.markers().iter().map(|m| m.id()))
        .collect();
    assert_eq!(ids.len(), 16);
    assert!(PairingInvariant::holds(&board));
    assert!(board.players()[0].has_turn());
    assert!(!board.is_complete());
}

#[test]
fn test_same_seed_deals_same_board() {
    let config = BoardConfig::new(Difficulty::Hard).with_size(4, 4).with_empty_cells(2).with_seed(3);
    let a = Board::new("a".into(), config, two_humans()).unwrap();
    let b = Board::new("b".into(), config, two_humans()).unwrap();
    assert_eq!(positions(&a), positions(&b));
}

#[test]
fn test_match_grants_extra_turn_without_slide() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(1), two_humans()).unwrap();
    let before = positions(&board);
    let pick = find_pair(&board).unwrap();

    let outcome = board
        .select_match(pick.first_cell, pick.first_slot, pick.second_cell, pick.second_slot)
        .unwrap();
    assert_eq!(outcome, MatchOutcome::Matched);

    assert_eq!(board.advance_turn(), TurnAdvance::ExtraTurn);
    assert!(board.players()[0].has_turn());
    assert!(!board.players()[1].has_turn());
    assert_eq!(positions(&board), before);
    assert!(board.last_slides().is_empty());
}

#[test]
fn test_miss_slides_once_and_passes_turn() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(2), two_humans()).unwrap();
    let pick = find_miss(&board).unwrap();

    let outcome = board
        .select_match(pick.first_cell, pick.first_slot, pick.second_cell, pick.second_slot)
        .unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch);
    assert!(board.cells().iter().filter_map(Cell::as_occupied).all(|raft| raft.unrevealed_count() == 4));

    match board.advance_turn() {
        TurnAdvance::Slid { slides, turn_passed } => {
            assert_eq!(slides.len(), 1);
            assert_eq!(slides[0].to, 8);
            assert!(turn_passed);
        }
        other => panic!("expected a slide, got {other:?}"),
    }
    assert!(!board.players()[0].has_turn());
    assert!(board.players()[1].has_turn());

    // nothing pending any more
    assert_eq!(board.advance_turn(), TurnAdvance::Idle);
}

#[test]
fn test_turn_report_carries_picked_numbers() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(4), two_humans()).unwrap();

    let miss = find_miss(&board).unwrap();
    let expected = board.peek_selection(&miss).unwrap();
    let report = board.play_turn(&alice(), miss).unwrap();
    assert_eq!((report.first, report.second), expected);
    assert_ne!(report.first, report.second);

    let pair = find_pair(&board).unwrap();
    let expected = board.peek_selection(&pair).unwrap();
    let report = board.play_turn(&bob(), pair).unwrap();
    assert_eq!((report.first, report.second), expected);
    assert_eq!(report.outcome, MatchOutcome::Matched);
    assert_eq!(board.players()[1].score(), 1);
}

#[test]
fn test_surrogate_never_takes_the_turn() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(5), against_bot()).unwrap();

    for _ in 0..10 {
        let pick = find_miss(&board).unwrap();
        let report = board.play_turn(&alice(), pick).unwrap();
        assert_eq!(report.outcome, MatchOutcome::NoMatch);
        assert!(matches!(report.advance, TurnAdvance::Slid { turn_passed: false, .. }));
        assert_eq!(report.next_player, "alice");
        assert!(board.players()[0].has_turn());
        assert!(!board.players()[1].has_turn());
    }
}

#[test]
fn test_turn_owner_is_enforced() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(8), two_humans()).unwrap();
    let pick = find_miss(&board).unwrap();

    assert_eq!(board.play_turn(&bob(), pick), Err(BoardError::NotYourTurn(bob())));
    let stranger = UserId::from("99");
    assert_eq!(board.play_turn(&stranger, pick), Err(BoardError::NotAParticipant(stranger.clone())));

    let report = board.play_turn(&alice(), pick).unwrap();
    assert_eq!(report.next_player, "bob");
    let pick = find_miss(&board).unwrap();
    assert_eq!(board.play_turn(&alice(), pick), Err(BoardError::NotYourTurn(alice())));
    assert!(board.play_turn(&bob(), pick).is_ok());
}

#[test]
fn test_rejected_turn_leaves_board_untouched() {
    let mut board = Board::new("msg".into(), BoardConfig::default().with_seed(13), two_humans()).unwrap();
    let before = positions(&board);
    let players = board.players().clone();

    let water = board.cells().iter().position(|cell| cell.is_empty()).unwrap();
    let bad = Selection::new(0, 0, water, 0);
    assert_eq!(board.play_turn(&alice(), bad), Err(BoardError::EmptyCellSelected(water)));
    let bad = Selection::new(0, 9, 1, 0);
    assert_eq!(
        board.play_turn(&alice(), bad),
        Err(BoardError::MarkerIndexOutOfRange { position: 0, slot: 9 })
    );

    assert_eq!(positions(&board), before);
    assert_eq!(board.players(), &players);
    assert_eq!(board.advance_turn(), TurnAdvance::Idle);
}

#[test]
fn test_complete_only_after_every_pair() {
    let mut board = Board::new("msg".into(), BoardConfig::new(Difficulty::Easy).with_seed(21), against_bot()).unwrap();
    let pairs = 8 * 3 / 2;

    for found in 1..=pairs {
        assert!(!board.is_complete());
        let pick = find_pair(&board).unwrap();
        let report = board.play_turn(&alice(), pick).unwrap();
        assert_eq!(report.outcome, MatchOutcome::Matched);
        assert_eq!(report.first, report.second);
        assert_eq!(report.completed, found == pairs);
    }

    assert!(board.is_complete());
    assert_eq!(board.players()[0].score(), pairs as u32);
    assert_eq!(board.play_turn(&alice(), Selection::new(0, 0, 1, 0)), Err(BoardError::GameOver));
}

#[test]
fn test_invariants_survive_random_play() {
    for seed in 0..30 {
        let config = BoardConfig::new(Difficulty::Medium)
            .with_size(4, 4)
            .with_empty_cells(2)
            .with_seed(seed);
        let mut board = Board::new(format!("s{seed}"), config, two_humans()).unwrap();

        for turn in 0..200 {
            if board.is_complete() {
                break;
            }
            let actor = board.current_player().user_id().unwrap().clone();
            // mostly misses, with a pair every fifth turn
            let pick = (if turn % 5 == 4 { find_pair(&board) } else { find_miss(&board) })
                .or_else(|| find_pair(&board))
                .unwrap();

            let before = board.clone();
            board.play_turn(&actor, pick).unwrap();

            assert!(BoardInvariants::check_all(&board).is_ok(), "seed {seed} turn {turn}");
            assert!(MonotonicReveal::holds_between(&before, &board));
        }
    }
}

#[test]
fn test_relocation_flag_lasts_one_step() {
    let config = BoardConfig::new(Difficulty::Medium).with_size(4, 4).with_empty_cells(3).with_seed(17);
    let mut board = Board::new("msg".into(), config, two_humans()).unwrap();

    let mut previous: Vec<usize> = Vec::new();
    for _ in 0..40 {
        let slides = board.slide_step();
        let flagged: Vec<usize> = board
            .cells()
            .iter()
            .filter_map(Cell::as_occupied)
            .filter(|raft| raft.relocated_this_turn())
            .map(|raft| raft.position())
            .collect();
        let moved: Vec<usize> = slides.iter().map(|slide| slide.to).collect();

        let mut sorted = moved.clone();
        sorted.sort_unstable();
        assert_eq!(flagged, sorted, "only this step's rafts stay flagged");

        // a raft moved last step was not eligible this step
        for slide in &slides {
            assert!(!previous.contains(&slide.from));
        }
        previous = moved;
    }
}
