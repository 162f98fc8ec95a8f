//! Scoring and correction tests.
//!
//! These verify that re-deciding a question converges on the latest decision,
//! and that wagers and steals charge the right teams.

use proptest::prelude::*;

use quiz_board::board::{Board, Category, Question};
use quiz_board::core::{QuestionKey, RulesConfig};
use quiz_board::flow::{Steal, WagerBounds, WagerStep};
use quiz_board::ledger::{EntryTag, EventKind, LedgerEntry};
use quiz_board::session::GameSession;
use quiz_board::teams::TeamId;

const T0: TeamId = TeamId::new(0);
const T1: TeamId = TeamId::new(1);
const T2: TeamId = TeamId::new(2);

fn single_cell(points: i64) -> GameSession {
    let board = Board::from_categories(vec![Category::new("Solo", vec![Question::blank(points)])]).unwrap();
    GameSession::with_board(RulesConfig::default(), board, ["Team 1", "Team 2"]).unwrap()
}

fn session_with(rules: RulesConfig, categories: usize, rows: usize, teams: usize) -> GameSession {
    let board = Board::generated(categories, rows, &rules);
    let names: Vec<String> = (0..teams).map(|i| rules.team_name(i)).collect();
    GameSession::with_board(rules, board, names).unwrap()
}

fn decide_cell(game: &mut GameSession, category: usize, row: usize, team: TeamId, correct: bool, steal: Steal) {
    game.reveal_cell(category, row).unwrap();
    game.show_answer().unwrap();
    game.decide(team, correct, steal).unwrap();
}

fn wager_cell(game: &mut GameSession, category: usize, row: usize, team: TeamId, amount: i64) {
    game.set_daily(category, row, true).unwrap();
    game.reveal_cell(category, row).unwrap();
    game.select_wagering_team(team).unwrap();
    game.confirm_wager(amount).unwrap();
}

/// A single decision completes a one-cell board; a forced re-decision moves
/// the points instead of doubling them.
#[test]
fn test_redecide_moves_points() {
    let mut game = single_cell(200);

    game.reveal_cell(0, 0).unwrap();
    game.show_answer().unwrap();
    let report = game.decide(T0, true, Steal::None).unwrap();
    assert!(report.completed_now);
    assert_eq!(game.scores(), vec![200, 0]);

    let result = game.result().unwrap();
    assert_eq!(result.winner, T0);
    assert_eq!(result.name, "Team 1");
    assert_eq!(result.score, 200);

    game.reveal_cell(0, 0).unwrap();
    game.show_answer().unwrap();
    let report = game.decide(T1, true, Steal::None).unwrap();
    assert!(!report.completed_now);
    assert_eq!(report.replaced, Some(LedgerEntry::new(T0, 200)));
    assert_eq!(game.scores(), vec![0, 200]);

    // Result follows the correction while the board stays complete
    assert_eq!(game.result().unwrap().winner, T1);
}

#[test]
fn test_same_decision_twice_is_idempotent() {
    let mut game = session_with(RulesConfig::default(), 2, 2, 2);
    decide_cell(&mut game, 1, 1, T1, false, Steal::None);
    let after_first = game.scores();
    decide_cell(&mut game, 1, 1, T1, false, Steal::None);
    assert_eq!(game.scores(), after_first);
    assert_eq!(after_first, vec![0, -200]);
}

#[test]
fn test_incorrect_then_corrected() {
    let mut game = session_with(RulesConfig::default(), 1, 3, 2);
    decide_cell(&mut game, 0, 2, T0, false, Steal::None);
    assert_eq!(game.scores(), vec![-300, 0]);

    decide_cell(&mut game, 0, 2, T0, true, Steal::None);
    assert_eq!(game.scores(), vec![300, 0]);
}

#[test]
fn test_wagered_correct_doubles_wager() {
    let mut game = session_with(RulesConfig::default(), 1, 2, 2);
    game.manual_score_override(T0, 600).unwrap();

    wager_cell(&mut game, 0, 1, T0, 500);
    let report = game.decide(T0, true, Steal::None).unwrap();
    assert_eq!(report.delta, 1000);
    assert!(report.charge.is_none());
    assert_eq!(game.scores(), vec![1600, 0]);
}

#[test]
fn test_wagered_incorrect_loses_wager() {
    let mut game = session_with(RulesConfig::default(), 1, 2, 2);
    game.manual_score_override(T0, 600).unwrap();

    wager_cell(&mut game, 0, 1, T0, 500);
    game.decide(T0, false, Steal::None).unwrap();
    assert_eq!(game.scores(), vec![100, 0]);
}

/// Another team answering a wagered tile earns face value and the wagering
/// team loses its wager.
#[test]
fn test_wagered_answered_by_other_team() {
    let mut game = session_with(RulesConfig::default(), 1, 2, 2);
    game.manual_score_override(T0, 600).unwrap();

    wager_cell(&mut game, 0, 1, T0, 300);
    let report = game.decide(T1, true, Steal::None).unwrap();
    assert_eq!(report.delta, 200);
    let charge = report.charge.unwrap();
    assert_eq!(charge.tag, EntryTag::Wager);
    assert_eq!((charge.team, charge.delta), (T0, -300));
    assert_eq!(game.scores(), vec![300, 200]);
}

#[test]
fn test_wager_loss_reversed_on_correction() {
    let mut game = session_with(RulesConfig::default(), 1, 2, 2);
    game.manual_score_override(T0, 600).unwrap();

    wager_cell(&mut game, 0, 1, T0, 300);
    game.decide(T1, true, Steal::None).unwrap();
    assert_eq!(game.scores(), vec![300, 200]);

    // Reopen the same Daily Double and credit the wagering team instead
    game.reveal_cell(0, 1).unwrap();
    game.select_wagering_team(T0).unwrap();
    let receipt = game.confirm_wager(300).unwrap();
    assert_eq!(receipt.bounds, WagerBounds { min: 5, max: 600 });
    game.decide(T0, true, Steal::None).unwrap();
    assert_eq!(game.scores(), vec![1200, 0]);
}

/// Reopening a missed Daily Double wagers against the score the team had
/// before the miss, so the correction lands where a single decision would.
#[test]
fn test_corrected_daily_double_matches_single_decision() {
    let replay = |decisions: &[bool]| {
        let mut game = session_with(RulesConfig::default(), 1, 2, 2);
        game.manual_score_override(T0, 1000).unwrap();
        game.set_daily(0, 1, true).unwrap();
        for &correct in decisions {
            game.reveal_cell(0, 1).unwrap();
            assert!(matches!(game.select_wagering_team(T0).unwrap(), WagerStep::Wager(_)));
            game.confirm_wager(1000).unwrap();
            game.decide(T0, correct, Steal::None).unwrap();
        }
        game.scores()
    };

    assert_eq!(replay(&[true]), vec![3000, 0]);
    assert_eq!(replay(&[false]), vec![0, 0]);
    assert_eq!(replay(&[false, true]), vec![3000, 0]);
    assert_eq!(replay(&[true, false, true]), vec![3000, 0]);
}

#[test]
fn test_extreme_scores_saturate() {
    let mut game = session_with(RulesConfig::default(), 1, 2, 2);
    game.manual_score_override(T0, i64::MAX).unwrap();
    decide_cell(&mut game, 0, 0, T0, true, Steal::None);
    assert_eq!(game.scores(), vec![i64::MAX, 0]);

    game.set_daily(0, 1, true).unwrap();
    game.reveal_cell(0, 1).unwrap();
    game.select_wagering_team(T0).unwrap();
    let receipt = game.confirm_wager(i64::MAX).unwrap();
    assert_eq!(receipt.accepted, i64::MAX);
    game.decide(T0, true, Steal::None).unwrap();
    assert_eq!(game.scores(), vec![i64::MAX, 0]);

    game.manual_score_override(T1, i64::MIN).unwrap();
    decide_cell(&mut game, 0, 0, T1, false, Steal::None);
    assert_eq!(game.scores()[1], i64::MIN);
}

#[test]
fn test_wager_clamped_to_double_face_value() {
    let mut game = session_with(RulesConfig::default(), 1, 3, 2);
    game.manual_score_override(T1, 50).unwrap();

    game.set_daily(0, 2, true).unwrap();
    game.reveal_cell(0, 2).unwrap();
    game.select_wagering_team(T1).unwrap();
    let receipt = game.confirm_wager(10_000).unwrap();
    assert_eq!(receipt.bounds, WagerBounds { min: 5, max: 600 });
    assert_eq!(receipt.accepted, 600);

    game.decide(T1, true, Steal::None).unwrap();
    assert_eq!(game.scores(), vec![0, 1250]);
}

#[test]
fn test_wager_clamped_up_to_minimum() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 2);
    game.manual_score_override(T0, 40).unwrap();

    wager_cell(&mut game, 0, 0, T0, 1);
    assert_eq!(game.active().unwrap().point_value, 5);
    assert_eq!(game.active().unwrap().original_point_value, 100);
}

#[test]
fn test_steal_two_teams_auto_victim() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 2);
    decide_cell(&mut game, 0, 0, T1, true, Steal::Auto);
    assert_eq!(game.scores(), vec![-100, 100]);
}

#[test]
fn test_steal_ignored_when_incorrect() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 3);
    decide_cell(&mut game, 0, 0, T0, false, Steal::From(T2));
    assert_eq!(game.scores(), vec![-100, 0, 0]);
}

#[test]
fn test_steal_from_self_rejected() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 3);
    game.reveal_cell(0, 0).unwrap();
    game.show_answer().unwrap();
    assert!(game.decide(T1, true, Steal::From(T1)).is_err());
    assert_eq!(game.scores(), vec![0, 0, 0]);
}

#[test]
fn test_unknown_team_rejected_without_side_effects() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 2);
    game.reveal_cell(0, 0).unwrap();
    game.show_answer().unwrap();
    let err = game.decide(TeamId::new(7), true, Steal::None).unwrap_err();
    assert!(err.is_out_of_range());
    assert!(game.ledger().is_empty());
    assert!(game.phase().answer_visible());
}

/// With legacy corrections, steal penalties survive a re-decision.
#[test]
fn test_legacy_corrections_keep_side_charges() {
    let mut game = session_with(RulesConfig::default().with_legacy_corrections(), 1, 1, 3);
    decide_cell(&mut game, 0, 0, T0, true, Steal::From(T1));
    decide_cell(&mut game, 0, 0, T0, true, Steal::From(T1));
    assert_eq!(game.scores(), vec![100, -200, 0]);
}

#[test]
fn test_default_corrections_reverse_side_charges() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 3);
    decide_cell(&mut game, 0, 0, T0, true, Steal::From(T1));
    decide_cell(&mut game, 0, 0, T0, true, Steal::From(T1));
    assert_eq!(game.scores(), vec![100, -100, 0]);
}

#[test]
fn test_history_records_reversals() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 2);
    decide_cell(&mut game, 0, 0, T0, true, Steal::None);
    decide_cell(&mut game, 0, 0, T1, true, Steal::None);

    let kinds: Vec<_> = game.ledger().history().iter().map(|e| (e.kind, e.entry.team)).collect();
    assert_eq!(
        kinds,
        vec![
            (EventKind::Applied, T0),
            (EventKind::Reversed, T0),
            (EventKind::Applied, T1),
        ]
    );
    let total: i64 = game.ledger().history().iter().map(|e| e.score_change()).sum();
    assert_eq!(total, game.scores().iter().sum::<i64>());
}

#[test]
fn test_manual_override_bypasses_ledger() {
    let mut game = session_with(RulesConfig::default(), 1, 1, 2);
    decide_cell(&mut game, 0, 0, T0, true, Steal::None);
    game.manual_score_override(T0, 0).unwrap();

    decide_cell(&mut game, 0, 0, T1, true, Steal::None);
    assert_eq!(game.scores(), vec![-100, 100]);
    assert_eq!(game.ledger().get(QuestionKey::new(0, 0)), Some(&LedgerEntry::new(T1, 100)));
}

fn decision() -> impl Strategy<Value = (u8, bool)> {
    (0u8..3, any::<bool>())
}

proptest! {
    /// Any sequence of decisions on one cell leaves only the last one applied.
    #[test]
    fn prop_last_decision_wins(decisions in prop::collection::vec(decision(), 1..12)) {
        let mut game = session_with(RulesConfig::default(), 1, 2, 3);
        for &(team, correct) in &decisions {
            decide_cell(&mut game, 0, 1, TeamId::new(team), correct, Steal::None);
        }

        let (team, correct) = *decisions.last().unwrap();
        let mut expected = vec![0i64; 3];
        expected[team as usize] = if correct { 200 } else { -200 };
        prop_assert_eq!(game.scores(), expected);
    }

    /// Same for steals, as long as side charges are reversed.
    #[test]
    fn prop_last_steal_wins(
        decisions in prop::collection::vec((0u8..3, 0u8..3, any::<bool>()), 1..12),
    ) {
        let mut game = session_with(RulesConfig::default(), 1, 1, 3);
        let mut last = None;
        for &(team, victim, correct) in &decisions {
            let steal = if team == victim { Steal::None } else { Steal::From(TeamId::new(victim)) };
            decide_cell(&mut game, 0, 0, TeamId::new(team), correct, steal);
            last = Some((team, victim, correct));
        }

        let (team, victim, correct) = last.unwrap();
        let mut expected = vec![0i64; 3];
        expected[team as usize] = if correct { 100 } else { -100 };
        if correct && team != victim {
            expected[victim as usize] -= 100;
        }
        prop_assert_eq!(game.scores(), expected);
    }

    /// Any sequence of decisions on a Daily Double ends where its last
    /// decision alone would.
    #[test]
    fn prop_daily_double_correction_converges(
        start in -500i64..3_000,
        plays in prop::collection::vec((0i64..4_000, any::<bool>()), 1..6),
    ) {
        let play_all = |plays: &[(i64, bool)]| {
            let mut game = session_with(RulesConfig::default(), 1, 2, 2);
            game.manual_score_override(T0, start).unwrap();
            game.set_daily(0, 1, true).unwrap();
            for &(wager, correct) in plays {
                game.reveal_cell(0, 1).unwrap();
                if let WagerStep::Wager(_) = game.select_wagering_team(T0).unwrap() {
                    game.confirm_wager(wager).unwrap();
                } else {
                    game.show_answer().unwrap();
                }
                game.decide(T0, correct, Steal::None).unwrap();
            }
            game.scores()
        };

        let last = *plays.last().unwrap();
        prop_assert_eq!(play_all(&plays), play_all(&[last]));
    }

    /// Confirmed wagers always land in [min, max(score, 2 x face, min)].
    #[test]
    fn prop_wager_within_bounds(score in -2_000i64..5_000, requested in -10_000i64..10_000, row in 0usize..5) {
        let rules = RulesConfig::default();
        let mut game = session_with(rules.clone(), 1, 5, 2);
        game.manual_score_override(T0, score).unwrap();
        game.set_daily(0, row, true).unwrap();
        game.reveal_cell(0, row).unwrap();
        game.select_wagering_team(T0).unwrap();

        if score < rules.min_wager {
            prop_assert!(game.confirm_wager(requested).is_err());
        } else {
            let receipt = game.confirm_wager(requested).unwrap();
            let face = rules.tier_points(row);
            prop_assert!(receipt.accepted >= rules.min_wager);
            prop_assert!(receipt.accepted <= score.max(face * 2));
        }
    }
}
