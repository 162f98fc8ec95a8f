//! A single quiz game: board, teams, ledger, progress, and the active question.
//!
//! All state lives in `GameSession`; nothing is global. Every operation runs
//! to completion and either succeeds or leaves the session untouched.

use im::OrdSet;
use tracing::{debug, info, warn};

use crate::board::{Board, Question};
use crate::core::{BoardRng, QuestionKey, RulesConfig};
use crate::error::{QuizError, Result};
use crate::export::{self, AnswerSheet, AnswerSheetFormat};
use crate::flow::{
    self, can_wager, ActiveQuestion, Charge, FlowPhase, Play, Steal, WagerBounds, WagerReceipt,
    WagerStep,
};
use crate::ledger::{LedgerEntry, ScoringLedger};
use crate::progress::{GameProgress, GameResult};
use crate::snapshot::{GameSnapshot, SnapshotCodec};
use crate::teams::{TeamId, TeamRegistry};

/// What a scoring decision changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionReport {
    pub key: QuestionKey,
    /// Team credited or debited by the decision.
    pub team: TeamId,
    pub delta: i64,
    /// Wager-loss or steal penalty charged alongside.
    pub charge: Option<Charge>,
    /// Earlier decision on the same question that was reversed.
    pub replaced: Option<LedgerEntry>,
    /// Number of earlier side charges reversed.
    pub reversed_charges: usize,
    /// True only when this decision scored the last unscored cell.
    pub completed_now: bool,
}

/// One game on one board.
///
/// ```
/// use quiz_board::core::RulesConfig;
/// use quiz_board::flow::Steal;
/// use quiz_board::session::GameSession;
/// use quiz_board::teams::TeamId;
///
/// let mut game = GameSession::new(RulesConfig::default());
/// game.reveal_cell(0, 1).unwrap();
/// game.show_answer().unwrap();
/// game.decide(TeamId::new(0), true, Steal::None).unwrap();
/// assert_eq!(game.scores(), vec![200, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    rules: RulesConfig,
    name: String,
    board: Board,
    teams: TeamRegistry,
    ledger: ScoringLedger,
    progress: GameProgress,
    phase: FlowPhase,
}

impl GameSession {
    /// Default board with the minimum number of default-named teams.
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        let rules = rules.sanitized();
        let board = Board::with_defaults(&rules);
        let teams = TeamRegistry::new(rules.min_teams, |i| rules.team_name(i));
        Self::assemble(rules, String::new(), board, teams)
    }

    /// Session over an explicit board and team names.
    pub fn with_board<S: Into<String>>(
        rules: RulesConfig,
        board: Board,
        team_names: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let rules = rules.sanitized();
        let teams = TeamRegistry::from_names(team_names, rules.min_teams)?;
        Ok(Self::assemble(rules, String::new(), board, teams))
    }

    fn assemble(rules: RulesConfig, name: String, board: Board, teams: TeamRegistry) -> Self {
        Self {
            rules,
            name,
            board,
            teams,
            ledger: ScoringLedger::new(),
            progress: GameProgress::new(),
            phase: FlowPhase::Idle,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    #[must_use]
    pub fn scores(&self) -> Vec<i64> {
        self.teams.scores()
    }

    #[must_use]
    pub fn ledger(&self) -> &ScoringLedger {
        &self.ledger
    }

    #[must_use]
    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// The question being played, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveQuestion> {
        self.phase.active()
    }

    /// Content of the question being played, if any.
    #[must_use]
    pub fn active_question(&self) -> Option<&Question> {
        self.phase.active().and_then(|a| self.board.question(a.key).ok())
    }

    #[must_use]
    pub fn scored_keys(&self) -> &OrdSet<QuestionKey> {
        self.progress.scored_keys()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    /// Winner, once every cell has been scored.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.progress.result()
    }

    // === Question flow ===

    /// Open a cell.
    ///
    /// Ordinary cells go straight to showing the question. Daily Doubles wait
    /// for `select_wagering_team`.
    pub fn reveal_cell(&mut self, category: usize, row: usize) -> Result<ActiveQuestion> {
        self.require_idle("reveal a cell")?;
        let key = QuestionKey::new(category, row);
        let active = self.board.reveal_cell(key, self.rules.allow_replay)?;

        self.phase = if active.is_daily {
            FlowPhase::AwaitingTeam { active }
        } else {
            FlowPhase::Revealed {
                active,
                play: Play::Standard,
            }
        };
        debug!(%key, points = active.point_value, daily = active.is_daily, "cell revealed");
        Ok(active)
    }

    /// Choose the team playing a Daily Double.
    ///
    /// A team that cannot cover the minimum wager plays the tile at face value.
    /// On a reopened tile, eligibility and bounds use the team's score before
    /// the tile's earlier decision.
    pub fn select_wagering_team(&mut self, team: TeamId) -> Result<WagerStep> {
        let FlowPhase::AwaitingTeam { active } = self.phase else {
            return Err(self.wrong_phase("select a wagering team"));
        };
        let score = self.bankroll(active.key, team)?;

        if can_wager(score, &self.rules) {
            let bounds = WagerBounds::for_team(score, active.original_point_value, &self.rules);
            self.phase = FlowPhase::Wagering { active, team };
            debug!(key = %active.key, %team, min = bounds.min, max = bounds.max, "wagering");
            return Ok(WagerStep::Wager(bounds));
        }

        self.board.mark_revealed(active.key)?;
        self.phase = FlowPhase::Revealed {
            active,
            play: Play::Unwagered { chooser: team },
        };
        debug!(key = %active.key, %team, score, "bankroll below minimum wager, playing at face value");
        Ok(WagerStep::Skipped)
    }

    /// Lock in the wager, clamped into the team's bounds, and show the answer.
    pub fn confirm_wager(&mut self, amount: i64) -> Result<WagerReceipt> {
        let FlowPhase::Wagering { mut active, team } = self.phase else {
            return Err(self.wrong_phase("confirm a wager"));
        };
        let score = self.bankroll(active.key, team)?;
        let bounds = WagerBounds::for_team(score, active.original_point_value, &self.rules);
        let accepted = bounds.clamp(amount);

        self.board.mark_revealed(active.key)?;
        active.point_value = accepted;
        self.phase = FlowPhase::AnswerShown {
            active,
            play: Play::Wagered { team },
        };

        let receipt = WagerReceipt {
            team,
            requested: amount,
            accepted,
            bounds,
        };
        if receipt.was_clamped() {
            debug!(requested = amount, accepted, "wager clamped");
        }
        debug!(key = %active.key, %team, wager = accepted, "wager confirmed");
        Ok(receipt)
    }

    /// Show the answer. Has no effect on scores.
    pub fn show_answer(&mut self) -> Result<()> {
        match self.phase {
            FlowPhase::Revealed { active, play } => {
                self.phase = FlowPhase::AnswerShown { active, play };
                Ok(())
            }
            FlowPhase::AnswerShown { .. } => Ok(()),
            _ => Err(self.wrong_phase("show the answer")),
        }
    }

    /// Score the active question for `team`.
    ///
    /// Any earlier decision on the same question is reversed first, so
    /// deciding again corrects instead of accumulating.
    pub fn decide(&mut self, team: TeamId, correct: bool, steal: Steal) -> Result<DecisionReport> {
        let FlowPhase::AnswerShown { active, play } = self.phase else {
            return Err(self.wrong_phase("score a question"));
        };
        self.teams.check(team)?;
        let plan = flow::plan(&active, play, team, correct, steal, self.teams.len())?;
        let key = active.key;

        let reversed_charges = if self.rules.reverse_auxiliary_on_correction {
            self.ledger.reverse_auxiliaries(key, &mut self.teams)?
        } else {
            0
        };
        if let Some(charge) = plan.charge {
            self.ledger
                .record_auxiliary(key, charge.tag, charge.team, charge.delta, &mut self.teams)?;
        }
        let replaced = self
            .ledger
            .record_and_apply(key, plan.team, plan.delta, &mut self.teams)?;

        let completed_now = self
            .progress
            .mark_scored(key, self.board.total_cells(), &self.teams);
        self.phase = FlowPhase::Idle;

        debug!(%key, %team, correct, delta = plan.delta, corrected = replaced.is_some(), "question scored");
        if completed_now {
            if let Some(result) = self.progress.result() {
                info!(winner = %result.name, score = result.score, "board complete");
            }
        }

        Ok(DecisionReport {
            key,
            team,
            delta: plan.delta,
            charge: plan.charge,
            replaced,
            reversed_charges,
            completed_now,
        })
    }

    /// Dismiss the active question. Scores and reveal flags stay as they are.
    ///
    /// Returns `false` if nothing was active.
    pub fn cancel_active(&mut self) -> bool {
        if self.phase.is_idle() {
            return false;
        }
        debug!(phase = self.phase.name(), "active question cancelled");
        self.phase = FlowPhase::Idle;
        true
    }

    /// Begin a fresh play-through of the current board.
    pub fn start_playthrough(&mut self) {
        self.board.reset_revealed_flags();
        self.teams.reset_scores();
        self.ledger.clear();
        self.progress.reset();
        self.phase = FlowPhase::Idle;
        info!(
            categories = self.board.category_count(),
            rows = self.board.row_count(),
            teams = self.teams.len(),
            "play-through started"
        );
    }

    // === Teams ===

    /// Add a default-named team with a score of 0.
    ///
    /// Returns `None` when the registry is already full.
    pub fn add_team(&mut self) -> Option<TeamId> {
        let rules = &self.rules;
        let Some(team) = self.teams.add_team(|i| rules.team_name(i)) else {
            warn!(teams = self.teams.len(), "team limit reached, no team added");
            return None;
        };
        self.refresh_result();
        Some(team)
    }

    /// Remove the last team. No-op at the minimum team count.
    pub fn remove_team(&mut self) -> bool {
        let Some(removed) = self.teams.remove_team() else {
            return false;
        };
        let dropped = self.ledger.forget_team(removed);
        if dropped > 0 {
            warn!(team = %removed, entries = dropped, "dropped ledger entries for removed team");
        }
        if self.phase.wagering_team() == Some(removed) {
            self.cancel_active();
        }
        self.refresh_result();
        true
    }

    pub fn rename_team(&mut self, team: TeamId, name: impl Into<String>) -> Result<()> {
        self.teams.rename(team, name)
    }

    /// Overwrite a score directly. The ledger is not consulted or updated.
    pub fn manual_score_override(&mut self, team: TeamId, score: i64) -> Result<()> {
        self.teams.set_score(team, score)?;
        debug!(%team, score, "manual score override");
        Ok(())
    }

    // === Board structure and authoring ===

    pub fn add_category(&mut self) {
        self.board.add_category(&self.rules);
        self.reconcile_layout();
    }

    pub fn remove_category(&mut self) -> bool {
        let changed = self.board.remove_category();
        if changed {
            self.reconcile_layout();
        }
        changed
    }

    pub fn add_question_row(&mut self) {
        self.board.add_question_row(&self.rules);
        self.reconcile_layout();
    }

    pub fn remove_question_row(&mut self) -> bool {
        let changed = self.board.remove_question_row();
        if changed {
            self.reconcile_layout();
        }
        changed
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rename_category(&mut self, category: usize, name: impl Into<String>) -> Result<()> {
        self.board.rename_category(category, name)
    }

    /// Edit a question's text, media, points, or Daily Double flag.
    pub fn edit_question<F>(&mut self, category: usize, row: usize, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Question),
    {
        edit(self.board.question_mut(QuestionKey::new(category, row))?);
        Ok(())
    }

    pub fn set_daily(&mut self, category: usize, row: usize, is_daily: bool) -> Result<()> {
        self.board.set_daily(QuestionKey::new(category, row), is_daily)
    }

    /// Replace all Daily Double flags with `count` random ones.
    pub fn scatter_daily_doubles(&mut self, rng: &mut BoardRng, count: usize) -> Vec<QuestionKey> {
        self.board.scatter_daily_doubles(rng, count)
    }

    /// Back to a default board, default teams, and no name.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new(self.rules.clone());
    }

    // === Snapshots and export ===

    /// Capture the board and team names.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.name, &self.board, &self.teams)
    }

    /// Install a snapshot. Scores, ledger, and progress start over.
    ///
    /// Team names are replaced when the snapshot carries them. A malformed
    /// snapshot leaves the session untouched.
    pub fn load_snapshot(&mut self, snapshot: GameSnapshot) -> Result<()> {
        let parts = snapshot.into_parts(self.rules.min_teams)?;
        let teams = match parts.team_names {
            Some(names) => TeamRegistry::from_names(names, self.rules.min_teams)
                .map_err(|e| QuizError::MalformedSnapshot(e.to_string()))?,
            None => {
                let mut teams = self.teams.clone();
                teams.reset_scores();
                teams
            }
        };

        *self = Self::assemble(self.rules.clone(), parts.name, parts.board, teams);
        info!(
            name = %self.name,
            categories = self.board.category_count(),
            rows = self.board.row_count(),
            "snapshot loaded"
        );
        Ok(())
    }

    pub fn save_with(&self, codec: &impl SnapshotCodec) -> Result<Vec<u8>> {
        codec.encode(&self.snapshot())
    }

    pub fn load_with(&mut self, codec: &impl SnapshotCodec, bytes: &[u8]) -> Result<()> {
        let snapshot = codec.decode(bytes)?;
        self.load_snapshot(snapshot)
    }

    pub fn answer_sheet(&self, format: AnswerSheetFormat) -> Result<AnswerSheet> {
        export::render(&self.board, &self.name, format)
    }

    // === Internals ===

    /// `team`'s score with the entries a new decision on `key` would reverse
    /// backed out.
    fn bankroll(&self, key: QuestionKey, team: TeamId) -> Result<i64> {
        let score = self.teams.score(team)?;
        let stake = self
            .ledger
            .net_delta(key, team, self.rules.reverse_auxiliary_on_correction);
        Ok(score.saturating_sub(stake))
    }

    fn require_idle(&self, operation: &'static str) -> Result<()> {
        if self.phase.is_idle() {
            Ok(())
        } else {
            Err(self.wrong_phase(operation))
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> QuizError {
        let err = QuizError::WrongPhase {
            operation,
            phase: self.phase.name(),
        };
        warn!(error = %err, "operation rejected");
        err
    }

    /// Bring progress, ledger, and the active question in line with a new
    /// board shape. Scores already applied are kept.
    fn reconcile_layout(&mut self) {
        let (categories, rows) = (self.board.category_count(), self.board.row_count());
        self.progress.retain_within(categories, rows);
        self.ledger.retain_within(categories, rows);
        if self.phase.active().is_some_and(|a| !a.key.fits(categories, rows)) {
            self.cancel_active();
        }
        self.refresh_result();
    }

    fn refresh_result(&mut self) {
        self.progress.refresh(self.board.total_cells(), &self.teams);
    }
}
