//! Match Simulation Engine
//!
//! Resolves one fixture as a sequence of weighted random draws from zone-
//! and context-specific token bags on a 6×5 pitch grid:
//!
//! - `zone` / `token`: the grid and the action catalogue
//! - `bag_builder`: zone templates + skill/fatigue/pressure/staff scaling
//! - `resolver`: the weighted draw and per-kind effect rules
//! - `MatchEngine` (this module): the state machine driving the loop
//!
//! Determinism: one `ChaCha8Rng` stream seeded per match drives every draw;
//! identical seed, rosters and config produce byte-identical event logs.

pub mod bag_builder;
pub mod effect;
pub mod fatigue;
pub mod phase;
pub mod resolver;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod token;
pub mod weight;
pub mod zone;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::models::events::{EventKind, MatchEvent};
use crate::models::match_result::{MatchResult, TeamStats};
use crate::models::player::TokenPlayer;
use crate::models::team::{Fixture, StaffMember, TeamSide};
use bag_builder::{BagBuilder, RECOVERY_WEIGHT};
use effect::{ActionEffect, RestartAward, TokenOutcome};
use phase::{LoopState, PlayPhase};
use token::{Bag, Token, TokenKind};
use zone::{BylineOverflow, Zone};

/// Only the first eleven of a sheet take the pitch; there is no
/// substitution model.
const MATCHDAY_SQUAD: usize = 11;

/// Everything needed to run one match.
#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub fixture: Fixture,
    pub config: SimConfig,
}

/// Mutable aggregate owned by the loop for the duration of one match.
///
/// Invariants: `elapsed_secs` is monotone non-decreasing and never exceeds
/// `match_duration + stoppage`; scores never decrease; `possession` is
/// always one of the two fixture sides.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub elapsed_secs: u32,
    pub ball: Zone,
    pub possession: TeamSide,
    pub score: [u8; 2],
    pub stats: [TeamStats; 2],
    pub events: Vec<MatchEvent>,
}

pub struct MatchEngine {
    config: SimConfig,
    match_id: String,
    team_ids: [String; 2],
    squads: [Vec<TokenPlayer>; 2],
    staff: [Vec<StaffMember>; 2],
    rng: ChaCha8Rng,
    seed: u64,
    state: MatchState,
    loop_state: LoopState,
    play_phase: PlayPhase,
    first_kickoff: TeamSide,
    second_half_started: bool,
    stoppage_accrued: u32,
    capture_debug: bool,
}

impl MatchEngine {
    pub fn new(plan: MatchPlan) -> Result<Self> {
        plan.config.validate()?;
        plan.fixture.validate()?;
        let MatchPlan { fixture, config } = plan;

        let seed = fixture.seed.unwrap_or_else(|| derive_seed(&fixture.match_id));
        let squads = [
            fixture
                .home
                .players
                .iter()
                .take(MATCHDAY_SQUAD)
                .map(|r| TokenPlayer::from_record(r, TeamSide::Home))
                .collect(),
            fixture
                .away
                .players
                .iter()
                .take(MATCHDAY_SQUAD)
                .map(|r| TokenPlayer::from_record(r, TeamSide::Away))
                .collect(),
        ];

        Ok(Self {
            config,
            match_id: fixture.match_id,
            team_ids: [fixture.home.team_id, fixture.away.team_id],
            squads,
            staff: [fixture.home.staff, fixture.away.staff],
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            state: MatchState {
                elapsed_secs: 0,
                ball: Zone::CENTER,
                possession: TeamSide::Home,
                score: [0, 0],
                stats: [TeamStats::default(), TeamStats::default()],
                events: Vec::new(),
            },
            loop_state: LoopState::Kickoff,
            play_phase: PlayPhase::Kickoff,
            first_kickoff: TeamSide::Home,
            second_half_started: false,
            stoppage_accrued: 0,
            capture_debug: false,
        })
    }

    /// Retain per-event bag snapshots and the drawn token for analysis.
    /// Off by default: the payload is large and stripped before storage.
    pub fn with_debug_log(mut self) -> Self {
        self.capture_debug = true;
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Run the loop to full time and produce the result.
    pub fn simulate(&mut self) -> MatchResult {
        while !self.loop_state.is_terminal() {
            match self.loop_state {
                LoopState::Kickoff => self.start_match(),
                LoopState::InPlay => self.step(),
                LoopState::GoalStoppage => self.restart_after_goal(),
                LoopState::HalfBreak => self.start_second_half(),
                LoopState::FullTime => unreachable!("terminal state inside loop"),
            }
        }
        self.finalize()
    }

    fn start_match(&mut self) {
        self.state.ball = Zone::CENTER;
        self.state.possession = self.first_kickoff;
        self.play_phase = PlayPhase::Kickoff;
        self.emit_phase_event(EventKind::KickOff, "kickoff.start", self.first_kickoff);
        self.loop_state = LoopState::InPlay;
    }

    fn restart_after_goal(&mut self) {
        let delay = self.config.timing.kickoff_delay_secs;
        self.stoppage_accrued += delay;
        self.advance_clock(delay);
        let conceding = self.state.possession.opponent();
        self.state.ball = Zone::CENTER;
        self.state.possession = conceding;
        self.play_phase = PlayPhase::Kickoff;
        self.emit_phase_event(EventKind::KickOff, "kickoff.restart", conceding);
        self.loop_state = LoopState::InPlay;
        self.check_end(true);
    }

    fn start_second_half(&mut self) {
        self.second_half_started = true;
        let restarting = self.first_kickoff.opponent();
        self.state.ball = Zone::CENTER;
        self.state.possession = restarting;
        self.play_phase = PlayPhase::Kickoff;
        self.emit_phase_event(EventKind::HalfTime, "half.break", restarting);
        self.emit_phase_event(EventKind::KickOff, "kickoff.second_half", restarting);
        self.loop_state = LoopState::InPlay;
    }

    /// One resolution step: build bag, draw, apply, log, decay fatigue.
    fn step(&mut self) {
        let possession = self.state.possession;
        let bag = BagBuilder::new(&self.config).build(
            self.state.ball,
            self.play_phase,
            possession,
            &self.squads,
            &self.staff,
        );

        let resolved = resolver::resolve(&bag, self.state.ball, &mut self.rng, &self.config);
        let (token, outcome) = match resolved {
            Some(pair) => pair,
            None => {
                // The fallback token makes an empty bag unreachable; if it
                // happens anyway, degrade to a neutral action in release.
                debug_assert!(false, "empty bag reached the resolver");
                log::error!(
                    "match {}: empty bag at {:?} in {:?}, substituting recovery",
                    self.match_id,
                    self.state.ball,
                    self.play_phase
                );
                (
                    Token {
                        kind: TokenKind::Recovery,
                        team: possession,
                        player: None,
                        weight: RECOVERY_WEIGHT,
                    },
                    resolver::fallback_outcome(),
                )
            }
        };

        self.state.stats[possession.index()].possession_ticks += 1;

        let dt = outcome.time_cost.unwrap_or(self.config.timing.base_tick_secs);
        self.advance_clock(dt);
        if token.kind == TokenKind::Foul {
            let delay = self.config.timing.foul_delay_secs;
            self.stoppage_accrued += delay;
            self.advance_clock(delay);
        }

        self.apply_stats(&token, &outcome);
        let was_set_piece = self.play_phase.is_set_piece();
        self.apply_effect(possession, &outcome);
        if !matches!(outcome.effect, ActionEffect::OutOfPlay { .. }) && was_set_piece {
            self.play_phase = PlayPhase::Open;
        }

        self.push_event(&token, &outcome, possession, &bag);
        self.decay_fatigue(dt, &token);

        let half = self.config.timing.match_duration_secs / 2;
        if self.loop_state == LoopState::InPlay
            && !self.second_half_started
            && self.state.elapsed_secs >= half
        {
            self.loop_state = LoopState::HalfBreak;
            return;
        }
        self.check_end(outcome.effect.is_boundary());
    }

    fn apply_effect(&mut self, possession: TeamSide, outcome: &TokenOutcome) {
        match outcome.effect {
            ActionEffect::Move { dx, dy } => {
                let grid_dx = Zone::to_grid_frame(possession, dx as i16);
                let (zone, overflow) = self.state.ball.offset(grid_dx, dy as i16);
                self.state.ball = zone;
                match overflow {
                    BylineOverflow::None => {}
                    _ => self.resolve_byline(possession, overflow),
                }
            }
            ActionEffect::Reposition { zone } => self.state.ball = zone,
            ActionEffect::Turnover { zone } => {
                self.state.possession = possession.opponent();
                if let Some(zone) = zone {
                    self.state.ball = zone;
                }
            }
            ActionEffect::Goal => {
                self.state.score[possession.index()] += 1;
                self.loop_state = LoopState::GoalStoppage;
            }
            ActionEffect::OutOfPlay { restart, award } => {
                self.play_phase = PlayPhase::from_restart(restart);
                if award == RestartAward::Opponent {
                    self.state.possession = possession.opponent();
                }
            }
            ActionEffect::StatOnly => {}
        }
    }

    /// A move crossed a byline: resolve to a restart instead of an invalid
    /// zone. Overhit forward balls become goal kicks for the defenders; a
    /// ball played back over the own byline concedes a corner.
    fn resolve_byline(&mut self, possession: TeamSide, overflow: BylineOverflow) {
        let toward_attack = match possession {
            TeamSide::Home => BylineOverflow::High,
            TeamSide::Away => BylineOverflow::Low,
        };
        if overflow == toward_attack {
            self.play_phase = PlayPhase::GoalKick;
            self.state.possession = possession.opponent();
        } else {
            self.play_phase = PlayPhase::Corner;
            self.state.possession = possession.opponent();
        }
    }

    fn apply_stats(&mut self, token: &Token, outcome: &TokenOutcome) {
        let team_stats = &mut self.state.stats[token.team.index()];
        for &(key, amount) in &outcome.stats {
            team_stats.apply(key, amount);
        }
        if let Some(player_id) = token.player {
            if let Some(player) =
                self.squads[token.team.index()].iter_mut().find(|p| p.id == player_id)
            {
                for &(key, amount) in &outcome.stats {
                    player.stats.apply(key, amount);
                }
            }
        }
    }

    fn decay_fatigue(&mut self, dt: u32, token: &Token) {
        for squad in self.squads.iter_mut() {
            for player in squad.iter_mut() {
                fatigue::accrue(player, dt, &self.config.balance);
            }
        }
        if let Some(player_id) = token.player {
            if let Some(player) =
                self.squads[token.team.index()].iter_mut().find(|p| p.id == player_id)
            {
                fatigue::accrue_actor(player, &self.config.balance);
            }
        }
    }

    /// Clock only moves forward, hard-capped at duration + configured
    /// stoppage.
    fn advance_clock(&mut self, dt: u32) {
        let cap = self.config.timing.match_duration_secs + self.config.timing.stoppage_secs;
        self.state.elapsed_secs = (self.state.elapsed_secs + dt).min(cap);
    }

    /// Accrued stoppage is consumed once regulation is exhausted; the first
    /// boundary event past regulation (or running out of budget) ends the
    /// match.
    fn check_end(&mut self, boundary: bool) {
        let duration = self.config.timing.match_duration_secs;
        let budget = self.stoppage_accrued.min(self.config.timing.stoppage_secs);
        let elapsed = self.state.elapsed_secs;
        if elapsed >= duration + budget || (elapsed >= duration && boundary) {
            self.loop_state = LoopState::FullTime;
        }
    }

    fn push_event(
        &mut self,
        token: &Token,
        outcome: &TokenOutcome,
        possession: TeamSide,
        bag: &Bag,
    ) {
        self.state.events.push(MatchEvent {
            time_secs: self.state.elapsed_secs,
            kind: EventKind::from_token(token.kind),
            narrative_key: outcome.narrative.to_string(),
            actor: token.player,
            team: token.team,
            possession,
            ball: self.state.ball,
            bag: self.capture_debug.then(|| bag.tokens().to_vec()),
            token: self.capture_debug.then(|| token.clone()),
        });
    }

    fn emit_phase_event(&mut self, kind: EventKind, narrative: &str, team: TeamSide) {
        self.state.events.push(MatchEvent {
            time_secs: self.state.elapsed_secs,
            kind,
            narrative_key: narrative.to_string(),
            actor: None,
            team,
            possession: self.state.possession,
            ball: self.state.ball,
            bag: None,
            token: None,
        });
    }

    fn finalize(&mut self) -> MatchResult {
        self.emit_phase_event(EventKind::FullTime, "full_time", self.state.possession);

        let home_ticks = self.state.stats[0].possession_ticks;
        let away_ticks = self.state.stats[1].possession_ticks;
        let total_ticks = (home_ticks + away_ticks).max(1);
        self.state.stats[0].possession_pct = home_ticks as f32 / total_ticks as f32 * 100.0;
        self.state.stats[1].possession_pct = away_ticks as f32 / total_ticks as f32 * 100.0;

        let mut player_stats = BTreeMap::new();
        for squad in &self.squads {
            for player in squad {
                player_stats.insert(player.id, player.stats.clone());
            }
        }

        MatchResult {
            match_id: self.match_id.clone(),
            home_team: self.team_ids[0].clone(),
            away_team: self.team_ids[1].clone(),
            score_home: self.state.score[0],
            score_away: self.state.score[1],
            stats_home: self.state.stats[0].clone(),
            stats_away: self.state.stats[1].clone(),
            player_stats,
            events: std::mem::take(&mut self.state.events),
            seed: self.seed,
        }
    }
}

/// Simulate one fixture with the given config.
pub fn simulate_match(fixture: &Fixture, config: &SimConfig) -> Result<MatchResult> {
    let mut engine =
        MatchEngine::new(MatchPlan { fixture: fixture.clone(), config: config.clone() })?;
    Ok(engine.simulate())
}

/// Stable seed for fixtures that do not carry one. FNV-1a over the match
/// id: unlike the std hasher, the output never changes across toolchain
/// versions, so seedless fixtures stay reproducible too.
fn derive_seed(match_id: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in match_id.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
