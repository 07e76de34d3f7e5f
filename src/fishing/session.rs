// Session: a series of rounds sharing a cumulative total.

use std::collections::VecDeque;

use rand::Rng;

use super::hook::FrameInput;
use super::mode::{AdvancedLevel, Mode};
use super::{FrameReport, Round, RoundPhase};
use crate::config::{ConfigError, FishingConfig};

/// Control signals from the UI. They are queued and applied at the top of the
/// next frame so a reset can never interleave with a frame in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fresh round with the selected mode. A finished round that was not
    /// banked is discarded.
    Start,
    /// Bank the finished round and play the same level again.
    Replay,
    /// Bank the finished round and move to the next advanced level (3 wraps to 1).
    NextLevel,
    /// Bank the finished round, go back to advanced level 1 and wait.
    EndSeries,
    /// Abandon a running round without scoring.
    Abort,
    /// Zero the cumulative total and wait.
    ResetSeries,
    /// Mode for the next round started.
    SelectMode(Mode),
    /// Switch between simple and advanced mode for the next round. Advanced
    /// resumes at the last advanced level selected.
    SetAdvanced(bool),
}

/// What the summary view shows once a round finishes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoundSummary {
    pub mode: Mode,
    pub title: &'static str,
    pub score: i32,
    /// Total including this round, as it will be once the round is banked.
    pub cumulative_total: i64,
    pub caught_bad: Vec<String>,
    pub caught_good: Vec<String>,
}

pub struct Session {
    config: FishingConfig,
    selected_mode: Mode,
    advanced_level: AdvancedLevel,
    round: Round,
    total_score: i64,
    pending: VecDeque<Command>,
    last_summary: Option<RoundSummary>,
}

impl Session {
    pub fn new(config: FishingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mode = Mode::default();
        Ok(Self {
            round: Round::new(mode, &config),
            config,
            selected_mode: mode,
            advanced_level: AdvancedLevel::Senders,
            total_score: 0,
            pending: VecDeque::new(),
            last_summary: None,
        })
    }

    pub fn config(&self) -> &FishingConfig {
        &self.config
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn selected_mode(&self) -> Mode {
        self.selected_mode
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    /// Queue a command for the next frame.
    pub fn push(&mut self, cmd: Command) {
        self.pending.push_back(cmd);
    }

    /// The host should keep requesting frames while this is true.
    pub fn wants_frames(&self) -> bool {
        self.round.phase() == RoundPhase::Running || !self.pending.is_empty()
    }

    /// One frame: apply queued commands, then advance the round.
    pub fn frame<R: Rng + ?Sized>(&mut self, now_ms: f64, input: &FrameInput, rng: &mut R) -> FrameReport {
        while let Some(cmd) = self.pending.pop_front() {
            self.apply(cmd, rng);
        }
        let report = self.round.frame(now_ms, input, &self.config, rng);
        if report.finished {
            self.last_summary = Some(self.summarize());
        }
        report
    }

    fn apply<R: Rng + ?Sized>(&mut self, cmd: Command, rng: &mut R) {
        let finished = self.round.phase() == RoundPhase::Finished;
        match cmd {
            Command::Start => self.start_round(rng),
            Command::Replay | Command::NextLevel | Command::EndSeries if !finished => {
                log::warn!("ignoring {:?}: round is {:?}", cmd, self.round.phase());
            }
            Command::Replay => {
                self.bank_round();
                self.start_round(rng);
            }
            Command::NextLevel => {
                self.bank_round();
                if let Mode::Advanced(level) = self.selected_mode {
                    self.selected_mode = Mode::Advanced(level.next_wrapping());
                }
                self.start_round(rng);
            }
            Command::EndSeries => {
                self.bank_round();
                if let Mode::Advanced(_) = self.selected_mode {
                    self.selected_mode = Mode::Advanced(AdvancedLevel::Senders);
                }
                self.round.reset(&self.config);
                log::info!("series ended with total {}", self.total_score);
            }
            Command::Abort => {
                if self.round.phase() == RoundPhase::Running {
                    log::info!("round aborted");
                }
                self.round.reset(&self.config);
            }
            Command::ResetSeries => {
                self.total_score = 0;
                self.last_summary = None;
                self.round.reset(&self.config);
            }
            Command::SelectMode(mode) => self.selected_mode = mode,
            Command::SetAdvanced(true) => self.selected_mode = Mode::Advanced(self.advanced_level),
            Command::SetAdvanced(false) => self.selected_mode = Mode::Simple,
        }
        if let Mode::Advanced(level) = self.selected_mode {
            self.advanced_level = level;
        }
    }

    fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.round.start(self.selected_mode, &self.config, rng);
    }

    fn bank_round(&mut self) {
        self.total_score += self.round.score() as i64;
    }

    fn summarize(&self) -> RoundSummary {
        let score = self.round.score();
        RoundSummary {
            mode: self.round.mode(),
            title: self.round.mode().title(),
            score,
            cumulative_total: self.total_score + score as i64,
            caught_bad: self.round.caught_bad().to_vec(),
            caught_good: self.round.caught_good().to_vec(),
        }
    }
}
