//! Fishing loop: the simulation behind Hook the Phish.
//!
//! Fish carrying email-like labels swim across the water. The player steers a
//! rod with the pointer and holds the button to lower the hook; catching a
//! phishing ("bad") item scores points, catching a legitimate one costs them.
//!
//! Each frame runs the same fixed pipeline:
//! spawn -> hook update -> move/cull -> collision & scoring -> finish check.
//! Drawing happens afterwards in the browser shell (`crate::web`), which only
//! borrows the round for the duration of one frame.
//!
//! Everything in here is plain Rust with an injected RNG so whole rounds can be
//! replayed deterministically in native tests.

use rand::Rng;

use crate::config::FishingConfig;

pub mod collision;
pub mod fish;
pub mod hook;
pub mod mode;
pub mod session;
pub mod spawner;

pub use collision::{Catch, intersects, score_catch};
pub use fish::{Direction, Fish, FishId, ItemKind, LabeledItem, Payload, Retirement};
pub use hook::{FrameInput, HookTracker, pointer_to_playfield};
pub use mode::{AdvancedLevel, Mode};
pub use session::{Command, RoundSummary, Session};
pub use spawner::{Spawner, spawn_fish};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    NotStarted,
    Running,
    Finished,
}

/// What happened during one frame. Used by the shell for logging/effects and
/// by tests to check retirement and scoring invariants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub spawned: Option<FishId>,
    pub culled: Vec<FishId>,
    pub caught: Vec<Catch>,
    /// True on the single frame where the round reached `Finished`.
    pub finished: bool,
}

/// One round of play. Owns the fish arena and all per-round state; nothing
/// here outlives the round.
#[derive(Clone, Debug)]
pub struct Round {
    phase: RoundPhase,
    mode: Mode,
    spawner: Spawner,
    hook: HookTracker,
    fish: Vec<Fish>,
    score: i32,
    caught_bad: Vec<String>,
    caught_good: Vec<String>,
    frames: u64,
}

impl Round {
    /// An idle round waiting for `start`.
    pub fn new(mode: Mode, cfg: &FishingConfig) -> Self {
        Self {
            phase: RoundPhase::NotStarted,
            mode,
            spawner: Spawner::default(),
            hook: HookTracker::new(&cfg.playfield, cfg.hook_step),
            fish: Vec::new(),
            score: 0,
            caught_bad: Vec::new(),
            caught_good: Vec::new(),
            frames: 0,
        }
    }

    /// Reset every piece of round state and begin running in `mode`.
    /// The rod stays at the last pointer position.
    pub fn start<R: Rng + ?Sized>(&mut self, mode: Mode, cfg: &FishingConfig, rng: &mut R) {
        let hook = self.hook.raised(&cfg.playfield, cfg.hook_step);
        *self = Round::new(mode, cfg);
        self.hook = hook;
        self.spawner = Spawner::new(mode, cfg, rng);
        self.phase = RoundPhase::Running;
        log::info!(
            "round started: {} ({} fish)",
            mode.title(),
            self.spawner.target()
        );
    }

    /// Drop back to `NotStarted`, discarding the round.
    pub fn reset(&mut self, cfg: &FishingConfig) {
        let hook = self.hook.raised(&cfg.playfield, cfg.hook_step);
        *self = Round::new(self.mode, cfg);
        self.hook = hook;
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn spawned(&self) -> u32 {
        self.spawner.spawned()
    }

    pub fn spawn_target(&self) -> u32 {
        self.spawner.target()
    }

    pub fn live_count(&self) -> usize {
        self.fish.iter().filter(|f| f.is_live()).count()
    }

    /// Live fish, for drawing.
    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn hook(&self) -> &HookTracker {
        &self.hook
    }

    pub fn caught_bad(&self) -> &[String] {
        &self.caught_bad
    }

    pub fn caught_good(&self) -> &[String] {
        &self.caught_good
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame. Does nothing unless the round is running.
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        input: &FrameInput,
        cfg: &FishingConfig,
        rng: &mut R,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if self.phase != RoundPhase::Running {
            return report;
        }
        self.frames += 1;

        if let Some(fish) = self.spawner.tick(now_ms, self.mode, cfg, rng) {
            report.spawned = Some(fish.id);
            self.fish.push(fish);
        }

        self.hook.update(input);

        self.move_and_cull(cfg, &mut report);
        self.resolve_catches(cfg, &mut report);

        // Retired fish never come back; drop them before the next frame.
        self.fish.retain(Fish::is_live);

        if self.spawner.exhausted() && self.live_count() == 0 {
            self.phase = RoundPhase::Finished;
            report.finished = true;
            log::info!(
                "round finished after {} frames: score {} ({} bad, {} good caught)",
                self.frames,
                self.score,
                self.caught_bad.len(),
                self.caught_good.len()
            );
        }
        report
    }

    fn move_and_cull(&mut self, cfg: &FishingConfig, report: &mut FrameReport) {
        let pf = &cfg.playfield;
        for f in self.fish.iter_mut().filter(|f| f.is_live()) {
            f.x += f.velocity;
            let gone = match f.direction() {
                Direction::LeftToRight => f.x > pf.width + pf.cull_margin,
                Direction::RightToLeft => f.x < -pf.cull_margin,
            };
            if gone && f.retire(Retirement::OffScreen) {
                log::debug!("fish {} swam away", f.id);
                report.culled.push(f.id);
            }
        }
    }

    fn resolve_catches(&mut self, cfg: &FishingConfig, report: &mut FrameReport) {
        let (hx, hy) = self.hook.position(cfg.playfield.waterline);
        for f in self.fish.iter_mut().filter(|f| f.is_live()) {
            if !intersects(hx, hy, cfg.hook_size, f) || !f.retire(Retirement::Caught) {
                continue;
            }
            let catch = score_catch(f, self.mode, cfg.points_per_item);
            self.score += catch.delta;
            for (kind, text) in &catch.entries {
                match kind {
                    ItemKind::Bad => self.caught_bad.push(text.clone()),
                    ItemKind::Good => self.caught_good.push(text.clone()),
                }
            }
            log::debug!("caught fish {} for {:+}", f.id, catch.delta);
            report.caught.push(catch);
        }
    }

    #[cfg(test)]
    fn insert_fish(&mut self, fish: Fish) {
        self.fish.push(fish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn bad_simple() -> Payload {
        Payload::Simple(LabeledItem {
            label: "Fake Prize",
            kind: ItemKind::Bad,
        })
    }

    /// A running round whose spawn quota is already used up, so only the
    /// fish a test inserts are in play.
    fn round_with_target(target: u32, mode: Mode) -> (Round, FishingConfig, StdRng) {
        let mut cfg = FishingConfig::default();
        cfg.simple_spawn_target = target;
        cfg.advanced_spawn_targets = [target; 3];
        let mut rng = seeded_rng();
        let mut round = Round::new(mode, &cfg);
        round.start(mode, &cfg, &mut rng);
        (round, cfg, rng)
    }

    #[test]
    fn idle_round_ignores_frames() {
        let cfg = FishingConfig::default();
        let mut rng = seeded_rng();
        let mut round = Round::new(Mode::Simple, &cfg);
        let report = round.frame(0.0, &idle(), &cfg, &mut rng);
        assert_eq!(report, FrameReport::default());
        assert_eq!(round.phase(), RoundPhase::NotStarted);
        assert_eq!(round.frames(), 0);
    }

    #[test]
    fn fish_is_culled_past_margin_without_scoring() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        round.insert_fish(Fish::new(1, -120.0, 300.0, 2.0, (120.0, 90.0), bad_simple()));
        let mut culled_at_x = None;
        for frame in 0..2_000 {
            let x_before = round.fish().first().map(|f| f.x);
            let report = round.frame(frame as f64 * FRAME_MS, &idle(), &cfg, &mut rng);
            if report.culled == vec![1] {
                culled_at_x = x_before.map(|x| x + 2.0);
                assert!(report.finished);
                break;
            }
            assert!(round.fish()[0].x <= 1050.0);
        }
        let x = culled_at_x.expect("fish culled");
        assert!(x > 1050.0 && x <= 1052.0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.phase(), RoundPhase::Finished);
    }

    #[test]
    fn right_to_left_fish_culled_past_left_margin() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        round.insert_fish(Fish::new(1, -148.0, 300.0, -3.0, (120.0, 90.0), bad_simple()));
        let report = round.frame(0.0, &idle(), &cfg, &mut rng);
        assert_eq!(report.culled, vec![1]);
        assert!(report.caught.is_empty());
    }

    #[test]
    fn single_bad_catch_finishes_round() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        // Fish box spans x 400..520, y 130..220; the surface hook at
        // (450, 120) reaches down to 140.
        round.insert_fish(Fish::new(1, 400.0, 130.0, 0.5, (120.0, 90.0), bad_simple()));
        let report = round.frame(0.0, &idle(), &cfg, &mut rng);
        assert_eq!(report.caught.len(), 1);
        assert_eq!(report.caught[0].delta, 10);
        assert!(report.finished);
        assert_eq!(round.score(), 10);
        assert_eq!(round.live_count(), 0);
        assert_eq!(round.caught_bad(), ["Fake Prize".to_string()]);
        assert_eq!(round.phase(), RoundPhase::Finished);
        // Finished is terminal: more frames change nothing.
        let later = round.frame(FRAME_MS, &idle(), &cfg, &mut rng);
        assert_eq!(later, FrameReport::default());
        assert_eq!(round.score(), 10);
    }

    #[test]
    fn lowering_hook_catches_deep_fish() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        // Stationary-ish fish deep in the water directly under the rod.
        round.insert_fish(Fish::new(1, 400.0, 400.0, 0.01, (120.0, 90.0), bad_simple()));
        let lower = FrameInput {
            pointer_x: Some(450.0),
            lowering: true,
        };
        let mut caught_frame = None;
        for frame in 0..200 {
            let report = round.frame(frame as f64 * FRAME_MS, &lower, &cfg, &mut rng);
            if !report.caught.is_empty() {
                caught_frame = Some(frame);
                break;
            }
        }
        // Hook point reaches y > 380 (box top 400 minus hook size) after 44 steps of 6px.
        assert_eq!(caught_frame, Some(43));
        assert!(round.hook().depth() > 260.0);
    }

    #[test]
    fn advanced_level_three_mixed_catch_lands_in_both_lists() {
        let mode = Mode::Advanced(AdvancedLevel::Both);
        let (mut round, cfg, mut rng) = round_with_target(0, mode);
        let payload = Payload::Advanced {
            sender: Some(LabeledItem {
                label: "bank-alerts@secure-verify.co",
                kind: ItemKind::Bad,
            }),
            hook: Some(LabeledItem {
                label: "Homework reminder",
                kind: ItemKind::Good,
            }),
        };
        round.insert_fish(Fish::new(1, 400.0, 130.0, 1.0, (120.0, 90.0), payload));
        let report = round.frame(0.0, &idle(), &cfg, &mut rng);
        assert_eq!(report.caught[0].delta, 0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.caught_bad(), ["Sender: bank-alerts@secure-verify.co".to_string()]);
        assert_eq!(round.caught_good(), ["Hook: Homework reminder".to_string()]);
    }

    #[test]
    fn does_not_finish_while_fish_remain() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        round.insert_fish(Fish::new(1, 0.0, 400.0, 1.0, (120.0, 90.0), bad_simple()));
        for frame in 0..100 {
            let report = round.frame(frame as f64 * FRAME_MS, &idle(), &cfg, &mut rng);
            assert!(!report.finished);
        }
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.live_count(), 1);
    }

    #[test]
    fn start_resets_previous_round() {
        let (mut round, cfg, mut rng) = round_with_target(0, Mode::Simple);
        round.insert_fish(Fish::new(1, 400.0, 130.0, 0.5, (120.0, 90.0), bad_simple()));
        round.frame(0.0, &idle(), &cfg, &mut rng);
        assert_eq!(round.score(), 10);

        round.start(Mode::Simple, &cfg, &mut rng);
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.score(), 0);
        assert!(round.caught_bad().is_empty());
        assert!(round.fish().is_empty());
        assert_eq!(round.spawned(), 0);
        assert_eq!(round.hook().depth(), 0.0);
    }
}
