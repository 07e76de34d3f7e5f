// Spawner: decides when the next fish enters and what it carries.

use rand::Rng;
use rand::seq::SliceRandom;

use super::fish::{Direction, Fish, FishId, ItemKind, LabeledItem, Payload};
use super::mode::{AdvancedLevel, Mode};
use crate::config::FishingConfig;

/// Per-round spawn bookkeeping. The counter only ever grows and is capped at
/// `target`.
#[derive(Clone, Debug, Default)]
pub struct Spawner {
    spawned: u32,
    target: u32,
    last_spawn_ms: Option<f64>,
    next_gap_ms: f64,
    next_id: FishId,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(mode: Mode, cfg: &FishingConfig, rng: &mut R) -> Self {
        Self {
            spawned: 0,
            target: mode.spawn_target(cfg),
            last_spawn_ms: None,
            next_gap_ms: draw_gap(mode, cfg, rng),
            next_id: 1,
        }
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn exhausted(&self) -> bool {
        self.spawned >= self.target
    }

    /// Called once per frame. The first call of a round only starts the clock.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        mode: Mode,
        cfg: &FishingConfig,
        rng: &mut R,
    ) -> Option<Fish> {
        let Some(last) = self.last_spawn_ms else {
            self.last_spawn_ms = Some(now_ms);
            return None;
        };
        if self.exhausted() || now_ms - last <= self.next_gap_ms {
            return None;
        }
        let fish = spawn_fish(self.next_id, mode, cfg, rng);
        self.next_id += 1;
        self.spawned += 1;
        self.last_spawn_ms = Some(now_ms);
        self.next_gap_ms = draw_gap(mode, cfg, rng);
        log::debug!(
            "spawned fish {} ({}/{}) at y={:.0} v={:.2}",
            fish.id,
            self.spawned,
            self.target,
            fish.y,
            fish.velocity
        );
        Some(fish)
    }
}

fn draw_gap<R: Rng + ?Sized>(mode: Mode, cfg: &FishingConfig, rng: &mut R) -> f64 {
    let (min, max) = mode.spawn_gap_ms(cfg);
    rng.gen_range(min..=max)
}

/// Build one fish for `mode`: random side, depth, speed and payload.
pub fn spawn_fish<R: Rng + ?Sized>(id: FishId, mode: Mode, cfg: &FishingConfig, rng: &mut R) -> Fish {
    let pf = &cfg.playfield;
    let dir = if rng.gen_bool(0.5) {
        Direction::LeftToRight
    } else {
        Direction::RightToLeft
    };
    let x = match dir {
        Direction::LeftToRight => -pf.entry_offset,
        Direction::RightToLeft => pf.width + pf.entry_offset,
    };
    let (band_top, band_bottom) = pf.swim_band();
    let y = rng.gen_range(band_top..=band_bottom);

    let scale = mode.speed_scale(cfg);
    let (min_speed, max_speed) = cfg.base_speed;
    let speed = rng.gen_range(min_speed * scale..=max_speed * scale);

    let payload = match mode {
        Mode::Simple => Payload::Simple(draw_item(rng, cfg.p_bad_simple, crate::BAD_ITEMS, crate::GOOD_ITEMS)),
        Mode::Advanced(level) => advanced_payload(level, cfg, rng),
    };
    Fish::new(
        id,
        x,
        y,
        speed * dir.sign(),
        (cfg.fish_width, cfg.fish_height),
        payload,
    )
}

fn advanced_payload<R: Rng + ?Sized>(level: AdvancedLevel, cfg: &FishingConfig, rng: &mut R) -> Payload {
    let sender = level
        .judges_sender()
        .then(|| draw_item(rng, cfg.p_bad_sender, crate::BAD_SENDERS, crate::GOOD_SENDERS));
    let hook = level
        .judges_hook()
        .then(|| draw_item(rng, cfg.p_bad_hook, crate::BAD_HOOKS, crate::GOOD_HOOKS));
    Payload::Advanced { sender, hook }
}

fn draw_item<R: Rng + ?Sized>(
    rng: &mut R,
    p_bad: f64,
    bad_pool: &'static [&'static str],
    good_pool: &'static [&'static str],
) -> LabeledItem {
    let kind = if rng.gen_bool(p_bad) {
        ItemKind::Bad
    } else {
        ItemKind::Good
    };
    let pool = if kind.is_bad() { bad_pool } else { good_pool };
    LabeledItem {
        label: pool.choose(rng).copied().unwrap_or("Item"),
        kind,
    }
}
