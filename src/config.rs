//! Tuning constants for the fishing loop.
//!
//! Every number the game plays with lives here so a host page can override
//! them (as JSON when the `serde` feature is on). Values are validated once at
//! the boundary; the loop itself assumes a valid config.

use thiserror::Error;

/// Errors raised while validating or parsing a [`FishingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield must have positive dimensions, got {width}x{height}")]
    NonPositivePlayfield { width: f64, height: f64 },
    #[error("waterline at {waterline} leaves no swim band in a playfield {height} tall")]
    NoSwimBand { waterline: f64, height: f64 },
    #[error("{name} range is inverted or negative: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("probability {name} = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("advanced level {0} is not one of 1, 2, 3")]
    UnknownLevel(u8),
    #[cfg(feature = "serde_json")]
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Playfield geometry in logical pixels. The canvas is scaled to fit; all
/// simulation happens in these units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    /// Surface of the water; the hook hangs from here.
    pub waterline: f64,
    /// Fish never spawn closer than this below the waterline.
    pub swim_top_pad: f64,
    /// Fish never spawn closer than this above the bottom edge.
    pub swim_bottom_pad: f64,
    /// How far outside the edge a fish enters.
    pub entry_offset: f64,
    /// How far past the far edge a fish travels before it is culled.
    pub cull_margin: f64,
    /// Lowest the hook may go, measured up from the bottom edge.
    pub hook_floor_margin: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            waterline: 120.0,
            swim_top_pad: 40.0,
            swim_bottom_pad: 60.0,
            entry_offset: 120.0,
            cull_margin: 150.0,
            hook_floor_margin: 40.0,
        }
    }
}

impl Playfield {
    pub fn max_hook_depth(&self) -> f64 {
        (self.height - self.waterline - self.hook_floor_margin).max(0.0)
    }

    /// Vertical band (inclusive) fish may spawn in.
    pub fn swim_band(&self) -> (f64, f64) {
        (
            self.waterline + self.swim_top_pad,
            self.height - self.swim_bottom_pad,
        )
    }
}

/// Full set of tuning values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FishingConfig {
    pub playfield: Playfield,
    pub fish_width: f64,
    pub fish_height: f64,
    /// Side of the square hook used for collision tests.
    pub hook_size: f64,
    /// Pixels the hook moves per frame while lowering or raising.
    pub hook_step: f64,
    /// Score magnitude per relevant item (+ for bad, - for good).
    pub points_per_item: i32,
    /// Base speed range in px/frame before the difficulty multiplier.
    pub base_speed: (f64, f64),
    /// Added to the speed multiplier for each advanced level above 1.
    pub speed_step_per_level: f64,
    pub simple_spawn_target: u32,
    /// Spawn targets for advanced levels 1, 2, 3.
    pub advanced_spawn_targets: [u32; 3],
    pub simple_spawn_gap_ms: (f64, f64),
    /// Spawn gap ranges for advanced levels 1, 2, 3.
    pub advanced_spawn_gap_ms: [(f64, f64); 3],
    pub p_bad_simple: f64,
    pub p_bad_sender: f64,
    pub p_bad_hook: f64,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            fish_width: 120.0,
            fish_height: 90.0,
            hook_size: 20.0,
            hook_step: 6.0,
            points_per_item: 10,
            base_speed: (1.5, 3.2),
            speed_step_per_level: 0.25,
            simple_spawn_target: 18,
            advanced_spawn_targets: [18, 22, 26],
            simple_spawn_gap_ms: (1100.0, 1800.0),
            advanced_spawn_gap_ms: [(1000.0, 1700.0), (850.0, 1500.0), (700.0, 1300.0)],
            p_bad_simple: 0.6,
            p_bad_sender: 0.6,
            p_bad_hook: 0.6,
        }
    }
}

impl FishingConfig {
    /// Parse a (possibly partial) JSON override and validate it. Missing
    /// fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: FishingConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pf = &self.playfield;
        if !(pf.width > 0.0 && pf.height > 0.0) {
            return Err(ConfigError::NonPositivePlayfield {
                width: pf.width,
                height: pf.height,
            });
        }
        let (band_top, band_bottom) = pf.swim_band();
        if pf.waterline < 0.0 || band_top > band_bottom || pf.max_hook_depth() <= 0.0 {
            return Err(ConfigError::NoSwimBand {
                waterline: pf.waterline,
                height: pf.height,
            });
        }
        for (name, value) in [
            ("fish_width", self.fish_width),
            ("fish_height", self.fish_height),
            ("hook_size", self.hook_size),
            ("hook_step", self.hook_step),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.points_per_item <= 0 {
            return Err(ConfigError::NonPositive {
                name: "points_per_item",
                value: self.points_per_item as f64,
            });
        }
        if self.speed_step_per_level < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "speed_step_per_level",
                value: self.speed_step_per_level,
            });
        }
        check_range("base_speed", self.base_speed)?;
        if self.base_speed.0 <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "base_speed",
                value: self.base_speed.0,
            });
        }
        check_range("simple_spawn_gap_ms", self.simple_spawn_gap_ms)?;
        for gap in self.advanced_spawn_gap_ms {
            check_range("advanced_spawn_gap_ms", gap)?;
        }
        for (name, value) in [
            ("p_bad_simple", self.p_bad_simple),
            ("p_bad_sender", self.p_bad_sender),
            ("p_bad_hook", self.p_bad_hook),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

fn check_range(name: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    // `!(a <= b)` also rejects NaN.
    if !(min >= 0.0 && min <= max) {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}
