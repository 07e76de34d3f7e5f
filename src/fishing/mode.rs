// Difficulty selection: simple mode or one of three advanced levels.

use crate::config::{ConfigError, FishingConfig};

/// Advanced-mode level. Each level decides which labels a fish carries and
/// which of them count when it is caught.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdvancedLevel {
    /// Judge the sender only.
    Senders = 1,
    /// Judge the hook line only.
    Hooks = 2,
    /// Judge both.
    Both = 3,
}

impl AdvancedLevel {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Next level in the series, wrapping 3 -> 1.
    pub fn next_wrapping(self) -> Self {
        match self {
            AdvancedLevel::Senders => AdvancedLevel::Hooks,
            AdvancedLevel::Hooks => AdvancedLevel::Both,
            AdvancedLevel::Both => AdvancedLevel::Senders,
        }
    }

    pub fn judges_sender(self) -> bool {
        matches!(self, AdvancedLevel::Senders | AdvancedLevel::Both)
    }

    pub fn judges_hook(self) -> bool {
        matches!(self, AdvancedLevel::Hooks | AdvancedLevel::Both)
    }

    pub fn title(self) -> &'static str {
        match self {
            AdvancedLevel::Senders => "Level 1: Identify Bad Senders",
            AdvancedLevel::Hooks => "Level 2: Identify Bad Hooks",
            AdvancedLevel::Both => "Level 3: Identify Both",
        }
    }

    pub fn rule_line(self) -> &'static str {
        match self {
            AdvancedLevel::Senders => "Top label shows the sender. Catch only bad senders.",
            AdvancedLevel::Hooks => "Bottom label shows the hook. Catch only bad hooks.",
            AdvancedLevel::Both => "Top = sender, bottom = hook. Catch bad items; avoid good ones.",
        }
    }

    fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for AdvancedLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AdvancedLevel::Senders),
            2 => Ok(AdvancedLevel::Hooks),
            3 => Ok(AdvancedLevel::Both),
            other => Err(ConfigError::UnknownLevel(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Simple,
    Advanced(AdvancedLevel),
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Advanced(AdvancedLevel::Senders)
    }
}

impl Mode {
    pub fn spawn_target(self, cfg: &FishingConfig) -> u32 {
        match self {
            Mode::Simple => cfg.simple_spawn_target,
            Mode::Advanced(level) => cfg.advanced_spawn_targets[level.index()],
        }
    }

    pub fn spawn_gap_ms(self, cfg: &FishingConfig) -> (f64, f64) {
        match self {
            Mode::Simple => cfg.simple_spawn_gap_ms,
            Mode::Advanced(level) => cfg.advanced_spawn_gap_ms[level.index()],
        }
    }

    /// Multiplier applied to the base speed range; later levels swim faster.
    pub fn speed_scale(self, cfg: &FishingConfig) -> f64 {
        match self {
            Mode::Simple => 1.0,
            Mode::Advanced(level) => 1.0 + (level.number() as f64 - 1.0) * cfg.speed_step_per_level,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Simple => "Simple Mode",
            Mode::Advanced(level) => level.title(),
        }
    }

    pub fn rule_line(self) -> &'static str {
        match self {
            Mode::Simple => "Catch the phishy items; leave the real ones alone.",
            Mode::Advanced(level) => level.rule_line(),
        }
    }
}

// Summaries report the mode as a short tag ("simple", "advanced-2").
#[cfg(feature = "serde")]
impl serde::Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mode::Simple => serializer.serialize_str("simple"),
            Mode::Advanced(level) => serializer.collect_str(&format_args!("advanced-{}", level.number())),
        }
    }
}
