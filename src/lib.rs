//! Hook the Phish core crate.
//!
//! A fishing arcade game that teaches young learners to tell phishing
//! messages from real ones. The simulation lives in [`fishing`] and is plain
//! Rust; [`web`] mounts it on a canvas and drives it from
//! `requestAnimationFrame`. `start_game(canvas_id)` is the JS entrypoint.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod fishing;
mod logger;
pub mod web;

pub use config::{ConfigError, FishingConfig, Playfield};
pub use fishing::{AdvancedLevel, Command, Mode, Round, RoundPhase, RoundSummary, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Label pools. Bad entries are phishing tells, good entries are mail a student
// would really expect.
// -----------------------------------------------------------------------------

/// Simple mode: one label per fish.
pub const BAD_ITEMS: &[&str] = &[
    "Fake Prize", "Urgent Reset", "Unknown Sender", "Suspicious Link", "Phishy Popup", "Crypto Giveaway",
];

pub const GOOD_ITEMS: &[&str] = &[
    "Teacher Email", "School Update", "Family Message", "Receipt (Known)", "Homework Note",
];

/// Advanced mode: the address a message claims to come from.
pub const BAD_SENDERS: &[&str] = &[
    "support@prize-claim.win", "it-helpdesk-reset@outlook-mail.io", "bank-alerts@secure-verify.co",
    "unknown@random-domain.biz", "admin@account-verify.center", "support@account-verify.center",
    "help@gamez.net",
];

pub const GOOD_SENDERS: &[&str] = &[
    "teacher@school.edu", "principal@school.edu", "registrar@school.edu", "advisor@school.edu",
    "coach@school.edu", "noreply@bank.edu", "noreply@store.com",
];

/// Advanced mode: the line that tries to get the reader to act.
pub const BAD_HOOKS: &[&str] = &[
    "Urgent password reset", "Click to claim prize", "Crypto airdrop link", "Verify account now",
    "Attachment: invoice.zip", "Account Overdue Pay Now", "Congrats You've Won!",
];

pub const GOOD_HOOKS: &[&str] = &[
    "Syllabus PDF", "Field trip form", "Club meeting agenda", "Homework reminder", "Permission slip",
    "Receipt", "Order Confirmation",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount the game on the canvas `canvas_id`, or on a fresh `htp-canvas`
/// when omitted.
#[wasm_bindgen]
pub fn start_game(canvas_id: Option<String>) -> Result<(), JsValue> {
    web::start_fishing_mode(canvas_id)
}

/// [`start_game`] with a JSON tuning override; fields left out keep their
/// defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(canvas_id: Option<String>, config_json: &str) -> Result<(), JsValue> {
    web::start_fishing_mode_with_config(canvas_id, config_json)
}

/// Heading for the start / summary overlays. Unknown levels fall back to the
/// simple-mode title.
#[wasm_bindgen]
pub fn level_title(level: u8) -> String {
    mode_for(level).title().to_string()
}

#[wasm_bindgen]
pub fn level_rule_line(level: u8) -> String {
    mode_for(level).rule_line().to_string()
}

fn mode_for(level: u8) -> Mode {
    AdvancedLevel::try_from(level).map_or(Mode::Simple, Mode::Advanced)
}
