//! Fixed configuration of the bot test helper.
//!
//! Mirrors the knobs the helper has always had: which bot is under test,
//! where the chat client lives, and the canned command/caption lists.

use serde::{Deserialize, Serialize};

use crate::types::TestStep;

/// Delay between injecting text and firing the submit path, in milliseconds.
/// Gives the host page's own handlers time to react to the input event.
/// An open-loop wait, not a completion signal.
pub const INPUT_SETTLE_MS: u64 = 100;

/// Configuration for a test helper session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Display name of the bot under test
    pub bot_username: String,
    /// URL of the chat client to open
    pub chat_url: String,
    /// Fragment the current page URL must contain before any dispatch
    pub expected_host: String,
    /// Canned command list
    pub test_commands: Vec<String>,
    /// Sample photo captions for manual photo tests
    pub photo_captions: Vec<String>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        HelperConfig {
            bot_username: "your_test_bot".to_string(),
            chat_url: "https://web.telegram.org/k/".to_string(),
            expected_host: "web.telegram.org".to_string(),
            test_commands: vec![
                "/start".to_string(),
                "/help".to_string(),
                "/punkte".to_string(),
                "/teamid 480514".to_string(),
                "/punkte".to_string(),
            ],
            photo_captions: vec![
                // Party photo without a caption
                String::new(),
                "Film: Matrix".to_string(),
                "Team: 480514".to_string(),
            ],
        }
    }
}

/// The fixed auto-test sequence.
///
/// Hardcoded independently of [`HelperConfig::test_commands`]; the delays
/// are the pauses the bot needs between commands.
pub fn default_sequence() -> Vec<TestStep> {
    vec![
        TestStep::new("/start", 3000),
        TestStep::new("/help", 2000),
        TestStep::new("/punkte", 2000),
        TestStep::new("/teamid 480514", 3000),
        TestStep::new("/punkte", 2000),
    ]
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
