// Unit tests for config module

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_default_sequence_commands_and_order() {
    let sequence = default_sequence();

    let commands: Vec<&str> = sequence.iter().map(|s| s.command.as_str()).collect();
    assert_eq!(
        commands,
        vec!["/start", "/help", "/punkte", "/teamid 480514", "/punkte"]
    );

    let delays: Vec<u64> = sequence.iter().map(|s| s.delay_ms).collect();
    assert_eq!(delays, vec![3000, 2000, 2000, 3000, 2000]);
}

#[test]
fn test_default_config() {
    let config = HelperConfig::default();

    assert_eq!(config.chat_url, "https://web.telegram.org/k/");
    assert_eq!(config.expected_host, "web.telegram.org");
    assert!(config.chat_url.contains(&config.expected_host));

    assert_eq!(config.test_commands.len(), 5);
    assert_eq!(config.photo_captions.len(), 3);
    assert_eq!(config.photo_captions[0], "");
}

#[test]
fn test_settle_delay_is_short() {
    // The settle delay sits between input injection and submit; the
    // end-to-end contract expects the submit within 200ms.
    assert!(INPUT_SETTLE_MS < 200);
}
