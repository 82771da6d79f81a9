// Library-surface tests that need no browser

use botprobe::{Action, HelperConfig, PanelAction, SubmitPath, default_sequence};
use pretty_assertions::assert_eq;

#[test]
fn test_sequence_matches_documented_literals() {
    let sequence = default_sequence();
    let expected = [
        ("/start", 3000),
        ("/help", 2000),
        ("/punkte", 2000),
        ("/teamid 480514", 3000),
        ("/punkte", 2000),
    ];

    assert_eq!(sequence.len(), expected.len());
    for (step, (command, delay_ms)) in sequence.iter().zip(expected) {
        assert_eq!(step.command, command);
        assert_eq!(step.delay_ms, delay_ms);
    }
}

#[test]
fn test_expected_host_override() {
    // The CLI swaps the host fragment for fixture pages this way
    let config = HelperConfig {
        expected_host: "chat.html".to_string(),
        ..HelperConfig::default()
    };
    assert_eq!(config.expected_host, "chat.html");
    assert_eq!(config.chat_url, "https://web.telegram.org/k/");
}

#[test]
fn test_action_surface_is_closed() {
    // Every supported action is a variant; arguments travel inside it
    let send = Action::SendCommand("/start".to_string());
    let json = serde_json::to_string(&send).unwrap();
    assert!(json.contains("/start"));

    let panel: Action = serde_json::from_str(r#"{"Panel":"toggle"}"#).unwrap();
    assert_eq!(panel, Action::Panel(PanelAction::Toggle));
}

#[test]
fn test_submit_paths_are_distinct() {
    assert_ne!(SubmitPath::SendButton, SubmitPath::EnterKey);
}
