// End-to-end tests against local fixture pages.
//
// These drive a real Firefox via geckodriver (auto-started when missing)
// and are ignored by default; run them with `cargo test -- --ignored` on a
// machine with Firefox installed.

mod common;

use botprobe::{
    Action, BotprobeError, Browser, BrowserType, DispatchOutcome, Dispatcher, HelperConfig,
    SubmitPath,
};
use serial_test::serial;

/// Fragment of the fixture file URL used as the expected host
const FIXTURE_HOST: &str = "chat.html";

async fn fixture_dispatcher(page: &str) -> Dispatcher {
    let browser = Browser::new(BrowserType::Firefox, None, None, true)
        .await
        .expect("Failed to start browser");

    let path = common::create_test_html(page);
    let url = format!("file://{}", path.display());
    browser.goto(&url).await.expect("Failed to load fixture");

    let config = HelperConfig {
        expected_host: FIXTURE_HOST.to_string(),
        ..HelperConfig::default()
    };
    Dispatcher::new(browser, config)
}

async fn eval_u64(dispatcher: &Dispatcher, script: &str) -> u64 {
    dispatcher
        .browser()
        .execute(script, vec![])
        .await
        .expect("Script failed")
        .as_u64()
        .expect("Expected a number")
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox"]
async fn test_send_clicks_button_exactly_once() {
    let mut dispatcher = fixture_dispatcher(common::fixtures::CHAT_PAGE).await;
    dispatcher.ensure_host().await.expect("Host guard failed");

    let outcome = dispatcher
        .send_command("/punkte")
        .await
        .expect("Send failed");

    assert_eq!(outcome.submit_path, SubmitPath::SendButton);
    assert_eq!(outcome.input_selector, ".input-message-input");

    // The fixture's click handler moves the input text into a message node
    let clicks = eval_u64(&dispatcher, "return window.clickCount;").await;
    assert_eq!(clicks, 1);

    let input_events = eval_u64(&dispatcher, "return window.inputEventCount;").await;
    assert!(input_events >= 1);

    let sent = dispatcher
        .browser()
        .execute(
            "return document.querySelector('.message-out').textContent;",
            vec![],
        )
        .await
        .expect("Script failed");
    assert_eq!(sent.as_str(), Some("/punkte"));

    dispatcher.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox"]
async fn test_enter_fallback_when_no_send_button() {
    let mut dispatcher = fixture_dispatcher(common::fixtures::NO_SEND_BUTTON_PAGE).await;
    dispatcher.ensure_host().await.expect("Host guard failed");

    let outcome = dispatcher
        .send_command("/help")
        .await
        .expect("Send failed");

    assert_eq!(outcome.submit_path, SubmitPath::EnterKey);

    let enters = eval_u64(&dispatcher, "return window.enterKeydownCount;").await;
    assert_eq!(enters, 1);

    // The injected text stays in place: nothing consumed it
    let text = dispatcher
        .browser()
        .execute(
            "return document.querySelector('.input-message-input').textContent;",
            vec![],
        )
        .await
        .expect("Script failed");
    assert_eq!(text.as_str(), Some("/help"));

    dispatcher.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox"]
async fn test_missing_input_reports_element_not_found() {
    let mut dispatcher = fixture_dispatcher(common::fixtures::EMPTY_PAGE).await;
    dispatcher.ensure_host().await.expect("Host guard failed");

    let err = dispatcher
        .send_command("/punkte")
        .await
        .expect_err("Send should fail without an input");

    let classified = BotprobeError::classify(err);
    assert!(matches!(
        classified,
        BotprobeError::ElementNotFound { ref role } if role == "message input"
    ));
    assert_eq!(classified.exit_code(), 3);

    // The page's own content is untouched
    let paragraphs = eval_u64(
        &dispatcher,
        "return document.querySelectorAll('p').length;",
    )
    .await;
    assert_eq!(paragraphs, 1);

    dispatcher.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox"]
async fn test_panel_toggle_twice_restores_visibility() {
    let mut dispatcher = fixture_dispatcher(common::fixtures::EMPTY_PAGE).await;
    dispatcher.ensure_host().await.expect("Host guard failed");

    let shown = dispatcher
        .dispatch(Action::Panel(botprobe::PanelAction::Show))
        .await
        .expect("Panel show failed");
    assert!(matches!(
        shown,
        DispatchOutcome::PanelVisible(Some(true))
    ));

    let after_one = dispatcher.toggle_panel().await.expect("Toggle failed");
    assert_eq!(after_one, Some(false));

    let after_two = dispatcher.toggle_panel().await.expect("Toggle failed");
    assert_eq!(after_two, Some(true));

    dispatcher.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox"]
async fn test_wrong_page_guard_blocks_dispatch() {
    let browser = Browser::new(BrowserType::Firefox, None, None, true)
        .await
        .expect("Failed to start browser");

    let path = common::create_test_html(common::fixtures::EMPTY_PAGE);
    let url = format!("file://{}", path.display());
    browser.goto(&url).await.expect("Failed to load fixture");

    // Default config expects web.telegram.org, which a file:// URL lacks
    let dispatcher = Dispatcher::new(browser, HelperConfig::default());

    let err = dispatcher
        .ensure_host()
        .await
        .expect_err("Host guard should reject the fixture URL");

    let classified = BotprobeError::classify(err);
    assert!(matches!(classified, BotprobeError::WrongPage(_)));
    assert_eq!(classified.exit_code(), 2);

    dispatcher.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore = "requires geckodriver and Firefox; runs the full timed sequence"]
async fn test_auto_test_sequence_dispatches_all_steps_in_order() {
    let mut dispatcher = fixture_dispatcher(common::fixtures::CHAT_PAGE).await;
    dispatcher.ensure_host().await.expect("Host guard failed");

    let outcome = dispatcher
        .dispatch(Action::StartAutoTest)
        .await
        .expect("Run failed");

    let DispatchOutcome::RunCompleted(summary) = outcome else {
        panic!("Expected a run summary");
    };
    assert_eq!(summary.steps_completed, 5);
    assert_eq!(summary.steps_total, 5);

    let sent: Vec<String> = serde_json::from_value(
        dispatcher
            .browser()
            .execute(
                "return Array.from(document.querySelectorAll('.message-out'), el => el.textContent);",
                vec![],
            )
            .await
            .expect("Script failed"),
    )
    .expect("Expected a string array");

    assert_eq!(
        sent,
        vec!["/start", "/help", "/punkte", "/teamid 480514", "/punkte"]
    );

    dispatcher.close().await.expect("Close failed");
}
