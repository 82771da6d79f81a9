// Unit tests for error classification and exit codes

use super::*;

#[test]
fn test_exit_codes() {
    assert_eq!(BotprobeError::WrongPage("web.telegram.org".into()).exit_code(), 2);
    assert_eq!(BotprobeError::element_not_found("message input").exit_code(), 3);
    assert_eq!(BotprobeError::WebDriverFailed("boom".into()).exit_code(), 4);
    assert_eq!(BotprobeError::Timeout("boom".into()).exit_code(), 5);
    assert_eq!(
        BotprobeError::Other(anyhow::anyhow!("boom")).exit_code(),
        1
    );
}

#[test]
fn test_classify_downcasts_structured_errors() {
    let err: anyhow::Error = BotprobeError::WrongPage("web.telegram.org".into()).into();
    let classified = BotprobeError::classify(err);
    assert!(matches!(classified, BotprobeError::WrongPage(fragment) if fragment == "web.telegram.org"));
}

#[test]
fn test_classify_element_not_found_from_message() {
    let err = anyhow::anyhow!(
        "No send button found: none of the candidate selectors matched"
    );
    let classified = BotprobeError::classify(err);
    assert!(matches!(
        classified,
        BotprobeError::ElementNotFound { role } if role == "send button"
    ));
}

#[test]
fn test_classify_webdriver_failure_from_message() {
    let err = anyhow::anyhow!("Failed to connect to WebDriver at http://localhost:4444");
    assert!(matches!(
        BotprobeError::classify(err),
        BotprobeError::WebDriverFailed(_)
    ));

    let err = anyhow::anyhow!("geckodriver not found in PATH");
    assert!(matches!(
        BotprobeError::classify(err),
        BotprobeError::WebDriverFailed(_)
    ));
}

#[test]
fn test_classify_timeout_from_message() {
    let err = anyhow::anyhow!("WebDriver failed to start within timeout");
    // "WebDriver" wins over "timeout": connection problems are reported as
    // such even when a timeout was the symptom
    assert!(matches!(
        BotprobeError::classify(err),
        BotprobeError::WebDriverFailed(_)
    ));

    let err = anyhow::anyhow!("operation timed out after 30s");
    assert!(matches!(
        BotprobeError::classify(err),
        BotprobeError::Timeout(_)
    ));
}

#[test]
fn test_classify_other() {
    let err = anyhow::anyhow!("something unrelated");
    assert!(matches!(
        BotprobeError::classify(err),
        BotprobeError::Other(_)
    ));
}

#[test]
fn test_element_not_found_message_names_role() {
    let err = BotprobeError::element_not_found("message input");
    assert_eq!(
        err.to_string(),
        "No message input found: none of the candidate selectors matched"
    );
}
