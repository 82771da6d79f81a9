//! CSS selector candidates for the host page's composer elements.
//!
//! The chat client's markup is an unversioned external contract, so each
//! element is probed through an ordered list of guesses. The first selector
//! that matches wins and the rest are skipped; document order within a
//! selector never enters into it.

/// Candidates for the editable message input, in priority order
pub const MESSAGE_INPUT_CANDIDATES: &[&str] = &[
    r#"[contenteditable="true"][data-testid="message-input"]"#,
    ".input-message-input",
    r#"div[contenteditable="true"]"#,
    ".composer-input",
];

/// Candidates for the send button, in priority order
pub const SEND_BUTTON_CANDIDATES: &[&str] = &[
    r#"[data-testid="send-button"]"#,
    ".btn-send",
    r#"button[title*="Send"], button[aria-label*="Send"]"#,
];

#[cfg(test)]
#[path = "selectors_test.rs"]
mod selectors_test;
