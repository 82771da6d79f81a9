use thiserror::Error;

/// Custom error type that includes exit codes
#[derive(Debug, Error)]
pub enum BotprobeError {
    /// Active page is not the expected chat client (exit code 2)
    #[error("Not on the expected chat page: current URL does not contain '{0}'")]
    WrongPage(String),
    /// Required DOM element not found (exit code 3)
    #[error("No {role} found: none of the candidate selectors matched")]
    ElementNotFound {
        /// What was being looked for ("message input", "send button")
        role: String,
    },
    /// WebDriver connection failed (exit code 4)
    #[error("WebDriver connection failed: {0}")]
    WebDriverFailed(String),
    /// Operation timeout (exit code 5)
    #[error("Operation timed out: {0}")]
    Timeout(String),
    /// Generic error (exit code 1)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BotprobeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BotprobeError::WrongPage(_) => 2,
            BotprobeError::ElementNotFound { .. } => 3,
            BotprobeError::WebDriverFailed(_) => 4,
            BotprobeError::Timeout(_) => 5,
            BotprobeError::Other(_) => 1,
        }
    }

    pub fn element_not_found(role: &str) -> Self {
        BotprobeError::ElementNotFound {
            role: role.to_string(),
        }
    }

    /// Classify an `anyhow::Error` bubbled up from the command layer.
    ///
    /// Internals propagate `anyhow::Result`; this recovers the structured
    /// variant (by downcast where one was wrapped, by message otherwise)
    /// so the process can exit with the right code.
    pub fn classify(err: anyhow::Error) -> Self {
        let err = match err.downcast::<BotprobeError>() {
            Ok(structured) => return structured,
            Err(err) => err,
        };
        let msg = err.to_string();

        if msg.contains("Not on the expected chat page") {
            let fragment = msg
                .split('\'')
                .nth(1)
                .unwrap_or("expected host")
                .to_string();
            BotprobeError::WrongPage(fragment)
        } else if msg.contains("none of the candidate selectors matched") {
            let role = if msg.contains("send button") {
                "send button"
            } else {
                "message input"
            };
            BotprobeError::element_not_found(role)
        } else if msg.contains("Failed to connect to WebDriver")
            || msg.contains("WebDriver")
            || msg.contains("geckodriver")
            || msg.contains("chromedriver")
        {
            BotprobeError::WebDriverFailed(msg)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            BotprobeError::Timeout(msg)
        } else {
            BotprobeError::Other(err)
        }
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
