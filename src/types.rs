use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Browser viewport dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid viewport format. Use WIDTHxHEIGHT (e.g., 1920x1080)");
        }

        let width = parts[0]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid width in viewport size"))?;
        let height = parts[1]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid height in viewport size"))?;

        Ok(ViewportSize { width, height })
    }
}

/// One entry of the auto-test sequence: a command and the pause after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// Literal text sent as a chat message
    pub command: String,
    /// Milliseconds to wait after this step before the next one
    pub delay_ms: u64,
}

impl TestStep {
    pub fn new(command: impl Into<String>, delay_ms: u64) -> Self {
        TestStep {
            command: command.into(),
            delay_ms,
        }
    }
}

/// How a send was completed on the host page.
///
/// Either way the message is only *dispatched*: the synthetic events may
/// still be ignored by the host page, and nothing here verifies delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPath {
    /// A send-button candidate matched and was clicked
    SendButton,
    /// No send button found; synthetic Enter keydown on the input element
    EnterKey,
}

impl std::fmt::Display for SubmitPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitPath::SendButton => write!(f, "send-button click"),
            SubmitPath::EnterKey => write!(f, "Enter keydown fallback"),
        }
    }
}

/// Result of a single send: which selector located the input and which
/// submit path fired. Dispatch-only, not a delivery confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    /// The command text that was injected
    pub command: String,
    /// The input candidate selector that matched
    pub input_selector: String,
    /// How the message was submitted
    pub submit_path: SubmitPath,
}

/// Record of one completed sequence step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Zero-based step index within the sequence
    pub index: usize,
    /// The command sent in this step
    pub command: String,
    /// How the step was submitted
    pub submit_path: SubmitPath,
    /// Local time the step was dispatched
    pub dispatched_at: DateTime<Local>,
}

/// Summary of an auto-test run.
///
/// Carries no pass/fail data: send success is never verified against the
/// host page's actual response, so the chat transcript has to be checked
/// manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps that were dispatched
    pub steps_completed: usize,
    /// Total steps in the sequence
    pub steps_total: usize,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
    /// Local time the run finished
    pub finished_at: DateTime<Local>,
    /// Per-step records, in dispatch order
    pub steps: Vec<StepReport>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
