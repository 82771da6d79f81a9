//! Command dispatcher: the automation actions that run against the host page.
//!
//! Sending is best-effort by construction. The helper injects text and
//! synthetic events and assumes the host page treats them like user input;
//! it never reads the chat transcript back, so a returned outcome means
//! "dispatched", not "delivered".

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

use crate::config::{HelperConfig, INPUT_SETTLE_MS, default_sequence};
use crate::errors::BotprobeError;
use crate::panel;
use crate::selectors::{MESSAGE_INPUT_CANDIDATES, SEND_BUTTON_CANDIDATES};
use crate::types::{RunSummary, SendOutcome, StepReport, SubmitPath, TestStep};
use crate::webdriver::Browser;

/// The closed set of supported automation actions.
///
/// Dispatch is an exhaustive match: an unsupported action cannot be named,
/// so there is no silent no-op path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Send a single literal command to the chat
    SendCommand(String),
    /// Run the fixed auto-test sequence
    StartAutoTest,
    /// Change the status panel's visibility
    Panel(PanelAction),
    /// Summarize the current run state
    ShowResults,
}

/// Panel visibility changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PanelAction {
    Show,
    Hide,
    Toggle,
}

/// Typed result of a dispatched action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// A command was dispatched to the host page
    Sent(SendOutcome),
    /// The auto-test sequence ran to completion
    RunCompleted(RunSummary),
    /// Panel visibility after the change (None: no panel on the page)
    PanelVisible(Option<bool>),
    /// Summary of the accumulated run state
    Results(RunSummary),
}

/// Which composer candidates matched on the current page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Winning message-input candidate, if any
    pub message_input: Option<String>,
    /// Winning send-button candidate, if any
    pub send_button: Option<String>,
}

const INJECT_COMMAND_SCRIPT: &str = r#"
    const el = document.querySelector(arguments[0]);
    if (!el) return false;
    el.focus();
    el.textContent = arguments[1];
    el.dispatchEvent(new Event('input', { bubbles: true }));
    return true;
"#;

const ENTER_FALLBACK_SCRIPT: &str = r#"
    const el = document.querySelector(arguments[0]);
    if (!el) return false;
    el.dispatchEvent(new KeyboardEvent('keydown', {
        key: 'Enter',
        code: 'Enter',
        keyCode: 13,
        bubbles: true
    }));
    return true;
"#;

/// Drives the automation actions against one browser session
pub struct Dispatcher {
    browser: Browser,
    config: HelperConfig,
    sequence: Vec<TestStep>,
    current_step: usize,
    results: Vec<StepReport>,
    run_started: Option<Instant>,
}

impl Dispatcher {
    pub fn new(browser: Browser, config: HelperConfig) -> Self {
        Dispatcher {
            browser,
            config,
            sequence: default_sequence(),
            current_step: 0,
            results: Vec::new(),
            run_started: None,
        }
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// The underlying browser session
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// The fixed auto-test sequence this dispatcher will run
    pub fn sequence(&self) -> &[TestStep] {
        &self.sequence
    }

    /// Verify the browser is on the expected chat page.
    ///
    /// Substring containment against the configured host fragment; no
    /// action may dispatch when this fails.
    pub async fn ensure_host(&self) -> Result<()> {
        let url = self.browser.current_url().await?;
        if url.contains(&self.config.expected_host) {
            Ok(())
        } else {
            warn!("Current URL {} is not the expected chat page", url);
            Err(BotprobeError::WrongPage(self.config.expected_host.clone()).into())
        }
    }

    /// Perform one action and return its typed outcome
    pub async fn dispatch(&mut self, action: Action) -> Result<DispatchOutcome> {
        match action {
            Action::SendCommand(command) => {
                let outcome = self.send_command(&command).await?;
                Ok(DispatchOutcome::Sent(outcome))
            }
            Action::StartAutoTest => {
                let summary = self.run_sequence().await?;
                Ok(DispatchOutcome::RunCompleted(summary))
            }
            Action::Panel(change) => {
                let visible = self.change_panel(change).await?;
                Ok(DispatchOutcome::PanelVisible(visible))
            }
            Action::ShowResults => Ok(DispatchOutcome::Results(self.show_results())),
        }
    }

    /// Send a single command to the chat.
    ///
    /// Locates the message input through the candidate list, injects the
    /// text plus a bubbling input event, waits the settle delay, then
    /// clicks the send button or falls back to a synthetic Enter keydown.
    pub async fn send_command(&mut self, command: &str) -> Result<SendOutcome> {
        self.ensure_panel().await;

        let Some((input_selector, _input)) =
            self.browser.find_first(MESSAGE_INPUT_CANDIDATES).await?
        else {
            panel::set_status(&self.browser, "Message input not found").await;
            return Err(BotprobeError::element_not_found("message input").into());
        };

        info!("Injecting command into {}: {}", input_selector, command);
        self.browser
            .execute(
                INJECT_COMMAND_SCRIPT,
                vec![json!(input_selector), json!(command)],
            )
            .await?;

        // Let the host page's own handlers react to the input event
        sleep(Duration::from_millis(INPUT_SETTLE_MS)).await;

        let submit_path = match self.browser.find_first(SEND_BUTTON_CANDIDATES).await? {
            Some((button_selector, button)) => {
                debug!("Clicking send button {}", button_selector);
                button.click().await?;
                SubmitPath::SendButton
            }
            None => {
                debug!("No send button matched, dispatching Enter keydown");
                self.browser
                    .execute(ENTER_FALLBACK_SCRIPT, vec![json!(input_selector.clone())])
                    .await?;
                SubmitPath::EnterKey
            }
        };

        let dispatched_at = Local::now();
        self.results.push(StepReport {
            index: self.current_step,
            command: command.to_string(),
            submit_path,
            dispatched_at,
        });
        self.current_step += 1;

        panel::set_status(&self.browser, &format!("Command sent: {command}")).await;
        panel::set_progress(
            &self.browser,
            self.current_step,
            self.sequence.len(),
            &dispatched_at.format("%H:%M:%S").to_string(),
        )
        .await;

        info!("Command dispatched via {}: {}", submit_path, command);
        Ok(SendOutcome {
            command: command.to_string(),
            input_selector,
            submit_path,
        })
    }

    /// Run the fixed auto-test sequence.
    ///
    /// One step per command, sleeping each step's delay before the next.
    /// A failed step aborts the run with its error; the steps already
    /// dispatched remain in the summary state.
    pub async fn run_sequence(&mut self) -> Result<RunSummary> {
        self.current_step = 0;
        self.results.clear();
        self.run_started = Some(Instant::now());

        let steps = self.sequence.clone();
        let total = steps.len();
        panel::set_status(&self.browser, "Auto-test starting...").await;
        info!("Auto-test starting: {} steps", total);

        for (i, step) in steps.iter().enumerate() {
            let label = format!("Test {}/{}: {}", i + 1, total, step.command);
            panel::set_status(&self.browser, &label).await;
            info!("{}", label);

            if let Err(e) = self.send_command(&step.command).await {
                panel::set_status(
                    &self.browser,
                    &format!("Auto-test stalled at step {}/{}", i + 1, total),
                )
                .await;
                warn!("Auto-test stalled after {} completed step(s)", i);
                return Err(e);
            }

            sleep(Duration::from_millis(step.delay_ms)).await;
        }

        panel::set_status(&self.browser, "Auto-test completed").await;
        info!("Auto-test completed");
        Ok(self.show_results())
    }

    /// Summary of the current run state.
    ///
    /// Counts and timing only: there is no pass/fail because delivery is
    /// never verified against the host page's responses.
    pub fn show_results(&self) -> RunSummary {
        let elapsed_ms = self
            .run_started
            .map(|started| started.elapsed().as_millis() as u64)
            .unwrap_or(0);

        RunSummary {
            steps_completed: self.results.len(),
            steps_total: self.sequence.len(),
            elapsed_ms,
            finished_at: Local::now(),
            steps: self.results.clone(),
        }
    }

    /// Flip the panel's visibility, creating the panel when absent.
    /// Toggling twice always restores the visibility it started with.
    pub async fn toggle_panel(&mut self) -> Result<Option<bool>> {
        self.change_panel(PanelAction::Toggle).await
    }

    async fn change_panel(&mut self, change: PanelAction) -> Result<Option<bool>> {
        let title = self.panel_title();
        panel::ensure(&self.browser, &title).await?;
        match change {
            PanelAction::Toggle => panel::toggle(&self.browser).await,
            PanelAction::Show => panel::set_visible(&self.browser, true).await,
            PanelAction::Hide => panel::set_visible(&self.browser, false).await,
        }
    }

    /// Report which composer candidates match on the current page
    pub async fn probe_composer(&self) -> Result<ProbeReport> {
        let message_input = self
            .browser
            .find_first(MESSAGE_INPUT_CANDIDATES)
            .await?
            .map(|(selector, _)| selector);
        let send_button = self
            .browser
            .find_first(SEND_BUTTON_CANDIDATES)
            .await?
            .map(|(selector, _)| selector);

        Ok(ProbeReport {
            message_input,
            send_button,
        })
    }

    /// Tear down the browser session
    pub async fn close(self) -> Result<()> {
        self.browser.close().await
    }

    fn panel_title(&self) -> String {
        format!("Bot Test Helper · {}", self.config.bot_username)
    }

    async fn ensure_panel(&self) {
        let title = self.panel_title();
        if let Err(e) = panel::ensure(&self.browser, &title).await {
            debug!("Panel injection failed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod dispatcher_test;
