//! # botprobe
#![allow(clippy::uninlined_format_args)]
//!
//! CLI helper that drives a web chat client through a real browser to
//! QA-test a chat bot's command sequence.
//!
//! The tool connects to a WebDriver session (geckodriver or chromedriver,
//! auto-started when missing), locates the chat client's message input and
//! send button through ordered CSS-selector candidate lists, injects the
//! command text and fires the same synthetic events a human interaction
//! would produce. Everything it does is best-effort: the host page's markup
//! is an unversioned external contract, and delivery of a dispatched
//! command is never verified against the chat transcript.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Open the chat client and keep the session alive (log in manually)
//! botprobe open --no-headless --profile-dir ~/.botprobe-profile
//!
//! # Send a single command
//! botprobe send "/punkte"
//!
//! # Send with a persistent profile (keeps the login session)
//! botprobe send "/start" --profile-dir ~/.botprobe-profile
//!
//! # Run the fixed auto-test sequence
//! botprobe run --profile-dir ~/.botprobe-profile
//!
//! # Toggle the injected status panel
//! botprobe panel toggle
//!
//! # Which composer selectors match on the current page?
//! botprobe probe --url "https://web.telegram.org/k/"
//! ```
//!
//! ### Browser and viewport options
//!
//! ```bash
//! # Use Chrome instead of Firefox (default)
//! botprobe send "/help" --browser chrome
//!
//! # Set a custom viewport size
//! botprobe run --viewport 1280x900
//!
//! # Run in visible mode (not headless)
//! botprobe run --no-headless
//! ```
//!
//! ### Pointing at a different page
//!
//! The wrong-page guard refuses to dispatch when the current URL does not
//! contain the expected host fragment. Both the URL and the fragment can be
//! overridden, which is also how the integration tests drive local fixture
//! pages:
//!
//! ```bash
//! botprobe send "/punkte" --url "file:///tmp/chat.html" --expect-host "chat.html"
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use botprobe::{Action, Browser, BrowserType, Dispatcher, HelperConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let browser = Browser::new(
//!     BrowserType::Firefox,
//!     None,  // No profile directory
//!     None,  // Default viewport
//!     true,  // Headless
//! ).await?;
//! browser.goto("https://web.telegram.org/k/").await?;
//!
//! let mut dispatcher = Dispatcher::new(browser, HelperConfig::default());
//! dispatcher.ensure_host().await?;
//! let _outcome = dispatcher.dispatch(Action::SendCommand("/punkte".into())).await?;
//! # Ok(())
//! # }
//! ```

/// Fixed helper configuration and the auto-test sequence
pub mod config;

/// Automation actions against the host page
pub mod dispatcher;

/// Structured errors with process exit codes
pub mod errors;

/// Injected on-page status panel
pub mod panel;

/// CSS selector candidates for the host page's composer
pub mod selectors;

/// Shared value types
pub mod types;

/// WebDriver browser control
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

pub use config::{HelperConfig, default_sequence};
pub use dispatcher::{Action, DispatchOutcome, Dispatcher, PanelAction, ProbeReport};
pub use errors::BotprobeError;
pub use types::{
    OutputFormat, RunSummary, SendOutcome, StepReport, SubmitPath, TestStep, ViewportSize,
};
pub use webdriver::{Browser, BrowserType};
