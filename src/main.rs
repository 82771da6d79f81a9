#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const _EXIT_COMMAND_ERROR: i32 = 1;
const _EXIT_WRONG_PAGE: i32 = 2;
const _EXIT_ELEMENT_NOT_FOUND: i32 = 3;
const _EXIT_WEBDRIVER_FAILED: i32 = 4;
const _EXIT_TIMEOUT: i32 = 5;

use botprobe::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;
use botprobe::{
    Action, BotprobeError, Browser, BrowserType, DispatchOutcome, Dispatcher, HelperConfig,
    OutputFormat, PanelAction, ViewportSize,
};

#[derive(Parser)]
#[command(name = "botprobe")]
#[command(about = "Chat bot QA helper that drives a web chat client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat client and keep the session alive until Ctrl-C
    Open {
        /// URL to open (defaults to the configured chat client)
        #[arg(long)]
        url: Option<String>,

        /// Browser to use
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Profile directory for session persistence (login state)
        #[arg(long)]
        profile_dir: Option<PathBuf>,

        /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
        #[arg(long)]
        viewport: Option<String>,

        /// Run headless (default is a visible window, this is for logging in)
        #[arg(long)]
        headless: bool,
    },

    /// Send a single command to the chat
    Send {
        /// The command text, e.g. "/punkte"
        command: String,

        /// URL to navigate to (defaults to the configured chat client)
        #[arg(long)]
        url: Option<String>,

        /// Fragment the page URL must contain before dispatching
        #[arg(long, default_value = "web.telegram.org")]
        expect_host: String,

        /// Browser to use
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Profile directory for session persistence (login state)
        #[arg(long)]
        profile_dir: Option<PathBuf>,

        /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
        #[arg(long)]
        viewport: Option<String>,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,

        /// Output format
        #[arg(short, long, default_value = "simple")]
        format: OutputFormat,
    },

    /// Run the fixed auto-test sequence
    Run {
        /// URL to navigate to (defaults to the configured chat client)
        #[arg(long)]
        url: Option<String>,

        /// Fragment the page URL must contain before dispatching
        #[arg(long, default_value = "web.telegram.org")]
        expect_host: String,

        /// Browser to use
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Profile directory for session persistence (login state)
        #[arg(long)]
        profile_dir: Option<PathBuf>,

        /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
        #[arg(long)]
        viewport: Option<String>,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,

        /// Output format
        #[arg(short, long, default_value = "simple")]
        format: OutputFormat,
    },

    /// Show, hide or toggle the injected status panel
    Panel {
        /// Visibility change to apply
        #[arg(value_enum)]
        action: PanelAction,

        /// URL to navigate to (defaults to the configured chat client)
        #[arg(long)]
        url: Option<String>,

        /// Fragment the page URL must contain before dispatching
        #[arg(long, default_value = "web.telegram.org")]
        expect_host: String,

        /// Browser to use
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Profile directory for session persistence (login state)
        #[arg(long)]
        profile_dir: Option<PathBuf>,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,
    },

    /// Report which composer selector candidates match on a page
    Probe {
        /// URL to probe (defaults to the configured chat client)
        #[arg(long)]
        url: Option<String>,

        /// Browser to use
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Profile directory for session persistence (login state)
        #[arg(long)]
        profile_dir: Option<PathBuf>,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,

        /// Output format
        #[arg(short, long, default_value = "simple")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Always clean up WebDriver processes before exiting
    GLOBAL_WEBDRIVER_MANAGER.stop_all();

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let err = BotprobeError::classify(err);

            // JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": err.to_string(),
                "exit_code": err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "botprobe=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Open {
            url,
            browser,
            profile_dir,
            viewport,
            headless,
        } => {
            let config = HelperConfig::default();
            let target = target_url(url, &config)?;
            let browser =
                new_browser(&browser, profile_dir, viewport.as_deref(), headless).await?;
            browser.goto(&target).await?;

            println!("Opened {}. Press Ctrl-C to close the session.", target);
            tokio::signal::ctrl_c().await?;
            browser.close().await?
        }

        Commands::Send {
            command,
            url,
            expect_host,
            browser,
            profile_dir,
            viewport,
            no_headless,
            format,
        } => {
            let mut dispatcher = new_dispatcher(
                url,
                expect_host,
                &browser,
                profile_dir,
                viewport.as_deref(),
                !no_headless,
            )
            .await?;
            dispatcher.ensure_host().await?;

            let outcome = dispatcher.dispatch(Action::SendCommand(command)).await?;
            print_outcome(&outcome, format)?;
            dispatcher.close().await?
        }

        Commands::Run {
            url,
            expect_host,
            browser,
            profile_dir,
            viewport,
            no_headless,
            format,
        } => {
            let mut dispatcher = new_dispatcher(
                url,
                expect_host,
                &browser,
                profile_dir,
                viewport.as_deref(),
                !no_headless,
            )
            .await?;
            dispatcher.ensure_host().await?;

            let outcome = dispatcher.dispatch(Action::StartAutoTest).await?;
            print_outcome(&outcome, format)?;
            dispatcher.close().await?
        }

        Commands::Panel {
            action,
            url,
            expect_host,
            browser,
            profile_dir,
            no_headless,
        } => {
            let mut dispatcher =
                new_dispatcher(url, expect_host, &browser, profile_dir, None, !no_headless)
                    .await?;
            dispatcher.ensure_host().await?;

            let outcome = dispatcher.dispatch(Action::Panel(action)).await?;
            print_outcome(&outcome, OutputFormat::Simple)?;
            dispatcher.close().await?
        }

        Commands::Probe {
            url,
            browser,
            profile_dir,
            no_headless,
            format,
        } => {
            let config = HelperConfig::default();
            let target = target_url(url, &config)?;
            let browser = new_browser(&browser, profile_dir, None, !no_headless).await?;
            browser.goto(&target).await?;

            let dispatcher = Dispatcher::new(browser, config);
            let report = dispatcher.probe_composer().await?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Simple => {
                    match &report.message_input {
                        Some(selector) => println!("Message input: {}", selector),
                        None => println!("Message input: no candidate matched"),
                    }
                    match &report.send_button {
                        Some(selector) => println!("Send button: {}", selector),
                        None => println!("Send button: no candidate matched"),
                    }
                }
            }
            dispatcher.close().await?
        }
    }

    Ok(())
}

async fn new_browser(
    browser: &str,
    profile_dir: Option<PathBuf>,
    viewport: Option<&str>,
    headless: bool,
) -> Result<Browser> {
    let browser_type: BrowserType = browser.parse()?;
    let viewport = viewport.map(ViewportSize::parse).transpose()?;
    Browser::new(browser_type, profile_dir, viewport, headless).await
}

async fn new_dispatcher(
    url: Option<String>,
    expect_host: String,
    browser: &str,
    profile_dir: Option<PathBuf>,
    viewport: Option<&str>,
    headless: bool,
) -> Result<Dispatcher> {
    let config = HelperConfig {
        expected_host: expect_host,
        ..HelperConfig::default()
    };
    let target = target_url(url, &config)?;

    let browser = new_browser(browser, profile_dir, viewport, headless).await?;
    browser.goto(&target).await?;

    Ok(Dispatcher::new(browser, config))
}

/// Resolve and validate the navigation target
fn target_url(url: Option<String>, config: &HelperConfig) -> Result<String> {
    let target = url.unwrap_or_else(|| config.chat_url.clone());
    url::Url::parse(&target).context(format!("Invalid URL: {}", target))?;
    Ok(target)
}

fn print_outcome(outcome: &DispatchOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Simple => match outcome {
            DispatchOutcome::Sent(sent) => {
                println!(
                    "Sent '{}' via {} (input: {})",
                    sent.command, sent.submit_path, sent.input_selector
                );
            }
            DispatchOutcome::RunCompleted(summary) | DispatchOutcome::Results(summary) => {
                println!(
                    "Auto-test: {}/{} steps dispatched in {} ms (finished {})",
                    summary.steps_completed,
                    summary.steps_total,
                    summary.elapsed_ms,
                    summary.finished_at.format("%H:%M:%S")
                );
                for step in &summary.steps {
                    println!(
                        "  {}. {} via {} at {}",
                        step.index + 1,
                        step.command,
                        step.submit_path,
                        step.dispatched_at.format("%H:%M:%S")
                    );
                }
                println!("Check the chat responses manually for correctness.");
            }
            DispatchOutcome::PanelVisible(visible) => match visible {
                Some(true) => println!("Panel is now visible"),
                Some(false) => println!("Panel is now hidden"),
                None => println!("No panel on this page"),
            },
        },
    }
    Ok(())
}
