use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::webdriver::BrowserType;

/// Manages WebDriver processes (geckodriver, chromedriver) spawned on demand
pub struct WebDriverManager {
    processes: Arc<Mutex<Vec<DriverProcess>>>,
}

struct DriverProcess {
    browser_type: BrowserType,
    child: Child,
    port: u16,
    url: String,
    #[cfg(unix)]
    process_group_id: Option<i32>,
}

impl Default for WebDriverManager {
    fn default() -> Self {
        Self {
            processes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl WebDriverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a WebDriver is running for the given browser type.
    /// Returns the URL to connect to.
    pub async fn ensure_driver(&self, browser_type: &BrowserType) -> Result<String> {
        // Reuse a driver we already spawned, if it still answers
        let managed_urls: Vec<String> = {
            let processes = self.processes.lock().unwrap();
            processes
                .iter()
                .filter(|p| p.browser_type == *browser_type)
                .map(|p| p.url.clone())
                .collect()
        };

        for url in managed_urls {
            if Self::driver_ready(&url).await {
                debug!("Using existing managed WebDriver at {}", url);
                return Ok(url);
            }
        }

        // An externally started driver on the standard port also works
        let standard_url = match browser_type {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        };
        if Self::driver_ready(standard_url).await {
            debug!("Found external WebDriver at {}", standard_url);
            return Ok(standard_url.to_string());
        }

        info!("WebDriver not detected, attempting to start automatically...");
        self.start_driver(browser_type).await
    }

    async fn start_driver(&self, browser_type: &BrowserType) -> Result<String> {
        let port = Self::find_free_port(browser_type)?;
        let (command, args) = match browser_type {
            BrowserType::Firefox => {
                info!("Starting geckodriver on port {}", port);
                ("geckodriver", vec!["--port".to_string(), port.to_string()])
            }
            BrowserType::Chrome => {
                info!("Starting chromedriver on port {}", port);
                ("chromedriver", vec![format!("--port={}", port)])
            }
        };

        if !Self::command_exists(command) {
            anyhow::bail!(
                "{} not found in PATH. Please install it:\n\
                  macOS: brew install {}\n\
                  Linux: Download from official releases\n\
                  Or see: https://www.selenium.dev/documentation/webdriver/getting_started/install_drivers/",
                command,
                command
            );
        }

        let mut cmd = Command::new(command);
        cmd.args(&args).stdout(Stdio::piped()).stderr(Stdio::piped());

        // On Unix, a fresh process group lets us kill the driver together
        // with any browser it spawned
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().context(format!("Failed to start {}", command))?;

        #[cfg(unix)]
        let process_group_id = Some(child.id() as i32);

        let url = format!("http://localhost:{}", port);

        {
            let mut processes = self.processes.lock().unwrap();
            processes.push(DriverProcess {
                browser_type: *browser_type,
                child,
                port,
                url: url.clone(),
                #[cfg(unix)]
                process_group_id,
            });
        }

        // Wait for the driver to answer its status endpoint
        let max_attempts = 30; // 3 seconds total
        for attempt in 1..=max_attempts {
            if Self::driver_ready(&url).await {
                info!("WebDriver started successfully on port {}", port);
                return Ok(url);
            }
            if attempt < max_attempts {
                sleep(Duration::from_millis(100)).await;
            }
        }

        self.cleanup_failed_process(port);
        anyhow::bail!("WebDriver failed to start within timeout")
    }

    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        #[cfg(unix)]
        {
            Command::new("which")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }

        #[cfg(windows)]
        {
            Command::new("where")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }
    }

    /// Find a free port, preferring the conventional ones for the driver
    pub fn find_free_port(browser_type: &BrowserType) -> Result<u16> {
        let preferred_ports: &[u16] = match browser_type {
            BrowserType::Firefox => &[4444, 4445, 4446],
            BrowserType::Chrome => &[9515, 9516, 9517],
        };

        for &port in preferred_ports {
            if !Self::is_port_in_use(port) {
                debug!("Found free port {} for {:?}", port, browser_type);
                return Ok(port);
            }
            debug!("Port {} is in use for {:?}", port, browser_type);
        }

        // Fall back to letting the OS assign a port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    /// Check if a port is in use
    pub fn is_port_in_use(port: u16) -> bool {
        std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
    }

    /// Check that a WebDriver at the given URL is up and reports ready
    pub async fn driver_ready(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => {
                if !response.status().is_success() {
                    return false;
                }
                match response.json::<serde_json::Value>().await {
                    Ok(body) => body
                        .get("value")
                        .and_then(|v| v.get("ready"))
                        .and_then(|r| r.as_bool())
                        .unwrap_or(false),
                    Err(_) => false,
                }
            }
            Err(_) => false,
        }
    }

    /// Kill any managed WebDriver process for a browser type
    pub fn kill_driver(&self, browser_type: &BrowserType) {
        let mut processes = self.processes.lock().unwrap();
        let indices: Vec<_> = processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.browser_type == *browser_type)
            .map(|(i, _)| i)
            .collect();

        for index in indices.into_iter().rev() {
            let mut process = processes.remove(index);

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                info!("Killing process group {} on port {}", pgid, process.port);
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }
    }

    /// Kill a process group on Unix systems
    #[cfg(unix)]
    fn kill_process_group(pgid: i32) {
        // SIGTERM first for graceful shutdown
        if let Err(e) = Command::new("kill")
            .args(["-TERM", &format!("-{}", pgid)])
            .output()
        {
            debug!("Failed to send SIGTERM to process group {}: {}", pgid, e);
        }

        std::thread::sleep(Duration::from_millis(100));

        // Then force kill any remaining processes
        if let Err(e) = Command::new("kill")
            .args(["-KILL", &format!("-{}", pgid)])
            .output()
        {
            debug!("Failed to send SIGKILL to process group {}: {}", pgid, e);
        }
    }

    fn cleanup_failed_process(&self, port: u16) {
        let mut processes = self.processes.lock().unwrap();
        if let Some(index) = processes.iter().position(|p| p.port == port) {
            let mut process = processes.remove(index);

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                info!(
                    "Killing process group {} for failed WebDriver on port {}",
                    pgid, port
                );
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }
    }

    /// Stop all managed WebDriver processes
    pub fn stop_all(&self) {
        let mut processes = self.processes.lock().unwrap();
        for process in processes.iter_mut() {
            debug!("Stopping WebDriver on port {}", process.port);

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                info!(
                    "Killing process group {} for WebDriver on port {}",
                    pgid, process.port
                );
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }
        processes.clear();
    }
}

impl Drop for WebDriverManager {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// Global WebDriver manager instance
lazy_static::lazy_static! {
    pub static ref GLOBAL_WEBDRIVER_MANAGER: WebDriverManager = WebDriverManager::new();
}

#[cfg(test)]
#[path = "webdriver_manager_test.rs"]
mod webdriver_manager_test;
