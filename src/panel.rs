//! Floating status panel injected into the host page.
//!
//! A singleton `<div>` keyed by a fixed element id, created once per page
//! load and mutated in place. Navigation destroys it implicitly; `ensure`
//! is idempotent so the next action simply recreates it.

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use crate::webdriver::Browser;

/// Fixed id of the singleton panel element
pub const PANEL_ID: &str = "botprobe-test-panel";

const ENSURE_SCRIPT: &str = r#"
    const id = arguments[0];
    const title = arguments[1];
    if (document.getElementById(id)) return false;

    const panel = document.createElement('div');
    panel.id = id;
    panel.style.cssText = [
        'position: fixed',
        'top: 10px',
        'right: 10px',
        'width: 300px',
        'background: #2c3e50',
        'color: white',
        'border-radius: 10px',
        'padding: 15px',
        'z-index: 10000',
        'font-family: Arial, sans-serif',
        'font-size: 12px',
        'box-shadow: 0 4px 20px rgba(0,0,0,0.3)'
    ].join(';');

    const heading = document.createElement('h3');
    heading.style.margin = '0 0 10px 0';
    heading.textContent = title;
    panel.appendChild(heading);

    const status = document.createElement('div');
    status.id = id + '-status';
    status.textContent = 'Ready for tests';
    panel.appendChild(status);

    const footer = document.createElement('div');
    footer.style.cssText = 'font-size: 10px; opacity: 0.8; margin-top: 10px';
    footer.innerHTML = 'Progress: <span id="' + id + '-progress">0/0</span>'
        + '<br>Last send: <span id="' + id + '-last-send">-</span>';
    panel.appendChild(footer);

    document.body.appendChild(panel);
    return true;
"#;

const SET_TEXT_SCRIPT: &str = r#"
    const el = document.getElementById(arguments[0]);
    if (!el) return false;
    el.textContent = arguments[1];
    return true;
"#;

const TOGGLE_SCRIPT: &str = r#"
    const panel = document.getElementById(arguments[0]);
    if (!panel) return null;
    panel.style.display = panel.style.display === 'none' ? 'block' : 'none';
    return panel.style.display !== 'none';
"#;

const SET_VISIBLE_SCRIPT: &str = r#"
    const panel = document.getElementById(arguments[0]);
    if (!panel) return null;
    panel.style.display = arguments[1] ? 'block' : 'none';
    return panel.style.display !== 'none';
"#;

const IS_VISIBLE_SCRIPT: &str = r#"
    const panel = document.getElementById(arguments[0]);
    if (!panel) return null;
    return panel.style.display !== 'none';
"#;

/// Create the panel if it does not exist yet. Returns true if it was created.
pub async fn ensure(browser: &Browser, title: &str) -> Result<bool> {
    let created = browser
        .execute(ENSURE_SCRIPT, vec![json!(PANEL_ID), json!(title)])
        .await?;
    Ok(created.as_bool().unwrap_or(false))
}

/// Update the status line. Best-effort: a missing panel is a debug event,
/// never a failure of the action being reported on.
pub async fn set_status(browser: &Browser, message: &str) {
    match browser
        .execute(
            SET_TEXT_SCRIPT,
            vec![json!(format!("{PANEL_ID}-status")), json!(message)],
        )
        .await
    {
        Ok(updated) if updated.as_bool() == Some(true) => {}
        Ok(_) => debug!("Panel status element missing; status was: {}", message),
        Err(e) => debug!("Panel status update failed: {} (status: {})", e, message),
    }
}

/// Update the progress counter and last-send timestamp. Best-effort.
pub async fn set_progress(browser: &Browser, done: usize, total: usize, timestamp: &str) {
    let progress = format!("{done}/{total}");
    for (element, text) in [
        (format!("{PANEL_ID}-progress"), progress.as_str()),
        (format!("{PANEL_ID}-last-send"), timestamp),
    ] {
        if let Err(e) = browser
            .execute(SET_TEXT_SCRIPT, vec![json!(element), json!(text)])
            .await
        {
            debug!("Panel progress update failed: {}", e);
        }
    }
}

/// Flip the panel between hidden and visible.
/// Returns the new visibility, or None if no panel exists on the page.
pub async fn toggle(browser: &Browser) -> Result<Option<bool>> {
    let visible = browser.execute(TOGGLE_SCRIPT, vec![json!(PANEL_ID)]).await?;
    Ok(visible.as_bool())
}

/// Show or hide the panel.
/// Returns the new visibility, or None if no panel exists on the page.
pub async fn set_visible(browser: &Browser, visible: bool) -> Result<Option<bool>> {
    let result = browser
        .execute(SET_VISIBLE_SCRIPT, vec![json!(PANEL_ID), json!(visible)])
        .await?;
    Ok(result.as_bool())
}

/// Current visibility, or None if no panel exists on the page
pub async fn is_visible(browser: &Browser) -> Result<Option<bool>> {
    let visible = browser
        .execute(IS_VISIBLE_SCRIPT, vec![json!(PANEL_ID)])
        .await?;
    Ok(visible.as_bool())
}
