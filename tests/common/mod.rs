// Common test utilities and fixtures

use std::path::PathBuf;
use tempfile::TempDir;

/// Write a fixture page to disk and return its path for a file:// URL
pub fn create_test_html(content: &str) -> PathBuf {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("chat.html");
    std::fs::write(&file_path, content).expect("Failed to write test HTML");

    // Leak the temp_dir to keep it alive for the test
    std::mem::forget(temp_dir);
    file_path
}

/// Mock chat pages for testing
pub mod fixtures {
    /// Composer with both an editable input and a send button. Records
    /// click and input-event counts so tests can assert on them.
    pub const CHAT_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Chat Fixture</title></head>
    <body>
        <div id="messages"></div>
        <div class="input-message-input" contenteditable="true"></div>
        <button class="btn-send">Send</button>
        <script>
            window.clickCount = 0;
            window.inputEventCount = 0;
            const input = document.querySelector('.input-message-input');
            input.addEventListener('input', () => { window.inputEventCount++; });
            document.querySelector('.btn-send').addEventListener('click', () => {
                window.clickCount++;
                const msg = document.createElement('div');
                msg.className = 'message-out';
                msg.textContent = input.textContent;
                document.getElementById('messages').appendChild(msg);
                input.textContent = '';
            });
        </script>
    </body>
    </html>
    "#;

    /// Composer with an editable input but no send button; records Enter
    /// keydowns on the input.
    pub const NO_SEND_BUTTON_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Chat Fixture (no button)</title></head>
    <body>
        <div class="input-message-input" contenteditable="true"></div>
        <script>
            window.enterKeydownCount = 0;
            document.querySelector('.input-message-input')
                .addEventListener('keydown', (event) => {
                    if (event.key === 'Enter') window.enterKeydownCount++;
                });
        </script>
    </body>
    </html>
    "#;

    /// A page with no composer at all
    pub const EMPTY_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Not A Chat</title></head>
    <body>
        <p>Nothing to compose here.</p>
    </body>
    </html>
    "#;
}
