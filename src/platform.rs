//! Platform-specific configuration

use std::process::Command;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms (Enter on the submit button also works)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Command that opens a URL with the desktop's default handler
/// - macOS: `open`
/// - Windows: `rundll32 url.dll,FileProtocolHandler`
/// - everything else: `xdg-open`
#[cfg(target_os = "macos")]
pub fn open_url_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
pub fn open_url_command(url: &str) -> Command {
    url_protocol_handler(url)
}

/// Hands the URL to the shell's protocol handler without going through
/// `cmd.exe`, which would split a `mailto:` query at its `&`
#[cfg(any(target_os = "windows", test))]
fn url_protocol_handler(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn open_url_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
