/*!
 * Clipboard delivery for promptclip
 *
 * The prompt is piped into the first clipboard command that can serve the
 * current session. tmux is the last resort for headless terminals.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The command is not available on the system
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Destination for the finished prompt
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// The OS clipboard, reached through the first usable provider
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a handle to the system clipboard
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let provider = ClipboardProvider::detect().ok_or(ClipboardError::NoClipboardFound)?;

        debug!("Copying {} bytes with {:?}", text.len(), provider);
        pipe_to(provider.program(), provider.args(), text)
    }
}

/// Clipboard commands that read the text from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    Pbcopy,
    WlCopy,
    Xclip,
    Xsel,
    ClipExe,
    Termux,
    Tmux,
}

/// Providers in order of preference
const PROVIDERS: [ClipboardProvider; 7] = [
    ClipboardProvider::Pbcopy,
    ClipboardProvider::WlCopy,
    ClipboardProvider::Xclip,
    ClipboardProvider::Xsel,
    ClipboardProvider::ClipExe,
    ClipboardProvider::Termux,
    ClipboardProvider::Tmux,
];

impl ClipboardProvider {
    fn program(self) -> &'static str {
        match self {
            Self::Pbcopy => "pbcopy",
            Self::WlCopy => "wl-copy",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
            Self::ClipExe => "clip.exe",
            Self::Termux => "termux-clipboard-set",
            Self::Tmux => "tmux",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::Xsel => &["--clipboard", "--input"],
            Self::Tmux => &["load-buffer", "-w", "-"],
            _ => &[],
        }
    }

    /// Whether the current session can use this provider at all
    fn session_supports(self) -> bool {
        match self {
            Self::Pbcopy => cfg!(target_os = "macos"),
            Self::WlCopy => env::var_os("WAYLAND_DISPLAY").is_some(),
            Self::Xclip | Self::Xsel => env::var_os("DISPLAY").is_some(),
            Self::ClipExe => cfg!(windows) || env::var_os("WSL_DISTRO_NAME").is_some(),
            Self::Termux => cfg!(target_os = "android"),
            Self::Tmux => env::var_os("TMUX").is_some(),
        }
    }

    fn detect() -> Option<Self> {
        PROVIDERS
            .into_iter()
            .find(|provider| provider.session_supports() && on_path(provider.program()))
    }
}

/// Check whether `program` is an executable file in one of the `PATH` entries
pub fn on_path(program: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| {
        env::split_paths(&paths).any(|dir| dir.join(program).is_file())
    })
}

/// Run `program`, write `text` to its stdin, and wait for it to exit
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClipboardError::CommandNotFound(program.to_string()),
            _ => ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", program, e)),
        })?;

    // Dropping stdin closes the pipe so the command sees end of input
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ClipboardError::CommandFailed(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            program, status
        )));
    }

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_on_path() {
        assert!(on_path("sh"));
        assert!(!on_path("nonexistentcommandxyz"));
    }

    #[test]
    fn test_tmux_is_the_last_resort() {
        assert_eq!(PROVIDERS.last(), Some(&ClipboardProvider::Tmux));
    }

    #[test]
    fn test_detected_provider_is_usable() {
        if let Some(provider) = ClipboardProvider::detect() {
            assert!(provider.session_supports());
            assert!(on_path(provider.program()));
        }
    }

    #[test]
    fn test_pipe_to_reads_all_input() {
        assert!(pipe_to("cat", &[], "prompt text").is_ok());
    }

    #[test]
    fn test_missing_command_is_reported() {
        let result = pipe_to("nonexistentcommandxyz", &[], "text");
        assert!(matches!(result, Err(ClipboardError::CommandNotFound(_))));
    }

    #[test]
    fn test_failing_command_is_reported() {
        let result = pipe_to("false", &[], "text");
        assert!(matches!(result, Err(ClipboardError::CommandFailed(_))));
    }

    #[test]
    #[ignore] // This test requires tmux to be installed and running
    fn test_tmux_clipboard() {
        if env::var_os("TMUX").is_none() || !on_path("tmux") {
            return;
        }

        let provider = ClipboardProvider::Tmux;
        let test_text = "Test text for tmux clipboard";
        pipe_to(provider.program(), provider.args(), test_text)
            .expect("Failed to copy to tmux clipboard");

        let output = Command::new("tmux")
            .args(["show-buffer"])
            .output()
            .expect("Failed to execute tmux show-buffer");

        let clipboard_content = String::from_utf8_lossy(&output.stdout);
        assert_eq!(clipboard_content.trim(), test_text);
    }
}
