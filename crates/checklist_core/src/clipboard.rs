//! Clipboard seam for copying exported JSON.
//!
//! # Responsibility
//! - Abstract "put this text on the clipboard" behind one trait.
//! - Provide a process-backed system implementation and an in-memory one.
//!
//! # Invariants
//! - Clipboard failures are reported as values and never panic.
//! - A failed write leaves caller state untouched.

use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Destination for copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug)]
pub enum ClipboardError {
    /// No clipboard tool could be started on this platform.
    Unavailable,
    /// Writing to the clipboard tool failed.
    Io {
        program: String,
        source: io::Error,
    },
    /// Clipboard tool exited unsuccessfully.
    Failed {
        program: String,
        code: Option<i32>,
    },
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no clipboard tool available"),
            Self::Io { program, source } => {
                write!(f, "clipboard write via `{program}` failed: {source}")
            }
            Self::Failed { program, code } => match code {
                Some(code) => write!(f, "clipboard tool `{program}` exited with status {code}"),
                None => write!(f, "clipboard tool `{program}` was terminated"),
            },
        }
    }
}

impl Error for ClipboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// External command that reads clipboard text from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardTool {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let io_error = |source: io::Error| ClipboardError::Io {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(io_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(source) = stdin.write_all(text.as_bytes()) {
                drop(stdin);
                // Reap the child before reporting; it may still be running.
                let _ = child.kill();
                let _ = child.wait();
                return Err(io_error(source));
            }
        }

        let status = child.wait().map_err(io_error)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}

/// Candidate clipboard tools for the current platform, in priority order.
fn platform_tools() -> Vec<ClipboardTool> {
    if cfg!(target_os = "macos") {
        vec![ClipboardTool::new("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        vec![ClipboardTool::new("clip", &[])]
    } else {
        vec![
            ClipboardTool::new("wl-copy", &[]),
            ClipboardTool::new("xclip", &["-selection", "clipboard"]),
            ClipboardTool::new("xsel", &["--clipboard", "--input"]),
        ]
    }
}

/// Clipboard backed by command-line clipboard tools.
///
/// Tools are tried in order until one succeeds. A tool that is missing or
/// fails (e.g. `wl-copy` outside a Wayland session) falls through to the next.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tools: Vec<ClipboardTool>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::with_tools(platform_tools())
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: Vec<ClipboardTool>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &[ClipboardTool] {
        &self.tools
    }
}

impl Clipboard for SystemClipboard {
    /// # Errors
    /// - [`ClipboardError::Unavailable`] when no tool could be started.
    /// - The last tool's error when every installed tool failed.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = None;
        for tool in &self.tools {
            match tool.write(text) {
                Ok(()) => {
                    debug!(
                        "event=clipboard_write module=clipboard status=ok tool={}",
                        tool.program
                    );
                    return Ok(());
                }
                Err(ClipboardError::Io { source, .. })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    continue;
                }
                Err(err) => {
                    warn!(
                        "event=clipboard_write module=clipboard status=error tool={}",
                        tool.program
                    );
                    last_error = Some(err);
                }
            }
        }
        warn!("event=clipboard_write module=clipboard status=error reason=exhausted");
        Err(last_error.unwrap_or(ClipboardError::Unavailable))
    }
}

/// In-memory clipboard holding the last written text.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
