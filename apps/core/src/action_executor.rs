use std::fmt::{Display, Formatter};
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    EmptyTarget,
    LaunchFailed { message: String, code: Option<i32> },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTarget => write!(f, "empty launch target"),
            Self::LaunchFailed { message, code } => match code {
                Some(code) => write!(f, "{message} (exit code {code})"),
                None => write!(f, "{message}"),
            },
        }
    }
}

impl std::error::Error for LaunchError {}

/// Host capability used by result actions to open a target.
pub trait ShellRunner {
    fn shell_run(&self, target: &str) -> Result<(), LaunchError>;
}

/// Hands targets to the platform's default opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl ShellRunner for SystemShell {
    fn shell_run(&self, target: &str) -> Result<(), LaunchError> {
        launch_open_target(target)
    }
}

pub fn launch_open_target(target: &str) -> Result<(), LaunchError> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyTarget);
    }

    spawn_and_reap(opener_command(trimmed))
        .map(|_| ())
        .map_err(|e| LaunchError::LaunchFailed {
            message: format!("failed to open '{trimmed}': {e}"),
            code: e.raw_os_error(),
        })
}

/// Spawns `command` and waits for it on a background thread so the child is
/// reaped without blocking the caller. The opener's exit status is not
/// reported back.
fn spawn_and_reap(mut command: Command) -> std::io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(std::thread::spawn(move || child.wait().ok()))
}

// The target goes straight to the URL protocol handler as one argument;
// routing it through `cmd /C start` would let `&`, `|` and `^` in a URL
// reach cmd's parser.
#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(target);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
