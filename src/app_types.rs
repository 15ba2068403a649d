use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, process::Child, sync::Mutex};

/// One rendered frame of the instrumented target, as reported by the layer.
/// `started_at` is microseconds since an arbitrary but monotonic epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FrameRecord {
    pub(crate) frame_index: u64,
    pub(crate) started_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct IngestStats {
    pub(crate) accepted: u64,
    pub(crate) rejected: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LaunchBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

#[derive(Debug)]
pub(crate) struct LaunchPlan {
    pub(crate) program: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: PathBuf,
    pub(crate) env: Vec<(String, String)>,
}

#[derive(Debug)]
pub(crate) enum LaunchError {
    InvalidPath(String),
    InvalidWorkingDirectory(String),
    SpawnFailed(String),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath(message) => write!(formatter, "Invalid application path: {message}"),
            Self::InvalidWorkingDirectory(message) => {
                write!(formatter, "Invalid working directory: {message}")
            }
            Self::SpawnFailed(message) => {
                write!(formatter, "Failed to start application: {message}")
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct ProcessHandle {
    pub(crate) pid: u32,
    pub(crate) child: Child,
}

/// Launched targets are fire-and-forget, but the `Child` handles are kept so
/// exited children get reaped instead of lingering as zombies.
#[derive(Debug, Default)]
pub(crate) struct LauncherState {
    children: Mutex<Vec<Child>>,
}

impl LauncherState {
    pub(crate) fn remember(&self, handle: ProcessHandle) {
        let Ok(mut children) = self.children.lock() else {
            return;
        };
        children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
        children.push(handle.child);
    }

    pub(crate) fn reap_exited(&self) -> usize {
        let Ok(mut children) = self.children.lock() else {
            return 0;
        };
        let before = children.len();
        children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
        before - children.len()
    }

    #[cfg(test)]
    pub(crate) fn tracked_count(&self) -> usize {
        self.children.lock().map(|children| children.len()).unwrap_or(0)
    }
}
