use std::path::{Path, PathBuf};

use crate::{LaunchError, LaunchPlan};

/// Builds a fully resolved launch plan from the raw bridge payload. All bad
/// input is classified here, before any process is spawned.
pub(crate) fn resolve_launch_plan(
    file_path: &str,
    working_directory: &str,
    command_args: &str,
    env: Vec<(String, String)>,
) -> Result<LaunchPlan, LaunchError> {
    let program = resolve_program(file_path)?;
    let cwd = resolve_working_directory(&program, working_directory)?;
    let args = tokenize_command_args(command_args);

    Ok(LaunchPlan {
        program,
        args,
        cwd,
        env,
    })
}

fn resolve_program(file_path: &str) -> Result<PathBuf, LaunchError> {
    let trimmed = file_path.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::InvalidPath(
            "no application path given".to_string(),
        ));
    }

    let program = PathBuf::from(trimmed);
    if !program.is_file() {
        return Err(LaunchError::InvalidPath(format!(
            "no such file: {}",
            program.display()
        )));
    }
    if !is_executable_file(&program) {
        return Err(LaunchError::InvalidPath(format!(
            "not executable: {}",
            program.display()
        )));
    }
    Ok(program)
}

fn resolve_working_directory(
    program: &Path,
    working_directory: &str,
) -> Result<PathBuf, LaunchError> {
    let trimmed = working_directory.trim();
    let cwd = if trimmed.is_empty() {
        // Host path semantics, not a hard-coded separator split.
        program
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                LaunchError::InvalidWorkingDirectory(format!(
                    "cannot derive a working directory from {}",
                    program.display()
                ))
            })?
    } else {
        PathBuf::from(trimmed)
    };

    if !cwd.is_dir() {
        return Err(LaunchError::InvalidWorkingDirectory(format!(
            "not a directory: {}",
            cwd.display()
        )));
    }
    Ok(cwd)
}

/// Shell-like tokenization with quoting support. An unparseable string
/// (unbalanced quote) degrades to plain whitespace splitting so argument
/// syntax alone never blocks a launch.
pub(crate) fn tokenize_command_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    shlex::split(raw)
        .unwrap_or_else(|| raw.split_whitespace().map(String::from).collect())
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(_path: &Path) -> bool {
    true
}
