use std::{
    io,
    process::{Child, Command, Stdio},
};

use crate::{LaunchError, LaunchPlan, ProcessHandle};

/// Spawns the target detached and returns immediately; the caller never waits
/// for the child to exit. The instrumented target reports frames back through
/// the ingestion server, not through this return value.
pub(crate) fn launch(plan: &LaunchPlan) -> Result<ProcessHandle, LaunchError> {
    let child = spawn_detached(plan).map_err(|error| LaunchError::SpawnFailed(format!(
        "{}: {}",
        plan.program.display(),
        error
    )))?;
    Ok(ProcessHandle {
        pid: child.id(),
        child,
    })
}

fn base_command(plan: &LaunchPlan) -> Command {
    let mut command = Command::new(&plan.program);
    command
        .args(&plan.args)
        .current_dir(&plan.cwd)
        .envs(plan.env.iter().map(|(key, value)| (key, value)))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

#[cfg(windows)]
fn spawn_detached(plan: &LaunchPlan) -> io::Result<Child> {
    use std::os::windows::process::CommandExt;

    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    const DETACHED_PROCESS: u32 = 0x0000_0008;

    base_command(plan)
        .creation_flags(CREATE_NEW_PROCESS_GROUP | DETACHED_PROCESS)
        .spawn()
}

#[cfg(not(windows))]
fn spawn_detached(plan: &LaunchPlan) -> io::Result<Child> {
    base_command(plan).spawn()
}
