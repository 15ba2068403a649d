use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_desktop_log, frame_buffer::FrameBufferState, launch_plan, launch_service, layer_env,
    runtime_paths, FrameRecord, IngestStats, LaunchBridgeResult, LauncherState,
};

#[tauri::command]
pub(crate) async fn launch_application(
    app_handle: AppHandle,
    file_path: String,
    working_directory: String,
    command_args: String,
) -> LaunchBridgeResult {
    let root_dir = runtime_paths::default_root_dir();
    let manifest = layer_env::resolve_layer_manifest(root_dir.as_deref());
    if manifest.is_none() {
        append_desktop_log("layer manifest not found; launching without instrumentation");
    }
    let env = layer_env::layer_environment(manifest.as_deref());

    let plan = match launch_plan::resolve_launch_plan(
        &file_path,
        &working_directory,
        &command_args,
        env,
    ) {
        Ok(plan) => plan,
        Err(error) => return launch_failure(&app_handle, error.to_string()),
    };

    match launch_service::launch(&plan) {
        Ok(handle) => {
            append_desktop_log(&format!(
                "launched {} (pid {}) in {}",
                plan.program.display(),
                handle.pid,
                plan.cwd.display()
            ));
            let state = app_handle.state::<LauncherState>();
            state.remember(handle);
            LaunchBridgeResult {
                ok: true,
                reason: None,
            }
        }
        Err(error) => launch_failure(&app_handle, error.to_string()),
    }
}

fn launch_failure(app_handle: &AppHandle, reason: String) -> LaunchBridgeResult {
    append_desktop_log(&format!("launch_application failed: {reason}"));
    app_handle
        .dialog()
        .message(reason.as_str())
        .title("Launch failed")
        .kind(MessageDialogKind::Error)
        .blocking_show();
    LaunchBridgeResult {
        ok: false,
        reason: Some(reason),
    }
}

#[tauri::command]
pub(crate) fn get_frame_data(app_handle: AppHandle, size: usize) -> Vec<FrameRecord> {
    let state = app_handle.state::<FrameBufferState>();
    state.buffer().tail(size)
}

#[tauri::command]
pub(crate) fn get_ingest_stats(app_handle: AppHandle) -> IngestStats {
    let state = app_handle.state::<FrameBufferState>();
    state.buffer().stats()
}
