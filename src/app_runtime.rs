use tauri::{Manager, RunEvent};

use crate::{
    append_desktop_log, append_startup_log, frame_buffer::FrameBufferState, ingest_server,
    logging, runtime_paths, LauncherState, DESKTOP_LOG_FILE,
};

pub(crate) fn run() {
    let capacity = runtime_paths::frame_capacity();
    let bind_addr = runtime_paths::ingest_bind_addr();

    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(
            runtime_paths::default_root_dir().as_deref(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    let frame_state = FrameBufferState::with_capacity(capacity);
    let ingest_buffer = frame_state.buffer();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(frame_state)
        .manage(LauncherState::default())
        .invoke_handler(tauri::generate_handler![
            crate::bridge_commands::launch_application,
            crate::bridge_commands::get_frame_data,
            crate::bridge_commands::get_ingest_stats,
        ])
        .setup(move |_app| {
            append_startup_log(&format!(
                "frame buffer capacity: {}",
                ingest_buffer.capacity()
            ));
            ingest_server::spawn_ingest_server(ingest_buffer, bind_addr);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::Exit => {
                let state = app_handle.state::<LauncherState>();
                let reaped = state.reap_exited();
                if reaped > 0 {
                    append_desktop_log(&format!("reaped {reaped} exited target process(es)"));
                }
                append_desktop_log("desktop process exiting");
            }
            _ => {}
        });
}
