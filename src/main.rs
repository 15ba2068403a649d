#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod bridge_commands;
mod frame_buffer;
mod ingest_server;
mod launch_plan;
mod launch_service;
mod layer_env;
mod logging;
mod runtime_paths;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    FrameRecord, IngestStats, LaunchBridgeResult, LaunchError, LaunchPlan, LauncherState,
    ProcessHandle,
};
pub(crate) use logging::{append_desktop_log, append_ingest_log, append_startup_log};

fn main() {
    app_runtime::run();
}
