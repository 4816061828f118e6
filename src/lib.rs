mod app_state;
mod config;
mod constants;
mod error;
mod host;
mod stream;
mod usage;

use tauri::{Manager, State};

use crate::app_state::{build_state, AppState};
use crate::constants::DAY_MS;
use crate::error::BridgeError;
use crate::host::UsageHost;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        // Ensure clicking the EXE again focuses the existing instance instead of launching a second one.
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            if let Some(w) = app.get_webview_window("main") {
                let _ = w.show();
                let _ = w.set_focus();
            }
        }))
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // Prefer a stable per-user app data directory so rebuilds keep the
            // same device settings. If a local ./user-data already exists next
            // to the EXE, keep using it for portability.
            // Layout:
            // - user-data/config.toml
            let user_data_dir = (|| -> Option<std::path::PathBuf> {
                let exe = std::env::current_exe().ok()?;
                let dir = exe.parent()?.to_path_buf();
                let local = dir.join("user-data");
                if local.exists() {
                    return Some(local);
                }
                None
            })()
            .unwrap_or(app.path().app_data_dir()?);

            let state = build_state(user_data_dir.join("config.toml"))?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            check_permission,
            open_usage_settings,
            get_usage_stats,
            get_usage_stats_for_range,
            get_usage_stats_for_interval,
            start_usage_stream,
            stop_usage_stream
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Run bridge work on a blocking worker thread; the host binding shells
/// out and must stay off the UI runtime.
async fn run_query<T, F>(job: F) -> Result<T, BridgeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BridgeError> + Send + 'static,
{
    match tauri::async_runtime::spawn_blocking(job).await {
        Ok(result) => result,
        Err(join_err) => Err(BridgeError::usage_query(join_err)),
    }
}

fn report_window_json(
    host: &dyn UsageHost,
    start_ms: i64,
    end_ms: i64,
) -> Result<String, BridgeError> {
    let entries =
        usage::collect_report(host, start_ms, end_ms).map_err(BridgeError::usage_query)?;
    serde_json::to_string(&entries).map_err(BridgeError::usage_query)
}

include!("commands/permission.rs");

include!("commands/usage_query.rs");

include!("commands/stream_ops.rs");
