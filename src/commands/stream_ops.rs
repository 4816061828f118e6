#[tauri::command]
pub(crate) fn start_usage_stream(app: tauri::AppHandle) {
    crate::stream::start(app);
}

#[tauri::command]
pub(crate) fn stop_usage_stream(state: State<'_, AppState>) {
    state.stream.end();
}
