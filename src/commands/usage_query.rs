#[tauri::command]
pub(crate) async fn get_usage_stats(state: State<'_, AppState>) -> Result<String, BridgeError> {
    let host = state.host.clone();
    run_query(move || {
        let end_ms = usage::unix_ms();
        report_window_json(host.as_ref(), end_ms.saturating_sub(DAY_MS), end_ms)
    })
    .await
}

#[tauri::command]
pub(crate) async fn get_usage_stats_for_range(
    state: State<'_, AppState>,
    start_time: i64,
    end_time: i64,
) -> Result<String, BridgeError> {
    let host = state.host.clone();
    run_query(move || report_window_json(host.as_ref(), start_time, end_time)).await
}

#[tauri::command]
pub(crate) async fn get_usage_stats_for_interval(
    state: State<'_, AppState>,
    interval: Option<String>,
) -> Result<String, BridgeError> {
    let host = state.host.clone();
    run_query(move || {
        let interval = interval.as_deref().unwrap_or("daily");
        let (start_ms, end_ms) = usage::interval_window(interval, usage::unix_ms());
        report_window_json(host.as_ref(), start_ms, end_ms)
    })
    .await
}
