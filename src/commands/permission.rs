#[tauri::command]
pub(crate) async fn check_permission(state: State<'_, AppState>) -> Result<bool, BridgeError> {
    let host = state.host.clone();
    run_query(move || host.has_permission().map_err(BridgeError::usage_query)).await
}

#[tauri::command]
pub(crate) async fn open_usage_settings(state: State<'_, AppState>) -> Result<(), BridgeError> {
    let host = state.host.clone();
    run_query(move || {
        host.request_permission()
            .map_err(BridgeError::usage_query)
    })
    .await
}
