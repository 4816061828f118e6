use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tauri::{AppHandle, Emitter, Manager};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::app_state::AppState;
use crate::constants::{DAY_MS, STREAM_TICK_MS, USAGE_STREAM_ERROR_EVENT, USAGE_STREAM_EVENT};
use crate::error::BridgeError;
use crate::host::UsageHost;
use crate::usage;

/// The single active usage stream. Owned by the bridge state and only
/// mutated through subscribe/unsubscribe, replacing the ambient
/// timer/sink globals of the old bridge with one exclusively-owned
/// struct. The generation counter lets in-flight ticks detect that the
/// stream they belong to was cancelled or replaced, in which case their
/// result is silently dropped instead of delivered to a stale sink.
pub struct UsageStream {
    generation: AtomicU64,
    task: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
}

impl UsageStream {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            task: Mutex::new(None),
        }
    }

    /// Begin a new subscription: cancels any previous timer and returns
    /// the generation in-flight ticks must present at delivery time.
    pub fn begin(&self) -> u64 {
        let mut task = self.task.lock();
        if let Some(old) = task.take() {
            old.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn attach(&self, handle: tauri::async_runtime::JoinHandle<()>) {
        *self.task.lock() = Some(handle);
    }

    /// End the subscription. The timer stops; ticks already in flight
    /// fail the generation check and are dropped.
    pub fn end(&self) {
        let mut task = self.task.lock();
        if let Some(old) = task.take() {
            old.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

impl Default for UsageStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the 5-second push stream. Ticks follow the wall-clock schedule;
/// a slow fetch never delays the next tick, it just overlaps with it.
/// The first payload arrives one full interval after subscribing, so an
/// unsubscribe before that delivers nothing.
pub fn start(app: AppHandle) {
    let (generation, host) = {
        let state = app.state::<AppState>();
        (state.stream.begin(), state.host.clone())
    };

    let tick = Duration::from_millis(STREAM_TICK_MS);
    let task_app = app.clone();
    let handle = tauri::async_runtime::spawn(async move {
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            spawn_tick(task_app.clone(), host.clone(), generation);
        }
    });
    app.state::<AppState>().stream.attach(handle);
}

/// One stream tick: fetch on a blocking worker, then deliver a data or
/// error event. Ticks are independent; two may run concurrently when the
/// host query outlasts the interval.
fn spawn_tick(app: AppHandle, host: Arc<dyn UsageHost>, generation: u64) {
    tauri::async_runtime::spawn(async move {
        let result = tauri::async_runtime::spawn_blocking(move || -> Result<String, BridgeError> {
            let end_ms = usage::unix_ms();
            let entries = usage::collect_report(host.as_ref(), end_ms.saturating_sub(DAY_MS), end_ms)
                .map_err(BridgeError::usage_query)?;
            serde_json::to_string(&entries).map_err(BridgeError::usage_query)
        })
        .await;

        // Deliver only if this tick's subscription is still the live one.
        if !app.state::<AppState>().stream.is_current(generation) {
            return;
        }
        match result {
            Ok(Ok(payload)) => {
                let _ = app.emit(USAGE_STREAM_EVENT, payload);
            }
            Ok(Err(err)) => {
                log::warn!("usage stream tick failed: {err}");
                let _ = app.emit(USAGE_STREAM_ERROR_EVENT, err);
            }
            Err(join_err) => {
                log::error!("usage stream worker died: {join_err}");
                let _ = app.emit(USAGE_STREAM_ERROR_EVENT, BridgeError::usage_query(join_err));
            }
        }
    });
}
