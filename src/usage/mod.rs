pub mod aggregate;
pub mod categorize;
pub mod icon;
pub mod report;

use crate::constants::{DAY_MS, WEEK_MS};
use crate::host::{HostResult, UsageHost};

pub use report::UsageReportEntry;

pub fn unix_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Full fetch/aggregate/categorize/serialize pipeline for one query
/// window. Each call builds its own aggregation state; nothing is shared
/// across concurrent queries. An empty window never reaches the host.
pub fn collect_report(
    host: &dyn UsageHost,
    start_ms: i64,
    end_ms: i64,
) -> HostResult<Vec<UsageReportEntry>> {
    if start_ms >= end_ms {
        return Ok(Vec::new());
    }
    let records = host.query_usage(start_ms, end_ms)?;
    let totals = aggregate::aggregate(&records);
    Ok(report::build_report(host, &totals, start_ms))
}

/// Trailing window for a named interval, ending at `end_ms`. Unknown
/// interval names fall back to daily.
pub fn interval_window(interval: &str, end_ms: i64) -> (i64, i64) {
    let span = match interval {
        "weekly" => WEEK_MS,
        _ => DAY_MS,
    };
    (end_ms.saturating_sub(span), end_ms)
}
