use std::collections::HashMap;

use crate::host::UsageRecord;

/// Fold raw records into one total per package. The service reports
/// sub-interval buckets, so duplicates are summed, never overwritten.
/// Zero and negative rows participate in the sum; the report builder
/// filters non-positive totals out of the final payload.
pub fn aggregate(records: &[UsageRecord]) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for record in records {
        let total = totals.entry(record.package.clone()).or_default();
        *total = total.saturating_add(record.total_foreground_ms);
    }
    totals
}
