use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::host::{HostError, UsageHost};
use crate::usage::categorize::categorize;
use crate::usage::icon::render_icon;

/// One row of the usage report as delivered to the UI layer.
/// `time_in_foreground` duplicates `usage_millis` for wire compatibility
/// with older consumers of the payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportEntry {
    pub app_name: String,
    pub package_name: String,
    pub icon_base64: String,
    pub usage_millis: i64,
    pub time_in_foreground: i64,
    pub category: String,
    pub date: String,
}

/// Assemble report entries from aggregated totals. Totals of zero or less
/// are skipped. Metadata lookups degrade per field: a failed label lookup
/// drops the entry (the app is gone), a failed icon render leaves the
/// icon empty, a failed category lookup falls back to the keyword tier.
/// Entry order follows the map's iteration order, which is not stable;
/// consumers sort on their side.
pub fn build_report(
    host: &dyn UsageHost,
    totals: &HashMap<String, i64>,
    window_start_ms: i64,
) -> Vec<UsageReportEntry> {
    let date = format_window_start(window_start_ms);
    let mut entries = Vec::new();
    for (package, &total_ms) in totals {
        if total_ms <= 0 {
            continue;
        }
        let app_name = match host.app_label(package) {
            Ok(name) => name,
            Err(HostError::PackageNotFound(_)) => {
                log::warn!("skipping {package}: no longer installed");
                continue;
            }
            Err(err) => {
                log::warn!("skipping {package}: label lookup failed: {err}");
                continue;
            }
        };
        let native_category = host.app_category(package).ok().flatten();
        let entry = UsageReportEntry {
            app_name,
            package_name: package.clone(),
            icon_base64: render_icon(host, package),
            usage_millis: total_ms,
            time_in_foreground: total_ms,
            category: categorize(native_category, package).to_string(),
            date: date.clone(),
        };
        entries.push(entry);
    }
    entries
}

/// UTC ISO-8601 with millisecond precision, e.g. `2026-08-06T00:00:00.000Z`.
pub fn format_window_start(window_start_ms: i64) -> String {
    Utc.timestamp_millis_opt(window_start_ms)
        .earliest()
        .unwrap_or_default()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::MemoryHost;

    fn host_with(packages: &[(&str, &str)]) -> MemoryHost {
        let mut host = MemoryHost::default();
        for (package, label) in packages {
            host.labels.insert(package.to_string(), label.to_string());
        }
        host
    }

    fn totals(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(p, ms)| (p.to_string(), *ms))
            .collect()
    }

    #[test]
    fn non_positive_totals_never_appear() {
        let host = host_with(&[("com.a", "A"), ("com.b", "B"), ("com.c", "C")]);
        let report = build_report(
            &host,
            &totals(&[("com.a", 0), ("com.b", -100), ("com.c", 1)]),
            0,
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].package_name, "com.c");
    }

    #[test]
    fn missing_identity_drops_the_entry_only() {
        let host = host_with(&[("com.kept", "Kept")]);
        let report = build_report(&host, &totals(&[("com.kept", 500), ("com.gone", 500)]), 0);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].app_name, "Kept");
    }

    #[test]
    fn icon_failure_degrades_but_keeps_the_entry() {
        let host = host_with(&[("com.noicon", "No Icon")]);
        let report = build_report(&host, &totals(&[("com.noicon", 500)]), 0);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].icon_base64, "");
        assert_eq!(report[0].usage_millis, 500);
    }

    #[test]
    fn usage_millis_equals_time_in_foreground() {
        let host = host_with(&[("com.whatsapp", "WhatsApp")]);
        let report = build_report(&host, &totals(&[("com.whatsapp", 1234)]), 0);
        assert_eq!(report[0].usage_millis, report[0].time_in_foreground);
    }

    #[test]
    fn native_category_feeds_the_categorizer() {
        let mut host = host_with(&[("com.example.app", "App")]);
        host.categories.insert("com.example.app".to_string(), 0);
        let report = build_report(&host, &totals(&[("com.example.app", 100)]), 0);
        assert_eq!(report[0].category, "Games");
    }

    #[test]
    fn keyword_tier_applies_without_native_category() {
        let host = host_with(&[("com.whatsapp", "WhatsApp"), ("com.unknown.tool", "Tool")]);
        let report = build_report(
            &host,
            &totals(&[("com.whatsapp", 100), ("com.unknown.tool", 100)]),
            0,
        );
        for entry in &report {
            match entry.package_name.as_str() {
                "com.whatsapp" => assert_eq!(entry.category, "Communication"),
                "com.unknown.tool" => assert_eq!(entry.category, "Other"),
                other => panic!("unexpected package {other}"),
            }
        }
    }

    #[test]
    fn date_is_the_window_start_in_utc_millis() {
        let host = host_with(&[("com.a", "A")]);
        let report = build_report(&host, &totals(&[("com.a", 1)]), 1_785_974_400_123);
        assert_eq!(report[0].date, "2026-08-06T00:00:00.123Z");
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let entry = UsageReportEntry {
            app_name: "A".to_string(),
            package_name: "com.a".to_string(),
            icon_base64: String::new(),
            usage_millis: 1,
            time_in_foreground: 1,
            category: "Other".to_string(),
            date: "1970-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&entry).expect("serialize entry");
        for key in [
            "appName",
            "packageName",
            "iconBase64",
            "usageMillis",
            "timeInForeground",
            "category",
            "date",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
    }
}
