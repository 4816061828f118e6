//! Parsers for the text output of the device services the ADB binding
//! shells into (`dumpsys usagestats`, `dumpsys package`, `appops get`,
//! `pm list packages`). The dump format drifted across platform releases,
//! so field names are matched against the known spellings rather than one
//! fixed schema.

use chrono::{Local, NaiveDateTime, TimeZone};

use super::UsageRecord;

/// Field names that have carried the per-package foreground total.
const TOTAL_TIME_KEYS: [&str; 3] = ["totalTimeUsed", "totalTime", "totalTimeInForeground"];

/// Field names that have carried the per-package last-used stamp.
const LAST_TIME_KEYS: [&str; 2] = ["lastTimeUsed", "lastTime"];

/// Extract per-app usage records from a `dumpsys usagestats` dump,
/// keeping rows whose last-used stamp falls inside `[start_ms, end_ms)`.
/// Rows without a parseable stamp are kept; we cannot prove they are
/// outside the window. Sub-interval buckets repeat packages, so the
/// result may contain several records per package.
pub fn parse_usage_records(dump: &str, start_ms: i64, end_ms: i64) -> Vec<UsageRecord> {
    let mut records = Vec::new();
    for line in dump.lines() {
        let trimmed = line.trim();
        if !trimmed.contains("package=") {
            continue;
        }
        let fields = parse_kv_fields(trimmed);
        let Some(package) = lookup(&fields, &["package"]) else {
            continue;
        };
        let Some(total_ms) = lookup(&fields, &TOTAL_TIME_KEYS).and_then(parse_duration_ms) else {
            continue;
        };
        let in_window = match lookup(&fields, &LAST_TIME_KEYS).and_then(parse_local_datetime_ms) {
            Some(last_ms) => start_ms <= last_ms && last_ms < end_ms,
            None => true,
        };
        if !in_window {
            continue;
        }
        records.push(UsageRecord {
            package: package.to_string(),
            total_foreground_ms: total_ms,
        });
    }
    records
}

/// Whether an `appops get <pkg> GET_USAGE_STATS` dump reports the grant.
/// Only an explicit `allow` counts; `default`, `ignore`, `deny` and error
/// chatter all read as not granted.
pub fn parse_appops_allowed(output: &str) -> bool {
    for line in output.lines() {
        let mode = match line.split_once(':') {
            Some((_, rest)) => rest,
            None => line,
        };
        let mode = mode.split(';').next().unwrap_or_default().trim();
        if mode.eq_ignore_ascii_case("allow") || mode.eq_ignore_ascii_case("MODE_ALLOWED") {
            return true;
        }
    }
    false
}

/// First `category=<int>` value in a `dumpsys package <pkg>` dump, i.e. the
/// platform's `ApplicationInfo.category` constant. Absent on older
/// releases and for apps that never declared one.
pub fn parse_app_category(dump: &str) -> Option<i32> {
    for line in dump.lines() {
        for token in line.split_whitespace() {
            if let Some(rest) = token.strip_prefix("category=") {
                let digits: String = rest
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '-')
                    .collect();
                if let Ok(v) = digits.parse::<i32>() {
                    return Some(v);
                }
            }
        }
    }
    None
}

/// Whether a `pm list packages <pkg>` dump names the package itself.
/// `pm` filters by substring, so only an exact `package:<pkg>` line counts.
pub fn package_listed(output: &str, package: &str) -> bool {
    let needle = format!("package:{package}");
    output.lines().any(|line| line.trim() == needle)
}

/// Split a dump line into `key=value` fields. Values may be quoted and
/// contain spaces (`lastTimeUsed="2026-08-06 09:15:00"`); quotes are
/// stripped from the parsed value.
fn parse_kv_fields(line: &str) -> Vec<(&str, &str)> {
    let mut fields = Vec::new();
    let mut rest = line;
    while let Some(eq) = rest.find('=') {
        let key = rest[..eq].rsplit(char::is_whitespace).next().unwrap_or("");
        let after = &rest[eq + 1..];
        let (value, next) = if let Some(stripped) = after.strip_prefix('"') {
            match stripped.find('"') {
                Some(close) => (&stripped[..close], &stripped[close + 1..]),
                None => (stripped, ""),
            }
        } else {
            match after.find(char::is_whitespace) {
                Some(ws) => (&after[..ws], &after[ws..]),
                None => (after, ""),
            }
        };
        if !key.is_empty() {
            fields.push((key, value));
        }
        rest = next;
    }
    fields
}

fn lookup<'a>(fields: &[(&str, &'a str)], keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|k| fields.iter().find(|(key, _)| key == k).map(|(_, v)| *v))
}

/// Durations appear either as raw millis (`totalTime=2500`) or clock
/// style (`totalTimeUsed="1:02:03"`, hours optional).
fn parse_duration_ms(value: &str) -> Option<i64> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if v.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return v.parse::<i64>().ok();
    }
    let parts: Vec<&str> = v.split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    let s: i64 = s.parse().ok()?;
    Some(((h * 60 + m) * 60 + s) * 1000)
}

/// Last-used stamps are device-local wall-clock strings.
fn parse_local_datetime_ms(value: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
