pub mod adb;
pub mod dumpsys;

use thiserror::Error;

/// One raw per-app row from the device's usage-accounting service. The
/// service reports sub-interval buckets, so a single package can appear
/// multiple times per query window; callers must sum, never overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub package: String,
    pub total_foreground_ms: i64,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("package not found: {0}")]
    PackageNotFound(String),
    #[error("icon not available for {0}")]
    IconUnavailable(String),
    #[error("icon decode failed: {0}")]
    IconDecode(#[from] image::ImageError),
    #[error("adb invocation failed: {0}")]
    Adb(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type HostResult<T> = Result<T, HostError>;

/// Surface of the device's usage-accounting and package services. The
/// production binding shells out over ADB; tests substitute an in-memory
/// host. All methods are blocking and must be called off the UI runtime.
pub trait UsageHost: Send + Sync {
    /// Whether the companion package holds the usage-access grant.
    fn has_permission(&self) -> HostResult<bool>;

    /// Open the device's usage-access settings surface. Fire-and-forget;
    /// there is no completion signal to observe.
    fn request_permission(&self) -> HostResult<()>;

    /// Per-app foreground totals for `[start_ms, end_ms)`, epoch millis.
    fn query_usage(&self, start_ms: i64, end_ms: i64) -> HostResult<Vec<UsageRecord>>;

    /// Display name for a package. `PackageNotFound` means the app is no
    /// longer installed and the caller should drop its report entry.
    fn app_label(&self, package: &str) -> HostResult<String>;

    /// Raw icon image bytes for a package. `IconUnavailable` is an expected
    /// outcome; callers degrade to an empty icon string.
    fn app_icon_png(&self, package: &str) -> HostResult<Vec<u8>>;

    /// Platform category constant (`ApplicationInfo.category`) when the
    /// device exposes one for this package.
    fn app_category(&self, package: &str) -> HostResult<Option<i32>>;
}


#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory host for pipeline tests. Lookup tables are keyed by
    /// package; a missing label entry behaves like an uninstalled app.
    #[derive(Default)]
    pub(crate) struct MemoryHost {
        pub permission: bool,
        pub records: Vec<UsageRecord>,
        pub labels: HashMap<String, String>,
        pub icons: HashMap<String, Vec<u8>>,
        pub categories: HashMap<String, i32>,
    }

    impl UsageHost for MemoryHost {
        fn has_permission(&self) -> HostResult<bool> {
            Ok(self.permission)
        }

        fn request_permission(&self) -> HostResult<()> {
            Ok(())
        }

        fn query_usage(&self, _start_ms: i64, _end_ms: i64) -> HostResult<Vec<UsageRecord>> {
            Ok(self.records.clone())
        }

        fn app_label(&self, package: &str) -> HostResult<String> {
            self.labels
                .get(package)
                .cloned()
                .ok_or_else(|| HostError::PackageNotFound(package.to_string()))
        }

        fn app_icon_png(&self, package: &str) -> HostResult<Vec<u8>> {
            self.icons
                .get(package)
                .cloned()
                .ok_or_else(|| HostError::IconUnavailable(package.to_string()))
        }

        fn app_category(&self, package: &str) -> HostResult<Option<i32>> {
            Ok(self.categories.get(package).copied())
        }
    }
}
