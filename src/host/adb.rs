use std::process::Command;

use crate::config::DeviceConfig;

use super::{dumpsys, HostError, HostResult, UsageHost, UsageRecord};

/// Thin wrapper over the `adb` binary. Every call targets the configured
/// device (or the single connected one) and runs a `shell` subcommand.
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb_path: String,
    serial: Option<String>,
}

impl AdbClient {
    pub fn new(adb_path: &str, serial: Option<&str>) -> Self {
        Self {
            adb_path: adb_path.to_string(),
            serial: serial.map(str::to_string),
        }
    }

    pub fn shell(&self, args: &[&str]) -> HostResult<String> {
        let mut cmd = Command::new(&self.adb_path);
        if let Some(serial) = &self.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd.arg("shell").args(args);
        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            let detail = if detail.is_empty() {
                output.status.to_string()
            } else {
                detail.to_string()
            };
            return Err(HostError::Adb(format!("{}: {detail}", args.join(" "))));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// ADB-backed binding to the device's usage-accounting service. Holds the
/// companion package whose usage-access grant gates the statistics.
pub struct AdbHost {
    client: AdbClient,
    package: String,
}

impl AdbHost {
    pub fn new(device: &DeviceConfig) -> Self {
        Self {
            client: AdbClient::new(&device.adb_path, device.serial.as_deref()),
            package: device.package.clone(),
        }
    }
}

impl UsageHost for AdbHost {
    fn has_permission(&self) -> HostResult<bool> {
        let out = self
            .client
            .shell(&["appops", "get", &self.package, "GET_USAGE_STATS"])?;
        Ok(dumpsys::parse_appops_allowed(&out))
    }

    fn request_permission(&self) -> HostResult<()> {
        // Fire-and-forget: the settings activity gives us no completion
        // signal, so only transport failures surface.
        self.client
            .shell(&["am", "start", "-a", "android.settings.USAGE_ACCESS_SETTINGS"])?;
        Ok(())
    }

    fn query_usage(&self, start_ms: i64, end_ms: i64) -> HostResult<Vec<UsageRecord>> {
        let dump = self.client.shell(&["dumpsys", "usagestats"])?;
        Ok(dumpsys::parse_usage_records(&dump, start_ms, end_ms))
    }

    fn app_label(&self, package: &str) -> HostResult<String> {
        // The shell surface exposes no display label, so the identifier
        // doubles as the name once the package is confirmed installed.
        let out = self.client.shell(&["pm", "list", "packages", package])?;
        if dumpsys::package_listed(&out, package) {
            Ok(package.to_string())
        } else {
            Err(HostError::PackageNotFound(package.to_string()))
        }
    }

    fn app_icon_png(&self, package: &str) -> HostResult<Vec<u8>> {
        // No icon channel over the shell surface; callers degrade.
        Err(HostError::IconUnavailable(package.to_string()))
    }

    fn app_category(&self, package: &str) -> HostResult<Option<i32>> {
        let dump = self.client.shell(&["dumpsys", "package", package])?;
        Ok(dumpsys::parse_app_category(&dump))
    }
}
