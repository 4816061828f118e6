use serde::{Deserialize, Serialize};

/// On-disk app configuration (`config.toml` in the user data dir).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceConfig,
}

/// How to reach the device whose usage statistics we bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// adb binary; a bare name resolves through PATH.
    #[serde(default = "default_adb_path")]
    pub adb_path: String,
    /// Device serial for multi-device setups; omitted means the single
    /// connected device.
    #[serde(default)]
    pub serial: Option<String>,
    /// Companion package whose usage-access grant gates the statistics.
    #[serde(default = "default_package")]
    pub package: String,
}

fn default_adb_path() -> String {
    "adb".to_string()
}

fn default_package() -> String {
    "com.screentime.bridge".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            serial: None,
            package: default_package(),
        }
    }
}

impl AppConfig {
    pub fn default_config() -> Self {
        Self {
            device: DeviceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: AppConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(cfg.device.adb_path, "adb");
        assert_eq!(cfg.device.serial, None);
        assert_eq!(cfg.device.package, "com.screentime.bridge");
    }

    #[test]
    fn partial_device_table_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str("[device]\nserial = \"emulator-5554\"\n")
            .expect("parse partial config");
        assert_eq!(cfg.device.serial.as_deref(), Some("emulator-5554"));
        assert_eq!(cfg.device.adb_path, "adb");
    }

    #[test]
    fn default_config_round_trips() {
        let cfg = AppConfig::default_config();
        let text = toml::to_string_pretty(&cfg).expect("serialize config");
        let back: AppConfig = toml::from_str(&text).expect("reparse config");
        assert_eq!(back.device.package, cfg.device.package);
    }
}
