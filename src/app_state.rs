use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::host::adb::AdbHost;
use crate::host::UsageHost;
use crate::stream::UsageStream;

pub struct AppState {
    pub config_path: PathBuf,
    pub host: Arc<dyn UsageHost>,
    pub stream: UsageStream,
}

pub fn load_or_init_config(path: &PathBuf) -> anyhow::Result<AppConfig> {
    if path.exists() {
        let txt = std::fs::read_to_string(path)?;
        let cfg: AppConfig = toml::from_str(&txt)?;
        return Ok(cfg);
    }
    let cfg = AppConfig::default_config();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&cfg)?)?;
    Ok(cfg)
}

pub fn build_state(config_path: PathBuf) -> anyhow::Result<AppState> {
    let cfg = load_or_init_config(&config_path)?;
    let host = Arc::new(AdbHost::new(&cfg.device));
    Ok(AppState {
        config_path,
        host,
        stream: UsageStream::new(),
    })
}
