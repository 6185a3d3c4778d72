//! 配置服务
//!
//! 优先级：命令行参数 > 环境变量（含 `.env`）> 配置文件 > 内置默认值。
//! 环境变量由 clap 合并进命令行参数，这里只处理文件与默认值。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;
use whois_lookup_toolbox::{ClientConfig, DEFAULT_TIMEOUT, default_endpoint};

use crate::cli::CommandLine;

const APP_DIR: &str = "whois-lookup";
const CONFIG_FILE: &str = "config.json";

/// 配置文件内容（所有字段可选）
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 命令行 / 环境变量提供的覆盖值
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub endpoint: Option<Url>,
    pub timeout_secs: Option<u64>,
}

impl From<&CommandLine> for Overrides {
    fn from(args: &CommandLine) -> Self {
        Self {
            api_key: args.api_key.clone(),
            endpoint: args.endpoint.clone(),
            timeout_secs: args.timeout,
        }
    }
}

/// 合并后的最终配置
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let endpoint = match (overrides.endpoint, file.endpoint) {
            (Some(url), _) => url,
            (None, Some(raw)) => Url::parse(raw.trim())
                .with_context(|| format!("Invalid endpoint in config file: {raw}"))?,
            (None, None) => default_endpoint(),
        };

        let timeout = match overrides.timeout_secs.or(file.timeout_secs) {
            Some(0) => bail!("Timeout must be at least 1 second"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key,
            endpoint,
            timeout,
        })
    }

    /// Client settings; a missing key is left empty and rejected by the client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone().unwrap_or_default())
            .with_endpoint(self.endpoint.clone())
            .with_timeout(self.timeout)
    }
}

/// `<config dir>/whois-lookup/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// 加载配置文件
///
/// 显式指定的文件必须存在；默认位置的文件不存在时返回空配置。
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return read_file_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => read_file_config(&path),
        _ => Ok(FileConfig::default()),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    tracing::debug!("Loading config from {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
