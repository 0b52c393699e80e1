//! 配置层 - webhook URL、carrier 链接等用户设置
//!
//! 设置读取优先级：
//! 1. 环境变量 `FCT_WEBHOOK_URL` / `FCT_CARRIER_INFO_LINK`
//! 2. 配置文件 `~/.config/fleet-carrier-tracker/config.json`
//!
//! 每次翻译/发送前通过 [`CarrierContext::snapshot`] 取一次只读快照，
//! 设置在两次调用之间被修改不需要额外同步。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// 配置文件相对 home 目录的路径
pub const CONFIG_RELATIVE_PATH: &str = ".config/fleet-carrier-tracker/config.json";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown setting '{0}' (expected webhook_url, carrier_info_link or carrier_id)")]
    UnknownKey(String),

    #[error("cannot find home directory")]
    NoHomeDir,
}

/// 设置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Discord webhook URL
    WebhookUrl,
    /// carrier 信息页链接（如 Inara）
    CarrierInfoLink,
    /// 最近一次跳跃请求中的 carrier ID
    CarrierId,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [
        SettingKey::WebhookUrl,
        SettingKey::CarrierInfoLink,
        SettingKey::CarrierId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::WebhookUrl => "webhook_url",
            SettingKey::CarrierInfoLink => "carrier_info_link",
            SettingKey::CarrierId => "carrier_id",
        }
    }

    /// 对应的环境变量覆盖
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            SettingKey::WebhookUrl => Some("FCT_WEBHOOK_URL"),
            SettingKey::CarrierInfoLink => Some("FCT_CARRIER_INFO_LINK"),
            SettingKey::CarrierId => None,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "webhook_url" | "webhook" => Ok(SettingKey::WebhookUrl),
            "carrier_info_link" | "carrier_link" | "inara_url" => Ok(SettingKey::CarrierInfoLink),
            "carrier_id" => Ok(SettingKey::CarrierId),
            _ => Err(ConfigError::UnknownKey(s.to_string())),
        }
    }
}

/// 键值设置提供者
pub trait SettingsProvider {
    /// 读取设置，未设置时返回 `None`
    fn get(&self, key: SettingKey) -> Option<String>;

    /// 写入设置，`None` 表示删除
    fn set(&mut self, key: SettingKey, value: Option<String>) -> Result<(), ConfigError>;
}

/// 内存设置（测试和嵌入宿主使用）
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<SettingKey, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: SettingKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl SettingsProvider for MemorySettings {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SettingKey, value: Option<String>) -> Result<(), ConfigError> {
        match value {
            Some(v) => {
                self.values.insert(key, v);
            }
            None => {
                self.values.remove(&key);
            }
        }
        Ok(())
    }
}

/// 配置文件内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    carrier_info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    carrier_id: Option<String>,
}

impl SettingsFile {
    fn slot(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::WebhookUrl => &mut self.webhook_url,
            SettingKey::CarrierInfoLink => &mut self.carrier_info_link,
            SettingKey::CarrierId => &mut self.carrier_id,
        }
    }

    fn value(&self, key: SettingKey) -> Option<&String> {
        match key {
            SettingKey::WebhookUrl => self.webhook_url.as_ref(),
            SettingKey::CarrierInfoLink => self.carrier_info_link.as_ref(),
            SettingKey::CarrierId => self.carrier_id.as_ref(),
        }
    }
}

/// JSON 文件持久化的设置
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    file: SettingsFile,
    env_overrides: bool,
}

impl SettingsStore {
    /// 默认配置文件路径
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_RELATIVE_PATH))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// 从文件加载，文件不存在时得到空设置
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let file = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            if content.trim().is_empty() {
                SettingsFile::default()
            } else {
                serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            debug!(path = %path.display(), "Config file not found, starting empty");
            SettingsFile::default()
        };

        Ok(Self {
            path,
            file,
            env_overrides: true,
        })
    }

    /// 加载，文件内容损坏时从空设置开始，下次写入会覆盖坏文件
    pub fn load_or_reset(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        match Self::load(path.clone()) {
            Err(e @ ConfigError::Json { .. }) => {
                warn!(error = %e, "Config file is corrupt, starting from empty settings");
                Ok(Self {
                    path,
                    file: SettingsFile::default(),
                    env_overrides: true,
                })
            }
            other => other,
        }
    }

    /// 忽略环境变量覆盖
    pub fn without_env(mut self) -> Self {
        self.env_overrides = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.file).map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl SettingsProvider for SettingsStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        if self.env_overrides {
            if let Some(value) = key.env_var().and_then(|var| std::env::var(var).ok()) {
                if !value.trim().is_empty() {
                    return Some(value);
                }
            }
        }
        self.file.value(key).cloned()
    }

    fn set(&mut self, key: SettingKey, value: Option<String>) -> Result<(), ConfigError> {
        *self.file.slot(key) = value;
        self.save()?;
        debug!(key = %key, path = %self.path.display(), "Setting saved");
        Ok(())
    }
}

/// carrier 上下文快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierContext {
    pub webhook_url: Option<String>,
    pub carrier_info_link: Option<String>,
}

impl CarrierContext {
    pub fn new(webhook_url: Option<String>, carrier_info_link: Option<String>) -> Self {
        Self {
            webhook_url,
            carrier_info_link,
        }
    }

    /// 从设置中读取当前值，空白值视为未设置
    pub fn snapshot(settings: &dyn SettingsProvider) -> Self {
        let non_blank = |key| settings.get(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            webhook_url: non_blank(SettingKey::WebhookUrl),
            carrier_info_link: non_blank(SettingKey::CarrierInfoLink),
        }
    }

    /// 去掉首尾空白后非空的 webhook URL
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// 去掉首尾空白后非空的 carrier 链接
    pub fn carrier_info_link(&self) -> Option<&str> {
        self.carrier_info_link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}
