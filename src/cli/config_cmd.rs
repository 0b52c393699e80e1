// src/cli/config_cmd.rs
//! Config 命令 - 查看和修改设置
//!
//! 修改后下一个事件立即生效，无需重启。

use anyhow::Result;
use clap::Subcommand;

use crate::config::{SettingKey, SettingsProvider};

/// Config 子命令
#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前设置（webhook URL 会被遮盖）
    Show,
    /// 修改设置: webhook_url, carrier_info_link
    Set {
        /// 设置名
        key: String,
        /// 设置值
        value: String,
    },
    /// 删除设置
    Unset {
        /// 设置名
        key: String,
    },
}

/// 处理 config 命令
pub fn handle_config(settings: &mut dyn SettingsProvider, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            for key in SettingKey::ALL {
                let value = settings.get(key);
                let shown = match (key, value) {
                    (_, None) => "(not set)".to_string(),
                    (SettingKey::WebhookUrl, Some(url)) => mask_secret(&url),
                    (_, Some(v)) => v,
                };
                println!("{:<18} {}", key.as_str(), shown);
            }
        }
        ConfigAction::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            let value = value.trim().to_string();
            settings.set(key, (!value.is_empty()).then_some(value))?;
            println!("✓ {} updated", key);
        }
        ConfigAction::Unset { key } => {
            let key: SettingKey = key.parse()?;
            settings.set(key, None)?;
            println!("✓ {} removed", key);
        }
    }
    Ok(())
}

/// 只保留前缀，遮盖 webhook token
pub fn mask_secret(value: &str) -> String {
    const VISIBLE: usize = 24;
    let visible: String = value.chars().take(VISIBLE).collect();
    if value.chars().count() <= VISIBLE {
        "*".repeat(value.chars().count())
    } else {
        format!("{}****", visible)
    }
}
