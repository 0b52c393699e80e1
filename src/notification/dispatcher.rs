//! 通知分发器 - 把 payload POST 到 Discord webhook
//!
//! 每次 `send` 是一次独立的阻塞请求：`Idle → Sending → {Delivered | Failed}`。
//! 不重试，需要重试的调用方自行再次调用 `send`。

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use super::discord::WebhookMessage;
use super::payload::NotificationPayload;
use crate::config::CarrierContext;

/// 默认连接超时
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// 默认读取超时
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// 发送失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryFailure {
    /// webhook 返回了 204 以外的状态码
    #[error("webhook responded with HTTP {0}")]
    HttpStatus(u16),
    /// 超时、连接被拒绝、DNS 失败等
    #[error("transport error: {0}")]
    Transport(String),
}

/// 发送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// webhook 返回 204
    Delivered,
    /// 未配置 webhook URL，未发起任何请求
    NotConfigured,
    /// 发送失败
    Failed(DeliveryFailure),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered)
    }
}

/// 分发器配置
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// 通知分发器
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    client: Client,
}

impl NotificationDispatcher {
    /// 使用默认超时创建
    pub fn new() -> Result<Self> {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// 发送 payload 到 `ctx` 中配置的 webhook
    ///
    /// 所有结果都通过返回值表达，不会 panic 或向上传播错误。
    pub fn send(&self, payload: &NotificationPayload, ctx: &CarrierContext) -> DeliveryResult {
        let Some(url) = ctx.webhook_url() else {
            error!(title = %payload.title, "Webhook URL not configured, notification not sent");
            return DeliveryResult::NotConfigured;
        };

        let message = WebhookMessage::from(payload);
        debug!(title = %payload.title, fields = payload.fields().len(), "Sending message to Discord");

        let result = match self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/plain")
            .json(&message)
            .send()
        {
            Ok(response) => {
                let status = response.status();
                // 不读取响应体，立即释放连接
                drop(response);
                if status == StatusCode::NO_CONTENT {
                    DeliveryResult::Delivered
                } else {
                    DeliveryResult::Failed(DeliveryFailure::HttpStatus(status.as_u16()))
                }
            }
            Err(e) => DeliveryResult::Failed(DeliveryFailure::Transport(e.to_string())),
        };

        match &result {
            DeliveryResult::Delivered => {
                info!(title = %payload.title, "Discord message sent successfully");
            }
            DeliveryResult::Failed(reason) => {
                error!(title = %payload.title, error = %reason, "Discord message failed");
            }
            DeliveryResult::NotConfigured => {}
        }

        result
    }
}
