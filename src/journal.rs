//! 宿主事件解析
//!
//! 同时接受游戏 journal 原始格式（`event: CarrierJumpRequest`, `SystemName`...）
//! 和规范化格式（`kind: JumpRequested`, `destinationSystemName`...）。
//! 未识别的事件类型不报错，解析为 [`HostEvent::Other`]。

use serde_json::Value;
use thiserror::Error;

/// 事件解析错误
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("event record is not a JSON object")]
    NotAnObject,

    #[error("event record has no 'kind' or 'event' discriminator")]
    MissingKind,
}

/// carrier 跳跃请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpRequestEvent {
    pub destination_system_name: Option<String>,
    /// 目标天体，只有目标是主星或预设行星时才有
    pub destination_body: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub departure_time_iso: Option<String>,
    pub system_address: Option<String>,
    pub carrier_id: Option<String>,
}

impl JumpRequestEvent {
    pub fn new(
        destination_system_name: impl Into<String>,
        departure_time_iso: impl Into<String>,
    ) -> Self {
        Self {
            destination_system_name: Some(destination_system_name.into()),
            departure_time_iso: Some(departure_time_iso.into()),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.destination_body = Some(body.into());
        self
    }

    pub fn with_system_address(mut self, address: impl Into<String>) -> Self {
        self.system_address = Some(address.into());
        self
    }
}

/// carrier 跳跃取消，无额外字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpCancelledEvent;

/// 宿主事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    JumpRequested(JumpRequestEvent),
    JumpCancelled(JumpCancelledEvent),
    /// 跳跃完成（暂不处理）
    CarrierJump,
    /// carrier 状态（暂不处理）
    CarrierStats,
    /// 其它事件
    Other(String),
}

impl HostEvent {
    /// 事件类型名
    pub fn kind(&self) -> &str {
        match self {
            HostEvent::JumpRequested(_) => "JumpRequested",
            HostEvent::JumpCancelled(_) => "JumpCancelled",
            HostEvent::CarrierJump => "CarrierJump",
            HostEvent::CarrierStats => "CarrierStats",
            HostEvent::Other(kind) => kind,
        }
    }

    /// 从 JSON 值解析
    pub fn from_value(value: &Value) -> Result<Self, JournalError> {
        let obj = value.as_object().ok_or(JournalError::NotAnObject)?;
        let kind = obj
            .get("kind")
            .or_else(|| obj.get("event"))
            .and_then(Value::as_str)
            .ok_or(JournalError::MissingKind)?;

        let event = match kind {
            "JumpRequested" | "CarrierJumpRequest" => HostEvent::JumpRequested(JumpRequestEvent {
                destination_system_name: text_field(value, &["destinationSystemName", "SystemName"]),
                destination_body: text_field(value, &["destinationBody", "Body"]),
                departure_time_iso: text_field(value, &["departureTimeIso", "DepartureTime"]),
                system_address: text_field(value, &["systemAddress", "SystemAddress"]),
                carrier_id: text_field(value, &["carrierId", "CarrierID"]),
            }),
            "JumpCancelled" | "CarrierJumpCancelled" => {
                HostEvent::JumpCancelled(JumpCancelledEvent)
            }
            "CarrierJump" => HostEvent::CarrierJump,
            "CarrierStats" => HostEvent::CarrierStats,
            other => HostEvent::Other(other.to_string()),
        };

        Ok(event)
    }
}

/// 解析一行 journal 记录
pub fn parse_line(line: &str) -> Result<HostEvent, JournalError> {
    let value: Value = serde_json::from_str(line.trim())?;
    HostEvent::from_value(&value)
}

/// 按候选名依次取字段，数字转成字符串，null 视为不存在
fn text_field(value: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match value.get(*name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
