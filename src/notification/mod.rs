//! 通知层 - carrier 事件翻译与 Discord webhook 发送
//!
//! # 流程
//! 1. `EventTranslator` 把事件 + `CarrierContext` 翻译成 `NotificationPayload`
//! 2. `NotificationDispatcher` 把 payload 序列化为 webhook 格式并发送
//!
//! # 使用示例
//! ```ignore
//! use fleet_carrier_tracker::notification::{EventTranslator, NotificationDispatcher};
//!
//! let payload = EventTranslator::new().translate_jump_cancelled(&ctx);
//! let result = NotificationDispatcher::new()?.send(&payload, &ctx);
//! ```

pub mod discord;
pub mod dispatcher;
pub mod payload;
pub mod translator;

pub use discord::{Embed, EmbedField, WebhookMessage};
pub use dispatcher::{DeliveryFailure, DeliveryResult, DispatcherConfig, NotificationDispatcher};
pub use payload::{NotificationPayload, PayloadField, COLOR_CANCELLED, COLOR_SCHEDULED};
pub use translator::{format_departure_time, EventTranslator, TranslateError};
