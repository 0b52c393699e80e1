//! Fleet Carrier Tracker - 把 carrier 跳跃事件发送到 Discord 频道

pub mod cli;
pub mod config;
pub mod journal;
pub mod notification;
pub mod tracker;

pub use config::{CarrierContext, MemorySettings, SettingKey, SettingsProvider, SettingsStore};
pub use journal::{HostEvent, JumpCancelledEvent, JumpRequestEvent};
pub use notification::{
    DeliveryFailure, DeliveryResult, EventTranslator, NotificationDispatcher, NotificationPayload,
    PayloadField, TranslateError,
};
pub use tracker::{CarrierTracker, EventOutcome};
