//! Carrier 跳跃追踪 - 宿主事件到 Discord 通知的完整流程
//!
//! 每个事件一个周期：取设置快照 → 翻译 → 发送 → 丢弃。不保留任何历史。

use anyhow::Result;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{CarrierContext, SettingKey, SettingsProvider};
use crate::journal::{self, HostEvent, JournalError, JumpRequestEvent};
use crate::notification::{DeliveryResult, EventTranslator, NotificationDispatcher, TranslateError};

/// 测试消息内容
pub mod test_message {
    pub const SYSTEM_NAME: &str = "TEST - SYSTEM NAME";
    pub const BODY: &str = "TEST - BODY";
    pub const DEPARTURE_TIME: &str = "2025-01-01T12:00:00Z";
}

/// 单个事件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// 不需要通知的事件
    Ignored,
    /// 翻译失败，未发送
    Rejected(TranslateError),
    /// 已尝试发送
    Dispatched(DeliveryResult),
}

/// Carrier 追踪器
pub struct CarrierTracker {
    translator: EventTranslator,
    dispatcher: NotificationDispatcher,
    settings: Box<dyn SettingsProvider>,
}

impl CarrierTracker {
    pub fn new(settings: Box<dyn SettingsProvider>) -> Result<Self> {
        Ok(Self::with_parts(
            EventTranslator::new(),
            NotificationDispatcher::new()?,
            settings,
        ))
    }

    pub fn with_parts(
        translator: EventTranslator,
        dispatcher: NotificationDispatcher,
        settings: Box<dyn SettingsProvider>,
    ) -> Self {
        info!("Fleet carrier tracker instantiated");
        Self {
            translator,
            dispatcher,
            settings,
        }
    }

    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// 设置界面可随时修改，下一次事件生效
    pub fn settings_mut(&mut self) -> &mut dyn SettingsProvider {
        self.settings.as_mut()
    }

    /// 当前设置快照
    pub fn context(&self) -> CarrierContext {
        CarrierContext::snapshot(self.settings.as_ref())
    }

    /// 处理一个宿主事件
    pub fn handle_event(&mut self, event: &HostEvent) -> EventOutcome {
        match event {
            HostEvent::JumpRequested(request) => {
                self.remember_carrier_id(request);
                let ctx = self.context();
                match self.translator.translate_jump_request(request, &ctx) {
                    Ok(payload) => EventOutcome::Dispatched(self.dispatcher.send(&payload, &ctx)),
                    Err(e) => {
                        error!(error = %e, "Jump request not translated, nothing sent");
                        EventOutcome::Rejected(e)
                    }
                }
            }
            HostEvent::JumpCancelled(_) => {
                let ctx = self.context();
                let payload = self.translator.translate_jump_cancelled(&ctx);
                EventOutcome::Dispatched(self.dispatcher.send(&payload, &ctx))
            }
            other => {
                debug!(kind = other.kind(), "Ignoring event");
                EventOutcome::Ignored
            }
        }
    }

    /// 处理 JSON 事件记录
    pub fn handle_value(&mut self, value: &Value) -> Result<EventOutcome, JournalError> {
        let event = HostEvent::from_value(value)?;
        Ok(self.handle_event(&event))
    }

    /// 处理一行 journal 记录
    pub fn handle_line(&mut self, line: &str) -> Result<EventOutcome, JournalError> {
        let event = journal::parse_line(line)?;
        Ok(self.handle_event(&event))
    }

    /// 发送一对测试消息：跳跃请求，一秒后取消
    pub fn send_test_messages(&mut self) -> (EventOutcome, EventOutcome) {
        self.send_test_messages_with_pause(Duration::from_secs(1))
    }

    pub(crate) fn send_test_messages_with_pause(
        &mut self,
        pause: Duration,
    ) -> (EventOutcome, EventOutcome) {
        let request = JumpRequestEvent::new(test_message::SYSTEM_NAME, test_message::DEPARTURE_TIME)
            .with_body(test_message::BODY);
        let first = self.handle_event(&HostEvent::JumpRequested(request));
        thread::sleep(pause);
        let second = self.handle_event(&HostEvent::JumpCancelled(Default::default()));
        (first, second)
    }

    fn remember_carrier_id(&mut self, request: &JumpRequestEvent) {
        let Some(carrier_id) = request.carrier_id.as_ref() else {
            return;
        };
        if self.settings.get(SettingKey::CarrierId).as_ref() == Some(carrier_id) {
            return;
        }
        if let Err(e) = self
            .settings
            .set(SettingKey::CarrierId, Some(carrier_id.clone()))
        {
            warn!(error = %e, "Failed to store carrier id");
        }
    }
}
