//! 事件翻译 - 把 carrier 事件转换成 [`NotificationPayload`]
//!
//! 纯函数，无 I/O；唯一的副作用是通过 tracing 报告数据缺失。
//!
//! 两种缺失策略不能混用：
//! - 目标星系名缺失：记录 error 日志，继续生成 payload（标题用占位文本）
//! - 出发时间格式错误：整个翻译失败，返回 [`TranslateError::MalformedTimestamp`]

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{error, warn};

use super::payload::{NotificationPayload, PayloadField, COLOR_CANCELLED, COLOR_SCHEDULED};
use crate::config::CarrierContext;
use crate::journal::JumpRequestEvent;

/// 星系查询服务基础 URL，后接 system address
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://spansh.co.uk/system/";

/// journal 中的出发时间格式
pub const DEPARTURE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 展示给频道的出发时间格式（UTC）
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d, %H:%M";

/// 消息文案
pub mod msg {
    pub const JUMP_REQUEST_INTRO: &str =
        "Fleet Carrier Tracker plugin (FCT) detected a carrier jump request:";
    pub const UNKNOWN_SYSTEM: &str = "an unknown system";
    pub const DESTINATION_SYSTEM: &str = "Destination system:";
    pub const DESTINATION_BODY: &str = "Destination body:";
    pub const DEPARTURE_TIME: &str = "Time of departure from the current system:";
    pub const CARRIER_LINK: &str = "Inara.cz Link for the carrier:";
    pub const CANCELLED_TITLE: &str = "Jump request canceled";
    pub const CANCELLED_DESCRIPTION: &str = "Apologies, the scheduled jump is canceled.\nPlease ignore our previous notification about the jump, we are staying in the same system.";

    pub fn jump_scheduled_title(system: &str) -> String {
        format!("Carrier jump scheduled to {}", system)
    }
}

/// 翻译错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("malformed departure timestamp: '{literal}'")]
    MalformedTimestamp { literal: String },
}

/// 事件翻译器
#[derive(Debug, Clone)]
pub struct EventTranslator {
    lookup_base_url: String,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self {
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
        }
    }

    /// 设置星系查询服务的基础 URL
    pub fn with_lookup_base_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_base_url = url.into();
        self
    }

    /// 翻译跳跃请求
    pub fn translate_jump_request(
        &self,
        event: &JumpRequestEvent,
        ctx: &CarrierContext,
    ) -> Result<NotificationPayload, TranslateError> {
        let departure = match event.departure_time_iso.as_deref() {
            Some(literal) => Some(format_departure_time(literal).map_err(|e| {
                error!(literal = %literal, "Malformed departure time, jump notification dropped");
                e
            })?),
            None => {
                error!("Missing departure time");
                None
            }
        };

        let system_name = event
            .destination_system_name
            .as_deref()
            .filter(|name| !name.trim().is_empty());

        let title = msg::jump_scheduled_title(system_name.unwrap_or(msg::UNKNOWN_SYSTEM));
        let mut payload = NotificationPayload::new(title, COLOR_SCHEDULED)
            .with_intro_text(msg::JUMP_REQUEST_INTRO);

        match system_name {
            Some(name) => {
                payload.push_field(PayloadField::inline(msg::DESTINATION_SYSTEM, name));
            }
            None => error!("Missing destination system"),
        }

        if let Some(body) = event
            .destination_body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
        {
            payload.push_field(PayloadField::inline(msg::DESTINATION_BODY, body));
        }

        if let Some(departure) = departure {
            payload.push_field(PayloadField::new(msg::DEPARTURE_TIME, departure));
        }

        if let Some(link) = self.system_link(event.system_address.as_deref()) {
            payload = payload.with_description(link);
        }

        append_carrier_link(&mut payload, ctx);
        Ok(payload)
    }

    /// 翻译跳跃取消，总是成功
    pub fn translate_jump_cancelled(&self, ctx: &CarrierContext) -> NotificationPayload {
        let mut payload = NotificationPayload::new(msg::CANCELLED_TITLE, COLOR_CANCELLED)
            .with_description(msg::CANCELLED_DESCRIPTION);
        append_carrier_link(&mut payload, ctx);
        payload
    }

    fn system_link(&self, address: Option<&str>) -> Option<String> {
        let address = address?.trim();
        if address.is_empty() || !address.bytes().all(|b| b.is_ascii_digit()) {
            warn!(address = %address, "Ignoring non-numeric system address");
            return None;
        }
        Some(format!("{}{}", self.lookup_base_url, address))
    }
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// 把 `YYYY-MM-DDTHH:MM:SSZ` 转换成 `YYYY-MM-DD, HH:MM`
///
/// 前后带空白的值同样视为格式错误。
pub fn format_departure_time(literal: &str) -> Result<String, TranslateError> {
    let malformed = || TranslateError::MalformedTimestamp {
        literal: literal.to_string(),
    };
    if literal.trim() != literal {
        return Err(malformed());
    }
    NaiveDateTime::parse_from_str(literal, DEPARTURE_TIME_FORMAT)
        .map(|dt| dt.format(DISPLAY_TIME_FORMAT).to_string())
        .map_err(|_| malformed())
}

fn append_carrier_link(payload: &mut NotificationPayload, ctx: &CarrierContext) {
    if let Some(link) = ctx.carrier_info_link() {
        payload.push_field(PayloadField::new(msg::CARRIER_LINK, link));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with_link(link: Option<&str>) -> CarrierContext {
        CarrierContext::new(None, link.map(str::to_string))
    }

    fn labels(payload: &NotificationPayload) -> Vec<&str> {
        payload.fields().iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn test_format_departure_time() {
        assert_eq!(
            format_departure_time("2025-01-01T12:00:00Z").unwrap(),
            "2025-01-01, 12:00"
        );
        assert_eq!(
            format_departure_time("2024-02-29T23:59:59Z").unwrap(),
            "2024-02-29, 23:59"
        );
    }

    #[test]
    fn test_malformed_timestamps_rejected() {
        for literal in [
            "not-a-date",
            "2025-13-40T99:99:99Z",
            "2025-01-01 12:00:00",
            "2025-01-01T12:00:00+01:00",
            " 2025-01-01T12:00:00Z ",
            " 2025-01-01T12:00:00Z",
            "2025-01-01T12:00:00Z\n",
            "",
        ] {
            assert_eq!(
                format_departure_time(literal),
                Err(TranslateError::MalformedTimestamp {
                    literal: literal.to_string()
                }),
                "literal {:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_jump_request_full() {
        let event = JumpRequestEvent::new("Santy", "2025-01-01T12:00:00Z")
            .with_body("Santy A")
            .with_system_address("7230678110938");
        let payload = EventTranslator::new()
            .translate_jump_request(&event, &ctx_with_link(Some("https://inara.cz/carrier/123")))
            .unwrap();

        assert_eq!(payload.title, "Carrier jump scheduled to Santy");
        assert_eq!(payload.color, COLOR_SCHEDULED);
        assert_eq!(payload.intro_text.as_deref(), Some(msg::JUMP_REQUEST_INTRO));
        assert_eq!(
            payload.description.as_deref(),
            Some("https://spansh.co.uk/system/7230678110938")
        );
        assert_eq!(
            labels(&payload),
            vec![
                msg::DESTINATION_SYSTEM,
                msg::DESTINATION_BODY,
                msg::DEPARTURE_TIME,
                msg::CARRIER_LINK
            ]
        );
        assert_eq!(payload.field(msg::DEPARTURE_TIME).unwrap().value, "2025-01-01, 12:00");
        assert!(payload.field(msg::DESTINATION_SYSTEM).unwrap().inline);
        assert!(!payload.field(msg::DEPARTURE_TIME).unwrap().inline);
    }

    #[test]
    fn test_jump_request_without_optional_data() {
        let event = JumpRequestEvent::new("Colonia", "2025-06-30T08:15:00Z");
        let payload = EventTranslator::new()
            .translate_jump_request(&event, &ctx_with_link(None))
            .unwrap();

        assert_eq!(labels(&payload), vec![msg::DESTINATION_SYSTEM, msg::DEPARTURE_TIME]);
        assert!(payload.field(msg::DESTINATION_BODY).is_none());
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_missing_system_name_degrades_to_sentinel() {
        let event = JumpRequestEvent {
            departure_time_iso: Some("2025-01-01T12:00:00Z".to_string()),
            ..Default::default()
        };
        let payload = EventTranslator::new()
            .translate_jump_request(&event, &CarrierContext::default())
            .unwrap();

        assert_eq!(payload.title, "Carrier jump scheduled to an unknown system");
        assert!(payload.field(msg::DESTINATION_SYSTEM).is_none());
        assert!(payload.field(msg::DEPARTURE_TIME).is_some());
    }

    #[test]
    fn test_malformed_time_fails_whole_translation() {
        let event = JumpRequestEvent::new("Santy", "2025-13-40T99:99:99Z").with_body("Santy A");
        let result = EventTranslator::new().translate_jump_request(&event, &CarrierContext::default());

        assert_eq!(
            result,
            Err(TranslateError::MalformedTimestamp {
                literal: "2025-13-40T99:99:99Z".to_string()
            })
        );
    }

    #[test]
    fn test_blank_body_omitted() {
        let translator = EventTranslator::new();
        for body in ["", "  ", "\t"] {
            let event = JumpRequestEvent::new("Sol", "2025-01-01T12:00:00Z").with_body(body);
            let payload = translator
                .translate_jump_request(&event, &CarrierContext::default())
                .unwrap();
            assert!(payload.field(msg::DESTINATION_BODY).is_none(), "body {:?}", body);
            assert_eq!(labels(&payload), vec![msg::DESTINATION_SYSTEM, msg::DEPARTURE_TIME]);
        }
    }

    #[test]
    fn test_blank_carrier_link_omitted() {
        let event = JumpRequestEvent::new("Sol", "2025-01-01T12:00:00Z");
        let payload = EventTranslator::new()
            .translate_jump_request(&event, &ctx_with_link(Some("   \t")))
            .unwrap();
        assert!(payload.field(msg::CARRIER_LINK).is_none());
    }

    #[test]
    fn test_non_numeric_system_address_no_link() {
        let event = JumpRequestEvent::new("Sol", "2025-01-01T12:00:00Z").with_system_address("abc");
        let payload = EventTranslator::new()
            .translate_jump_request(&event, &CarrierContext::default())
            .unwrap();
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_custom_lookup_base_url() {
        let event = JumpRequestEvent::new("Sol", "2025-01-01T12:00:00Z").with_system_address("10477373803");
        let payload = EventTranslator::new()
            .with_lookup_base_url("https://example.test/s/")
            .translate_jump_request(&event, &CarrierContext::default())
            .unwrap();
        assert_eq!(payload.description.as_deref(), Some("https://example.test/s/10477373803"));
    }

    #[test]
    fn test_jump_cancelled_is_idempotent() {
        let translator = EventTranslator::new();
        let ctx = ctx_with_link(Some("https://inara.cz/carrier/123"));

        let first = translator.translate_jump_cancelled(&ctx);
        let second = translator.translate_jump_cancelled(&ctx);

        assert_eq!(first, second);
        assert_eq!(first.title, msg::CANCELLED_TITLE);
        assert_eq!(first.color, COLOR_CANCELLED);
        assert_eq!(first.intro_text, None);
        assert_eq!(first.description.as_deref(), Some(msg::CANCELLED_DESCRIPTION));
        assert_eq!(labels(&first), vec![msg::CARRIER_LINK]);
    }

    #[test]
    fn test_jump_cancelled_without_link_has_no_fields() {
        let payload = EventTranslator::new().translate_jump_cancelled(&CarrierContext::default());
        assert!(payload.fields().is_empty());
    }
}
