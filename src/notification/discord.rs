//! Discord webhook 线上格式
//!
//! ```json
//! {
//!   "content": "可选前导文本",
//!   "embeds": [{
//!     "title": "...",
//!     "color": 2335683,
//!     "description": "可选",
//!     "fields": [{ "name": "...", "value": "...", "inline": true }]
//!   }]
//! }
//! ```

use serde::Serialize;

use super::payload::{NotificationPayload, PayloadField};

/// webhook 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

/// 富文本 embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl From<&PayloadField> for EmbedField {
    fn from(field: &PayloadField) -> Self {
        Self {
            name: field.label.clone(),
            value: field.value.clone(),
            inline: field.inline,
        }
    }
}

impl From<&NotificationPayload> for WebhookMessage {
    fn from(payload: &NotificationPayload) -> Self {
        Self {
            content: payload.intro_text.clone(),
            embeds: vec![Embed {
                title: payload.title.clone(),
                color: payload.color,
                description: payload.description.clone(),
                fields: payload.fields().iter().map(EmbedField::from).collect(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::payload::COLOR_SCHEDULED;
    use serde_json::json;

    #[test]
    fn test_serialize_full_message() {
        let mut payload = NotificationPayload::new("Carrier jump scheduled to Santy", COLOR_SCHEDULED)
            .with_intro_text("intro")
            .with_description("https://spansh.co.uk/system/1");
        payload.push_field(PayloadField::inline("Destination system:", "Santy"));
        payload.push_field(PayloadField::new("Time of departure from the current system:", "2025-01-01, 12:00"));

        let value = serde_json::to_value(WebhookMessage::from(&payload)).unwrap();

        assert_eq!(
            value,
            json!({
                "content": "intro",
                "embeds": [{
                    "title": "Carrier jump scheduled to Santy",
                    "color": 2335683,
                    "description": "https://spansh.co.uk/system/1",
                    "fields": [
                        {"name": "Destination system:", "value": "Santy", "inline": true},
                        {"name": "Time of departure from the current system:", "value": "2025-01-01, 12:00", "inline": false}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let payload = NotificationPayload::new("t", 1);
        let value = serde_json::to_value(WebhookMessage::from(&payload)).unwrap();

        assert!(value.get("content").is_none());
        assert!(value["embeds"][0].get("description").is_none());
        assert_eq!(value["embeds"][0]["fields"], json!([]));
    }
}
