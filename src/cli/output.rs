//! Output formatting for CLI commands

use serde::Serialize;

use crate::notification::{DeliveryFailure, DeliveryResult};
use crate::tracker::EventOutcome;

/// 单个事件的输出
#[derive(Debug, Serialize)]
pub struct OutcomeReport {
    /// ignored / rejected / delivered / not_configured / failed
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EventOutcome> for OutcomeReport {
    fn from(outcome: &EventOutcome) -> Self {
        let (status, http_status, error) = match outcome {
            EventOutcome::Ignored => ("ignored", None, None),
            EventOutcome::Rejected(e) => ("rejected", None, Some(e.to_string())),
            EventOutcome::Dispatched(DeliveryResult::Delivered) => ("delivered", None, None),
            EventOutcome::Dispatched(DeliveryResult::NotConfigured) => (
                "not_configured",
                None,
                Some("webhook URL is not configured".to_string()),
            ),
            EventOutcome::Dispatched(DeliveryResult::Failed(reason)) => {
                let code = match reason {
                    DeliveryFailure::HttpStatus(code) => Some(*code),
                    DeliveryFailure::Transport(_) => None,
                };
                ("failed", code, Some(reason.to_string()))
            }
        };
        Self {
            status,
            http_status,
            error,
        }
    }
}

/// Format output as JSON or a single human-readable line
pub fn format_outcome(outcome: &EventOutcome, json: bool) -> String {
    let report = OutcomeReport::from(outcome);
    if json {
        serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string())
    } else {
        match report.error {
            Some(error) => format!("{}: {}", report.status, error),
            None => report.status.to_string(),
        }
    }
}
