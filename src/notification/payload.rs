//! 通知 payload - 与目标渠道无关的中间结构
//!
//! 翻译阶段产出 `NotificationPayload`，分发阶段再把它序列化为 webhook 的线上格式。
//!
//! 字段顺序即展示顺序，同一 payload 内字段标签不重复。

use serde::Serialize;

/// "已计划" 状态颜色
pub const COLOR_SCHEDULED: u32 = 2335683;

/// "已取消" 状态颜色
pub const COLOR_CANCELLED: u32 = 13507612;

/// payload 中的单个字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadField {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

impl PayloadField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(label, value)
        }
    }
}

/// 通知 payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// 消息正文前的纯文本（可选）
    pub intro_text: Option<String>,
    /// 标题
    pub title: String,
    /// 颜色代码
    pub color: u32,
    /// 描述 / 链接（可选）
    pub description: Option<String>,
    /// 有序字段列表
    fields: Vec<PayloadField>,
}

impl NotificationPayload {
    /// 创建只有标题和颜色的 payload
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            intro_text: None,
            title: title.into(),
            color,
            description: None,
            fields: Vec::new(),
        }
    }

    /// 设置前导文本
    pub fn with_intro_text(mut self, text: impl Into<String>) -> Self {
        self.intro_text = Some(text.into());
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 追加字段
    ///
    /// 标签已存在时不追加，返回 `false`。
    pub fn push_field(&mut self, field: PayloadField) -> bool {
        if self.field(&field.label).is_some() {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// 按插入顺序返回所有字段
    pub fn fields(&self) -> &[PayloadField] {
        &self.fields
    }

    /// 按标签查找字段
    pub fn field(&self, label: &str) -> Option<&PayloadField> {
        self.fields.iter().find(|f| f.label == label)
    }
}
