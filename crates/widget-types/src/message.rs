use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Bot,
    Customer,
}

/// Author details attached to bot messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUser {
    pub id: u64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile_photo_url: Option<String>,
}

/// A single entry in the conversation transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub body: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// Set on bot messages
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<String>,
    /// Set on customer messages
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sent_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<MessageUser>,
}

impl Message {
    pub fn customer(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            kind: MessageType::Customer,
            created_at: None,
            sent_at: Some(current_time()),
            user: None,
        }
    }

    /// A bot message. The bot always appears as user 0 with the configured avatar.
    pub fn bot(body: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            body: body.into(),
            kind: MessageType::Bot,
            created_at: Some(current_time()),
            sent_at: None,
            user: Some(MessageUser {
                id: 0,
                email: String::new(),
                profile_photo_url: avatar,
            }),
        }
    }

    /// True for messages the local user sent. A customer-typed message
    /// without `sent_at` is not treated as one.
    pub fn is_customer(&self) -> bool {
        self.sent_at.is_some() && self.kind == MessageType::Customer
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.sent_at.as_deref().or(self.created_at.as_deref())
    }
}

pub fn current_time() -> String {
    chrono::Utc::now().to_rfc3339()
}
