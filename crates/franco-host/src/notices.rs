//! Customer notices emitted during cart validation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Notice severity, using the host's own type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeKind {
    Notice,
    Error,
    Success,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Notice => "notice",
            NoticeKind::Error => "error",
            NoticeKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Notice {
            message: message.into(),
            kind,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Notice::new(message, NoticeKind::Notice)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::new(message, NoticeKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_json_shape() {
        let json = serde_json::to_value(Notice::error("bad lot")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "bad lot", "type": "error" }));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NoticeKind::Notice.as_str(), "notice");
        assert_eq!(NoticeKind::Success.as_str(), "success");
    }
}
