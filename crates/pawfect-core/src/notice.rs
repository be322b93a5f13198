//! Transient user-visible notices (toasts).

use serde::{Deserialize, Serialize};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Destructive,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// A destructive notice titled "Error".
    pub fn error(description: impl Into<String>) -> Self {
        Self::destructive("Error", description)
    }

    pub fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
