use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub owner: Option<i64>,
    pub name: String,
    pub url: String,
    pub category: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn completion(&self) -> CompletionState {
        CompletionState::from(self.completed)
    }
}

/// Form input for a course that does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub name: String,
    pub url: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Pending,
    Done,
}

impl From<bool> for CompletionState {
    fn from(completed: bool) -> Self {
        if completed {
            CompletionState::Done
        } else {
            CompletionState::Pending
        }
    }
}

impl CompletionState {
    pub fn is_done(self) -> bool {
        self == CompletionState::Done
    }

    pub fn toggled(self) -> Self {
        match self {
            CompletionState::Pending => CompletionState::Done,
            CompletionState::Done => CompletionState::Pending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CompletionState::Pending => "📖",
            CompletionState::Done => "✅",
        }
    }

    /// Label of the button that flips this state.
    pub fn action_label(self) -> &'static str {
        match self {
            CompletionState::Pending => "Mark done",
            CompletionState::Done => "Mark not done",
        }
    }
}

/// Prepends `https://` unless the link already carries an `http://` or
/// `https://` scheme (in any letter case).
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
