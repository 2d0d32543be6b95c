//! View models returned by action handlers

use super::Page;
use crate::registry::DogRecord;
use crate::score::{ColumnSpec, ScoreTable};
use serde::Serialize;

/// Rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum View {
    /// Sign-in / sign-up
    Login(LoginView),
    /// Dog registration
    DogInfo(DogInfoView),
    /// Score entry
    Scores(ScoreView),
}

impl View {
    /// Which page this is.
    #[must_use]
    pub const fn page(&self) -> Page {
        match self {
            Self::Login(_) => Page::Login,
            Self::DogInfo(_) => Page::DogInfo,
            Self::Scores(_) => Page::Scores,
        }
    }

    /// Inline error, if the action failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Login(v) => v.error.as_deref(),
            Self::DogInfo(v) => v.error.as_deref(),
            Self::Scores(v) => v.error.as_deref(),
        }
    }

    /// Success message consumed from the session flash slot.
    #[must_use]
    pub fn flash(&self) -> Option<&str> {
        match self {
            Self::Login(_) => None,
            Self::DogInfo(v) => v.flash.as_deref(),
            Self::Scores(v) => v.flash.as_deref(),
        }
    }
}

/// Sign-in / sign-up tabs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoginView {
    /// Redirect warning
    pub notice: Option<String>,
    /// Inline form error
    pub error: Option<String>,
}

/// Registration page for the signed-in owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DogInfoView {
    /// "ログイン中: …"
    pub caption: String,
    /// One-shot success message
    pub flash: Option<String>,
    /// Inline form error
    pub error: Option<String>,
    /// "登録済み: N 頭 / 最大 M 頭"
    pub summary: String,
    /// Owner's dogs, oldest first
    pub dogs: Vec<DogRecord>,
    /// Whether the add form is shown
    pub can_add: bool,
    /// Warning shown in place of the add form at the cap
    pub cap_notice: Option<String>,
}

/// Score grid; `table` is the authoritative table at render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    /// Column layout
    pub columns: &'static [ColumnSpec],
    /// Rows to edit
    pub table: ScoreTable,
    /// One-shot success message
    pub flash: Option<String>,
    /// Inline error
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serializes_with_page_tag() {
        let view = View::Login(LoginView {
            notice: Some("ログインが必要です".to_string()),
            error: None,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], "login");
        assert_eq!(json["notice"], "ログインが必要です");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_flash_not_shown_on_login() {
        let view = View::Login(LoginView::default());
        assert_eq!(view.page(), Page::Login);
        assert_eq!(view.flash(), None);
        assert_eq!(view.error(), None);
    }
}
