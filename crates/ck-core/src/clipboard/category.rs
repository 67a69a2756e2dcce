use serde::{Deserialize, Serialize};

/// Semantic category assigned to an entry at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardCategory {
    Text,
    Url,
    Email,
    Image,
}

impl ClipboardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Email => "email",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for ClipboardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consumer-side filter over the history.
///
/// `All` is a view concept only and never appears on an entry. It hides
/// images, which have their own dedicated filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Text,
    Url,
    Email,
    Image,
}

impl CategoryFilter {
    pub fn matches(&self, category: ClipboardCategory) -> bool {
        match self {
            Self::All => category != ClipboardCategory::Image,
            Self::Text => category == ClipboardCategory::Text,
            Self::Url => category == ClipboardCategory::Url,
            Self::Email => category == ClipboardCategory::Email,
            Self::Image => category == ClipboardCategory::Image,
        }
    }
}
