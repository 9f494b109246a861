use serde::{Deserialize, Serialize};

use crate::types::{ExtractError, ExtractionResult, Method};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    /// Unknown codes fall back to Japanese.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::Ja,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Fallback,
    Error,
}

/// What the user should be told about one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

impl Notice {
    pub fn for_outcome(outcome: &Result<ExtractionResult, ExtractError>, language: Language) -> Self {
        let level = match outcome {
            Ok(result) if result.method == Method::Marker => NoticeLevel::Success,
            Ok(_) => NoticeLevel::Fallback,
            Err(_) => NoticeLevel::Error,
        };
        let message = match (outcome, language) {
            (Ok(result), Language::Ja) => match result.method {
                Method::Marker => "プロンプトを抽出しました",
                Method::Fallback => "プロンプトを抽出しました（従来方式）",
            },
            (Ok(result), Language::En) => match result.method {
                Method::Marker => "Prompt extracted",
                Method::Fallback => "Prompt extracted (legacy mode)",
            },
            (Err(ExtractError::EmptyInput), Language::Ja) => "コピーに失敗しました（空の応答）",
            (Err(ExtractError::EmptyInput), Language::En) => "Copy failed (empty response)",
            (Err(ExtractError::NotFound), Language::Ja) => "プロンプトが見つかりませんでした",
            (Err(ExtractError::NotFound), Language::En) => "No prompt found",
        };
        Self { level, message }
    }
}
