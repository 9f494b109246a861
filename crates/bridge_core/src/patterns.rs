use serde::{Deserialize, Serialize};

pub const DEFAULT_START_MARKER: &str = "---SOP---";
pub const DEFAULT_END_MARKER: &str = "---EOP---";

pub const DEFAULT_PHRASES: &[&str] = &[
    "ClaudeCodeに投げるプロンプト",
    "プロンプト（完成形）",
    "以下を実行して",
    "以下のプロンプト",
    "以下の指示",
];

pub const DEFAULT_DELIMITERS: &[&str] = &["---"];

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "目的：",
    "前提：",
    "完了条件：",
    "対象：",
    "要件：",
    "作業範囲：",
    "受入条件：",
    "方針：",
    "実装仕様：",
];

/// Sentinels and fallback heuristics used to locate a prompt.
///
/// List order is significant: earlier entries are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub start_marker: String,
    pub end_marker: String,
    pub phrases: Vec<String>,
    pub delimiters: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER.to_owned(),
            end_marker: DEFAULT_END_MARKER.to_owned(),
            phrases: to_owned_list(DEFAULT_PHRASES),
            delimiters: to_owned_list(DEFAULT_DELIMITERS),
            keywords: to_owned_list(DEFAULT_KEYWORDS),
        }
    }
}

impl PatternConfig {
    /// Default markers with no fallback heuristics at all.
    pub fn markers_only() -> Self {
        Self {
            phrases: Vec::new(),
            delimiters: Vec::new(),
            keywords: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_marker = start.into();
        self.end_marker = end.into();
        self
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// One pattern per line; surrounding whitespace and blank lines are dropped.
pub fn parse_pattern_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}
