use std::fmt;

/// Coarse outcome reported to the user: explicit markers or a legacy heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Marker,
    Fallback,
}

/// The concrete strategy that located the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    MarkerPair,
    MarkerStart,
    Phrase,
    Delimiter,
    Keyword,
}

impl Strategy {
    pub fn method(self) -> Method {
        match self {
            Strategy::MarkerPair | Strategy::MarkerStart => Method::Marker,
            Strategy::Phrase | Strategy::Delimiter | Strategy::Keyword => Method::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Trimmed, never empty.
    pub text: String,
    pub method: Method,
    pub strategy: Strategy,
}

impl ExtractionResult {
    pub(crate) fn new(text: String, strategy: Strategy) -> Self {
        Self {
            text,
            method: strategy.method(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("html fragment is empty")]
    EmptyInput,
    #[error("no prompt found")]
    NotFound,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Marker => write!(f, "marker"),
            Method::Fallback => write!(f, "fallback"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::MarkerPair => write!(f, "marker pair"),
            Strategy::MarkerStart => write!(f, "start marker"),
            Strategy::Phrase => write!(f, "phrase"),
            Strategy::Delimiter => write!(f, "delimiter"),
            Strategy::Keyword => write!(f, "keyword"),
        }
    }
}
