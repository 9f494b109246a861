use crate::convert::{Converter, MarkdownConverter};
use crate::extract::extract;
use crate::patterns::PatternConfig;
use crate::types::{ExtractError, ExtractionResult};

/// Conversion followed by extraction, the way a bookmark-style caller runs it.
#[derive(Debug, Default, Clone)]
pub struct PromptPipeline<C = MarkdownConverter> {
    converter: C,
}

impl<C: Converter> PromptPipeline<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    pub fn run(
        &self,
        html: &str,
        patterns: &PatternConfig,
    ) -> Result<ExtractionResult, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        let markdown = self.converter.to_markdown(html);
        extract(&markdown, patterns)
    }
}
