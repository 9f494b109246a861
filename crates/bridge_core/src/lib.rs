//! Prompt bridge core: pure HTML-to-Markdown conversion and prompt extraction.
mod convert;
mod extract;
mod list;
mod notice;
mod patterns;
mod payload;
mod pipeline;
mod tree;
mod types;

pub use convert::{convert, Converter, MarkdownConverter};
pub use extract::extract;
pub use notice::{Language, Notice, NoticeLevel};
pub use patterns::{
    parse_pattern_lines, PatternConfig, DEFAULT_DELIMITERS, DEFAULT_END_MARKER, DEFAULT_KEYWORDS,
    DEFAULT_PHRASES, DEFAULT_START_MARKER,
};
pub use payload::{tag_payload, untag_payload, PAYLOAD_IDENTIFIER};
pub use pipeline::PromptPipeline;
pub use types::{ExtractError, ExtractionResult, Method, Strategy};
