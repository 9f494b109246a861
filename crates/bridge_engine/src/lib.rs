//! Prompt bridge engine: pattern files, copy history and atomic persistence.
mod decode;
mod history;
mod patterns;
mod persist;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use history::{CopyHistory, HistoryEntry, HistoryError, MAX_ENTRIES, PREVIEW_LENGTH};
pub use patterns::{
    install_default_patterns, load_pattern_dir, PatternLoadError, DELIMITERS_FILE, KEYWORDS_FILE,
    PHRASES_FILE,
};
pub use persist::{ensure_dir, write_atomically, PersistError};
