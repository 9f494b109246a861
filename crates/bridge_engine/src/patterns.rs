use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bridge_core::{parse_pattern_lines, PatternConfig};
use bridge_logging::{bridge_debug, bridge_info};
use thiserror::Error;

use crate::decode::{decode_text, DecodeError};
use crate::persist::{ensure_dir, write_atomically, PersistError};

pub const PHRASES_FILE: &str = "phrases.txt";
pub const DELIMITERS_FILE: &str = "delimiters.txt";
pub const KEYWORDS_FILE: &str = "keywords.txt";

const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, Error)]
pub enum PatternLoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Builds a [`PatternConfig`] from `phrases.txt`, `delimiters.txt` and
/// `keywords.txt` in `dir`.
///
/// Markers keep their defaults. A missing file yields an empty list.
pub fn load_pattern_dir(dir: &Path) -> Result<PatternConfig, PatternLoadError> {
    let config = PatternConfig::markers_only()
        .with_phrases(read_pattern_file(&dir.join(PHRASES_FILE))?)
        .with_delimiters(read_pattern_file(&dir.join(DELIMITERS_FILE))?)
        .with_keywords(read_pattern_file(&dir.join(KEYWORDS_FILE))?);
    bridge_info!(
        "loaded patterns from {:?}: {} phrases, {} delimiters, {} keywords",
        dir,
        config.phrases.len(),
        config.delimiters.len(),
        config.keywords.len()
    );
    Ok(config)
}

fn read_pattern_file(path: &Path) -> Result<Vec<String>, PatternLoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bridge_debug!("pattern file {:?} missing, using an empty list", path);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PatternLoadError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let decoded = decode_text(&bytes).map_err(|source| PatternLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    bridge_debug!("read {:?} as {}", path, decoded.encoding_label);
    Ok(parse_pattern_lines(&decoded.text))
}

/// Writes the built-in pattern lists into `dir` as UTF-8 with BOM.
///
/// Existing files are left untouched. Returns the paths actually written.
pub fn install_default_patterns(dir: &Path) -> Result<Vec<PathBuf>, PatternLoadError> {
    ensure_dir(dir)?;
    let defaults = PatternConfig::default();
    let mut written = Vec::new();

    for (name, items) in [
        (PHRASES_FILE, &defaults.phrases),
        (DELIMITERS_FILE, &defaults.delimiters),
        (KEYWORDS_FILE, &defaults.keywords),
    ] {
        let path = dir.join(name);
        if path.exists() {
            bridge_debug!("keeping existing pattern file {:?}", path);
            continue;
        }
        let content = format!("{UTF8_BOM}{}\n", items.join("\n"));
        write_atomically(&path, content.as_bytes())?;
        written.push(path);
    }
    Ok(written)
}
