use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bridge_core::{Language, PatternConfig};
use bridge_engine::load_pattern_dir;
use bridge_logging::{bridge_info, bridge_warn};
use serde::{Deserialize, Serialize};

use super::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "prompt-bridge.ron";

/// Settings read from `prompt-bridge.ron`; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) language: Language,
    pub(crate) patterns_dir: Option<PathBuf>,
    pub(crate) patterns: Option<PatternConfig>,
    pub(crate) history_file: Option<PathBuf>,
    pub(crate) tag_payload: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            patterns_dir: None,
            patterns: None,
            history_file: None,
            tag_payload: true,
        }
    }
}

/// Loads the config named on the command line, or the default file if present.
///
/// An explicitly named file must exist and parse. The implicit default file
/// is optional and a broken one is logged and ignored.
pub(crate) fn load_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        bridge_info!("Loaded config from {:?}", path);
        return Ok(config);
    }

    let path = Path::new(DEFAULT_CONFIG_FILENAME);
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            bridge_warn!("Failed to read config from {:?}: {}", path, err);
            return Ok(AppConfig::default());
        }
    };
    match ron::from_str(&content) {
        Ok(config) => {
            bridge_info!("Loaded config from {:?}", path);
            Ok(config)
        }
        Err(err) => {
            bridge_warn!("Failed to parse config from {:?}: {}", path, err);
            Ok(AppConfig::default())
        }
    }
}

/// Pattern source precedence: `--patterns-dir`, config `patterns_dir`,
/// inline config `patterns`, built-in defaults.
pub(crate) fn resolve_patterns(cli: &Cli, config: &AppConfig) -> anyhow::Result<PatternConfig> {
    if let Some(dir) = cli.patterns_dir.as_ref().or(config.patterns_dir.as_ref()) {
        return load_pattern_dir(dir)
            .with_context(|| format!("failed to load patterns from {}", dir.display()));
    }
    Ok(config.patterns.clone().unwrap_or_default())
}

pub(crate) fn resolve_language(cli: &Cli, config: &AppConfig) -> Language {
    cli.lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or(config.language)
}

pub(crate) fn resolve_history(cli: &Cli, config: &AppConfig) -> Option<PathBuf> {
    cli.history.clone().or_else(|| config.history_file.clone())
}
