use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use bridge_core::{tag_payload, Converter, MarkdownConverter, Notice, NoticeLevel, PromptPipeline};
use bridge_engine::{decode_text, install_default_patterns, CopyHistory};
use bridge_logging::{bridge_debug, bridge_info, bridge_warn, level_for_verbosity};
use clap::Parser;

use super::cli::Cli;
use super::config::{load_config, resolve_history, resolve_language, resolve_patterns};
use super::logging::{self, LogDestination};

const NOT_FOUND_EXIT: u8 = 1;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, level_for_verbosity(cli.verbose));

    if let Some(dir) = cli.init_patterns.as_deref() {
        return init_patterns(dir);
    }

    let config = load_config(cli.config.as_deref())?;
    let html = read_input(cli.input.as_deref())?;

    if cli.markdown_only {
        let markdown = MarkdownConverter.to_markdown(&html);
        write_stdout(&markdown)?;
        return Ok(ExitCode::SUCCESS);
    }

    let patterns = resolve_patterns(&cli, &config)?;
    let language = resolve_language(&cli, &config);
    let outcome = PromptPipeline::new(MarkdownConverter).run(&html, &patterns);
    let notice = Notice::for_outcome(&outcome, language);

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            bridge_info!("extraction failed: {}", err);
            report(&notice);
            return Ok(ExitCode::from(NOT_FOUND_EXIT));
        }
    };

    bridge_info!(
        "extracted {} bytes via {} ({})",
        result.text.len(),
        result.strategy,
        result.method
    );
    let payload = if cli.raw || !config.tag_payload {
        result.text.clone()
    } else {
        tag_payload(&result.text)
    };
    write_stdout(&payload)?;

    if let Some(path) = resolve_history(&cli, &config) {
        let mut history = CopyHistory::open(&path);
        let now = chrono::Local::now().naive_local();
        if let Err(err) = history.add(&result.text, "", now) {
            bridge_warn!("Failed to record history in {:?}: {}", path, err);
        }
    }

    report(&notice);
    Ok(ExitCode::SUCCESS)
}

fn init_patterns(dir: &Path) -> anyhow::Result<ExitCode> {
    let written = install_default_patterns(dir)
        .with_context(|| format!("failed to install patterns into {}", dir.display()))?;
    if written.is_empty() {
        eprintln!("pattern files already present in {}", dir.display());
    }
    for path in written {
        eprintln!("wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match input {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let decoded = decode_text(&bytes).context("input is not readable text")?;
    bridge_debug!(
        "read {} bytes of html as {}",
        bytes.len(),
        decoded.encoding_label
    );
    Ok(decoded.text)
}

fn write_stdout(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")
}

fn report(notice: &Notice) {
    let label = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Fallback => "fallback",
        NoticeLevel::Error => "error",
    };
    eprintln!("[{label}] {}", notice.message);
}
