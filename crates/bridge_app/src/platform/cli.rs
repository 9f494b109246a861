use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Extract a marked prompt from a chat response.
///
/// Reads an HTML fragment (the inner markup of an assistant message), converts
/// it to Markdown and prints the prompt found between `---SOP---` and
/// `---EOP---`, or located by the configured fallback phrases, delimiters and
/// keywords. The notice goes to stderr; the exit code is 1 when no prompt is
/// found.
#[derive(Parser, Debug, Clone)]
#[command(name = "prompt-bridge")]
#[command(version)]
pub struct Cli {
    /// HTML fragment to read; stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory holding phrases.txt, delimiters.txt and keywords.txt.
    #[arg(long, value_name = "DIR")]
    pub patterns_dir: Option<PathBuf>,

    /// RON configuration file (defaults to ./prompt-bridge.ron when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Record extracted prompts in this JSON history file.
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Notice language: `ja` or `en`.
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Print the converted Markdown and exit without extracting.
    #[arg(long)]
    pub markdown_only: bool,

    /// Print the prompt without the clipboard identifier line.
    #[arg(long)]
    pub raw: bool,

    /// Write the default pattern files into DIR and exit.
    #[arg(long, value_name = "DIR", conflicts_with_all = ["input", "markdown_only"])]
    pub init_patterns: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
