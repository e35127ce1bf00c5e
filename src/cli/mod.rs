//! CLI module for Notat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Notat - YouTube Study Notes
///
/// Turns a YouTube video into structured Markdown study notes.
/// The name "Notat" comes from the Norwegian/Scandinavian word for "note."
#[derive(Parser, Debug)]
#[command(name = "notat")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub notes: NotesArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default notes invocation.
#[derive(Args, Debug)]
pub struct NotesArgs {
    /// YouTube URL or 11-character video ID
    pub url: Option<String>,

    /// Destination Markdown file
    #[arg(short, long, default_value = "notes.md")]
    pub output: PathBuf,

    /// Language model for summarization
    #[arg(short, long)]
    pub model: Option<String>,

    /// Language hint for transcription (ISO 639-1, e.g. "en")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Maximum chunk size in characters
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Keep the downloaded audio file instead of deleting it
    #[arg(long)]
    pub keep_audio: bool,

    /// Compose the document by stitching chunk notes instead of a final model call
    #[arg(long)]
    pub stitch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
