//! regex-lab: try regular expressions against text and keep a usage history.
//!
//! ## Subcommands
//!
//! - `match`: list matches of a pattern in a file or stdin
//! - `replace`: replace every match of a pattern
//! - `words`: word-frequency table of the input
//! - `session`: interactive session whose pattern history accumulates
//! - `config`: show (or write) the configuration

mod input;
mod logging;
mod render;
mod session;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use regex_lab_core::{
    load_config, save_config, word_frequency, LabConfig, LabError, RegexLab, StoragePaths,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "regex-lab")]
#[command(about = "Test regular expressions and remember the ones you use")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every match of PATTERN
    Match {
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Read text from this file instead of stdin
        #[arg(long, short)]
        file: Option<String>,

        /// Show byte offsets of each match
        #[arg(long)]
        positions: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace every match of PATTERN with REPLACEMENT (inserted literally)
    Replace {
        #[arg(value_name = "PATTERN")]
        pattern: String,

        #[arg(value_name = "REPLACEMENT")]
        replacement: String,

        #[arg(long, short)]
        file: Option<String>,
    },

    /// Word-frequency table of the input
    Words {
        #[arg(long, short)]
        file: Option<String>,

        /// How many words to show
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Interactive session (pattern history lasts until you quit)
    Session {
        /// Start with this file's contents as the text
        #[arg(long, short)]
        file: Option<String>,
    },

    /// Print the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        write_default: bool,
    },
}

fn run(cli: Cli, paths: Option<&StoragePaths>, config: LabConfig) -> Result<(), LabError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let io_err = |e: io::Error| LabError::Io {
        context: "writing output".to_string(),
        source: e,
    };

    match cli.command {
        Commands::Match {
            pattern,
            file,
            positions,
            json,
        } => {
            let text = input::read_text(file.as_deref())?;
            let mut lab = RegexLab::with_config(&config);
            lab.matcher().validator().is_valid_strict(&pattern)?;

            if json {
                let found = lab.record_and_locate(&pattern, &text);
                let rendered = serde_json::to_string_pretty(&found).map_err(|e| LabError::Json {
                    context: "serializing matches".to_string(),
                    source: e,
                })?;
                writeln!(out, "{}", rendered).map_err(io_err)?;
            } else if positions {
                let found = lab.record_and_locate(&pattern, &text);
                writeln!(out, "{}", render::positions(&found)).map_err(io_err)?;
            } else {
                let found = lab.record_and_match(&pattern, &text);
                writeln!(out, "{}", render::matches(&found)).map_err(io_err)?;
            }
        }
        Commands::Replace {
            pattern,
            replacement,
            file,
        } => {
            let text = input::read_text(file.as_deref())?;
            let mut lab = RegexLab::with_config(&config);
            lab.matcher().validator().is_valid_strict(&pattern)?;
            if let Some(replaced) = lab.record_and_replace(&pattern, &text, &replacement) {
                write!(out, "{}", replaced).map_err(io_err)?;
            }
        }
        Commands::Words { file, top } => {
            let text = input::read_text(file.as_deref())?;
            let words = word_frequency(&text);
            writeln!(out, "{}", render::word_counts(&words, top)).map_err(io_err)?;
        }
        Commands::Session { file } => {
            let text = match file {
                Some(path) => input::load_file(&path)?.contents,
                None => String::new(),
            };
            let mut session = session::Session::new(config, text);
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut out).map_err(io_err)?;
            info!(
                patterns = session.lab().history().len(),
                "Session ended"
            );
        }
        Commands::Config { write_default } => {
            if write_default {
                let paths = paths.ok_or_else(|| {
                    LabError::InvalidArgument("home directory not found".to_string())
                })?;
                save_config(paths, &LabConfig::default())?;
                writeln!(out, "wrote {}", paths.config_file().display()).map_err(io_err)?;
            }
            let rendered = serde_json::to_string_pretty(&config).map_err(|e| LabError::Json {
                context: "serializing config".to_string(),
                source: e,
            })?;
            writeln!(out, "{}", rendered).map_err(io_err)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let paths = StoragePaths::from_home().ok();
    let _logging_guard = logging::init(paths.as_ref());

    let config = paths.as_ref().map(load_config).unwrap_or_default();

    if let Err(e) = run(cli, paths.as_ref(), config) {
        tracing::error!(error = %e, "regex-lab failed");
        eprintln!("regex-lab: {}", e);
        std::process::exit(1);
    }
}
