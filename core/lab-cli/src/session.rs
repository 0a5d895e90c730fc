//! Interactive session: one `RegexLab` whose history lives as long as the session.
//!
//! ## Commands
//!
//! ```text
//! load PATH                        use a file's contents as the text
//! text TEXT                        use TEXT as the text
//! match PATTERN                    list matches (recorded)
//! locate PATTERN                   list matches with byte offsets (recorded)
//! replace PATTERN => REPLACEMENT   replace every match (recorded)
//! record PATTERN                   record a use without matching (strict)
//! recent [N] | search TEXT | top | last
//! remove PATTERN | clear | words [N] | help | quit
//! ```

use std::io::{BufRead, Write};

use regex_lab_core::{HistoryEvent, LabConfig, RegexLab};
use thiserror::Error;
use tracing::info;

use crate::input;
use crate::render;

const REPLACE_SEPARATOR: &str = " => ";
const DEFAULT_WORDS_TOP: usize = 10;
const HELP: &str = "\
commands:
  load PATH                        use a file's contents as the text
  text TEXT                        use TEXT as the text
  match PATTERN                    list matches
  locate PATTERN                   list matches with byte offsets
  replace PATTERN => REPLACEMENT   replace every match
  record PATTERN                   record a pattern without matching
  recent [N]                       most recently used patterns
  search TEXT                      patterns containing TEXT
  top                              most used patterns
  last                             last used pattern
  remove PATTERN                   forget a pattern
  clear                            forget all patterns
  words [N]                        word frequencies of the text
  quit                             leave the session";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a positive number")]
    BadNumber(String),

    #[error("use: replace PATTERN => REPLACEMENT")]
    MissingReplacement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    Text(String),
    Match(String),
    Locate(String),
    Replace { pattern: String, replacement: String },
    Record(String),
    Recent(Option<usize>),
    Search(String),
    Top,
    Last,
    Remove(String),
    Clear,
    Words(Option<usize>),
    Help,
    Quit,
}

fn required(name: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(rest.to_string())
    }
}

fn optional_number(rest: &str) -> Result<Option<usize>, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(None);
    }
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(CommandError::BadNumber(rest.to_string())),
    }
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (line, ""),
    };

    let command = match name {
        "load" => Command::Load(required("load", rest.trim())?),
        "text" => Command::Text(required("text", rest)?),
        "match" => Command::Match(required("match", rest)?),
        "locate" => Command::Locate(required("locate", rest)?),
        "replace" => {
            let (pattern, replacement) = rest
                .rsplit_once(REPLACE_SEPARATOR)
                .ok_or(CommandError::MissingReplacement)?;
            Command::Replace {
                pattern: required("replace", pattern)?,
                replacement: replacement.to_string(),
            }
        }
        "record" => Command::Record(required("record", rest)?),
        "recent" => Command::Recent(optional_number(rest)?),
        "search" => Command::Search(required("search", rest)?),
        "top" => Command::Top,
        "last" => Command::Last,
        "remove" => Command::Remove(required("remove", rest)?),
        "clear" => Command::Clear,
        "words" => Command::Words(optional_number(rest)?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub struct Session {
    lab: RegexLab,
    config: LabConfig,
    text: String,
}

impl Session {
    pub fn new(config: LabConfig, text: String) -> Self {
        let mut lab = RegexLab::with_config(&config);
        lab.subscribe(Box::new(|event: &HistoryEvent| match event {
            HistoryEvent::Recorded(entry) => info!(
                pattern = entry.pattern(),
                usage_count = entry.usage_count(),
                "History updated"
            ),
            HistoryEvent::Removed(entry) => {
                info!(pattern = entry.pattern(), "History entry removed")
            }
            HistoryEvent::Cleared { removed } => info!(removed, "History cleared"),
        }));
        Self { lab, config, text }
    }

    pub fn lab(&self) -> &RegexLab {
        &self.lab
    }

    /// Runs one command. Returns `false` when the session should end.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> std::io::Result<bool> {
        let format = self.config.timestamp_format.clone();
        match command {
            Command::Load(path) => match input::load_file(&path) {
                Ok(file) => {
                    writeln!(
                        out,
                        "loaded {} from {} ({} bytes, {} lines, type '{}')",
                        file.name,
                        file.path.display(),
                        file.size,
                        file.line_count(),
                        file.extension()
                    )?;
                    writeln!(out, "{}", regex_lab_core::summarize(&file.contents, 12))?;
                    self.text = file.contents;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Text(text) => {
                writeln!(out, "text set ({} bytes)", text.len())?;
                self.text = text;
            }
            Command::Match(pattern) => {
                let found = self.lab.record_and_match(&pattern, &self.text);
                self.report_invalid(&pattern, out)?;
                writeln!(out, "{}", render::matches(&found))?;
            }
            Command::Locate(pattern) => {
                let found = self.lab.record_and_locate(&pattern, &self.text);
                self.report_invalid(&pattern, out)?;
                writeln!(out, "{}", render::positions(&found))?;
            }
            Command::Replace {
                pattern,
                replacement,
            } => match self.lab.record_and_replace(&pattern, &self.text, &replacement) {
                Some(replaced) => writeln!(out, "{}", replaced)?,
                None => self.report_invalid(&pattern, out)?,
            },
            Command::Record(pattern) => match self.lab.record_usage(&pattern) {
                Ok(entry) => writeln!(out, "{}", render::history_table(&[entry], &format))?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Recent(limit) => {
                match self
                    .lab
                    .recent_history(limit.unwrap_or(self.config.recent_limit))
                {
                    Ok(entries) => writeln!(out, "{}", render::history_table(&entries, &format))?,
                    Err(err) => writeln!(out, "error: {}", err)?,
                }
            }
            Command::Search(text) => match self.lab.search_history(&text) {
                Ok(entries) => writeln!(out, "{}", render::history_table(&entries, &format))?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Top => {
                let entries = self.lab.most_used();
                writeln!(out, "{}", render::history_table(&entries, &format))?;
            }
            Command::Last => {
                let entries: Vec<_> = self.lab.last_used().into_iter().collect();
                writeln!(out, "{}", render::history_table(&entries, &format))?;
            }
            Command::Remove(pattern) => match self.lab.remove_history(&pattern) {
                Some(entry) => writeln!(out, "removed {}", entry.pattern())?,
                None => writeln!(out, "no history for {}", pattern)?,
            },
            Command::Clear => {
                self.lab.clear_history();
                writeln!(out, "history cleared")?;
            }
            Command::Words(top) => {
                let words = regex_lab_core::word_frequency(&self.text);
                writeln!(
                    out,
                    "{}",
                    render::word_counts(&words, top.unwrap_or(DEFAULT_WORDS_TOP))
                )?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Explains why a fail-soft operation produced nothing.
    fn report_invalid(&self, pattern: &str, out: &mut impl Write) -> std::io::Result<()> {
        if let Err(err) = self.lab.matcher().validator().is_valid_strict(pattern) {
            writeln!(out, "error: {}", err)?;
        }
        Ok(())
    }

    /// Reads commands from `input` until EOF or `quit`.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "regex-lab session (type 'help' for commands)")?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command, out)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => writeln!(out, "error: {}", err)?,
            }
            out.flush()?;
        }
        Ok(())
    }
}
