//! Loading the text that patterns run against.

use std::io::Read;
use std::path::{Path, PathBuf};

use fs_err as fs;
use regex_lab_core::{LabError, Result};
use tracing::info;

/// A text file read fully into memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub contents: String,
}

impl InputFile {
    /// Lowercased extension, or an empty string.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

pub fn load_file(path: &str) -> Result<InputFile> {
    if path.trim().is_empty() {
        return Err(LabError::InvalidArgument(
            "path cannot be empty".to_string(),
        ));
    }

    let path = PathBuf::from(path);
    if !path.is_file() {
        return Err(LabError::FileNotFound(path));
    }

    let contents = fs::read_to_string(&path).map_err(|e| LabError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    info!(file = %path.display(), bytes = contents.len(), "Loaded input file");
    Ok(InputFile {
        name,
        size: contents.len() as u64,
        path,
        contents,
    })
}

/// Text from `--file` when given, otherwise all of stdin.
pub fn read_text(file: Option<&str>) -> Result<String> {
    if let Some(path) = file {
        return load_file(path).map(|f| f.contents);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| LabError::Io {
            context: "reading stdin".to_string(),
            source: e,
        })?;
    Ok(buf)
}
