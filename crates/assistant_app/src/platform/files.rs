//! Reading picked or dropped files, and telling a dropped path from typed text.

use std::fs;
use std::path::{Path, PathBuf};

use assistant_core::SelectedFile;

#[derive(Debug, thiserror::Error)]
pub enum FileReadError {
    #[error("{path:?} is not a regular file")]
    NotAFile { path: PathBuf },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the whole file. Size and type are not checked.
pub fn read_selected_file(path: &Path) -> Result<SelectedFile, FileReadError> {
    let meta = fs::metadata(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(FileReadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, bytes))
}

/// Terminals deliver a file dropped onto the window as pasted text. Returns the
/// path when the pasted text names an existing regular file.
pub fn dropped_path(pasted: &str) -> Option<PathBuf> {
    let candidate = normalize_pasted_path(pasted)?;
    let path = PathBuf::from(candidate);
    path.is_file().then_some(path)
}

/// The file picker only hints at `.csv`; other files are still accepted.
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn normalize_pasted_path(pasted: &str) -> Option<String> {
    let trimmed = pasted.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }
    let unquoted = strip_matching_quotes(trimmed);
    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    // Some terminals escape spaces and parentheses in dropped paths.
    let mut out = String::with_capacity(without_scheme.len());
    let mut chars = without_scheme.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' && !cfg!(windows) {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(ch);
    }
    Some(out)
}

fn strip_matching_quotes(text: &str) -> &str {
    for quote in ['\'', '"'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
