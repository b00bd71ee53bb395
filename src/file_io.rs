//! Plain-text script import and export.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenedText {
    pub content: String,
    pub suggested_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedText {
    pub saved_path: PathBuf,
}

pub fn open_text_file(path: &Path) -> Result<OpenedText> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");
    let suggested_name = suggested_name_for(path);
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        name = %suggested_name,
        "Opened script file"
    );
    Ok(OpenedText {
        content,
        suggested_name,
    })
}

pub fn save_text_file(content: &str, path: &Path) -> Result<SavedText> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Saved script file");
    Ok(SavedText {
        saved_path: path.to_path_buf(),
    })
}

/// File name without directories or a trailing `.txt`.
pub fn suggested_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed = match file_name.len().checked_sub(4) {
        Some(cut) if file_name.is_char_boundary(cut) && file_name[cut..].eq_ignore_ascii_case(".txt") => {
            &file_name[..cut]
        }
        _ => file_name.as_str(),
    };
    if trimmed.trim().is_empty() {
        "Imported".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Default export location for a script name.
pub fn export_path_for(name: &str) -> PathBuf {
    let safe: String = name
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | ' ') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim();
    let stem = if safe.is_empty() { "script" } else { safe };
    PathBuf::from(format!("{stem}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("prompter-file-io-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn suggested_name_strips_directories_and_txt() {
        assert_eq!(suggested_name_for(Path::new("/tmp/talks/Keynote.txt")), "Keynote");
        assert_eq!(suggested_name_for(Path::new("notes.TXT")), "notes");
        assert_eq!(suggested_name_for(Path::new("draft.md")), "draft.md");
        assert_eq!(suggested_name_for(Path::new(".txt")), "Imported");
    }

    #[test]
    fn export_path_replaces_unsafe_characters() {
        assert_eq!(export_path_for("Q3/Q4 review"), PathBuf::from("Q3_Q4 review.txt"));
        assert_eq!(export_path_for("  "), PathBuf::from("script.txt"));
    }

    #[test]
    fn saved_text_reopens_with_normalized_newlines() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("Opening.txt");

        let saved = save_text_file("Line one\r\n>>>\r\nLine two", &path).expect("save script");
        assert_eq!(saved.saved_path, path);

        let opened = open_text_file(&path).expect("open script");
        assert_eq!(opened.content, "Line one\n>>>\nLine two");
        assert_eq!(opened.suggested_name, "Opening");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = open_text_file(Path::new("no/such/script.txt")).expect_err("missing file");
        assert!(format!("{err:#}").contains("no/such/script.txt"));
    }
}
