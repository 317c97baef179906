use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a markup file and return its content with trailing newline trimmed.
pub fn load_markup(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(content.trim_end_matches('\n').to_string())
}

/// Write markup to a file, creating parent directories if needed.
pub fn save_markup(path: &Path, markup: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut content = markup.to_string();
    content.push('\n');
    fs::write(path, content).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.html");
        save_markup(&path, "ab<strong>cd</strong>").unwrap();
        assert_eq!(load_markup(&path).unwrap(), "ab<strong>cd</strong>");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/doc.html");
        save_markup(&path, "x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn loading_a_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_markup(&dir.path().join("absent.html")).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }
}
